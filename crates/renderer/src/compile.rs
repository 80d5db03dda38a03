use std::borrow::Cow;

use wgpu::naga::ShaderStage;

use crate::error::RenderError;

/// Compiles the triangle vertex shader.
pub(crate) fn compile_vertex_shader(device: &wgpu::Device) -> Result<wgpu::ShaderModule, RenderError> {
    compile_stage(device, "triangle vertex", VERTEX_SHADER_GLSL, ShaderStage::Vertex)
}

/// Compiles the probe-sampling fragment shader.
pub(crate) fn compile_fragment_shader(
    device: &wgpu::Device,
) -> Result<wgpu::ShaderModule, RenderError> {
    compile_stage(
        device,
        "probe sampling fragment",
        FRAGMENT_SHADER_GLSL,
        ShaderStage::Fragment,
    )
}

/// Runs the GLSL front end inside a validation error scope so a bad shader
/// surfaces as a typed error carrying the diagnostic instead of tripping the
/// device's uncaptured error handler.
fn compile_stage(
    device: &wgpu::Device,
    label: &str,
    source: &'static str,
    stage: ShaderStage,
) -> Result<wgpu::ShaderModule, RenderError> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Glsl {
            shader: Cow::Borrowed(source),
            stage,
            defines: &[],
        },
    });
    if let Some(err) = pollster::block_on(device.pop_error_scope()) {
        return Err(RenderError::Compilation(format!("{label}: {err}")));
    }
    Ok(module)
}

/// Vertex stage: forwards the buffered clip-space position and texture
/// coordinate. Geometry lives in the vertex buffer, not in this source.
const VERTEX_SHADER_GLSL: &str = r"#version 450
layout(location = 0) in vec2 position;
layout(location = 1) in vec2 uv;
layout(location = 0) out vec2 v_uv;

void main() {
    gl_Position = vec4(position, 0.0, 1.0);
    v_uv = uv;
}
";

/// Fragment stage: samples the probe texture twice at the interpolated
/// coordinate (first sample -> red, second -> green), hardcodes blue to 2.5
/// and alpha to 1.0. The 2.5 intentionally exceeds [0,1] and must reach the
/// float render target unclamped.
const FRAGMENT_SHADER_GLSL: &str = r"#version 450
layout(location = 0) in vec2 v_uv;
layout(location = 0) out vec4 outColor;

layout(set = 0, binding = 0) uniform texture2D probe_texture;
layout(set = 0, binding = 1) uniform sampler probe_sampler;

void main() {
    float first = texture(sampler2D(probe_texture, probe_sampler), v_uv).r;
    float second = texture(sampler2D(probe_texture, probe_sampler), v_uv).r;
    outColor = vec4(first, second, 2.5, 1.0);
}
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_source_reads_geometry_from_buffer_inputs() {
        assert!(VERTEX_SHADER_GLSL.contains("layout(location = 0) in vec2 position"));
        assert!(VERTEX_SHADER_GLSL.contains("layout(location = 1) in vec2 uv"));
        // No embedded constant arrays; geometry comes from the vertex buffer.
        assert!(!VERTEX_SHADER_GLSL.contains("positions["));
        assert!(!VERTEX_SHADER_GLSL.contains("gl_VertexIndex"));
    }

    #[test]
    fn fragment_source_declares_probe_bindings_and_constants() {
        assert!(FRAGMENT_SHADER_GLSL.contains("binding = 0) uniform texture2D probe_texture"));
        assert!(FRAGMENT_SHADER_GLSL.contains("binding = 1) uniform sampler probe_sampler"));
        assert!(FRAGMENT_SHADER_GLSL.contains("2.5"));
        assert_eq!(FRAGMENT_SHADER_GLSL.matches("texture(sampler2D(").count(), 2);
    }
}
