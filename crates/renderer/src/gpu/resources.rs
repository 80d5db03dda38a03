use wgpu::util::DeviceExt;

use crate::error::RenderError;
use crate::geometry::TRIANGLE;
use crate::output::BYTES_PER_PIXEL;

/// Number of mip levels for a texture of the given extent: the ceiling of
/// the base-2 logarithm of the larger dimension. A 512x512 texture yields 9.
///
/// Integer arithmetic so non-power-of-two sizes round the same way on every
/// platform; `max(width, height)` is taken before the logarithm.
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    let largest = width.max(height).max(1);
    u32::BITS - (largest - 1).leading_zeros()
}

/// Runs a resource constructor inside validation and out-of-memory error
/// scopes so a refused allocation surfaces as a typed error instead of
/// reaching the device's uncaptured error handler.
pub(crate) fn guarded<T>(
    device: &wgpu::Device,
    what: &str,
    create: impl FnOnce() -> T,
) -> Result<T, RenderError> {
    device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let value = create();
    let validation = pollster::block_on(device.pop_error_scope());
    let out_of_memory = pollster::block_on(device.pop_error_scope());
    if let Some(err) = validation.or(out_of_memory) {
        return Err(RenderError::Setup(format!("{what}: {err}")));
    }
    Ok(value)
}

/// The float color attachment the triangle is rendered into. One mip level;
/// COPY_SRC so the pixels can be read back after the pass.
pub(crate) fn create_render_target(
    device: &wgpu::Device,
    width: u32,
    height: u32,
) -> Result<wgpu::Texture, RenderError> {
    guarded(device, "render target allocation", || {
        device.create_texture(&wgpu::TextureDescriptor {
            label: Some("render target"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT
                | wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        })
    })
}

/// A bindable texture whose full mip chain is derived from its extent. Its
/// contents are never written; sampling it yields zeros. The depth argument
/// only populates the descriptor and plays no part in the mip derivation.
pub(crate) fn create_mip_probe_texture(
    device: &wgpu::Device,
    width: u32,
    height: u32,
    depth: u32,
) -> Result<wgpu::Texture, RenderError> {
    guarded(device, "mip probe allocation", || {
        device.create_texture(&wgpu::TextureDescriptor {
            label: Some("mip probe"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: depth,
            },
            mip_level_count: mip_level_count(width, height),
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        })
    })
}

/// Trilinear sampler with clamped addressing on all axes and an unbounded
/// lod range.
pub(crate) fn create_sampler(device: &wgpu::Device) -> Result<wgpu::Sampler, RenderError> {
    guarded(device, "sampler creation", || {
        device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("trilinear clamp sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            lod_min_clamp: 0.0,
            lod_max_clamp: f32::MAX,
            anisotropy_clamp: 1,
            ..Default::default()
        })
    })
}

pub(crate) fn create_vertex_buffer(device: &wgpu::Device) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("triangle vertices"),
        contents: bytemuck::cast_slice(&TRIANGLE),
        usage: wgpu::BufferUsages::VERTEX,
    })
}

/// Staging buffer the render target is copied into for host readback.
pub(crate) fn create_readback_buffer(
    device: &wgpu::Device,
    width: u32,
    height: u32,
) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("readback staging"),
        size: u64::from(width) * u64::from(height) * u64::from(BYTES_PER_PIXEL),
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mip_count_is_ceil_log2_of_larger_dimension() {
        assert_eq!(mip_level_count(512, 512), 9);
        assert_eq!(mip_level_count(256, 512), 9);
        assert_eq!(mip_level_count(512, 256), 9);
        assert_eq!(mip_level_count(300, 300), 9);
        assert_eq!(mip_level_count(1, 1), 0);
    }

    #[test]
    fn mip_count_handles_unequal_and_odd_dimensions() {
        assert_eq!(mip_level_count(2, 1), 1);
        assert_eq!(mip_level_count(1, 3), 2);
        assert_eq!(mip_level_count(257, 16), 9);
        assert_eq!(mip_level_count(1024, 300), 10);
    }
}
