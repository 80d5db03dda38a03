use bytemuck::{Pod, Zeroable};

/// One triangle vertex: clip-space position plus pass-through texture
/// coordinate. Uploaded as an explicit vertex buffer; the vertex shader
/// declares matching `location = 0/1` inputs.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
}

/// The single hardcoded triangle, indexed 0..2 by vertex id.
pub const TRIANGLE: [Vertex; 3] = [
    Vertex {
        position: [0.0, -0.8],
        uv: [0.5, 0.0],
    },
    Vertex {
        position: [1.0, -1.0],
        uv: [1.0, 1.0],
    },
    Vertex {
        position: [-1.0, -1.0],
        uv: [0.0, 1.0],
    },
];

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2];

    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_has_exactly_three_vertices() {
        assert_eq!(TRIANGLE.len(), 3);
        assert_eq!(TRIANGLE[0].position, [0.0, -0.8]);
        assert_eq!(TRIANGLE[0].uv, [0.5, 0.0]);
    }

    #[test]
    fn vertex_layout_matches_packed_struct() {
        let layout = Vertex::layout();
        assert_eq!(layout.array_stride, 16);
        assert_eq!(layout.attributes.len(), 2);
        assert_eq!(layout.attributes[1].offset, 8);

        let bytes: &[u8] = bytemuck::cast_slice(&TRIANGLE);
        assert_eq!(bytes.len(), 48);
    }
}
