use bytemuck::{Pod, Zeroable};

use crate::shading::QuadWinding;

/// Mesh pass vertex: clip-space position, linear 0..1 color, texture coordinate.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub tex_coords: [f32; 2],
}

impl MeshVertex {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x3, // color
        2 => Float32x2  // tex_coords
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Position-only vertex for geometry that only feeds the depth visualization.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct DepthVertex {
    pub position: [f32; 3],
}

impl DepthVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<DepthVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }

    /// Six vertices covering the clip square, in `winding` order, at z = 0.
    pub fn fullscreen(winding: QuadWinding) -> [DepthVertex; 6] {
        winding.corners().map(|[x, y]| DepthVertex { position: [x, y, 0.0] })
    }
}

/// Demo triangle with a red, a green and a blue corner.
pub const TRIANGLE_VERTICES: [MeshVertex; 3] = [
    MeshVertex { position: [0.0, 0.5, 0.0], color: [1.0, 0.0, 0.0], tex_coords: [0.0, 0.0] },
    MeshVertex { position: [-0.5, -0.5, 0.0], color: [0.0, 1.0, 0.0], tex_coords: [0.0, 1.0] },
    MeshVertex { position: [0.5, -0.5, 0.0], color: [0.0, 0.0, 1.0], tex_coords: [1.0, 1.0] },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mesh_vertex_layout_matches_attribute_contract() {
        let layout = MeshVertex::layout();
        assert_eq!(layout.array_stride, 32);
        let attrs: Vec<_> = layout
            .attributes
            .iter()
            .map(|a| (a.shader_location, a.format, a.offset))
            .collect();
        assert_eq!(
            attrs,
            vec![
                (0, wgpu::VertexFormat::Float32x3, 0),
                (1, wgpu::VertexFormat::Float32x3, 12),
                (2, wgpu::VertexFormat::Float32x2, 24),
            ]
        );
    }

    #[test]
    fn depth_vertex_is_position_only() {
        let layout = DepthVertex::layout();
        assert_eq!(layout.array_stride, 12);
        assert_eq!(layout.attributes.len(), 1);
        assert_eq!(layout.attributes[0].shader_location, 0);
        assert_eq!(layout.attributes[0].format, wgpu::VertexFormat::Float32x3);
    }

    #[test]
    fn fullscreen_depth_vertices_follow_winding() {
        for w in QuadWinding::ALL {
            let verts = DepthVertex::fullscreen(w);
            for (v, c) in verts.iter().zip(w.corners()) {
                assert_eq!(v.position, [c[0], c[1], 0.0]);
            }
        }
    }

    #[test]
    fn triangle_tex_coords_are_normalized() {
        for v in TRIANGLE_VERTICES {
            assert!(v.tex_coords.iter().all(|t| (0.0..=1.0).contains(t)));
            assert!(v.color.iter().all(|c| (0.0..=1.0).contains(c)));
        }
    }
}
