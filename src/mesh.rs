use bytemuck::{Pod, Zeroable};

/// Floats per interleaved vertex: position.xyz, texcoord.uv, normal.xyz.
pub const FLOATS_PER_VERTEX: usize = 8;
pub const CUBE_VERTEX_COUNT: u32 = 36;
pub const VERTEX_STRIDE: u64 = (FLOATS_PER_VERTEX * std::mem::size_of::<f32>()) as u64;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub tex_coords: [f32; 2],
    pub normal: [f32; 3],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2, 2 => Float32x3];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: VERTEX_STRIDE,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// The cube's vertices viewed as typed records.
pub fn cube_vertices() -> &'static [Vertex] {
    bytemuck::cast_slice(&CUBE_VERTICES)
}

/// Unit cube centred at the origin, two triangles per face, no index buffer.
#[rustfmt::skip]
pub const CUBE_VERTICES: [f32; CUBE_VERTEX_COUNT as usize * FLOATS_PER_VERTEX] = [
    // positions         // uv      // normals
    -0.5, -0.5, -0.5,    0.0, 0.0,   0.0,  0.0, -1.0,
     0.5, -0.5, -0.5,    1.0, 0.0,   0.0,  0.0, -1.0,
     0.5,  0.5, -0.5,    1.0, 1.0,   0.0,  0.0, -1.0,
     0.5,  0.5, -0.5,    1.0, 1.0,   0.0,  0.0, -1.0,
    -0.5,  0.5, -0.5,    0.0, 1.0,   0.0,  0.0, -1.0,
    -0.5, -0.5, -0.5,    0.0, 0.0,   0.0,  0.0, -1.0,

    -0.5, -0.5,  0.5,    0.0, 0.0,   0.0,  0.0,  1.0,
     0.5, -0.5,  0.5,    1.0, 0.0,   0.0,  0.0,  1.0,
     0.5,  0.5,  0.5,    1.0, 1.0,   0.0,  0.0,  1.0,
     0.5,  0.5,  0.5,    1.0, 1.0,   0.0,  0.0,  1.0,
    -0.5,  0.5,  0.5,    0.0, 1.0,   0.0,  0.0,  1.0,
    -0.5, -0.5,  0.5,    0.0, 0.0,   0.0,  0.0,  1.0,

    -0.5,  0.5,  0.5,    1.0, 0.0,  -1.0,  0.0,  0.0,
    -0.5,  0.5, -0.5,    1.0, 1.0,  -1.0,  0.0,  0.0,
    -0.5, -0.5, -0.5,    0.0, 1.0,  -1.0,  0.0,  0.0,
    -0.5, -0.5, -0.5,    0.0, 1.0,  -1.0,  0.0,  0.0,
    -0.5, -0.5,  0.5,    0.0, 0.0,  -1.0,  0.0,  0.0,
    -0.5,  0.5,  0.5,    1.0, 0.0,  -1.0,  0.0,  0.0,

     0.5,  0.5,  0.5,    1.0, 0.0,   1.0,  0.0,  0.0,
     0.5,  0.5, -0.5,    1.0, 1.0,   1.0,  0.0,  0.0,
     0.5, -0.5, -0.5,    0.0, 1.0,   1.0,  0.0,  0.0,
     0.5, -0.5, -0.5,    0.0, 1.0,   1.0,  0.0,  0.0,
     0.5, -0.5,  0.5,    0.0, 0.0,   1.0,  0.0,  0.0,
     0.5,  0.5,  0.5,    1.0, 0.0,   1.0,  0.0,  0.0,

    -0.5, -0.5, -0.5,    0.0, 1.0,   0.0, -1.0,  0.0,
     0.5, -0.5, -0.5,    1.0, 1.0,   0.0, -1.0,  0.0,
     0.5, -0.5,  0.5,    1.0, 0.0,   0.0, -1.0,  0.0,
     0.5, -0.5,  0.5,    1.0, 0.0,   0.0, -1.0,  0.0,
    -0.5, -0.5,  0.5,    0.0, 0.0,   0.0, -1.0,  0.0,
    -0.5, -0.5, -0.5,    0.0, 1.0,   0.0, -1.0,  0.0,

    -0.5,  0.5, -0.5,    0.0, 1.0,   0.0,  1.0,  0.0,
     0.5,  0.5, -0.5,    1.0, 1.0,   0.0,  1.0,  0.0,
     0.5,  0.5,  0.5,    1.0, 0.0,   0.0,  1.0,  0.0,
     0.5,  0.5,  0.5,    1.0, 0.0,   0.0,  1.0,  0.0,
    -0.5,  0.5,  0.5,    0.0, 0.0,   0.0,  1.0,  0.0,
    -0.5,  0.5, -0.5,    0.0, 1.0,   0.0,  1.0,  0.0,
];

#[cfg(test)]
mod tests {
    use glam::{Vec2, Vec3};

    use super::*;

    #[test]
    fn layout_matches_interleaved_floats() {
        assert_eq!(std::mem::size_of::<Vertex>() as u64, VERTEX_STRIDE);
        assert_eq!(VERTEX_STRIDE, 32);
        assert_eq!(cube_vertices().len(), CUBE_VERTEX_COUNT as usize);
        let offsets: Vec<u64> = Vertex::ATTRIBUTES.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0, 12, 20]);
    }

    #[test]
    fn normals_point_outward_and_are_unit() {
        for vertex in cube_vertices() {
            let position = Vec3::from_array(vertex.position);
            let normal = Vec3::from_array(vertex.normal);
            assert!((normal.length() - 1.0).abs() < 1e-6);
            // The face normal component of every corner is exactly half a unit.
            assert!((position.dot(normal) - 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn every_face_spans_the_full_texture() {
        for face in cube_vertices().chunks_exact(6) {
            let uvs: Vec<Vec2> = face.iter().map(|v| Vec2::from_array(v.tex_coords)).collect();
            let min = uvs.iter().copied().reduce(Vec2::min).unwrap();
            let max = uvs.iter().copied().reduce(Vec2::max).unwrap();
            assert_eq!(min, Vec2::ZERO);
            assert_eq!(max, Vec2::ONE);
            assert!(face.iter().all(|v| v.normal == face[0].normal));
        }
    }

    #[test]
    fn positions_stay_on_the_unit_cube() {
        for vertex in cube_vertices() {
            assert!(vertex.position.iter().all(|c| c.abs() == 0.5));
        }
    }
}
