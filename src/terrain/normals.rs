//! Smooth-shading normal generation for indexed triangle meshes.

use glam::Vec3;

use super::mesh::Vertex;

/// Recompute per-vertex normals from the triangles in `indices`.
///
/// Unnormalized face normals are summed into each corner, so larger
/// triangles weigh more, then every sum is normalized. Vertices touched
/// by no triangle keep a zero normal.
pub fn compute_vertex_normals(vertices: &mut [Vertex], indices: &[u32]) {
    let mut sums = vec![Vec3::ZERO; vertices.len()];

    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];

        let pa = Vec3::from_array(vertices[a].position);
        let pb = Vec3::from_array(vertices[b].position);
        let pc = Vec3::from_array(vertices[c].position);

        let face = (pc - pb).cross(pa - pb);

        sums[a] += face;
        sums[b] += face;
        sums[c] += face;
    }

    for (vertex, sum) in vertices.iter_mut().zip(sums) {
        vertex.normal = sum.normalize_or_zero().to_array();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex(position: [f32; 3]) -> Vertex {
        Vertex {
            position,
            normal: [0.0; 3],
            uv: [0.0; 2],
        }
    }

    #[test]
    fn test_single_triangle_faces_up() {
        let mut vertices = vec![
            vertex([0.0, 0.0, 0.0]),
            vertex([0.0, 0.0, 1.0]),
            vertex([1.0, 0.0, 0.0]),
        ];
        compute_vertex_normals(&mut vertices, &[0, 1, 2]);

        for v in &vertices {
            assert!((Vec3::from_array(v.normal) - Vec3::Y).length() < 1e-6);
        }
    }

    #[test]
    fn test_shared_vertex_averages_slopes() {
        // Two triangles folded along the Z axis: a ridge along x = 0
        let mut vertices = vec![
            vertex([0.0, 1.0, 0.0]),
            vertex([0.0, 1.0, 1.0]),
            vertex([1.0, 0.0, 0.0]),
            vertex([-1.0, 0.0, 1.0]),
        ];
        compute_vertex_normals(&mut vertices, &[0, 1, 2, 1, 0, 3]);

        // Ridge vertices see both slopes, so X cancels and the normal points up
        let ridge = Vec3::from_array(vertices[0].normal);
        assert!(ridge.x.abs() < 1e-6);
        assert!((ridge.length() - 1.0).abs() < 1e-6);
        assert!(ridge.y > 0.99);

        // Outer vertices lean away from the ridge
        assert!(vertices[2].normal[0] > 0.0);
        assert!(vertices[3].normal[0] < 0.0);
    }

    #[test]
    fn test_unreferenced_vertex_keeps_zero_normal() {
        let mut vertices = vec![
            vertex([0.0, 0.0, 0.0]),
            vertex([0.0, 0.0, 1.0]),
            vertex([1.0, 0.0, 0.0]),
            vertex([5.0, 5.0, 5.0]),
        ];
        compute_vertex_normals(&mut vertices, &[0, 1, 2]);
        assert_eq!(vertices[3].normal, [0.0; 3]);
    }
}
