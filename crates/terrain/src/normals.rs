use faultscape_math::Vec3;

use crate::mesh::{Attribute, Mesh, NORMAL};
use crate::{MeshError, TerrainError};

/// Smooth per-vertex normals: the normalized sum of the unnormalized face
/// normals of every incident triangle, which weights larger faces more.
///
/// Fails on a triangle index past the end of `positions`, and on a vertex
/// whose accumulated normal is zero, e.g. one that no triangle references.
pub fn vertex_normals(positions: &[Vec3], triangles: &[[u32; 3]]) -> Result<Vec<Vec3>, TerrainError> {
    let vertex_count = positions.len();
    let mut sums = vec![Vec3::ZERO; vertex_count];
    for (t, triangle) in triangles.iter().enumerate() {
        if let Some(&index) = triangle.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(MeshError::IndexOutOfRange {
                triangle: t,
                index,
                vertex_count,
            }
            .into());
        }
        let [a, b, c] = triangle.map(|i| i as usize);
        let p0 = positions[a];
        let n = (positions[b] - p0).cross(positions[c] - p0);
        for i in [a, b, c] {
            sums[i] = sums[i] + n;
        }
    }
    sums.into_iter()
        .enumerate()
        .map(|(vertex, n)| {
            n.try_normalize()
                .map_err(|_| TerrainError::DegenerateNormal { vertex })
        })
        .collect()
}

/// Compute normals for `mesh` and store them as its `normal` attribute.
pub fn compute_normals(mesh: &mut Mesh) -> Result<(), TerrainError> {
    let normals = vertex_normals(mesh.positions(), mesh.triangles())?;
    mesh.insert_attribute(NORMAL, Attribute::Vec3(normals))?;
    Ok(())
}
