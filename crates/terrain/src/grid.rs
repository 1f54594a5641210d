use faultscape_math::{Vec2, Vec3};

use crate::mesh::{Attribute, Mesh, TEXCOORD};
use crate::TerrainError;

/// Largest resolution whose vertex indices still fit in a `u32`.
pub const MAX_RESOLUTION: usize = 65_535;

/// Build an `n`×`n` flat lattice spanning `[-1, 1]²` at `z = 0`.
///
/// Vertex `(xi, yi)` has index `yi * n + xi`. Each cell is split along the
/// diagonal from its `+x` corner to its `+y` corner into two
/// counter-clockwise triangles.
pub fn make_grid(n: usize) -> Result<Mesh, TerrainError> {
    if n < 2 {
        return Err(TerrainError::GridTooSmall(n));
    }
    if n > MAX_RESOLUTION {
        return Err(TerrainError::GridTooLarge(n));
    }

    let span = (n - 1) as f32;
    let lattice = |i: usize| i as f32 / span * 2.0 - 1.0;

    let mut positions = Vec::with_capacity(n * n);
    let mut texcoords = Vec::with_capacity(n * n);
    for yi in 0..n {
        for xi in 0..n {
            let (x, y) = (lattice(xi), lattice(yi));
            positions.push(Vec3::new([x, y, 0.0]));
            texcoords.push(Vec2::new([x, y]));
        }
    }

    let mut mesh = Mesh::new(positions);
    mesh.insert_attribute(TEXCOORD, Attribute::Vec2(texcoords))?;

    let n = n as u32;
    for row in 0..n - 1 {
        for col in 0..n - 1 {
            let i = row * n + col;
            mesh.push_triangle([i, i + 1, i + n])?;
            mesh.push_triangle([i + n, i + 1, i + n + 1])?;
        }
    }

    tracing::debug!(
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "grid built"
    );
    Ok(mesh)
}

/// Lattice coordinate of vertex `index` in a grid of resolution `n`.
pub fn lattice_coords(index: usize, n: usize) -> Vec2 {
    Vec2::new([(index % n) as f32, (index / n) as f32])
}
