use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::TerrainConfig;
use crate::fault::{Extent, apply_faults, rescale_heights};
use crate::grid::make_grid;
use crate::mesh::Mesh;
use crate::normals::compute_normals;
use crate::TerrainError;

/// Anything that can report a ground height under a horizontal position.
pub trait HeightField {
    /// Height at `(x, y)`, or `None` outside the field.
    fn height_at(&self, x: f32, y: f32) -> Option<f32>;

    /// Horizontal distance between neighbouring samples.
    fn cell_size(&self) -> f32;
}

/// A generated heightfield: the finished mesh plus the lattice it was built on.
#[derive(Debug, Clone, PartialEq)]
pub struct Terrain {
    mesh: Mesh,
    resolution: usize,
    extent: Extent,
}

impl Terrain {
    /// Run the full pipeline: grid, faults, rescale, normals.
    ///
    /// Seeds a [`StdRng`] from `config.seed`, or from the OS when unset.
    pub fn generate(config: &TerrainConfig) -> Result<Self, TerrainError> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::generate_with_rng(config, &mut rng)
    }

    pub fn generate_with_rng<R: Rng>(config: &TerrainConfig, rng: &mut R) -> Result<Self, TerrainError> {
        let _span = tracing::info_span!(
            "terrain_generate",
            resolution = config.resolution,
            faults = config.faults
        )
        .entered();

        let mut mesh = make_grid(config.resolution)?;
        let extent = apply_faults(&mut mesh, &config.fault_params(), rng);
        let rescaled = rescale_heights(&mut mesh, &extent);
        compute_normals(&mut mesh)?;

        tracing::info!(
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            rescaled,
            "terrain generated"
        );
        Ok(Self {
            mesh,
            resolution: config.resolution,
            extent,
        })
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn into_mesh(self) -> Mesh {
        self.mesh
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Extent of the faulted heights before rescaling.
    pub fn extent(&self) -> &Extent {
        &self.extent
    }
}

impl HeightField for Terrain {
    /// Interpolate within the grid triangle under `(x, y)`.
    ///
    /// Each cell is split along its `(1, 0)` to `(0, 1)` diagonal, matching the
    /// mesh triangulation, so the result lies exactly on the rendered surface.
    /// Points on the `+x`/`+y` border fall into the last cell.
    fn height_at(&self, x: f32, y: f32) -> Option<f32> {
        if !(-1.0..=1.0).contains(&x) || !(-1.0..=1.0).contains(&y) {
            return None;
        }
        let n = self.resolution;
        let span = (n - 1) as f32;
        let gx = (x + 1.0) / 2.0 * span;
        let gy = (y + 1.0) / 2.0 * span;
        let col = (gx.floor() as usize).min(n - 2);
        let row = (gy.floor() as usize).min(n - 2);
        let fx = gx - col as f32;
        let fy = gy - row as f32;

        let z = |i: usize| self.mesh.positions()[i].z();
        let i1 = row * n + col;
        let (z1, z2, z3, z4) = (z(i1), z(i1 + 1), z(i1 + n), z(i1 + n + 1));

        let height = if fx + fy < 1.0 {
            z1 + fx * (z2 - z1) + fy * (z3 - z1)
        } else {
            z4 + (1.0 - fx) * (z3 - z4) + (1.0 - fy) * (z2 - z4)
        };
        Some(height)
    }

    fn cell_size(&self) -> f32 {
        2.0 / (self.resolution - 1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::NORMAL;

    fn config(resolution: usize, faults: usize, seed: u64) -> TerrainConfig {
        TerrainConfig {
            resolution,
            faults,
            seed: Some(seed),
            ..TerrainConfig::default()
        }
    }

    #[test]
    fn flat_two_by_two() {
        let t = Terrain::generate(&config(2, 0, 0)).unwrap();
        assert_eq!(t.mesh().vertex_count(), 4);
        assert_eq!(t.mesh().triangle_count(), 2);
        assert!(t.mesh().positions().iter().all(|p| p.z() == 0.0));
        assert!(t.mesh().attribute(NORMAL).is_some());
    }

    #[test]
    fn generated_range_is_half_extent() {
        let t = Terrain::generate(&config(30, 50, 4)).unwrap();
        let h = t.extent().horizontal_half_extent();
        let rescaled = Extent::from_points(t.mesh().positions());
        assert!((rescaled.min.z() + h / 2.0).abs() < 1e-5);
        assert!((rescaled.max.z() - h / 2.0).abs() < 1e-5);
    }

    #[test]
    fn normals_are_unit_and_mostly_up() {
        let t = Terrain::generate(&config(16, 40, 8)).unwrap();
        for n in t.mesh().normals().unwrap() {
            assert!((n.mag() - 1.0).abs() < 1e-5);
            assert!(n.z() > 0.0);
        }
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let a = Terrain::generate(&config(12, 30, 99)).unwrap();
        let b = Terrain::generate(&config(12, 30, 99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn bad_resolution_propagates() {
        assert_eq!(
            Terrain::generate(&config(1, 10, 0)).unwrap_err(),
            TerrainError::GridTooSmall(1)
        );
    }

    #[test]
    fn height_matches_vertices() {
        let t = Terrain::generate(&config(9, 25, 17)).unwrap();
        let n = t.resolution();
        for (i, p) in t.mesh().positions().iter().enumerate() {
            let h = t.height_at(p.x(), p.y()).unwrap();
            assert!((h - p.z()).abs() < 1e-5, "vertex {i} of {n}");
        }
    }

    #[test]
    fn cell_size_matches_lattice() {
        let t = Terrain::generate(&config(5, 0, 0)).unwrap();
        let p = t.mesh().positions();
        assert!((t.cell_size() - (p[1].x() - p[0].x())).abs() < 1e-6);
    }

    #[test]
    fn height_outside_grid_is_none() {
        let t = Terrain::generate(&config(4, 5, 1)).unwrap();
        assert_eq!(t.height_at(1.01, 0.0), None);
        assert_eq!(t.height_at(0.0, -1.5), None);
        assert!(t.height_at(1.0, 1.0).is_some());
    }

    #[test]
    fn height_picks_triangle_by_diagonal() {
        let mut t = Terrain::generate(&config(2, 0, 0)).unwrap();
        // raise only the (+x, +y) corner: the lower-left triangle stays flat
        t.mesh.positions_mut()[3][2] = 1.0;
        assert_eq!(t.height_at(-0.5, -0.5), Some(0.0));
        assert_eq!(t.height_at(1.0, 1.0), Some(1.0));
        // centre of the upper-right triangle: barycentric weight 1/3 on the corner
        let h = t.height_at(1.0 / 3.0, 1.0 / 3.0).unwrap();
        assert!((h - 1.0 / 3.0).abs() < 1e-5);
    }
}
