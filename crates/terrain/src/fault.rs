use std::f32::consts::TAU;

use faultscape_math::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::mesh::Mesh;

/// A vertical fault plane through `point` with horizontal unit `normal`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fault {
    pub point: Vec3,
    pub normal: Vec3,
}

impl Fault {
    /// Uniform point on `[-1, 1]²` and uniform horizontal direction.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let point = Vec3::new([rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0), 0.0]);
        let angle: f32 = rng.random_range(0.0..TAU);
        let (s, c) = angle.sin_cos();
        Self {
            point,
            normal: Vec3::new([c, s, 0.0]),
        }
    }

    /// True when `b` lies on the raised side (on the plane counts as raised).
    pub fn raises(&self, b: Vec3) -> bool {
        (b - self.point).dot(self.normal) >= 0.0
    }
}

/// Parameters for the fault pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaultParams {
    pub faults: usize,
    /// Displacement of the first fault.
    pub initial_delta: f32,
    /// Factor applied to the displacement after every fault; 1 keeps it constant.
    pub attenuation: f32,
}

impl Default for FaultParams {
    fn default() -> Self {
        Self {
            faults: 100,
            initial_delta: 0.8,
            attenuation: 1.0,
        }
    }
}

/// Axis-aligned min/max accumulator over a set of points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Extent {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for Extent {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Extent {
    pub const EMPTY: Self = Self {
        min: Vec3::new([f32::INFINITY; 3]),
        max: Vec3::new([f32::NEG_INFINITY; 3]),
    };

    pub fn include(&mut self, p: Vec3) {
        for axis in 0..3 {
            self.min[axis] = self.min[axis].min(p[axis]);
            self.max[axis] = self.max[axis].max(p[axis]);
        }
    }

    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Vec3>) -> Self {
        let mut extent = Self::EMPTY;
        for p in points {
            extent.include(*p);
        }
        extent
    }

    pub fn is_empty(&self) -> bool {
        self.min.x() > self.max.x()
    }

    /// Half the x-range: the target vertical size of the terrain.
    pub fn horizontal_half_extent(&self) -> f32 {
        if self.is_empty() {
            return 0.0;
        }
        (self.max.x() - self.min.x()) / 2.0
    }

    pub fn z_span(&self) -> f32 {
        if self.is_empty() {
            return 0.0;
        }
        self.max.z() - self.min.z()
    }
}

/// Displace the mesh heights along `params.faults` random faults.
///
/// Returns the extent of the displaced positions, owned by this call so
/// concurrent generations never share min/max state.
pub fn apply_faults<R: Rng>(mesh: &mut Mesh, params: &FaultParams, rng: &mut R) -> Extent {
    let positions = mesh.positions_mut();
    let mut delta = params.initial_delta;
    for i in 0..params.faults {
        let fault = Fault::random(rng);
        tracing::trace!(fault = i, point = ?fault.point, normal = ?fault.normal, delta, "applying fault");
        for b in positions.iter_mut() {
            if fault.raises(*b) {
                b[2] += delta;
            } else {
                b[2] -= delta;
            }
        }
        delta *= params.attenuation;
    }

    let extent = Extent::from_points(positions.iter());
    tracing::debug!(
        faults = params.faults,
        zmin = extent.min.z(),
        zmax = extent.max.z(),
        "faulting complete"
    );
    extent
}

/// Remap heights from `[zmin, zmax]` onto `[-h/2, h/2]`, `h` being half the x-range.
///
/// Leaves the mesh untouched and returns `false` when either the horizontal
/// extent or the vertical span is zero.
pub fn rescale_heights(mesh: &mut Mesh, extent: &Extent) -> bool {
    let h = extent.horizontal_half_extent();
    let span = extent.z_span();
    if h == 0.0 || span == 0.0 {
        tracing::debug!(h, span, "skipping height rescale");
        return false;
    }
    let zmin = extent.min.z();
    for p in mesh.positions_mut() {
        p[2] = (p[2] - zmin) / span * h - h / 2.0;
    }
    true
}
