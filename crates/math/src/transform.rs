//! Constructors for the homogeneous transforms a renderer needs.
//!
//! All matrices are column-major (see [`Mat4`]) and assume column vectors,
//! so a model-view-projection chain is written `P * V * M`.

use serde::{Deserialize, Serialize};

use crate::{Mat4, MathError, Vec3};

pub fn translate(dx: f32, dy: f32, dz: f32) -> Mat4 {
    Mat4::from_cols_array([
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        dx, dy, dz, 1.0,
    ])
}

pub fn scale(sx: f32, sy: f32, sz: f32) -> Mat4 {
    Mat4::from_cols_array([
        sx, 0.0, 0.0, 0.0, //
        0.0, sy, 0.0, 0.0, //
        0.0, 0.0, sz, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ])
}

pub fn scale_uniform(s: f32) -> Mat4 {
    scale(s, s, s)
}

/// Right-handed rotation about +X by `angle` radians.
pub fn rotate_x(angle: f32) -> Mat4 {
    let (s, c) = angle.sin_cos();
    Mat4::from_cols_array([
        1.0, 0.0, 0.0, 0.0, //
        0.0, c, s, 0.0, //
        0.0, -s, c, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ])
}

/// Right-handed rotation about +Y by `angle` radians.
pub fn rotate_y(angle: f32) -> Mat4 {
    let (s, c) = angle.sin_cos();
    Mat4::from_cols_array([
        c, 0.0, -s, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        s, 0.0, c, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ])
}

/// Right-handed rotation about +Z by `angle` radians.
pub fn rotate_z(angle: f32) -> Mat4 {
    let (s, c) = angle.sin_cos();
    Mat4::from_cols_array([
        c, s, 0.0, 0.0, //
        -s, c, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ])
}

/// Rodrigues rotation about unit axis `r`, given the cosine and sine of the angle.
fn rotation_from_unit_axis(r: Vec3, c: f32, s: f32) -> Mat4 {
    let [x, y, z] = r.0;
    let omc = 1.0 - c;
    let (xy, yz, zx) = (x * y * omc, y * z * omc, z * x * omc);
    Mat4::from_cols_array([
        x * x * omc + c, xy + z * s, zx - y * s, 0.0, //
        xy - z * s, y * y * omc + c, yz + x * s, 0.0, //
        zx + y * s, yz - x * s, z * z * omc + c, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ])
}

/// Rotation by `angle` radians about an arbitrary axis (normalized here).
pub fn rotate_axis_angle(axis: Vec3, angle: f32) -> Result<Mat4, MathError> {
    let r = axis.try_normalize()?;
    let (s, c) = angle.sin_cos();
    Ok(rotation_from_unit_axis(r, c, s))
}

/// Below this sine the inputs of [`rotate_a_to_b`] are treated as parallel.
const PARALLEL_EPSILON: f32 = 1e-6;

/// The minimal rotation taking direction `a` onto direction `b`.
///
/// Parallel inputs give the identity. Antiparallel inputs give a half turn
/// about an axis perpendicular to `a`. Zero-length inputs are an error.
pub fn rotate_a_to_b(a: Vec3, b: Vec3) -> Result<Mat4, MathError> {
    let a = a.try_normalize()?;
    let b = b.try_normalize()?;
    let axis = a.cross(b);
    let s = axis.mag();
    let c = a.dot(b);
    if s > PARALLEL_EPSILON {
        return Ok(rotation_from_unit_axis(axis / s, c, s));
    }
    if c > 0.0 {
        return Ok(Mat4::IDENTITY);
    }
    // pick whichever basis axis is least aligned with `a`
    let helper = if a.x().abs() < 0.9 { Vec3::X } else { Vec3::Y };
    let perpendicular = a.cross(helper).normalize();
    Ok(rotation_from_unit_axis(perpendicular, -1.0, 0.0))
}

/// Orthonormal camera basis: `forward` maps to -Z, `up` to (approximately) +Y.
///
/// `forward` and `up` must not be parallel.
pub fn fix_axes(forward: Vec3, up: Vec3) -> Mat4 {
    let f = forward.normalize();
    let r = f.cross(up).normalize();
    let u = r.cross(f);
    Mat4::from_cols_array([
        r.x(), u.x(), -f.x(), 0.0, //
        r.y(), u.y(), -f.y(), 0.0, //
        r.z(), u.z(), -f.z(), 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ])
}

/// World-to-camera matrix for a camera at `eye` looking at `center`.
pub fn look_at(eye: Vec3, center: Vec3, up: Vec3) -> Mat4 {
    fix_axes(center - eye, up) * translate(-eye.x(), -eye.y(), -eye.z())
}

/// Symmetric perspective projection looking down -Z (OpenGL convention).
///
/// Depth maps `z = -near` to NDC -1 and `z = -far` to NDC +1.
pub fn perspective_neg_z(near: f32, far: f32, fov_y: f32, width: f32, height: f32) -> Mat4 {
    let sy = 1.0 / (fov_y / 2.0).tan();
    let sx = sy * height / width;
    Mat4::from_cols_array([
        sx, 0.0, 0.0, 0.0, //
        0.0, sy, 0.0, 0.0, //
        0.0, 0.0, -(far + near) / (far - near), -1.0, //
        0.0, 0.0, (2.0 * far * near) / (near - far), 0.0,
    ])
}

/// Symmetric perspective projection looking down +Z.
///
/// Depth maps `z = near` to NDC -1 and `z = far` to NDC +1.
pub fn perspective_pos_z(near: f32, far: f32, fov_y: f32, width: f32, height: f32) -> Mat4 {
    let sy = 1.0 / (fov_y / 2.0).tan();
    let sx = sy * height / width;
    Mat4::from_cols_array([
        sx, 0.0, 0.0, 0.0, //
        0.0, sy, 0.0, 0.0, //
        0.0, 0.0, (far + near) / (far - near), 1.0, //
        0.0, 0.0, (2.0 * far * near) / (near - far), 0.0,
    ])
}

/// Perspective projection parameters, refreshed whenever the viewport resizes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Perspective {
    pub near: f32,
    pub far: f32,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for Perspective {
    fn default() -> Self {
        Self {
            near: 0.05,
            far: 5.0,
            fov_y: 1.0,
            width: 1280.0,
            height: 720.0,
        }
    }
}

impl Perspective {
    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// Adopt a new viewport size. A size without positive area is rejected
    /// and the previous size is kept.
    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), MathError> {
        if !(width > 0.0 && height > 0.0) {
            return Err(MathError::EmptyViewport { width, height });
        }
        self.width = width;
        self.height = height;
        Ok(())
    }

    /// Projection matrix in the -Z convention used by [`look_at`].
    pub fn matrix(&self) -> Mat4 {
        perspective_neg_z(self.near, self.far, self.fov_y, self.width, self.height)
    }
}
