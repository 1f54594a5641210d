//! Quaternion ↔ rotation-matrix conversion.
//!
//! Quaternions are plain [`Vec4`]s in scalar-first order `[w, x, y, z]`.

use crate::{Mat4, Vec4, Vector};

pub type Quaternion = Vec4;

pub const QUATERNION_IDENTITY: Quaternion = Vector([1.0, 0.0, 0.0, 0.0]);

/// Rotation matrix for `q`; `q` need not be unit length.
///
/// A zero quaternion yields the identity rotation block.
pub fn matrix_from_quaternion(q: Quaternion) -> Mat4 {
    let n = q.dot(q);
    let s = if n != 0.0 { 2.0 / n } else { 0.0 };
    let [w, x, y, z] = q.0;
    let (xx, xy, xz, xw) = (s * x * x, s * x * y, s * x * z, s * x * w);
    let (yy, yz, yw) = (s * y * y, s * y * z, s * y * w);
    let (zz, zw) = (s * z * z, s * z * w);
    Mat4::from_cols_array([
        1.0 - yy - zz, xy + zw, xz - yw, 0.0, //
        xy - zw, 1.0 - xx - zz, yz + xw, 0.0, //
        xz + yw, yz - xw, 1.0 - xx - yy, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ])
}

/// Unit quaternion for the rotation block of `m`.
///
/// Branches on the largest of the trace and the diagonal so the divisor is
/// never close to zero. The sign of the result is arbitrary (`q` and `-q`
/// are the same rotation).
pub fn quaternion_from_matrix(m: &Mat4) -> Quaternion {
    let r = |row, col| m.get(row, col);
    let (a00, a11, a22) = (r(0, 0), r(1, 1), r(2, 2));
    let trace = a00 + a11 + a22;
    let q = if trace > 0.0 {
        Vector([
            trace + 1.0,
            r(2, 1) - r(1, 2),
            r(0, 2) - r(2, 0),
            r(1, 0) - r(0, 1),
        ])
    } else if a00 > a11 && a00 > a22 {
        Vector([
            r(2, 1) - r(1, 2),
            a00 - a11 - a22 + 1.0,
            r(1, 0) + r(0, 1),
            r(0, 2) + r(2, 0),
        ])
    } else if a11 > a22 {
        Vector([
            r(0, 2) - r(2, 0),
            r(1, 0) + r(0, 1),
            a11 - a00 - a22 + 1.0,
            r(2, 1) + r(1, 2),
        ])
    } else {
        Vector([
            r(1, 0) - r(0, 1),
            r(0, 2) + r(2, 0),
            r(2, 1) + r(1, 2),
            a22 - a00 - a11 + 1.0,
        ])
    };
    q.normalize()
}

/// Quaternion for a rotation of `angle` radians about unit `axis`.
pub fn quaternion_from_axis_angle(axis: crate::Vec3, angle: f32) -> Quaternion {
    let (s, c) = (angle / 2.0).sin_cos();
    let [x, y, z] = axis.0;
    Vector([c, x * s, y * s, z * s])
}
