//! Linear, spherical and Bezier interpolation of vectors and quaternions.

use crate::{MathError, Vector};

/// Above this dot product `slerp`/`qlerp` fall back to normalized `lerp`.
pub const SLERP_CLOSENESS: f32 = 0.9999;

/// `p0 * (1 - t) + p1 * t`.
pub fn lerp<const N: usize>(t: f32, p0: Vector<N>, p1: Vector<N>) -> Vector<N> {
    p0 * (1.0 - t) + p1 * t
}

fn arc<const N: usize>(t: f32, q0: Vector<N>, q1: Vector<N>, d: f32) -> Vector<N> {
    if d > SLERP_CLOSENESS {
        return lerp(t, q0, q1).normalize();
    }
    let o = d.clamp(-1.0, 1.0).acos();
    let den = o.sin();
    q0 * (((1.0 - t) * o).sin() / den) + q1 * ((t * o).sin() / den)
}

/// Spherical interpolation along the great circle through `q0` and `q1`.
///
/// Takes whichever arc the dot product implies, which is the long one when
/// `dot(q0, q1) < 0`.
pub fn slerp<const N: usize>(t: f32, q0: Vector<N>, q1: Vector<N>) -> Vector<N> {
    arc(t, q0, q1, q0.dot(q1))
}

/// Like [`slerp`] but flips `q1` when needed so the shorter rotation is used.
pub fn qlerp<const N: usize>(t: f32, q0: Vector<N>, q1: Vector<N>) -> Vector<N> {
    let d = q0.dot(q1);
    if d < 0.0 {
        arc(t, q0, -q1, -d)
    } else {
        arc(t, q0, q1, d)
    }
}

fn de_casteljau<const N: usize>(
    t: f32,
    points: &[Vector<N>],
    step: fn(f32, Vector<N>, Vector<N>) -> Vector<N>,
) -> Result<Vector<N>, MathError> {
    let mut level = points.to_vec();
    while level.len() > 1 {
        level = level.windows(2).map(|w| step(t, w[0], w[1])).collect();
    }
    level.pop().ok_or(MathError::EmptyControlPolygon)
}

/// Bezier curve through control `points` at parameter `t`.
pub fn bezier<const N: usize>(t: f32, points: &[Vector<N>]) -> Result<Vector<N>, MathError> {
    de_casteljau(t, points, lerp)
}

/// Bezier evaluation with every interpolation step replaced by [`slerp`].
pub fn spherical_bezier<const N: usize>(
    t: f32,
    points: &[Vector<N>],
) -> Result<Vector<N>, MathError> {
    de_casteljau(t, points, slerp)
}

/// Bezier evaluation over orientations, using [`qlerp`] at every step.
pub fn quaternion_bezier<const N: usize>(
    t: f32,
    points: &[Vector<N>],
) -> Result<Vector<N>, MathError> {
    de_casteljau(t, points, qlerp)
}

/// Split a Bezier curve at `t` into two control polygons.
///
/// The first covers `[0, t]`, the second `[t, 1]`; both start at their
/// own parameter 0, so the second begins at the split point and ends at the
/// last original control point.
pub fn bezier_split<const N: usize>(
    t: f32,
    points: &[Vector<N>],
) -> (Vec<Vector<N>>, Vec<Vector<N>>) {
    let mut front = Vec::with_capacity(points.len());
    let mut back = Vec::with_capacity(points.len());
    let mut level = points.to_vec();
    while let (Some(&first), Some(&last)) = (level.first(), level.last()) {
        front.push(first);
        back.push(last);
        level = level.windows(2).map(|w| lerp(t, w[0], w[1])).collect();
    }
    back.reverse();
    (front, back)
}
