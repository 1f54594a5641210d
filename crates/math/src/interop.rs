//! Conversions to and from `glam`, for handing results to a glam-based renderer.
//!
//! Both libraries store `Mat4` column-major, so matrices convert without
//! reordering. Quaternions do not: ours are `[w, x, y, z]`, glam's are
//! `(x, y, z, w)`; use [`to_glam_quat`] / [`from_glam_quat`] for those.

use crate::{Mat4, Quaternion, Vec2, Vec3, Vec4, Vector};

impl From<Mat4> for glam::Mat4 {
    fn from(m: Mat4) -> Self {
        glam::Mat4::from_cols_array(m.as_array())
    }
}

impl From<glam::Mat4> for Mat4 {
    fn from(m: glam::Mat4) -> Self {
        Mat4::from_cols_array(m.to_cols_array())
    }
}

impl From<Vec2> for glam::Vec2 {
    fn from(v: Vec2) -> Self {
        glam::Vec2::from_array(v.0)
    }
}

impl From<glam::Vec2> for Vec2 {
    fn from(v: glam::Vec2) -> Self {
        Vector(v.to_array())
    }
}

impl From<Vec3> for glam::Vec3 {
    fn from(v: Vec3) -> Self {
        glam::Vec3::from_array(v.0)
    }
}

impl From<glam::Vec3> for Vec3 {
    fn from(v: glam::Vec3) -> Self {
        Vector(v.to_array())
    }
}

impl From<Vec4> for glam::Vec4 {
    fn from(v: Vec4) -> Self {
        glam::Vec4::from_array(v.0)
    }
}

impl From<glam::Vec4> for Vec4 {
    fn from(v: glam::Vec4) -> Self {
        Vector(v.to_array())
    }
}

pub fn to_glam_quat(q: Quaternion) -> glam::Quat {
    let [w, x, y, z] = q.0;
    glam::Quat::from_xyzw(x, y, z, w)
}

pub fn from_glam_quat(q: glam::Quat) -> Quaternion {
    Vector([q.w, q.x, q.y, q.z])
}
