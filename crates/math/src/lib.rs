//! Math: homogeneous-coordinate vectors, 4×4 matrices, quaternions and interpolation.
//!
//! # Invariants
//! - Matrices are column-major: element `(r, c)` is at flat index `r + 4c`.
//! - Every operation returns a new value; inputs are never mutated.
//! - Quaternions are `Vec4`s in `[w, x, y, z]` order.

mod error;
pub mod interop;
pub mod interp;
mod matrix;
pub mod quat;
pub mod transform;
mod vector;

pub use error::MathError;
pub use interp::{bezier, bezier_split, lerp, qlerp, quaternion_bezier, slerp, spherical_bezier};
pub use matrix::{Mat4, Operand, multiply};
pub use quat::{Quaternion, matrix_from_quaternion, quaternion_from_matrix};
pub use transform::{
    Perspective, look_at, perspective_neg_z, perspective_pos_z, rotate_a_to_b, rotate_axis_angle,
    rotate_x, rotate_y, rotate_z, scale, scale_uniform, translate,
};
pub use vector::{Vec2, Vec3, Vec4, Vector};

pub fn crate_info() -> &'static str {
    "faultscape-math v0.1.0"
}
