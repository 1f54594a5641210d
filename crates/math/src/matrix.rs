use std::iter::Product;
use std::ops::Mul;

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::{MathError, Vec4, Vector};

/// A 4×4 matrix stored as 16 floats in column-major order.
///
/// Element `(row r, col c)` lives at flat index `r + 4 * c`, which is the
/// layout a column-vector renderer (`M * v`) uploads directly as a uniform.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Mat4 {
    m: [f32; 16],
}

impl Mat4 {
    pub const IDENTITY: Self = Self {
        m: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    pub const ZERO: Self = Self { m: [0.0; 16] };

    /// Wrap 16 values that are already in column-major order.
    pub const fn from_cols_array(m: [f32; 16]) -> Self {
        Self { m }
    }

    pub fn from_cols(c0: Vec4, c1: Vec4, c2: Vec4, c3: Vec4) -> Self {
        let cols = [c0, c1, c2, c3];
        Self {
            m: std::array::from_fn(|i| cols[i >> 2][i & 3]),
        }
    }

    pub fn as_array(&self) -> &[f32; 16] {
        &self.m
    }

    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.m[row + 4 * col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        self.m[row + 4 * col] = value;
    }

    /// The four values of row `r` (strided by 4 in storage).
    pub fn row(&self, r: usize) -> Vec4 {
        Vector(std::array::from_fn(|i| self.m[r + 4 * i]))
    }

    /// The four contiguous values of column `c`.
    pub fn col(&self, c: usize) -> Vec4 {
        Vector(std::array::from_fn(|i| self.m[4 * c + i]))
    }

    pub fn transpose(&self) -> Self {
        Self {
            m: std::array::from_fn(|i| self.m[((i & 3) << 2) | (i >> 2)]),
        }
    }

    /// `self * other`: column `c`, row `r` is `row(r) · other.col(c)`.
    pub fn mul_mat(&self, other: &Mat4) -> Mat4 {
        let mut out = Mat4::ZERO;
        for c in 0..4 {
            let col = other.col(c);
            for r in 0..4 {
                out.m[r + 4 * c] = self.row(r).dot(col);
            }
        }
        out
    }

    /// `self * v` with `v` as a column vector.
    pub fn mul_vec(&self, v: Vec4) -> Vec4 {
        Vector(std::array::from_fn(|r| self.row(r).dot(v)))
    }

    /// `v * self` with `v` as a row vector; component `c` is `v · col(c)`.
    pub fn vec_mul(&self, v: Vec4) -> Vec4 {
        Vector(std::array::from_fn(|c| v.dot(self.col(c))))
    }

    /// Transform a point (`w = 1`) and return the xyz part without dividing by `w`.
    pub fn transform_point(&self, p: crate::Vec3) -> crate::Vec3 {
        self.mul_vec(p.extend(1.0)).truncate()
    }

    /// Transform a direction (`w = 0`).
    pub fn transform_vector(&self, v: crate::Vec3) -> crate::Vec3 {
        self.mul_vec(v.extend(0.0)).truncate()
    }

    /// Largest absolute elementwise difference, for tolerance comparisons.
    pub fn max_abs_diff(&self, other: &Mat4) -> f32 {
        self.m
            .iter()
            .zip(other.m.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f32::max)
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Mat4 {
        self.mul_mat(&rhs)
    }
}

impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    fn mul(self, rhs: Vec4) -> Vec4 {
        self.mul_vec(rhs)
    }
}

impl Mul<Mat4> for Vec4 {
    type Output = Vec4;

    fn mul(self, rhs: Mat4) -> Vec4 {
        rhs.vec_mul(self)
    }
}

impl Product for Mat4 {
    fn product<I: Iterator<Item = Mat4>>(iter: I) -> Mat4 {
        iter.fold(Mat4::IDENTITY, |acc, m| acc.mul_mat(&m))
    }
}

impl<'a> Product<&'a Mat4> for Mat4 {
    fn product<I: Iterator<Item = &'a Mat4>>(iter: I) -> Mat4 {
        iter.fold(Mat4::IDENTITY, |acc, m| acc.mul_mat(m))
    }
}

/// One factor of an n-ary product: either a matrix or a vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand {
    Matrix(Mat4),
    Vector(Vec4),
}

impl From<Mat4> for Operand {
    fn from(m: Mat4) -> Self {
        Operand::Matrix(m)
    }
}

impl From<Vec4> for Operand {
    fn from(v: Vec4) -> Self {
        Operand::Vector(v)
    }
}

impl Operand {
    pub fn into_matrix(self) -> Option<Mat4> {
        match self {
            Operand::Matrix(m) => Some(m),
            Operand::Vector(_) => None,
        }
    }

    pub fn into_vector(self) -> Option<Vec4> {
        match self {
            Operand::Vector(v) => Some(v),
            Operand::Matrix(_) => None,
        }
    }

    fn times(self, rhs: Operand) -> Result<Operand, MathError> {
        match (self, rhs) {
            (Operand::Matrix(a), Operand::Matrix(b)) => Ok(Operand::Matrix(a.mul_mat(&b))),
            (Operand::Matrix(a), Operand::Vector(v)) => Ok(Operand::Vector(a.mul_vec(v))),
            (Operand::Vector(v), Operand::Matrix(b)) => Ok(Operand::Vector(b.vec_mul(v))),
            (Operand::Vector(_), Operand::Vector(_)) => Err(MathError::VectorTimesVector),
        }
    }
}

/// Multiply operands strictly left to right: `multiply(&[p, v, m, x])` is `P·V·M·x`.
///
/// A single operand is returned unchanged.
pub fn multiply(operands: &[Operand]) -> Result<Operand, MathError> {
    let (first, rest) = operands.split_first().ok_or(MathError::EmptyProduct)?;
    rest.iter().try_fold(*first, |acc, &next| acc.times(next))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::{rotate_z, scale, translate};

    fn sample() -> Mat4 {
        Mat4::from_cols_array(std::array::from_fn(|i| i as f32 * 0.5 - 3.0))
    }

    #[test]
    fn layout_is_column_major() {
        let m = sample();
        assert_eq!(m.get(1, 2), m.as_array()[1 + 8]);
        assert_eq!(m.col(3), Vector([m.get(0, 3), m.get(1, 3), m.get(2, 3), m.get(3, 3)]));
        assert_eq!(m.row(2), Vector([m.get(2, 0), m.get(2, 1), m.get(2, 2), m.get(2, 3)]));
    }

    #[test]
    fn set_writes_row_col() {
        let mut m = Mat4::ZERO;
        m.set(3, 0, 7.0);
        assert_eq!(m.as_array()[3], 7.0);
    }

    #[test]
    fn transpose_swaps_rows_and_cols() {
        let m = sample();
        let t = m.transpose();
        for r in 0..4 {
            assert_eq!(t.row(r), m.col(r));
        }
        assert_eq!(t.transpose(), m);
    }

    #[test]
    fn identity_is_neutral() {
        let m = sample();
        assert_eq!(Mat4::IDENTITY * m, m);
        assert_eq!(m * Mat4::IDENTITY, m);
    }

    #[test]
    fn rotation_cancels_inverse_rotation() {
        for theta in [0.0_f32, 0.3, 1.7, -2.9, 6.0] {
            let p = rotate_z(theta) * rotate_z(-theta);
            assert!(p.max_abs_diff(&Mat4::IDENTITY) < 1e-6);
        }
    }

    #[test]
    fn product_is_not_commutative() {
        let t = translate(1.0, 0.0, 0.0);
        let s = scale(2.0, 2.0, 2.0);
        let origin = Vec4::new([0.0, 0.0, 0.0, 1.0]);
        // scale after translate moves the origin to x = 2; the other order leaves it at x = 1
        assert_eq!((s * t) * origin, Vec4::new([2.0, 0.0, 0.0, 1.0]));
        assert_eq!((t * s) * origin, Vec4::new([1.0, 0.0, 0.0, 1.0]));
    }

    #[test]
    fn vec_mul_uses_columns() {
        let m = sample();
        let v = Vec4::new([1.0, 2.0, 3.0, 4.0]);
        assert_eq!(v * m, m.transpose() * v);
    }

    #[test]
    fn nary_multiply_folds_left_to_right() {
        let p = rotate_z(0.4);
        let v = translate(0.0, 2.0, 0.0);
        let m = scale(3.0, 1.0, 1.0);
        let x = Vec4::new([1.0, 1.0, 1.0, 1.0]);

        let folded = multiply(&[p.into(), v.into(), m.into(), x.into()]).unwrap();
        assert_eq!(folded, Operand::Vector(p.mul_mat(&v).mul_mat(&m).mul_vec(x)));

        let mats = multiply(&[p.into(), v.into(), m.into()]).unwrap();
        assert_eq!(mats.into_matrix(), Some(p * v * m));
        assert_eq!([p, v, m].iter().product::<Mat4>(), p * v * m);
    }

    #[test]
    fn nary_multiply_edge_cases() {
        let m = sample();
        assert_eq!(multiply(&[m.into()]), Ok(Operand::Matrix(m)));
        assert_eq!(multiply(&[]), Err(MathError::EmptyProduct));

        let v = Vec4::new([1.0, 0.0, 0.0, 0.0]);
        assert_eq!(
            multiply(&[v.into(), v.into()]),
            Err(MathError::VectorTimesVector)
        );
        assert_eq!(
            multiply(&[v.into(), m.into()]),
            Ok(Operand::Vector(m.vec_mul(v)))
        );
        assert_eq!(std::iter::empty::<Mat4>().product::<Mat4>(), Mat4::IDENTITY);
    }

    #[test]
    fn transform_point_and_vector() {
        let t = translate(1.0, 2.0, 3.0);
        let p = crate::Vec3::new([1.0, 1.0, 1.0]);
        assert_eq!(t.transform_point(p), crate::Vec3::new([2.0, 3.0, 4.0]));
        assert_eq!(t.transform_vector(p), p);
    }

    #[test]
    fn uniform_bytes_are_column_major() {
        let m = translate(1.0, 2.0, 3.0);
        assert_eq!(bytemuck::bytes_of(&m).len(), 64);
        let floats: [f32; 16] = bytemuck::cast(m);
        assert_eq!(&floats[12..15], &[1.0, 2.0, 3.0]);
    }
}
