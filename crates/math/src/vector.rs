use std::ops::{Add, Div, Index, IndexMut, Mul, Neg, Sub};

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::MathError;

/// A fixed-length vector of `f32` components.
///
/// Every operation returns a new value; nothing mutates its inputs. Operand
/// lengths are part of the type, so mixing a 3-vector with a 4-vector is a
/// compile error rather than silently wrong geometry.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector<const N: usize>(pub [f32; N]);

pub type Vec2 = Vector<2>;
pub type Vec3 = Vector<3>;
pub type Vec4 = Vector<4>;

#[allow(clippy::should_implement_trait)]
impl<const N: usize> Vector<N> {
    pub const ZERO: Self = Self([0.0; N]);

    pub const fn new(components: [f32; N]) -> Self {
        Self(components)
    }

    /// Build from a runtime-sized slice, failing if the length is not `N`.
    pub fn try_from_slice(values: &[f32]) -> Result<Self, MathError> {
        let components: [f32; N] = values.try_into().map_err(|_| MathError::DimensionMismatch {
            expected: N,
            actual: values.len(),
        })?;
        Ok(Self(components))
    }

    pub fn as_array(&self) -> &[f32; N] {
        &self.0
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn add(self, other: Self) -> Self {
        Self(std::array::from_fn(|i| self.0[i] + other.0[i]))
    }

    pub fn sub(self, other: Self) -> Self {
        Self(std::array::from_fn(|i| self.0[i] - other.0[i]))
    }

    pub fn mul(self, s: f32) -> Self {
        Self(self.0.map(|e| e * s))
    }

    pub fn div(self, s: f32) -> Self {
        Self(self.0.map(|e| e / s))
    }

    pub fn dot(self, other: Self) -> f32 {
        self.0.iter().zip(other.0.iter()).map(|(a, b)| a * b).sum()
    }

    pub fn mag(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Divide by the magnitude.
    ///
    /// A zero vector yields non-finite components; callers that cannot rule
    /// that out should use [`Vector::try_normalize`].
    pub fn normalize(self) -> Self {
        self.div(self.mag())
    }

    pub fn try_normalize(self) -> Result<Self, MathError> {
        let m = self.mag();
        if m == 0.0 || !m.is_finite() {
            return Err(MathError::ZeroLength);
        }
        Ok(self.div(m))
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|e| e.is_finite())
    }
}

impl Vec2 {
    /// Signed area of the parallelogram spanned by `self` and `other`.
    pub fn cross(self, other: Self) -> f32 {
        self.0[0] * other.0[1] - self.0[1] * other.0[0]
    }
}

impl Vec3 {
    pub const X: Self = Self([1.0, 0.0, 0.0]);
    pub const Y: Self = Self([0.0, 1.0, 0.0]);
    pub const Z: Self = Self([0.0, 0.0, 1.0]);

    pub fn cross(self, other: Self) -> Self {
        let [x0, x1, x2] = self.0;
        let [y0, y1, y2] = other.0;
        Self([x1 * y2 - x2 * y1, x2 * y0 - x0 * y2, x0 * y1 - x1 * y0])
    }

    pub fn x(&self) -> f32 {
        self.0[0]
    }

    pub fn y(&self) -> f32 {
        self.0[1]
    }

    pub fn z(&self) -> f32 {
        self.0[2]
    }

    /// Extend to homogeneous coordinates with the given `w`.
    pub fn extend(self, w: f32) -> Vec4 {
        let [x, y, z] = self.0;
        Vector([x, y, z, w])
    }
}

impl Vec4 {
    /// Drop the last component.
    pub fn truncate(self) -> Vec3 {
        let [x, y, z, _] = self.0;
        Vector([x, y, z])
    }
}

impl<const N: usize> From<[f32; N]> for Vector<N> {
    fn from(components: [f32; N]) -> Self {
        Self(components)
    }
}

impl<const N: usize> From<Vector<N>> for [f32; N] {
    fn from(v: Vector<N>) -> Self {
        v.0
    }
}

impl<const N: usize> Index<usize> for Vector<N> {
    type Output = f32;

    fn index(&self, i: usize) -> &f32 {
        &self.0[i]
    }
}

impl<const N: usize> IndexMut<usize> for Vector<N> {
    fn index_mut(&mut self, i: usize) -> &mut f32 {
        &mut self.0[i]
    }
}

impl<const N: usize> Add for Vector<N> {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Vector::add(self, other)
    }
}

impl<const N: usize> Sub for Vector<N> {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Vector::sub(self, other)
    }
}

impl<const N: usize> Mul<f32> for Vector<N> {
    type Output = Self;

    fn mul(self, s: f32) -> Self {
        Vector::mul(self, s)
    }
}

impl<const N: usize> Div<f32> for Vector<N> {
    type Output = Self;

    fn div(self, s: f32) -> Self {
        Vector::div(self, s)
    }
}

impl<const N: usize> Neg for Vector<N> {
    type Output = Self;

    fn neg(self) -> Self {
        self.mul(-1.0)
    }
}

impl<const N: usize> Serialize for Vector<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter())
    }
}

impl<'de, const N: usize> Deserialize<'de> for Vector<N> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let values = Vec::<f32>::deserialize(deserializer)?;
        Self::try_from_slice(&values).map_err(D::Error::custom)
    }
}
