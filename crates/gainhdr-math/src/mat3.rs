//! 3x3 color matrix.
//!
//! [`Mat3`] wraps [`glam::DMat3`] but exposes a **row-major** constructor so
//! coefficient tables can be copied from standards documents as printed.
//! Vectors are columns: `result = matrix * vector`.

use crate::Vec3;
use glam::DMat3;
use std::ops::Mul;

/// A 3x3 matrix for linear color transforms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat3(DMat3);

impl Mat3 {
    /// Identity matrix.
    pub const IDENTITY: Self = Self(DMat3::IDENTITY);

    /// Determinants below this are treated as singular.
    pub const SINGULAR_EPSILON: f64 = 1e-12;

    /// Creates a matrix from row arrays.
    #[inline]
    pub const fn from_rows(rows: [[f64; 3]; 3]) -> Self {
        Self(DMat3::from_cols(
            Vec3::new(rows[0][0], rows[1][0], rows[2][0]),
            Vec3::new(rows[0][1], rows[1][1], rows[2][1]),
            Vec3::new(rows[0][2], rows[1][2], rows[2][2]),
        ))
    }

    /// Creates a matrix whose columns are `c0`, `c1`, `c2`.
    #[inline]
    pub const fn from_col_vecs(c0: Vec3, c1: Vec3, c2: Vec3) -> Self {
        Self(DMat3::from_cols(c0, c1, c2))
    }

    /// Creates a diagonal matrix.
    #[inline]
    pub fn diagonal(d: Vec3) -> Self {
        Self(DMat3::from_diagonal(d))
    }

    /// Element at `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.0.col(col)[row]
    }

    /// Row `i` as an array.
    #[inline]
    pub fn row(&self, i: usize) -> [f64; 3] {
        self.0.row(i).to_array()
    }

    /// All rows, row-major.
    #[inline]
    pub fn to_rows(&self) -> [[f64; 3]; 3] {
        [self.row(0), self.row(1), self.row(2)]
    }

    /// Transpose.
    #[inline]
    pub fn transpose(&self) -> Self {
        Self(self.0.transpose())
    }

    /// Determinant.
    #[inline]
    pub fn determinant(&self) -> f64 {
        self.0.determinant()
    }

    /// Inverse, or `None` if the matrix is singular.
    pub fn inverse(&self) -> Option<Self> {
        if self.determinant().abs() < Self::SINGULAR_EPSILON {
            return None;
        }
        Some(Self(self.0.inverse()))
    }

    /// Returns true if every coefficient is finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }

    /// Returns true if this is the identity within `eps`.
    #[inline]
    pub fn is_identity(&self, eps: f64) -> bool {
        self.0.abs_diff_eq(DMat3::IDENTITY, eps)
    }

    /// Applies the matrix to an `f32` RGB triplet.
    ///
    /// The product is accumulated in `f64` and rounded once.
    #[inline]
    pub fn apply(&self, rgb: [f32; 3]) -> [f32; 3] {
        let v = self.0 * Vec3::new(rgb[0] as f64, rgb[1] as f64, rgb[2] as f64);
        [v.x as f32, v.y as f32, v.z as f32]
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<Vec3> for Mat3 {
    type Output = Vec3;

    #[inline]
    fn mul(self, rhs: Vec3) -> Vec3 {
        self.0 * rhs
    }
}

impl Mul for Mat3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self(self.0 * rhs.0)
    }
}
