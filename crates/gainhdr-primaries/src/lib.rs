//! # gainhdr-primaries
//!
//! RGB primaries and RGB-XYZ matrix generation.
//!
//! Matrices are derived at runtime from the xy chromaticities published for
//! each [`ColorPrimaries`] value, so every supported pair of spaces gets a
//! consistent matrix without a table of hand-copied coefficients.
//!
//! # Chromatic adaptation
//!
//! When source and destination white points differ (Display P3 at D65 to
//! ProPhoto at D50, for example), [`conversion_matrix`] inserts a Bradford
//! adaptation between the two XYZ spaces. Same-white conversions skip it.
//!
//! # Usage
//!
//! ```rust
//! use gainhdr_core::ColorPrimaries;
//! use gainhdr_primaries::conversion_matrix;
//!
//! let m = conversion_matrix(ColorPrimaries::DisplayP3, ColorPrimaries::Rec2020).unwrap();
//! let white = m.apply([1.0, 1.0, 1.0]);
//! assert!((white[0] - 1.0).abs() < 1e-5);
//! ```
//!
//! # Dependencies
//!
//! - [`gainhdr-core`] - Primaries enum and errors
//! - [`gainhdr-math`] - Matrix operations
//!
//! # Used By
//!
//! - `gainhdr-color` - Color space transform stage

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

use gainhdr_core::{ColorPrimaries, Error, Result};
use gainhdr_math::{adapt_matrix, xy_to_xyz, Mat3, Vec3, BRADFORD};

/// RGB color space primaries: three primaries and a white point as CIE xy.
///
/// # Example
///
/// ```rust
/// use gainhdr_primaries::Primaries;
///
/// let custom = Primaries {
///     r: (0.64, 0.33),
///     g: (0.30, 0.60),
///     b: (0.15, 0.06),
///     w: (0.3127, 0.3290),
///     name: "Custom",
/// };
/// assert!((custom.white_xyz().y - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Primaries {
    /// Red primary (x, y)
    pub r: (f64, f64),
    /// Green primary (x, y)
    pub g: (f64, f64),
    /// Blue primary (x, y)
    pub b: (f64, f64),
    /// White point (x, y)
    pub w: (f64, f64),
    /// Display name
    pub name: &'static str,
}

impl Primaries {
    /// White point as XYZ with Y = 1.
    #[inline]
    pub fn white_xyz(&self) -> Vec3 {
        xy_to_xyz(self.w.0, self.w.1)
    }

    /// Looks up the chromaticities of a named primaries set.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedPrimaries`] for [`ColorPrimaries::Unspecified`].
    pub fn from_named(id: ColorPrimaries) -> Result<Self> {
        let [r, g, b, w] = id
            .chromaticities()
            .ok_or_else(|| Error::unsupported_primaries(id.name()))?;
        let widen = |(x, y): (f32, f32)| (x as f64, y as f64);
        Ok(Self {
            r: widen(r),
            g: widen(g),
            b: widen(b),
            w: widen(w),
            name: id.name(),
        })
    }

    /// True when both sets share a white point (within 1e-6 in xy).
    pub fn same_white(&self, other: &Self) -> bool {
        (self.w.0 - other.w.0).abs() < 1e-6 && (self.w.1 - other.w.1).abs() < 1e-6
    }
}

impl TryFrom<ColorPrimaries> for Primaries {
    type Error = Error;

    fn try_from(id: ColorPrimaries) -> Result<Self> {
        Self::from_named(id)
    }
}

/// Computes the RGB to XYZ matrix for a set of primaries.
///
/// # Algorithm
///
/// 1. Convert xy chromaticities to XYZ (with Y = 1)
/// 2. Solve for per-primary scales so RGB (1, 1, 1) lands on the white point
/// 3. Scale each primary column
///
/// # Errors
///
/// [`Error::UnsupportedPrimaries`] when the primaries are collinear and the
/// matrix cannot be inverted.
pub fn rgb_to_xyz_matrix(primaries: &Primaries) -> Result<Mat3> {
    let r = xy_to_xyz(primaries.r.0, primaries.r.1);
    let g = xy_to_xyz(primaries.g.0, primaries.g.1);
    let b = xy_to_xyz(primaries.b.0, primaries.b.1);

    let m = Mat3::from_col_vecs(r, g, b);
    let m_inv = m
        .inverse()
        .ok_or_else(|| Error::unsupported_primaries(primaries.name))?;
    let s = m_inv * primaries.white_xyz();

    Ok(Mat3::from_col_vecs(r * s.x, g * s.y, b * s.z))
}

/// Computes the XYZ to RGB matrix, the inverse of [`rgb_to_xyz_matrix`].
pub fn xyz_to_rgb_matrix(primaries: &Primaries) -> Result<Mat3> {
    rgb_to_xyz_matrix(primaries)?
        .inverse()
        .ok_or_else(|| Error::unsupported_primaries(primaries.name))
}

/// Computes the matrix taking linear RGB in `src` to linear RGB in `dst`.
///
/// Goes through XYZ and adds a Bradford adaptation when the white points
/// differ.
pub fn rgb_to_rgb_matrix(src: &Primaries, dst: &Primaries) -> Result<Mat3> {
    let to_xyz = rgb_to_xyz_matrix(src)?;
    let from_xyz = xyz_to_rgb_matrix(dst)?;
    if src.same_white(dst) {
        Ok(from_xyz * to_xyz)
    } else {
        let cat = adapt_matrix(BRADFORD, src.white_xyz(), dst.white_xyz());
        Ok(from_xyz * cat * to_xyz)
    }
}

/// Conversion matrix between two named primaries sets.
///
/// Identical names return [`Mat3::IDENTITY`] exactly, so same-space
/// transforms are lossless.
///
/// # Errors
///
/// [`Error::UnsupportedPrimaries`] if either side is
/// [`ColorPrimaries::Unspecified`].
pub fn conversion_matrix(from: ColorPrimaries, to: ColorPrimaries) -> Result<Mat3> {
    let src = Primaries::from_named(from)?;
    let dst = Primaries::from_named(to)?;
    if from == to {
        return Ok(Mat3::IDENTITY);
    }
    rgb_to_rgb_matrix(&src, &dst)
}
