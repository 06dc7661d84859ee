//! Chromatic adaptation transforms (CAT).
//!
//! Primaries with different white points (ProPhoto at D50, ACES at D60,
//! DCI-P3 at the DCI white) cannot be related by a plain
//! `RGB -> XYZ -> RGB` product without shifting neutrals. An adaptation
//! matrix maps XYZ under the source white to XYZ under the destination
//! white so that white stays white.
//!
//! ```rust
//! use gainhdr_math::{adapt_matrix, xy_to_xyz, BRADFORD};
//!
//! let d65 = xy_to_xyz(0.3127, 0.3290);
//! let d50 = xy_to_xyz(0.34567, 0.35850);
//! let m = adapt_matrix(BRADFORD, d65, d50);
//! let out = m * d65;
//! assert!((out - d50).abs().max_element() < 1e-9);
//! ```

use crate::{Mat3, Vec3};

/// Bradford cone-response matrix (Lam, 1985).
pub const BRADFORD: Mat3 = Mat3::from_rows([
    [0.8951, 0.2664, -0.1614],
    [-0.7502, 1.7135, 0.0367],
    [0.0389, -0.0685, 1.0296],
]);

/// Converts an xy chromaticity to XYZ with `Y = 1`.
///
/// Returns zero for a degenerate `y`.
#[inline]
pub fn xy_to_xyz(x: f64, y: f64) -> Vec3 {
    if y.abs() < 1e-12 {
        Vec3::ZERO
    } else {
        Vec3::new(x / y, 1.0, (1.0 - x - y) / y)
    }
}

/// Computes a von Kries-style adaptation matrix in the cone space of `method`.
///
/// `M^-1 * diag(dst_cone / src_cone) * M`. Falls back to identity when the
/// method matrix is singular.
pub fn adapt_matrix(method: Mat3, src_white: Vec3, dst_white: Vec3) -> Mat3 {
    let Some(method_inv) = method.inverse() else {
        return Mat3::IDENTITY;
    };
    let src_cone = method * src_white;
    let dst_cone = method * dst_white;
    let scale = Mat3::diagonal(dst_cone / src_cone);
    method_inv * scale * method
}
