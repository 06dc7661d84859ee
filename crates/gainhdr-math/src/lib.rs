//! # gainhdr-math
//!
//! Math primitives for the gain-map pipeline:
//!
//! - [`Mat3`] - 3x3 color matrices, derived and stored in double precision
//! - [`Vec3`] - XYZ / RGB triplets (re-export of [`glam::DVec3`])
//! - Chromatic adaptation ([`BRADFORD`], [`adapt_matrix`])
//! - Sample helpers ([`saturate`], [`catmull_rom_weights`])
//!
//! # Precision
//!
//! Primaries matrices are derived from xy chromaticities. Doing the
//! inversions in `f32` leaves errors around 1e-6 on every coefficient, which
//! shows up after a chain of RGB -> XYZ -> RGB products. All matrix work
//! therefore happens in `f64`; only the per-pixel application reads and
//! writes `f32` samples.
//!
//! ```rust
//! use gainhdr_math::{Mat3, Vec3};
//!
//! let rgb_to_xyz = Mat3::from_rows([
//!     [0.4124564, 0.3575761, 0.1804375],
//!     [0.2126729, 0.7151522, 0.0721750],
//!     [0.0193339, 0.1191920, 0.9503041],
//! ]);
//! let white = rgb_to_xyz * Vec3::ONE;
//! assert!((white.y - 1.0).abs() < 1e-6);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod adapt;
mod interp;
mod mat3;

pub use adapt::*;
pub use interp::*;
pub use mat3::*;

/// Double-precision 3-vector used for XYZ and RGB triplets.
pub use glam::DVec3 as Vec3;
