//! # gainhdr-core
//!
//! Core types for gain-map HDR reconstruction.
//!
//! This crate provides the foundational types shared by every other crate
//! in the workspace:
//!
//! - [`PixelBuffer`] - Owned `f32` pixel grid with primaries/transfer tags
//! - [`ColorPrimaries`] - Closed set of named RGB primaries
//! - [`TransferFunction`] - Closed set of named transfer curves
//! - [`BitDepth`] - Integer output depths accepted by the quantizer
//! - [`Error`] - Structural errors (shapes, unsupported names)
//!
//! ## Crate Structure
//!
//! ```text
//! gainhdr-core (this crate)
//!    ^
//!    +-- gainhdr-math       (matrices, adaptation)
//!    +-- gainhdr-transfer   (curves)
//!    +-- gainhdr-primaries  (RGB/XYZ matrices)
//!    +-- gainhdr-ops        (resampler, quantizer)
//!    +-- gainhdr-color      (gain-map pipeline)
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` - Serialize/deserialize [`ColorPrimaries`] and [`TransferFunction`]

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod buffer;
pub mod colorspace;
pub mod error;
pub mod format;

pub use buffer::{sample_count, PixelBuffer};
pub use colorspace::{ColorPrimaries, TransferFunction, D50_XY, D60_XY, D65_XY, DCI_XY};
pub use error::{Error, Result};
pub use format::BitDepth;

/// Prelude module for convenient imports.
///
/// ```
/// use gainhdr_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::buffer::PixelBuffer;
    pub use crate::colorspace::{ColorPrimaries, TransferFunction};
    pub use crate::error::{Error, Result};
    pub use crate::format::BitDepth;
}
