//! # gainhdr-color
//!
//! Gain-map HDR reconstruction: from an SDR base image, its gain map and
//! the gain-range metadata to an encoded HDR image.
//!
//! # Stages
//!
//! - [`GainMapModel`] - Metadata to a closed-form gain curve
//! - [`Reconstructor`] - Linear base times per-pixel multiplier
//! - [`ColorSpaceTransform`] - Primaries conversion, unclipped
//! - [`TransferEncoder`] - Linear to PQ / HLG / SDR curves
//! - [`HdrPipeline`] - All of the above plus resampling and quantization
//!
//! # Architecture
//!
//! ```text
//!                  gainhdr-color
//!                        |
//!     +------------------+------------------+
//!     |                  |                  |
//! gainhdr-transfer  gainhdr-primaries  gainhdr-ops
//!     |                  |                  |
//!     |             gainhdr-math -----------+
//!     |                  |
//!     +--------+---------+
//!              |
//!         gainhdr-core
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use gainhdr_color::{AppleHdrTags, ConversionConfig, HdrPipeline};
//! use gainhdr_core::{ColorPrimaries, PixelBuffer, TransferFunction};
//!
//! // iPhone capture: Display P3 sRGB-encoded base, sRGB-encoded gain map
//! let base = PixelBuffer::filled(8, 8, &[0.6, 0.5, 0.4], ColorPrimaries::DisplayP3, TransferFunction::Srgb).unwrap();
//! let gain = PixelBuffer::gain_map(2, 2, TransferFunction::Srgb, vec![0.0, 0.3, 0.7, 1.0]).unwrap();
//! let meta = AppleHdrTags::new(1.01, 0.012).to_metadata().unwrap();
//!
//! // BT.2100 PQ, 16-bit
//! let out = HdrPipeline::new(ConversionConfig::default())
//!     .run(base, Some(gain), Some(&meta))
//!     .unwrap();
//! let q = out.as_quantized().unwrap();
//! assert_eq!(q.primaries(), ColorPrimaries::Rec2020);
//! ```
//!
//! # Dependencies
//!
//! - [`gainhdr-core`] - Buffers, tags, structural errors
//! - [`gainhdr-transfer`] - Transfer curves
//! - [`gainhdr-primaries`] - Conversion matrices
//! - [`gainhdr-ops`] - Resampler and quantizer
//! - `serde` / `serde_yaml` - [`ConversionConfig`] files
//! - `rayon` - Row-parallel stages
//! - `tracing` - Stage events
//!
//! # Used By
//!
//! - `gainhdr-cli` - The `gainhdr` command

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod convert;
pub mod encode;
mod error;
pub mod gainmap;
pub mod pipeline;
pub mod reconstruct;

pub use config::ConversionConfig;
pub use convert::ColorSpaceTransform;
pub use encode::{TransferEncoder, DEFAULT_REFERENCE_WHITE_NITS, HLG_NOMINAL_PEAK_NITS};
pub use error::{ColorError, ColorResult};
pub use gainmap::{
    AppleHdrTags, GainBlend, GainMapMetadata, GainMapModel, GammaConvention, APPLE_GAIN_MAP_AUX_TYPE,
};
pub use pipeline::{HdrOutput, HdrPipeline};
pub use reconstruct::Reconstructor;

/// Prelude module for convenient imports.
///
/// ```rust
/// use gainhdr_color::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        ColorError, ColorResult, ConversionConfig, GainMapMetadata, GainMapModel, HdrOutput,
        HdrPipeline,
    };
    pub use gainhdr_core::prelude::*;
}
