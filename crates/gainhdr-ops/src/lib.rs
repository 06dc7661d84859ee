//! # gainhdr-ops
//!
//! Pixel-grid operations of the gain-map pipeline.
//!
//! # Modules
//!
//! - [`resample`] - Upsampling the gain map to the base image grid
//! - [`quantize`] - Float to fixed-point codewords with optional ordered dither
//!
//! Both stages take an owned [`PixelBuffer`](gainhdr_core::PixelBuffer),
//! allocate their output and fill it row-parallel with rayon. Rows are
//! independent, so parallel and sequential runs produce identical samples.
//!
//! # Example
//!
//! ```rust
//! use gainhdr_core::{PixelBuffer, TransferFunction};
//! use gainhdr_ops::{Interpolation, Quantizer, Resampler};
//!
//! let gain = PixelBuffer::gain_map(2, 2, TransferFunction::Linear, vec![0.0, 1.0, 0.0, 1.0]).unwrap();
//! let up = Resampler::new(Interpolation::Bilinear).resample(gain, 8, 8).unwrap();
//! assert_eq!(up.dimensions(), (8, 8));
//!
//! let q = Quantizer::new(16).unwrap().quantize(up);
//! assert_eq!(q.data()[7], 65535);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod quantize;
pub mod resample;

pub use error::{OpsError, OpsResult};
pub use quantize::{QuantizedBuffer, Quantizer};
pub use resample::{Interpolation, Resampler};
