//! Error types for pixel-grid operations.

use thiserror::Error;

/// Error type for resampling and quantization.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Invalid dimensions specified.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Target grid is smaller than the raster being upsampled.
    #[error(
        "dimension mismatch: cannot upsample {src_width}x{src_height} to {dst_width}x{dst_height}"
    )]
    DimensionMismatch {
        /// Source width
        src_width: u32,
        /// Source height
        src_height: u32,
        /// Requested width
        dst_width: u32,
        /// Requested height
        dst_height: u32,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Requested bit depth is outside the supported set.
    #[error("numeric overflow: {bits}-bit output is not supported (expected 8, 10, 12 or 16)")]
    NumericOverflow {
        /// Requested bits per sample
        bits: u32,
    },

    /// Buffer construction failed.
    #[error(transparent)]
    Core(#[from] gainhdr_core::Error),
}

/// Result type for pixel-grid operations.
pub type OpsResult<T> = Result<T, OpsError>;
