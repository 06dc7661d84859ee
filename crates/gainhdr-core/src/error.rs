//! Error types for gainhdr-core operations.
//!
//! The [`Error`] enum covers the structural failures that can occur while
//! building or tagging pixel buffers:
//! - Buffer shape problems (zero or overflowing dimensions, wrong sample count)
//! - Channel count mismatches between a buffer and the stage consuming it
//! - Named primaries or transfer functions outside the supported set
//!
//! Pixel-level numeric anomalies (NaN, negative light) are never reported
//! through this type; stages clamp them locally.
//!
//! # Usage
//!
//! ```rust
//! use gainhdr_core::{Error, Result};
//!
//! fn check_same_size(a: (u32, u32), b: (u32, u32)) -> Result<()> {
//!     if a != b {
//!         return Err(Error::dimension_mismatch(a, b));
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by buffer construction and tag resolution.
#[derive(Debug, Error)]
pub enum Error {
    /// Two buffers that must share a pixel grid do not.
    ///
    /// Also used when a gain map is larger than the base image it modulates.
    #[error("dimension mismatch: {a_width}x{a_height} vs {b_width}x{b_height}")]
    DimensionMismatch {
        /// First buffer width
        a_width: u32,
        /// First buffer height
        a_height: u32,
        /// Second buffer width
        b_width: u32,
        /// Second buffer height
        b_height: u32,
    },

    /// Width or height is zero, or the sample count overflows `usize`.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// Channel count is not what the operation expects.
    #[error("channel mismatch: expected {expected}, got {got}")]
    ChannelMismatch {
        /// Expected channel count
        expected: u8,
        /// Actual channel count
        got: u8,
    },

    /// Sample vector length does not match `width * height * channels`.
    #[error("sample count mismatch: expected {expected}, got {got}")]
    SampleCount {
        /// Expected number of samples
        expected: usize,
        /// Actual number of samples
        got: usize,
    },

    /// Color primaries outside the fixed supported set.
    #[error("unsupported color primaries: {name}")]
    UnsupportedPrimaries {
        /// Name that failed to resolve
        name: String,
    },

    /// Transfer function outside the supported set, or not valid for the stage.
    #[error("unsupported transfer function {name}: {reason}")]
    UnsupportedTransferFunction {
        /// Transfer function name
        name: String,
        /// Why it was rejected
        reason: String,
    },
}

impl Error {
    /// Creates an [`Error::DimensionMismatch`] error.
    #[inline]
    pub fn dimension_mismatch(a: (u32, u32), b: (u32, u32)) -> Self {
        Self::DimensionMismatch {
            a_width: a.0,
            a_height: a.1,
            b_width: b.0,
            b_height: b.1,
        }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::ChannelMismatch`] error.
    #[inline]
    pub fn channel_mismatch(expected: u8, got: u8) -> Self {
        Self::ChannelMismatch { expected, got }
    }

    /// Creates an [`Error::UnsupportedPrimaries`] error.
    #[inline]
    pub fn unsupported_primaries(name: impl Into<String>) -> Self {
        Self::UnsupportedPrimaries { name: name.into() }
    }

    /// Creates an [`Error::UnsupportedTransferFunction`] error.
    #[inline]
    pub fn unsupported_transfer(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnsupportedTransferFunction {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Returns `true` for shape-related errors.
    #[inline]
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            Self::DimensionMismatch { .. }
                | Self::InvalidDimensions { .. }
                | Self::ChannelMismatch { .. }
                | Self::SampleCount { .. }
        )
    }
}
