//! Error types for the gain-map pipeline.
//!
//! Structural problems (shapes, unsupported targets, bad bit depths) are
//! fatal and name the stage they came from. [`ColorError::InvalidMetadata`]
//! is the one recoverable kind: [`HdrPipeline`](crate::HdrPipeline) logs it
//! and continues without the gain map.

use gainhdr_ops::OpsError;
use thiserror::Error;

/// Gain-map pipeline error.
#[derive(Debug, Error)]
pub enum ColorError {
    /// Gain bounds are absent, non-finite or contradictory.
    #[error("invalid gain-map metadata: {reason} (min_stops={min_stops}, max_stops={max_stops})")]
    InvalidMetadata {
        /// What is wrong
        reason: String,
        /// Minimum gain in stops as supplied (NaN when absent)
        min_stops: f32,
        /// Maximum gain in stops as supplied (NaN when absent)
        max_stops: f32,
    },

    /// Shape or tag error from a buffer operation.
    #[error(transparent)]
    Core(#[from] gainhdr_core::Error),

    /// Gain-map upsampling failed.
    #[error("resample stage: {0}")]
    Resample(#[source] OpsError),

    /// Output quantization setup failed.
    #[error("quantize stage: {0}")]
    Quantize(#[source] OpsError),

    /// Conversion settings are out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// YAML parse error.
    #[error("config parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// I/O error while reading a config file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ColorError {
    /// Creates an [`ColorError::InvalidMetadata`] error.
    pub fn invalid_metadata(reason: impl Into<String>, min_stops: f32, max_stops: f32) -> Self {
        Self::InvalidMetadata {
            reason: reason.into(),
            min_stops,
            max_stops,
        }
    }

    /// True for the kind the pipeline recovers from.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::InvalidMetadata { .. })
    }
}

/// Result type for pipeline operations.
pub type ColorResult<T> = Result<T, ColorError>;
