//! Gain-map metadata and the curve derived from it.
//!
//! - [`GainMapMetadata`] - Parsed bounds, gamma and headroom
//! - [`AppleHdrTags`] - Apple maker-note scalars and their headroom formula
//! - [`GainMapModel`] - Sample to linear multiplier

mod metadata;
mod model;

pub use metadata::{AppleHdrTags, GainBlend, GainMapMetadata, APPLE_GAIN_MAP_AUX_TYPE};
pub use model::{GainMapModel, GammaConvention};
