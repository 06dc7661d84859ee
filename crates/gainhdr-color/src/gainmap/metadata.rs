//! Gain-map metadata as supplied by a metadata extractor.
//!
//! [`GainMapMetadata`] is the parsed, format-neutral form. [`AppleHdrTags`]
//! holds the raw maker-note scalars found in iPhone HEIC files and derives
//! metadata from them.

use gainhdr_core::ColorPrimaries;
use serde::{Deserialize, Serialize};

use crate::{ColorError, ColorResult};

/// Auxiliary image type of an Apple HDR gain map.
pub const APPLE_GAIN_MAP_AUX_TYPE: &str = "urn:com:apple:photo:2020:aux:hdrgainmap";

/// Domain in which the gain curve interpolates between its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GainBlend {
    /// `m = 2^(min + s * (max - min))`: uniform steps in stops.
    #[default]
    Exponential,
    /// `m = 2^min + s * (2^max - 2^min)`: uniform steps in linear gain.
    /// Apple gain maps use this form.
    Linear,
}

/// Scalar gain-range metadata for one image.
///
/// Bounds are in stops (log2 units). `min_stops` may be negative.
///
/// # Example
///
/// ```rust
/// use gainhdr_color::GainMapMetadata;
///
/// let meta = GainMapMetadata::new(0.0, 2.0).with_gamma(1.0);
/// assert!(meta.validate().is_ok());
/// assert!(GainMapMetadata::new(2.0, 1.0).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GainMapMetadata {
    /// Gain at sample 0, in stops.
    pub min_stops: f32,
    /// Gain at sample 1, in stops.
    pub max_stops: f32,
    /// Contrast exponent applied to the decoded sample.
    pub gamma: f32,
    /// Linear headroom already present in the base image (1 = SDR).
    pub base_headroom: Option<f32>,
    /// Linear headroom of the reconstructed rendition.
    pub alternate_headroom: Option<f32>,
    /// Interpolation domain.
    pub blend: GainBlend,
}

impl Default for GainMapMetadata {
    fn default() -> Self {
        Self {
            min_stops: 0.0,
            max_stops: 0.0,
            gamma: 1.0,
            base_headroom: None,
            alternate_headroom: None,
            blend: GainBlend::Exponential,
        }
    }
}

impl GainMapMetadata {
    /// Metadata with the given bounds, gamma 1 and exponential blend.
    pub fn new(min_stops: f32, max_stops: f32) -> Self {
        Self {
            min_stops,
            max_stops,
            ..Self::default()
        }
    }

    /// Apple-style metadata for a linear headroom `h`:
    /// `m = 1 + (h - 1) * s`, capped at `h`.
    pub fn from_headroom(headroom: f32) -> Self {
        Self {
            min_stops: 0.0,
            max_stops: headroom.log2(),
            alternate_headroom: Some(headroom),
            blend: GainBlend::Linear,
            ..Self::default()
        }
    }

    /// Sets the contrast exponent.
    pub fn with_gamma(mut self, gamma: f32) -> Self {
        self.gamma = gamma;
        self
    }

    /// Sets base and alternate headroom.
    pub fn with_headroom(mut self, base: Option<f32>, alternate: Option<f32>) -> Self {
        self.base_headroom = base;
        self.alternate_headroom = alternate;
        self
    }

    /// Sets the interpolation domain.
    pub fn with_blend(mut self, blend: GainBlend) -> Self {
        self.blend = blend;
        self
    }

    /// Largest multiplier the metadata advertises.
    ///
    /// `alternate_headroom / base_headroom` when the alternate headroom is
    /// declared, `2^max_stops` otherwise.
    pub fn ceiling(&self) -> f32 {
        match self.alternate_headroom {
            Some(alt) => alt / self.base_headroom.unwrap_or(1.0),
            None => self.max_stops.exp2(),
        }
    }

    /// Checks that the bounds describe a usable gain curve.
    ///
    /// # Errors
    ///
    /// [`ColorError::InvalidMetadata`] when a bound is non-finite,
    /// `max_stops < min_stops`, `gamma` is not a positive finite number, a
    /// headroom is below 1, or the multiplier range overflows `f32`.
    pub fn validate(&self) -> ColorResult<()> {
        let invalid = |reason: &str| {
            Err(ColorError::invalid_metadata(reason, self.min_stops, self.max_stops))
        };

        if !self.min_stops.is_finite() || !self.max_stops.is_finite() {
            return invalid("gain bounds must be finite");
        }
        if self.max_stops < self.min_stops {
            return invalid("max_stops is below min_stops");
        }
        if !self.max_stops.exp2().is_finite() {
            return invalid("max_stops overflows the multiplier range");
        }
        if !(self.gamma.is_finite() && self.gamma > 0.0) {
            return invalid("gamma must be positive and finite");
        }
        for (name, value) in [
            ("base_headroom", self.base_headroom),
            ("alternate_headroom", self.alternate_headroom),
        ] {
            match value {
                Some(h) if !(h.is_finite() && h >= 1.0) => {
                    return invalid(&format!("{name} must be >= 1, got {h}"));
                }
                _ => {}
            }
        }
        Ok(())
    }
}

/// Raw Apple HDR tags read from an iPhone HEIC.
///
/// `headroom_tag` is maker note 0x0021 (`HDRHeadroom`) and `gain_tag` is
/// maker note 0x0030 (`HDRGain`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppleHdrTags {
    /// Maker note 0x0021.
    pub headroom_tag: Option<f32>,
    /// Maker note 0x0030.
    pub gain_tag: Option<f32>,
    /// ICC profile description of the base image.
    pub profile_description: Option<String>,
    /// XMP `HDRGainMapVersion`.
    pub gain_map_version: Option<u32>,
    /// Auxiliary image type of the gain-map plane.
    pub aux_type: Option<String>,
}

impl AppleHdrTags {
    /// Tags carrying only the two maker-note scalars.
    pub fn new(headroom_tag: f32, gain_tag: f32) -> Self {
        Self {
            headroom_tag: Some(headroom_tag),
            gain_tag: Some(gain_tag),
            ..Self::default()
        }
    }

    /// Linear headroom derived from the maker notes.
    ///
    /// Piecewise-linear in stops, floored at 0 stops (headroom 1):
    ///
    /// | headroom tag | gain <= 0.01 | gain > 0.01 |
    /// |---|---|---|
    /// | < 1 | `1.8 - 20 g` | `1.601 - 0.101 g` |
    /// | >= 1 | `3.0 - 70 g` | `2.303 - 0.303 g` |
    ///
    /// # Errors
    ///
    /// [`ColorError::InvalidMetadata`] if either tag is missing or not finite.
    pub fn headroom(&self) -> ColorResult<f32> {
        let (Some(tag), Some(gain)) = (self.headroom_tag, self.gain_tag) else {
            return Err(ColorError::invalid_metadata(
                "Apple HDRHeadroom/HDRGain maker notes are missing",
                f32::NAN,
                f32::NAN,
            ));
        };
        if !tag.is_finite() || !gain.is_finite() {
            return Err(ColorError::invalid_metadata(
                format!("non-finite Apple maker notes (headroom={tag}, gain={gain})"),
                f32::NAN,
                f32::NAN,
            ));
        }

        let (tag, gain) = (tag as f64, gain as f64);
        let stops = match (tag < 1.0, gain <= 0.01) {
            (true, true) => -20.0 * gain + 1.8,
            (true, false) => -0.101 * gain + 1.601,
            (false, true) => -70.0 * gain + 3.0,
            (false, false) => -0.303 * gain + 2.303,
        };
        Ok(stops.max(0.0).exp2() as f32)
    }

    /// Gain-map metadata equivalent to these tags.
    pub fn to_metadata(&self) -> ColorResult<GainMapMetadata> {
        Ok(GainMapMetadata::from_headroom(self.headroom()?))
    }

    /// Primaries of the base image, from the ICC profile description.
    ///
    /// iPhone captures are Display P3, which is also the answer when the
    /// description is absent.
    pub fn base_primaries(&self) -> ColorResult<ColorPrimaries> {
        match &self.profile_description {
            Some(desc) => Ok(desc.parse()?),
            None => Ok(ColorPrimaries::DisplayP3),
        }
    }

    /// Auxiliary image type of the gain map, defaulting to Apple's URN.
    pub fn aux_type(&self) -> &str {
        self.aux_type.as_deref().unwrap_or(APPLE_GAIN_MAP_AUX_TYPE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_validate_rejects_inverted_bounds() {
        let err = GainMapMetadata::new(2.0, 1.0).validate().unwrap_err();
        match err {
            ColorError::InvalidMetadata { min_stops, max_stops, .. } => {
                assert_eq!(min_stops, 2.0);
                assert_eq!(max_stops, 1.0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_validate_rejects_bad_scalars() {
        assert!(GainMapMetadata::new(f32::NAN, 1.0).validate().is_err());
        assert!(GainMapMetadata::new(0.0, f32::INFINITY).validate().is_err());
        assert!(GainMapMetadata::new(0.0, 200.0).validate().is_err());
        assert!(GainMapMetadata::new(0.0, 1.0).with_gamma(0.0).validate().is_err());
        assert!(GainMapMetadata::new(0.0, 1.0).with_gamma(-1.0).validate().is_err());
        assert!(
            GainMapMetadata::new(0.0, 1.0)
                .with_headroom(None, Some(0.5))
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_validate_accepts_negative_min_and_flat_range() {
        assert!(GainMapMetadata::new(-1.5, 3.0).validate().is_ok());
        assert!(GainMapMetadata::new(1.0, 1.0).validate().is_ok());
    }

    #[test]
    fn test_ceiling() {
        assert_relative_eq!(GainMapMetadata::new(0.0, 2.0).ceiling(), 4.0);
        let meta = GainMapMetadata::new(0.0, 3.0).with_headroom(Some(2.0), Some(6.0));
        assert_relative_eq!(meta.ceiling(), 3.0);
    }

    #[test]
    fn test_apple_headroom_branches() {
        let h = |tag, gain| AppleHdrTags::new(tag, gain).headroom().unwrap();
        assert_relative_eq!(h(0.5, 0.0), 1.8f32.exp2(), max_relative = 1e-6);
        assert_relative_eq!(h(0.5, 0.5), (1.601f32 - 0.0505).exp2(), max_relative = 1e-5);
        assert_relative_eq!(h(1.0, 0.01), 2.3f32.exp2(), max_relative = 1e-5);
        assert_relative_eq!(h(1.2, 1.0), 2.0f32.exp2(), max_relative = 1e-5);
    }

    #[test]
    fn test_apple_headroom_floor() {
        // large gain drives stops negative; headroom never drops below 1
        assert_eq!(AppleHdrTags::new(1.0, 50.0).headroom().unwrap(), 1.0);
    }

    #[test]
    fn test_apple_missing_tags() {
        let tags = AppleHdrTags {
            headroom_tag: Some(1.0),
            ..AppleHdrTags::default()
        };
        assert!(matches!(tags.headroom(), Err(ColorError::InvalidMetadata { .. })));
    }

    #[test]
    fn test_apple_to_metadata() {
        let meta = AppleHdrTags::new(1.0, 1.0).to_metadata().unwrap();
        assert_eq!(meta.blend, GainBlend::Linear);
        assert_eq!(meta.min_stops, 0.0);
        assert_relative_eq!(meta.max_stops, 2.0, max_relative = 1e-5);
        assert_relative_eq!(meta.alternate_headroom.unwrap(), 4.0, max_relative = 1e-5);
        assert!(meta.validate().is_ok());
    }

    #[test]
    fn test_apple_base_primaries() {
        let mut tags = AppleHdrTags::default();
        assert_eq!(tags.base_primaries().unwrap(), ColorPrimaries::DisplayP3);
        tags.profile_description = Some("Display P3".into());
        assert_eq!(tags.base_primaries().unwrap(), ColorPrimaries::DisplayP3);
        tags.profile_description = Some("Generic Lab Profile".into());
        assert!(tags.base_primaries().is_err());
        assert_eq!(tags.aux_type(), APPLE_GAIN_MAP_AUX_TYPE);
    }
}
