//! Closed-form gain curve.
//!
//! [`GainMapModel`] maps a decoded gain-map sample `s` in `[0, 1]` to a
//! linear multiplier. The contrast exponent is applied first, then the
//! curve selected by [`GainBlend`] interpolates between `2^min` and `2^max`.
//! The result is clamped to `[0, ceiling]`.

use serde::{Deserialize, Serialize};

use super::{GainBlend, GainMapMetadata};
use crate::ColorResult;

/// How the metadata gamma is applied to the decoded sample.
///
/// Writers disagree on this. Apple maps carry no gamma at all; ISO 21496-1
/// and libultrahdr store the encoding gamma and decode with `s^(1/g)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GammaConvention {
    /// `s' = s^g`.
    #[default]
    Power,
    /// `s' = s^(1/g)`.
    InversePower,
}

/// Per-image gain curve built from validated metadata.
///
/// # Example
///
/// ```rust
/// use gainhdr_color::{GainMapMetadata, GainMapModel};
///
/// let model = GainMapModel::from_metadata(&GainMapMetadata::new(0.0, 2.0)).unwrap();
/// assert_eq!(model.multiplier(0.0), 1.0);
/// assert_eq!(model.multiplier(0.5), 2.0);
/// assert_eq!(model.multiplier(1.0), 4.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GainMapModel {
    min_stops: f64,
    max_stops: f64,
    lo: f64,
    hi: f64,
    exponent: f32,
    blend: GainBlend,
    ceiling: f32,
}

impl GainMapModel {
    /// Model that returns exactly 1 for every sample.
    pub fn identity() -> Self {
        Self {
            min_stops: 0.0,
            max_stops: 0.0,
            lo: 1.0,
            hi: 1.0,
            exponent: 1.0,
            blend: GainBlend::Exponential,
            ceiling: 1.0,
        }
    }

    /// Builds the curve with the [`GammaConvention::Power`] convention.
    ///
    /// # Errors
    ///
    /// [`ColorError::InvalidMetadata`](crate::ColorError::InvalidMetadata)
    /// when [`GainMapMetadata::validate`] fails.
    pub fn from_metadata(meta: &GainMapMetadata) -> ColorResult<Self> {
        Self::from_metadata_with(meta, GammaConvention::Power)
    }

    /// Builds the curve with an explicit gamma convention.
    pub fn from_metadata_with(meta: &GainMapMetadata, convention: GammaConvention) -> ColorResult<Self> {
        meta.validate()?;
        let exponent = match convention {
            GammaConvention::Power => meta.gamma,
            GammaConvention::InversePower => meta.gamma.recip(),
        };
        let min_stops = meta.min_stops as f64;
        let max_stops = meta.max_stops as f64;
        Ok(Self {
            min_stops,
            max_stops,
            lo: min_stops.exp2(),
            hi: max_stops.exp2(),
            exponent,
            blend: meta.blend,
            ceiling: meta.ceiling(),
        })
    }

    /// True when every sample maps to 1.
    pub fn is_identity(&self) -> bool {
        self.lo == 1.0 && self.hi == 1.0
    }

    /// Upper clamp applied to every multiplier.
    pub fn ceiling(&self) -> f32 {
        self.ceiling
    }

    /// Linear multiplier for a decoded sample.
    ///
    /// The sample is clamped to `[0, 1]` first; NaN counts as 0. The result
    /// is never negative or NaN and never exceeds [`ceiling`](Self::ceiling).
    #[inline]
    pub fn multiplier(&self, sample: f32) -> f32 {
        let mut s = gainhdr_math::saturate(sample);
        if self.exponent != 1.0 {
            s = s.powf(self.exponent);
        }
        let s = s as f64;
        let m = match self.blend {
            GainBlend::Exponential => ((1.0 - s) * self.min_stops + s * self.max_stops).exp2(),
            GainBlend::Linear => (1.0 - s) * self.lo + s * self.hi,
        };
        let m = m as f32;
        if m.is_nan() { 0.0 } else { m.clamp(0.0, self.ceiling) }
    }
}

impl Default for GainMapModel {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ColorError;
    use approx::assert_relative_eq;

    fn model(min: f32, max: f32) -> GainMapModel {
        GainMapModel::from_metadata(&GainMapMetadata::new(min, max)).unwrap()
    }

    #[test]
    fn test_endpoints() {
        for (min, max) in [(0.0, 2.0), (-1.0, 3.5), (0.5, 0.5), (-2.0, -0.5)] {
            let m = model(min, max);
            assert_relative_eq!(m.multiplier(0.0), min.exp2(), max_relative = 1e-6);
            assert_relative_eq!(m.multiplier(1.0), max.exp2(), max_relative = 1e-6);
        }
    }

    #[test]
    fn test_monotonic() {
        for blend in [GainBlend::Exponential, GainBlend::Linear] {
            for gamma in [0.5, 1.0, 2.2] {
                let meta = GainMapMetadata::new(-1.0, 3.0).with_gamma(gamma).with_blend(blend);
                let m = GainMapModel::from_metadata(&meta).unwrap();
                let mut prev = 0.0;
                for i in 0..=1000 {
                    let v = m.multiplier(i as f32 / 1000.0);
                    assert!(v >= prev, "{blend:?} gamma={gamma} at {i}: {v} < {prev}");
                    prev = v;
                }
            }
        }
    }

    #[test]
    fn test_gamma_conventions() {
        let meta = GainMapMetadata::new(0.0, 2.0).with_gamma(2.0);
        let power = GainMapModel::from_metadata(&meta).unwrap();
        let inverse = GainMapModel::from_metadata_with(&meta, GammaConvention::InversePower).unwrap();
        // 0.25^2 = 0.0625 -> 2^0.125 ; 0.25^0.5 = 0.5 -> 2^1
        assert_relative_eq!(power.multiplier(0.25), 0.125f32.exp2(), max_relative = 1e-6);
        assert_relative_eq!(inverse.multiplier(0.25), 2.0, max_relative = 1e-6);
    }

    #[test]
    fn test_linear_blend() {
        let m = GainMapModel::from_metadata(&GainMapMetadata::from_headroom(4.0)).unwrap();
        assert_relative_eq!(m.multiplier(0.5), 2.5, max_relative = 1e-6);
        assert_relative_eq!(m.multiplier(1.0), 4.0, max_relative = 1e-6);
    }

    #[test]
    fn test_bad_samples_clamped() {
        let m = model(1.0, 2.0);
        assert_eq!(m.multiplier(f32::NAN), 2.0);
        assert_eq!(m.multiplier(-5.0), 2.0);
        assert_eq!(m.multiplier(9.0), 4.0);
    }

    #[test]
    fn test_ceiling_from_headroom() {
        let meta = GainMapMetadata::new(0.0, 3.0).with_headroom(None, Some(5.0));
        let m = GainMapModel::from_metadata(&meta).unwrap();
        assert_eq!(m.multiplier(1.0), 5.0);
        assert_relative_eq!(m.multiplier(0.5), 1.5f32.exp2(), max_relative = 1e-6);
    }

    #[test]
    fn test_identity() {
        let m = GainMapModel::identity();
        assert!(m.is_identity());
        for s in [0.0, 0.3, 1.0, f32::NAN] {
            assert_eq!(m.multiplier(s), 1.0);
        }
        assert!(model(0.0, 0.0).is_identity());
        assert!(!model(0.0, 1.0).is_identity());
    }

    #[test]
    fn test_invalid_metadata() {
        let err = GainMapModel::from_metadata(&GainMapMetadata::new(2.0, 1.0)).unwrap_err();
        assert!(matches!(err, ColorError::InvalidMetadata { .. }));
        assert!(err.is_recoverable());
    }
}
