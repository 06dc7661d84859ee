//! End-to-end gain-map conversion.
//!
//! ```text
//! metadata ---> GainMapModel
//! gain map ---> Resampler ---> Reconstructor <--- base
//!                                   |
//!                         ColorSpaceTransform
//!                                   |
//!                           TransferEncoder
//!                                   |
//!                       Quantizer (integer output)
//! ```
//!
//! Target settings and buffer shapes are checked before any pixel work, so a
//! bad bit depth, reference white or gain-map shape fails fast whatever the
//! metadata says. Rejected metadata is not fatal: the pipeline logs a warning
//! and runs the gain-less path, which gives the same output as calling it
//! without a gain map.

use gainhdr_core::{Error, PixelBuffer};
use gainhdr_ops::{QuantizedBuffer, Quantizer, Resampler};
use tracing::{debug, warn};

use crate::{
    ColorError, ColorResult, ColorSpaceTransform, ConversionConfig, GainMapMetadata, GainMapModel,
    Reconstructor, TransferEncoder,
};

/// Result of a conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum HdrOutput {
    /// Encoded float samples (`bit_depth: None`).
    Float(PixelBuffer),
    /// Integer codewords.
    Quantized(QuantizedBuffer),
}

impl HdrOutput {
    /// `(width, height)` of the output.
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Self::Float(buf) => buf.dimensions(),
            Self::Quantized(buf) => (buf.width(), buf.height()),
        }
    }

    /// Float samples, if this is float output.
    pub fn as_float(&self) -> Option<&PixelBuffer> {
        match self {
            Self::Float(buf) => Some(buf),
            Self::Quantized(_) => None,
        }
    }

    /// Codewords, if this is integer output.
    pub fn as_quantized(&self) -> Option<&QuantizedBuffer> {
        match self {
            Self::Quantized(buf) => Some(buf),
            Self::Float(_) => None,
        }
    }
}

/// Runs the full conversion for one image at a time.
///
/// # Example
///
/// ```rust
/// use gainhdr_color::{ConversionConfig, GainMapMetadata, HdrPipeline};
/// use gainhdr_core::{ColorPrimaries, PixelBuffer, TransferFunction};
///
/// let base = PixelBuffer::filled(4, 4, &[0.5; 3], ColorPrimaries::DisplayP3, TransferFunction::Srgb).unwrap();
/// let gain = PixelBuffer::gain_map(2, 2, TransferFunction::Linear, vec![1.0; 4]).unwrap();
/// let meta = GainMapMetadata::new(0.0, 1.0);
///
/// let out = HdrPipeline::new(ConversionConfig::default())
///     .run(base, Some(gain), Some(&meta))
///     .unwrap();
/// assert_eq!(out.dimensions(), (4, 4));
/// assert!(out.as_quantized().is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct HdrPipeline {
    config: ConversionConfig,
}

impl HdrPipeline {
    /// Creates a pipeline with the given settings.
    pub fn new(config: ConversionConfig) -> Self {
        Self { config }
    }

    /// Active settings.
    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Converts one image.
    ///
    /// `gain` and `metadata` are both optional: a gain map without usable
    /// metadata, or metadata without a gain map, runs the gain-less path.
    ///
    /// # Errors
    ///
    /// - [`ColorError::Quantize`] for an unsupported bit depth
    /// - [`ColorError::InvalidConfig`] for a bad reference white
    /// - [`ColorError::Core`] wrapping `DimensionMismatch` when the gain map
    ///   is larger than the base, `ChannelMismatch` when either buffer has
    ///   the wrong channel count, or a primaries/transfer error
    pub fn run(
        &self,
        base: PixelBuffer,
        gain: Option<PixelBuffer>,
        metadata: Option<&GainMapMetadata>,
    ) -> ColorResult<HdrOutput> {
        let cfg = &self.config;
        let quantizer = cfg
            .bit_depth
            .map(|bits| Quantizer::new(bits).map(|q| q.with_dither(cfg.dither)))
            .transpose()
            .map_err(ColorError::Quantize)?;
        let encoder = TransferEncoder::new(cfg.target_transfer, cfg.reference_white_nits)?;
        let transform = ColorSpaceTransform::new(cfg.target_primaries);
        base.expect_channels(3)?;
        if let Some(g) = &gain {
            check_gain_shape(&base, g)?;
        }

        debug!(
            width = base.width(),
            height = base.height(),
            primaries = %base.primaries(),
            transfer = %base.transfer(),
            has_gain_map = gain.is_some(),
            "convert"
        );

        let (model, gain) = self.gain_model(gain, metadata);
        let gain = match gain {
            Some(g) => Some(
                Resampler::new(cfg.interpolation)
                    .resample(g, base.width(), base.height())
                    .map_err(ColorError::Resample)?,
            ),
            None => None,
        };

        let linear = Reconstructor::new(model).reconstruct(base, gain)?;
        let converted = transform.apply(linear)?;
        let encoded = encoder.encode(converted)?;

        Ok(match quantizer {
            Some(q) => HdrOutput::Quantized(q.quantize(encoded)),
            None => HdrOutput::Float(encoded),
        })
    }

    /// Picks the gain curve, dropping the gain map when it cannot be used.
    fn gain_model(
        &self,
        gain: Option<PixelBuffer>,
        metadata: Option<&GainMapMetadata>,
    ) -> (GainMapModel, Option<PixelBuffer>) {
        match (gain, metadata) {
            (Some(gain), Some(meta)) => {
                match GainMapModel::from_metadata_with(meta, self.config.gamma_convention) {
                    Ok(model) => (model, Some(gain)),
                    Err(err) => {
                        warn!(error = %err, "ignoring gain map");
                        (GainMapModel::identity(), None)
                    }
                }
            }
            (Some(_), None) => {
                warn!("gain map has no metadata; ignoring gain map");
                (GainMapModel::identity(), None)
            }
            (None, Some(_)) => {
                debug!("metadata without gain map; running SDR path");
                (GainMapModel::identity(), None)
            }
            (None, None) => (GainMapModel::identity(), None),
        }
    }
}

/// Gain maps are single-channel and never larger than the base.
fn check_gain_shape(base: &PixelBuffer, gain: &PixelBuffer) -> ColorResult<()> {
    gain.expect_channels(1)?;
    if gain.width() > base.width() || gain.height() > base.height() {
        return Err(Error::dimension_mismatch(base.dimensions(), gain.dimensions()).into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gainhdr_core::{ColorPrimaries, TransferFunction};
    use gainhdr_ops::OpsError;

    fn base() -> PixelBuffer {
        let data = (0..48).map(|i| (i as f32 / 47.0).powf(1.3)).collect();
        PixelBuffer::from_vec(4, 4, 3, ColorPrimaries::DisplayP3, TransferFunction::Srgb, data).unwrap()
    }

    fn gain() -> PixelBuffer {
        PixelBuffer::gain_map(2, 2, TransferFunction::Srgb, vec![0.1, 0.9, 0.4, 0.6]).unwrap()
    }

    #[test]
    fn test_invalid_metadata_matches_gainless() {
        let pipeline = HdrPipeline::default();
        let bad = GainMapMetadata::new(2.0, 1.0);
        let degraded = pipeline.run(base(), Some(gain()), Some(&bad)).unwrap();
        let plain = pipeline.run(base(), None, None).unwrap();
        assert_eq!(degraded, plain);
    }

    #[test]
    fn test_gain_raises_output() {
        let cfg = ConversionConfig::default().with_bit_depth(None);
        let pipeline = HdrPipeline::new(cfg);
        let meta = GainMapMetadata::new(0.0, 2.0);
        let hdr = pipeline.run(base(), Some(gain()), Some(&meta)).unwrap();
        let sdr = pipeline.run(base(), None, None).unwrap();
        let (hdr, sdr) = (hdr.as_float().unwrap(), sdr.as_float().unwrap());
        assert!(hdr.data().iter().zip(sdr.data()).all(|(h, s)| h >= s));
        assert!(hdr.data().iter().zip(sdr.data()).any(|(h, s)| h > s));
    }

    #[test]
    fn test_unsupported_depth_fails_fast() {
        let cfg = ConversionConfig::default().with_bit_depth(Some(32));
        let err = HdrPipeline::new(cfg).run(base(), None, None).unwrap_err();
        assert!(matches!(err, ColorError::Quantize(OpsError::NumericOverflow { bits: 32 })));
    }

    #[test]
    fn test_oversized_gain_map() {
        let big = || PixelBuffer::gain_map(8, 8, TransferFunction::Linear, vec![0.5; 64]).unwrap();
        let pipeline = HdrPipeline::default();
        let bad = GainMapMetadata::new(2.0, 1.0);
        let good = GainMapMetadata::new(0.0, 1.0);

        // shape errors are fatal whether or not the metadata is usable
        for meta in [Some(&good), Some(&bad), None] {
            let err = pipeline.run(base(), Some(big()), meta).unwrap_err();
            assert!(
                matches!(err, ColorError::Core(Error::DimensionMismatch { .. })),
                "{err}"
            );
        }
    }

    #[test]
    fn test_rgb_gain_map_rejected() {
        let rgb = PixelBuffer::filled(2, 2, &[0.5; 3], ColorPrimaries::Unspecified, TransferFunction::Linear)
            .unwrap();
        let bad = GainMapMetadata::new(2.0, 1.0);
        let err = HdrPipeline::default().run(base(), Some(rgb), Some(&bad)).unwrap_err();
        assert!(matches!(err, ColorError::Core(Error::ChannelMismatch { expected: 1, got: 3 })));
    }

    #[test]
    fn test_output_tags() {
        let cfg = ConversionConfig::default()
            .with_primaries(ColorPrimaries::Srgb)
            .with_transfer(TransferFunction::Srgb)
            .with_bit_depth(Some(8));
        let out = HdrPipeline::new(cfg).run(base(), None, None).unwrap();
        let q = out.as_quantized().unwrap();
        assert_eq!(q.primaries(), ColorPrimaries::Srgb);
        assert_eq!(q.transfer(), TransferFunction::Srgb);
        assert_eq!(q.data().len(), 48);
    }

    #[test]
    fn test_gain_map_without_metadata_is_ignored() {
        let pipeline = HdrPipeline::default();
        let with = pipeline.run(base(), Some(gain()), None).unwrap();
        let without = pipeline.run(base(), None, None).unwrap();
        assert_eq!(with, without);
    }
}
