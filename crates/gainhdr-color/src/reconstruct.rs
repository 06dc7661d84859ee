//! Combining the base image with its gain map.
//!
//! For each pixel the base sample is decoded to linear light, the gain
//! sample is decoded with the gain raster's own transfer tag and mapped
//! through the [`GainMapModel`], and all three channels are scaled by the
//! same multiplier. Gain maps modulate intensity only.

use gainhdr_core::{Error, PixelBuffer, TransferFunction};
use gainhdr_transfer::decode;
use rayon::prelude::*;
use tracing::debug;

use crate::{ColorResult, GainMapModel};

/// Rebuilds linear HDR from a base image and an upsampled gain map.
///
/// # Example
///
/// ```rust
/// use gainhdr_color::{GainMapMetadata, GainMapModel, Reconstructor};
/// use gainhdr_core::{ColorPrimaries, PixelBuffer, TransferFunction};
///
/// let base = PixelBuffer::filled(2, 2, &[0.18; 3], ColorPrimaries::DisplayP3, TransferFunction::Linear).unwrap();
/// let gain = PixelBuffer::gain_map(2, 2, TransferFunction::Linear, vec![0.5; 4]).unwrap();
/// let model = GainMapModel::from_metadata(&GainMapMetadata::new(0.0, 2.0)).unwrap();
///
/// let hdr = Reconstructor::new(model).reconstruct(base, Some(gain)).unwrap();
/// assert_eq!(hdr.pixel(1, 1), &[0.36, 0.36, 0.36]);
/// assert_eq!(hdr.transfer(), TransferFunction::Linear);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Reconstructor {
    model: GainMapModel,
}

impl Reconstructor {
    /// Creates a reconstructor for one image's gain curve.
    pub fn new(model: GainMapModel) -> Self {
        Self { model }
    }

    /// Gain curve in use.
    pub fn model(&self) -> &GainMapModel {
        &self.model
    }

    /// Produces a linear buffer tagged with the base primaries.
    ///
    /// Without a gain map the result is the linear-decoded base image.
    ///
    /// # Errors
    ///
    /// - [`Error::ChannelMismatch`] unless base has 3 channels and the gain
    ///   map has 1
    /// - [`Error::DimensionMismatch`] when the gain map is not already on
    ///   the base grid
    pub fn reconstruct(&self, base: PixelBuffer, gain: Option<PixelBuffer>) -> ColorResult<PixelBuffer> {
        base.expect_channels(3)?;
        let stride = base.row_len();
        let base_tf = base.transfer();
        let mut data = vec![0.0f32; base.data().len()];

        match gain {
            Some(gain) => {
                gain.expect_channels(1)?;
                if gain.dimensions() != base.dimensions() {
                    return Err(Error::dimension_mismatch(base.dimensions(), gain.dimensions()).into());
                }
                debug!(
                    width = base.width(),
                    height = base.height(),
                    base_transfer = %base_tf,
                    gain_transfer = %gain.transfer(),
                    ceiling = self.model.ceiling(),
                    "reconstruct"
                );

                let gain_tf = gain.transfer();
                let gain_stride = gain.row_len();
                data.par_chunks_mut(stride)
                    .zip(base.data().par_chunks(stride))
                    .zip(gain.data().par_chunks(gain_stride))
                    .for_each(|((out, src), g)| {
                        for ((o, px), &s) in out.chunks_exact_mut(3).zip(src.chunks_exact(3)).zip(g) {
                            let m = self.model.multiplier(decode(gain_tf, s));
                            for c in 0..3 {
                                o[c] = decode(base_tf, px[c]) * m;
                            }
                        }
                    });
            }
            None => {
                debug!(width = base.width(), height = base.height(), "reconstruct without gain map");
                data.par_chunks_mut(stride)
                    .zip(base.data().par_chunks(stride))
                    .for_each(|(out, src)| {
                        for (o, &v) in out.iter_mut().zip(src) {
                            *o = decode(base_tf, v);
                        }
                    });
            }
        }

        Ok(base.derive(base.primaries(), TransferFunction::Linear, data)?)
    }
}
