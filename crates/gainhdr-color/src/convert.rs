//! Re-expressing linear pixels in another set of primaries.
//!
//! One 3x3 matrix per source/target pair (`source -> XYZ -> target`, with
//! Bradford adaptation across white points). Nothing is clipped: negative
//! and super-white values produced by a wider target pass through for float
//! outputs, and the quantizer clamps later.

use gainhdr_core::{ColorPrimaries, Error, PixelBuffer};
use gainhdr_math::Mat3;
use gainhdr_primaries::conversion_matrix;
use rayon::prelude::*;
use tracing::debug;

use crate::ColorResult;

/// Linear RGB primaries conversion stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorSpaceTransform {
    target: ColorPrimaries,
}

impl ColorSpaceTransform {
    /// Creates a transform into `target`.
    pub fn new(target: ColorPrimaries) -> Self {
        Self { target }
    }

    /// Target primaries.
    pub fn target(&self) -> ColorPrimaries {
        self.target
    }

    /// Matrix this stage applies to buffers in `source` primaries.
    pub fn matrix_from(&self, source: ColorPrimaries) -> ColorResult<Mat3> {
        Ok(conversion_matrix(source, self.target)?)
    }

    /// Converts a linear RGB buffer.
    ///
    /// Same-primaries input is returned unchanged.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedTransferFunction`] when the input is not linear
    /// - [`Error::UnsupportedPrimaries`] when either side is unspecified
    /// - [`Error::ChannelMismatch`] for non-RGB input
    pub fn apply(&self, src: PixelBuffer) -> ColorResult<PixelBuffer> {
        src.expect_channels(3)?;
        if !src.transfer().is_linear() {
            return Err(Error::unsupported_transfer(
                src.transfer().name(),
                "color space transform needs linear input",
            )
            .into());
        }

        for prims in [src.primaries(), self.target] {
            if !prims.is_specified() {
                return Err(Error::unsupported_primaries(prims.name()).into());
            }
        }

        let matrix = self.matrix_from(src.primaries())?;
        if matrix == Mat3::IDENTITY {
            debug!(primaries = %self.target, "color transform is identity");
            return Ok(src);
        }

        debug!(
            width = src.width(),
            height = src.height(),
            from = %src.primaries(),
            to = %self.target,
            "color transform"
        );

        let stride = src.row_len();
        let mut data = vec![0.0f32; src.data().len()];
        data.par_chunks_mut(stride)
            .zip(src.data().par_chunks(stride))
            .for_each(|(out, row)| {
                for (o, px) in out.chunks_exact_mut(3).zip(row.chunks_exact(3)) {
                    o.copy_from_slice(&matrix.apply([px[0], px[1], px[2]]));
                }
            });

        Ok(src.derive(self.target, src.transfer(), data)?)
    }
}
