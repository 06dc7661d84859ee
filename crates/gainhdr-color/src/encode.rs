//! Linear light to stored values.
//!
//! Linear 1.0 is SDR reference white. Each curve interprets that scale:
//!
//! | Target | Curve input |
//! |--------|-------------|
//! | Linear | unchanged, no clamp |
//! | PQ | `v * reference_white` cd/m2, clamped to `[0, 10000]` |
//! | HLG | `v * reference_white / 1000`, clamped to `[0, 1]` |
//! | sRGB, Gamma 2.2, BT.709 | `v`, clamped to `[0, 1]` |
//!
//! Negative light is clamped to zero before any nonlinear curve; it has no
//! physical meaning once primaries conversion is done.
//!
//! HLG goes straight through the OETF: display light is treated as scene
//! light and no BT.2100 inverse OOTF is applied. Reference white at 203
//! cd/m2 therefore encodes to about 0.70 rather than the 0.75 of BT.2408.

use gainhdr_core::{Error, PixelBuffer, TransferFunction};
use gainhdr_transfer::{encode, hlg, pq};
use rayon::prelude::*;
use tracing::debug;

use crate::{ColorError, ColorResult};

/// SDR reference white in cd/m2 (ITU-R BT.2408).
pub const DEFAULT_REFERENCE_WHITE_NITS: f32 = 203.0;

/// Nominal peak HLG maps linear 1.0 to, in cd/m2.
pub const HLG_NOMINAL_PEAK_NITS: f32 = 1000.0;

/// Transfer-function encoding stage.
///
/// ```rust
/// use gainhdr_color::TransferEncoder;
/// use gainhdr_core::TransferFunction;
///
/// let enc = TransferEncoder::new(TransferFunction::Pq, 203.0).unwrap();
/// assert!((enc.encode_value(1.0) - 0.5807).abs() < 1e-4);
/// assert_eq!(enc.encode_value(-1.0), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransferEncoder {
    transfer: TransferFunction,
    reference_white: f32,
}

impl TransferEncoder {
    /// Creates an encoder.
    ///
    /// # Errors
    ///
    /// [`ColorError::InvalidConfig`] unless `reference_white_nits` is
    /// positive and finite.
    pub fn new(transfer: TransferFunction, reference_white_nits: f32) -> ColorResult<Self> {
        if !(reference_white_nits.is_finite() && reference_white_nits > 0.0) {
            return Err(ColorError::InvalidConfig(format!(
                "reference white must be positive, got {reference_white_nits}"
            )));
        }
        Ok(Self {
            transfer,
            reference_white: reference_white_nits,
        })
    }

    /// Target curve.
    pub fn transfer(&self) -> TransferFunction {
        self.transfer
    }

    /// Reference white in cd/m2.
    pub fn reference_white(&self) -> f32 {
        self.reference_white
    }

    /// Encodes one linear value.
    #[inline]
    pub fn encode_value(&self, v: f32) -> f32 {
        match self.transfer {
            TransferFunction::Linear => v,
            TransferFunction::Pq => pq::encode_nits(v * self.reference_white),
            TransferFunction::Hlg => hlg::encode(v * self.reference_white / HLG_NOMINAL_PEAK_NITS),
            tf => encode(tf, v),
        }
    }

    /// Encodes a linear buffer and retags it.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedTransferFunction`] when the input is not linear.
    pub fn encode(&self, src: PixelBuffer) -> ColorResult<PixelBuffer> {
        if !src.transfer().is_linear() {
            return Err(Error::unsupported_transfer(
                src.transfer().name(),
                "transfer encoding needs linear input",
            )
            .into());
        }
        if self.transfer.is_linear() {
            return Ok(src);
        }

        debug!(
            width = src.width(),
            height = src.height(),
            transfer = %self.transfer,
            reference_white = self.reference_white,
            "transfer encode"
        );

        let stride = src.row_len();
        let mut data = vec![0.0f32; src.data().len()];
        data.par_chunks_mut(stride)
            .zip(src.data().par_chunks(stride))
            .for_each(|(out, row)| {
                for (o, &v) in out.iter_mut().zip(row) {
                    *o = self.encode_value(v);
                }
            });

        Ok(src.derive(src.primaries(), self.transfer, data)?)
    }
}
