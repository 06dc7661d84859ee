//! Float to fixed-point quantization.
//!
//! Codewords are `round(clamp(v, 0, 1) * (2^b - 1))`. Clamping happens
//! here and nowhere earlier, so float outputs upstream keep negative and
//! super-white values.
//!
//! # Dithering
//!
//! Below 16 bits an optional 8x8 ordered (Bayer) dither shifts the rounding
//! threshold per pixel position. The offset stays strictly inside
//! `(-0.5, 0.5)` of a code step, so 0.0 and 1.0 still land on `0` and
//! `2^b - 1`. The pattern depends only on `(x, y)`, never on a random
//! source, so repeated runs write identical bytes.

use gainhdr_core::{BitDepth, ColorPrimaries, PixelBuffer, TransferFunction};
use gainhdr_math::saturate;
use rayon::prelude::*;
use tracing::debug;

use crate::{OpsError, OpsResult};

/// Classic recursive 8x8 Bayer index matrix, values `0..64`.
const BAYER_8X8: [[u8; 8]; 8] = [
    [0, 32, 8, 40, 2, 34, 10, 42],
    [48, 16, 56, 24, 50, 18, 58, 26],
    [12, 44, 4, 36, 14, 46, 6, 38],
    [60, 28, 52, 20, 62, 30, 54, 22],
    [3, 35, 11, 43, 1, 33, 9, 41],
    [51, 19, 59, 27, 49, 17, 57, 25],
    [15, 47, 7, 39, 13, 45, 5, 37],
    [63, 31, 55, 23, 61, 29, 53, 21],
];

/// Rounding offset in code steps for pixel `(x, y)`, in `(-0.5, 0.5)`.
#[inline]
fn bayer_offset(x: usize, y: usize) -> f64 {
    (BAYER_8X8[y & 7][x & 7] as f64 + 0.5) / 64.0 - 0.5
}

/// Integer codewords plus the tags of the buffer they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantizedBuffer {
    width: u32,
    height: u32,
    channels: u8,
    bit_depth: BitDepth,
    primaries: ColorPrimaries,
    transfer: TransferFunction,
    data: Vec<u16>,
}

impl QuantizedBuffer {
    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Samples per pixel.
    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Codeword depth.
    pub fn bit_depth(&self) -> BitDepth {
        self.bit_depth
    }

    /// Primaries tag.
    pub fn primaries(&self) -> ColorPrimaries {
        self.primaries
    }

    /// Transfer function tag.
    pub fn transfer(&self) -> TransferFunction {
        self.transfer
    }

    /// Codewords, row-major with interleaved channels.
    pub fn data(&self) -> &[u16] {
        &self.data
    }

    /// Consumes the buffer and returns its codewords.
    pub fn into_data(self) -> Vec<u16> {
        self.data
    }

    /// Big-endian byte stream, as 16-bit PNG rows expect.
    pub fn to_be_bytes(&self) -> Vec<u8> {
        self.data.iter().flat_map(|v| v.to_be_bytes()).collect()
    }

    /// Narrows 8-bit codewords to bytes.
    ///
    /// # Errors
    ///
    /// [`OpsError::InvalidParameter`] when the buffer is not 8-bit.
    pub fn to_u8(&self) -> OpsResult<Vec<u8>> {
        if self.bit_depth != BitDepth::U8 {
            return Err(OpsError::InvalidParameter(format!(
                "cannot narrow {} codewords to bytes",
                self.bit_depth
            )));
        }
        Ok(self.data.iter().map(|&v| v as u8).collect())
    }
}

/// Converts float samples to integer codewords.
///
/// ```rust
/// use gainhdr_ops::Quantizer;
///
/// let q = Quantizer::new(10).unwrap();
/// assert_eq!(q.quantize_value(0.0), 0);
/// assert_eq!(q.quantize_value(1.0), 1023);
/// assert!(Quantizer::new(9).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Quantizer {
    bit_depth: BitDepth,
    dither: bool,
}

impl Quantizer {
    /// Creates a quantizer for `bits` per sample.
    ///
    /// # Errors
    ///
    /// [`OpsError::NumericOverflow`] unless `bits` is 8, 10, 12 or 16.
    pub fn new(bits: u32) -> OpsResult<Self> {
        let bit_depth = BitDepth::from_bits(bits).ok_or(OpsError::NumericOverflow { bits })?;
        Ok(Self::with_depth(bit_depth))
    }

    /// Creates a quantizer for an already validated depth.
    pub fn with_depth(bit_depth: BitDepth) -> Self {
        Self {
            bit_depth,
            dither: false,
        }
    }

    /// Enables ordered dithering. Ignored at 16 bits.
    pub fn with_dither(mut self, dither: bool) -> Self {
        self.dither = dither;
        self
    }

    /// Target depth.
    pub fn bit_depth(&self) -> BitDepth {
        self.bit_depth
    }

    /// True when dithering will actually be applied.
    pub fn dithers(&self) -> bool {
        self.dither && self.bit_depth.bits() < 16
    }

    /// Quantizes one value without dither. NaN maps to 0.
    #[inline]
    pub fn quantize_value(&self, v: f32) -> u16 {
        code(v, self.bit_depth.max_code(), 0.0)
    }

    /// Quantizes a whole buffer, row-parallel.
    pub fn quantize(&self, src: PixelBuffer) -> QuantizedBuffer {
        let max = self.bit_depth.max_code();
        let dither = self.dithers();
        let ch = src.channels() as usize;
        let stride = src.row_len();

        debug!(
            width = src.width(),
            height = src.height(),
            depth = %self.bit_depth,
            dither,
            "quantize"
        );

        let mut data = vec![0u16; src.data().len()];
        data.par_chunks_mut(stride)
            .zip(src.data().par_chunks(stride))
            .enumerate()
            .for_each(|(y, (out, row))| {
                for (i, (o, &v)) in out.iter_mut().zip(row).enumerate() {
                    let offset = if dither { bayer_offset(i / ch, y) } else { 0.0 };
                    *o = code(v, max, offset);
                }
            });

        QuantizedBuffer {
            width: src.width(),
            height: src.height(),
            channels: src.channels(),
            bit_depth: self.bit_depth,
            primaries: src.primaries(),
            transfer: src.transfer(),
            data,
        }
    }
}

/// `round(saturate(v) * max + offset)`, clamped to `[0, max]`.
#[inline]
fn code(v: f32, max: u16, offset: f64) -> u16 {
    let scaled = saturate(v) as f64 * max as f64 + offset;
    scaled.round().clamp(0.0, max as f64) as u16
}
