//! Planar-interleaved float pixel buffers.
//!
//! [`PixelBuffer`] is the unit of exchange between pipeline stages: a
//! `width x height` grid of `channels` interleaved `f32` samples plus a
//! [`ColorPrimaries`] and a [`TransferFunction`] tag that apply to every
//! sample in the buffer.
//!
//! # Memory Layout
//!
//! Samples are stored row-major, top-to-bottom, channels interleaved:
//!
//! ```text
//! index(x, y, c) = (y * width + x) * channels + c
//! row stride     = width * channels   (no padding)
//! ```
//!
//! # Shape contract
//!
//! - `width > 0`, `height > 0`
//! - `channels` is 1 (gain map) or 3 (RGB)
//! - `data.len() == width * height * channels`, checked without overflow
//!
//! Stages never broadcast across mismatched shapes; they check dimensions
//! explicitly and fail with [`Error::DimensionMismatch`].
//!
//! # Usage
//!
//! ```rust
//! use gainhdr_core::{ColorPrimaries, PixelBuffer, TransferFunction};
//!
//! let base = PixelBuffer::filled(
//!     4, 2, &[0.5, 0.5, 0.5],
//!     ColorPrimaries::DisplayP3, TransferFunction::Srgb,
//! ).unwrap();
//! assert_eq!(base.pixel(3, 1), &[0.5, 0.5, 0.5]);
//!
//! let gain = PixelBuffer::gain_map(2, 1, TransferFunction::Linear, vec![0.0, 1.0]).unwrap();
//! assert_eq!(gain.channels(), 1);
//! ```

use crate::{ColorPrimaries, Error, Result, TransferFunction};

/// Owned `f32` pixel grid tagged with primaries and a transfer function.
///
/// Each pipeline stage consumes its input buffer and allocates a new one for
/// its output; no buffer is shared mutably between stages.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    channels: u8,
    primaries: ColorPrimaries,
    transfer: TransferFunction,
    data: Vec<f32>,
}

impl PixelBuffer {
    /// Creates a zero-filled buffer.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDimensions`] for zero or overflowing sizes,
    /// [`Error::ChannelMismatch`] when `channels` is not 1 or 3.
    pub fn new(
        width: u32,
        height: u32,
        channels: u8,
        primaries: ColorPrimaries,
        transfer: TransferFunction,
    ) -> Result<Self> {
        let len = sample_count(width, height, channels)?;
        Ok(Self {
            width,
            height,
            channels,
            primaries,
            transfer,
            data: vec![0.0; len],
        })
    }

    /// Wraps existing samples.
    ///
    /// # Errors
    ///
    /// Same shape errors as [`PixelBuffer::new`], plus
    /// [`Error::SampleCount`] when `data` has the wrong length.
    pub fn from_vec(
        width: u32,
        height: u32,
        channels: u8,
        primaries: ColorPrimaries,
        transfer: TransferFunction,
        data: Vec<f32>,
    ) -> Result<Self> {
        let expected = sample_count(width, height, channels)?;
        if data.len() != expected {
            return Err(Error::SampleCount {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            primaries,
            transfer,
            data,
        })
    }

    /// Creates a buffer where every pixel equals `pixel`.
    ///
    /// The channel count is taken from `pixel.len()`.
    pub fn filled(
        width: u32,
        height: u32,
        pixel: &[f32],
        primaries: ColorPrimaries,
        transfer: TransferFunction,
    ) -> Result<Self> {
        let channels = u8::try_from(pixel.len()).map_err(|_| Error::channel_mismatch(3, u8::MAX))?;
        let len = sample_count(width, height, channels)?;
        let data = pixel.iter().copied().cycle().take(len).collect();
        Self::from_vec(width, height, channels, primaries, transfer, data)
    }

    /// Creates a single-channel gain-map buffer.
    ///
    /// Gain maps carry no color, so the primaries tag is
    /// [`ColorPrimaries::Unspecified`]. `transfer` is the encoding of the
    /// stored samples (Apple gain maps are sRGB-encoded).
    pub fn gain_map(
        width: u32,
        height: u32,
        transfer: TransferFunction,
        data: Vec<f32>,
    ) -> Result<Self> {
        Self::from_vec(width, height, 1, ColorPrimaries::Unspecified, transfer, data)
    }

    /// Builds a buffer from 8-bit normalized-integer samples (`v / 255`).
    pub fn from_u8(
        width: u32,
        height: u32,
        channels: u8,
        primaries: ColorPrimaries,
        transfer: TransferFunction,
        samples: &[u8],
    ) -> Result<Self> {
        let data = samples.iter().map(|&v| v as f32 / u8::MAX as f32).collect();
        Self::from_vec(width, height, channels, primaries, transfer, data)
    }

    /// Builds a buffer from 16-bit normalized-integer samples (`v / 65535`).
    pub fn from_u16(
        width: u32,
        height: u32,
        channels: u8,
        primaries: ColorPrimaries,
        transfer: TransferFunction,
        samples: &[u16],
    ) -> Result<Self> {
        let data = samples.iter().map(|&v| v as f32 / u16::MAX as f32).collect();
        Self::from_vec(width, height, channels, primaries, transfer, data)
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Samples per pixel (1 or 3).
    #[inline]
    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Primaries tag.
    #[inline]
    pub fn primaries(&self) -> ColorPrimaries {
        self.primaries
    }

    /// Transfer function tag.
    #[inline]
    pub fn transfer(&self) -> TransferFunction {
        self.transfer
    }

    /// Number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Samples per row (`width * channels`).
    #[inline]
    pub fn row_len(&self) -> usize {
        self.width as usize * self.channels as usize
    }

    /// All samples, row-major.
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Consumes the buffer and returns its samples.
    #[inline]
    pub fn into_data(self) -> Vec<f32> {
        self.data
    }

    /// Samples of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[f32] {
        let len = self.row_len();
        let start = y as usize * len;
        &self.data[start..start + len]
    }

    /// Samples of pixel `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> &[f32] {
        let c = self.channels as usize;
        let idx = (y as usize * self.width as usize + x as usize) * c;
        &self.data[idx..idx + c]
    }

    /// Checks that this buffer has `expected` channels.
    pub fn expect_channels(&self, expected: u8) -> Result<()> {
        if self.channels != expected {
            return Err(Error::channel_mismatch(expected, self.channels));
        }
        Ok(())
    }

    /// Builds a buffer with this buffer's shape and new tags and samples.
    ///
    /// Used by stages to hand their freshly allocated output downstream.
    pub fn derive(
        &self,
        primaries: ColorPrimaries,
        transfer: TransferFunction,
        data: Vec<f32>,
    ) -> Result<Self> {
        Self::from_vec(self.width, self.height, self.channels, primaries, transfer, data)
    }
}

/// Validates a buffer shape and returns its sample count.
pub fn sample_count(width: u32, height: u32, channels: u8) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::invalid_dimensions(width, height, "width and height must be > 0"));
    }
    if channels != 1 && channels != 3 {
        return Err(Error::channel_mismatch(3, channels));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(channels as usize))
        .ok_or_else(|| Error::invalid_dimensions(width, height, "sample count overflows usize"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_zeroed() {
        let buf = PixelBuffer::new(4, 3, 3, ColorPrimaries::Srgb, TransferFunction::Linear).unwrap();
        assert_eq!(buf.dimensions(), (4, 3));
        assert_eq!(buf.data().len(), 36);
        assert!(buf.data().iter().all(|&v| v == 0.0));
        assert_eq!(buf.row_len(), 12);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let err = PixelBuffer::new(0, 3, 3, ColorPrimaries::Srgb, TransferFunction::Linear);
        assert!(matches!(err, Err(Error::InvalidDimensions { .. })));
    }

    #[test]
    fn test_channel_count_rejected() {
        let err = PixelBuffer::new(2, 2, 4, ColorPrimaries::Srgb, TransferFunction::Linear);
        assert!(matches!(err, Err(Error::ChannelMismatch { got: 4, .. })));
    }

    #[test]
    fn test_sample_count_mismatch() {
        let err = PixelBuffer::from_vec(
            2,
            2,
            3,
            ColorPrimaries::Srgb,
            TransferFunction::Linear,
            vec![0.0; 11],
        );
        assert!(matches!(err, Err(Error::SampleCount { expected: 12, got: 11 })));
    }

    #[test]
    fn test_pixel_access() {
        let data: Vec<f32> = (0..12).map(|i| i as f32).collect();
        let buf = PixelBuffer::from_vec(2, 2, 3, ColorPrimaries::Srgb, TransferFunction::Srgb, data)
            .unwrap();
        assert_eq!(buf.pixel(1, 0), &[3.0, 4.0, 5.0]);
        assert_eq!(buf.pixel(0, 1), &[6.0, 7.0, 8.0]);
        assert_eq!(buf.row(1), &[6.0, 7.0, 8.0, 9.0, 10.0, 11.0]);
    }

    #[test]
    fn test_normalized_integers() {
        let buf = PixelBuffer::from_u8(1, 1, 3, ColorPrimaries::DisplayP3, TransferFunction::Srgb, &[0, 255, 51])
            .unwrap();
        assert_eq!(buf.pixel(0, 0)[0], 0.0);
        assert_eq!(buf.pixel(0, 0)[1], 1.0);
        approx::assert_abs_diff_eq!(buf.pixel(0, 0)[2], 0.2, epsilon = 1e-6);

        let buf = PixelBuffer::from_u16(1, 1, 1, ColorPrimaries::Unspecified, TransferFunction::Linear, &[65535])
            .unwrap();
        assert_eq!(buf.data(), &[1.0]);
    }

    #[test]
    fn test_gain_map_tags() {
        let gm = PixelBuffer::gain_map(2, 1, TransferFunction::Srgb, vec![0.25, 0.75]).unwrap();
        assert_eq!(gm.primaries(), ColorPrimaries::Unspecified);
        assert_eq!(gm.transfer(), TransferFunction::Srgb);
        assert!(gm.expect_channels(1).is_ok());
        assert!(gm.expect_channels(3).is_err());
    }

    #[test]
    fn test_derive_keeps_shape() {
        let buf = PixelBuffer::filled(3, 2, &[0.1, 0.2, 0.3], ColorPrimaries::Srgb, TransferFunction::Srgb)
            .unwrap();
        let out = buf
            .derive(ColorPrimaries::Rec2020, TransferFunction::Linear, vec![1.0; 18])
            .unwrap();
        assert_eq!(out.dimensions(), (3, 2));
        assert_eq!(out.primaries(), ColorPrimaries::Rec2020);
        assert!(buf.derive(ColorPrimaries::Srgb, TransferFunction::Linear, vec![1.0; 17]).is_err());
    }
}
