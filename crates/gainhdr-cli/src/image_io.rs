//! PNG reading and writing for the CLI.
//!
//! Inputs may be 8- or 16-bit gray, gray+alpha, RGB or RGBA. Alpha is
//! dropped. Outputs are 8- or 16-bit RGB.

use anyhow::{Context, Result, bail};
use gainhdr_core::{BitDepth, ColorPrimaries, PixelBuffer, TransferFunction};
use gainhdr_ops::QuantizedBuffer;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Decoded PNG samples before tagging.
struct Decoded {
    width: u32,
    height: u32,
    /// Samples per pixel in `samples` (1-4)
    channels: usize,
    samples: Samples,
}

enum Samples {
    U8(Vec<u8>),
    U16(Vec<u16>),
}

impl Decoded {
    /// Keeps `out` channels per pixel: gray is replicated to RGB, RGB is
    /// reduced to its first channel, alpha is dropped.
    fn select(&self, out: usize) -> Vec<usize> {
        let color = if self.channels >= 3 { 3 } else { 1 };
        (0..self.width as usize * self.height as usize)
            .flat_map(|p| (0..out).map(move |c| p * self.channels + if color == 1 { 0 } else { c }))
            .collect()
    }

    fn into_buffer(
        self,
        channels: u8,
        primaries: ColorPrimaries,
        transfer: TransferFunction,
    ) -> Result<PixelBuffer> {
        let idx = self.select(channels as usize);
        let buf = match &self.samples {
            Samples::U8(s) => {
                let picked: Vec<u8> = idx.iter().map(|&i| s[i]).collect();
                PixelBuffer::from_u8(self.width, self.height, channels, primaries, transfer, &picked)?
            }
            Samples::U16(s) => {
                let picked: Vec<u16> = idx.iter().map(|&i| s[i]).collect();
                PixelBuffer::from_u16(self.width, self.height, channels, primaries, transfer, &picked)?
            }
        };
        Ok(buf)
    }
}

fn decode(path: &Path) -> Result<Decoded> {
    let file = File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
    let decoder = png::Decoder::new(BufReader::new(file));
    let mut reader = decoder
        .read_info()
        .with_context(|| format!("Failed to read PNG header: {}", path.display()))?;

    let buf_size = reader
        .output_buffer_size()
        .context("cannot determine output buffer size")?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .with_context(|| format!("Failed to decode: {}", path.display()))?;
    let data = &buf[..info.buffer_size()];

    let channels = match info.color_type {
        png::ColorType::Grayscale => 1,
        png::ColorType::GrayscaleAlpha => 2,
        png::ColorType::Rgb => 3,
        png::ColorType::Rgba => 4,
        other => bail!("{}: unsupported PNG color type {:?}", path.display(), other),
    };
    let samples = match info.bit_depth {
        png::BitDepth::Eight => Samples::U8(data.to_vec()),
        png::BitDepth::Sixteen => Samples::U16(
            data.chunks_exact(2)
                .map(|c| u16::from_be_bytes([c[0], c[1]]))
                .collect(),
        ),
        other => bail!("{}: unsupported PNG bit depth {:?}", path.display(), other),
    };

    Ok(Decoded {
        width: info.width,
        height: info.height,
        channels,
        samples,
    })
}

/// Reads an RGB base image.
pub fn read_base(path: &Path, primaries: ColorPrimaries, transfer: TransferFunction) -> Result<PixelBuffer> {
    decode(path)?.into_buffer(3, primaries, transfer)
}

/// Reads a single-channel gain map (the first channel of color PNGs).
pub fn read_gain_map(path: &Path, transfer: TransferFunction) -> Result<PixelBuffer> {
    decode(path)?.into_buffer(1, ColorPrimaries::Unspecified, transfer)
}

/// Writes quantized RGB codewords as an 8- or 16-bit PNG.
pub fn write_png(path: &Path, image: &QuantizedBuffer) -> Result<()> {
    let (depth, bytes) = match image.bit_depth() {
        BitDepth::U8 => (png::BitDepth::Eight, image.to_u8()?),
        BitDepth::U16 => (png::BitDepth::Sixteen, image.to_be_bytes()),
        other => bail!("PNG output supports 8 or 16 bits, not {}", other),
    };
    let color = match image.channels() {
        1 => png::ColorType::Grayscale,
        3 => png::ColorType::Rgb,
        n => bail!("unsupported channel count: {}", n),
    };

    let file = File::create(path).with_context(|| format!("Failed to create: {}", path.display()))?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), image.width(), image.height());
    encoder.set_color(color);
    encoder.set_depth(depth);
    let mut writer = encoder.write_header().context("Failed to write PNG header")?;
    writer
        .write_image_data(&bytes)
        .with_context(|| format!("Failed to save: {}", path.display()))?;
    writer.finish().context("Failed to finish PNG stream")?;
    Ok(())
}
