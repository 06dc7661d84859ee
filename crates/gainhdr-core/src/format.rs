//! Integer output bit depths.
//!
//! The quantizer only targets the depths HDR containers actually carry.
//! Anything else is rejected before quantization starts.

use std::fmt;

/// Supported integer codeword depths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum BitDepth {
    /// 8 bits per sample.
    U8,
    /// 10 bits per sample (HEVC/AV1 Main 10).
    U10,
    /// 12 bits per sample.
    U12,
    /// 16 bits per sample (PNG 48-bit).
    #[default]
    U16,
}

impl BitDepth {
    /// All supported depths, ascending.
    pub const ALL: [Self; 4] = [Self::U8, Self::U10, Self::U12, Self::U16];

    /// Number of bits per sample.
    #[inline]
    pub const fn bits(&self) -> u32 {
        match self {
            Self::U8 => 8,
            Self::U10 => 10,
            Self::U12 => 12,
            Self::U16 => 16,
        }
    }

    /// Largest codeword, `2^bits - 1`.
    #[inline]
    pub const fn max_code(&self) -> u16 {
        match self {
            Self::U8 => 0xFF,
            Self::U10 => 0x3FF,
            Self::U12 => 0xFFF,
            Self::U16 => 0xFFFF,
        }
    }

    /// Resolves a bit count, or `None` when unsupported.
    #[inline]
    pub const fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            8 => Some(Self::U8),
            10 => Some(Self::U10),
            12 => Some(Self::U12),
            16 => Some(Self::U16),
            _ => None,
        }
    }
}

impl fmt::Display for BitDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}
