//! Color primaries and transfer function tags.
//!
//! Every [`PixelBuffer`](crate::PixelBuffer) carries one [`ColorPrimaries`]
//! tag and one [`TransferFunction`] tag. Both are closed enumerations: the
//! workspace supports a small fixed set of named encodings and never parses
//! color-management profiles at runtime.
//!
//! # Naming
//!
//! Both enums implement [`FromStr`] with the common aliases used by camera
//! metadata and color tools, so `"Display P3"`, `"display-p3"` and `"P3-D65"`
//! all resolve to [`ColorPrimaries::DisplayP3`]. Unknown names fail with
//! [`Error::UnsupportedPrimaries`] / [`Error::UnsupportedTransferFunction`].
//!
//! ```rust
//! use gainhdr_core::{ColorPrimaries, TransferFunction};
//!
//! let p: ColorPrimaries = "ITU-R BT.2020".parse().unwrap();
//! assert_eq!(p, ColorPrimaries::Rec2020);
//!
//! let tf: TransferFunction = "ST2084".parse().unwrap();
//! assert_eq!(tf, TransferFunction::Pq);
//! ```

use crate::Error;
use std::fmt;
use std::str::FromStr;

/// D65 white point chromaticity.
pub const D65_XY: (f32, f32) = (0.31270, 0.32900);

/// D50 white point chromaticity.
pub const D50_XY: (f32, f32) = (0.34567, 0.35850);

/// D60 white point chromaticity (ACES).
pub const D60_XY: (f32, f32) = (0.32168, 0.33767);

/// DCI theatrical white point chromaticity.
pub const DCI_XY: (f32, f32) = (0.31400, 0.35100);

/// Named RGB color primaries.
///
/// `Unspecified` tags buffers whose samples are not colors (gain maps).
/// Color-space transforms refuse it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ColorPrimaries {
    /// sRGB / BT.709 primaries, D65.
    Srgb,
    /// Display P3: DCI-P3 primaries with a D65 white point.
    #[default]
    DisplayP3,
    /// DCI-P3 primaries with the DCI white point.
    DciP3,
    /// ITU-R BT.2020 / BT.2100 primaries, D65.
    Rec2020,
    /// ProPhoto RGB (ROMM RGB), D50.
    ProPhoto,
    /// ACES AP1 primaries (ACEScg), D60.
    AcesAp1,
    /// Not a color image (e.g. a gain map plane).
    Unspecified,
}

impl ColorPrimaries {
    /// All concrete primaries, excluding `Unspecified`.
    pub const ALL: [Self; 6] = [
        Self::Srgb,
        Self::DisplayP3,
        Self::DciP3,
        Self::Rec2020,
        Self::ProPhoto,
        Self::AcesAp1,
    ];

    /// Human-readable name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Srgb => "sRGB",
            Self::DisplayP3 => "Display P3",
            Self::DciP3 => "DCI-P3",
            Self::Rec2020 => "Rec.2020",
            Self::ProPhoto => "ProPhoto RGB",
            Self::AcesAp1 => "ACES AP1",
            Self::Unspecified => "Unspecified",
        }
    }

    /// Red, green, blue and white xy chromaticities.
    ///
    /// Returns `None` for [`ColorPrimaries::Unspecified`].
    pub const fn chromaticities(&self) -> Option<[(f32, f32); 4]> {
        match self {
            Self::Srgb => Some([(0.6400, 0.3300), (0.3000, 0.6000), (0.1500, 0.0600), D65_XY]),
            Self::DisplayP3 => Some([(0.6800, 0.3200), (0.2650, 0.6900), (0.1500, 0.0600), D65_XY]),
            Self::DciP3 => Some([(0.6800, 0.3200), (0.2650, 0.6900), (0.1500, 0.0600), DCI_XY]),
            Self::Rec2020 => Some([(0.7080, 0.2920), (0.1700, 0.7970), (0.1310, 0.0460), D65_XY]),
            Self::ProPhoto => Some([(0.7347, 0.2653), (0.1596, 0.8404), (0.0366, 0.0001), D50_XY]),
            Self::AcesAp1 => Some([(0.7130, 0.2930), (0.1650, 0.8300), (0.1280, 0.0440), D60_XY]),
            Self::Unspecified => None,
        }
    }

    /// Returns `true` unless this is `Unspecified`.
    #[inline]
    pub const fn is_specified(&self) -> bool {
        !matches!(self, Self::Unspecified)
    }
}

impl fmt::Display for ColorPrimaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorPrimaries {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_name(s);
        let p = match key.as_str() {
            "srgb" | "rec709" | "bt709" | "iturbt709" => Self::Srgb,
            "displayp3" | "p3d65" | "p3" => Self::DisplayP3,
            "dcip3" | "p3dci" => Self::DciP3,
            "rec2020" | "bt2020" | "iturbt2020" | "rec2100" | "bt2100" => Self::Rec2020,
            "prophoto" | "prophotorgb" | "rommrgb" | "romm" => Self::ProPhoto,
            "acesap1" | "ap1" | "acescg" => Self::AcesAp1,
            "unspecified" => Self::Unspecified,
            _ => return Err(Error::unsupported_primaries(s)),
        };
        Ok(p)
    }
}

/// Named transfer functions (stored-value encodings).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum TransferFunction {
    /// Linear light, no encoding.
    Linear,
    /// IEC 61966-2-1 sRGB piecewise curve (also Display P3).
    #[default]
    Srgb,
    /// Pure power law, gamma 2.2.
    Gamma22,
    /// ITU-R BT.709 / BT.1886 camera curve.
    Rec709,
    /// SMPTE ST 2084 perceptual quantizer.
    Pq,
    /// ARIB STD-B67 / BT.2100 hybrid log-gamma.
    Hlg,
}

impl TransferFunction {
    /// Human-readable name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Linear => "Linear",
            Self::Srgb => "sRGB",
            Self::Gamma22 => "Gamma 2.2",
            Self::Rec709 => "Rec.709",
            Self::Pq => "PQ",
            Self::Hlg => "HLG",
        }
    }

    /// Returns `true` for [`TransferFunction::Linear`].
    #[inline]
    pub const fn is_linear(&self) -> bool {
        matches!(self, Self::Linear)
    }

    /// Returns `true` for the HDR curves (PQ, HLG).
    #[inline]
    pub const fn is_hdr(&self) -> bool {
        matches!(self, Self::Pq | Self::Hlg)
    }
}

impl fmt::Display for TransferFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TransferFunction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_name(s);
        let tf = match key.as_str() {
            "linear" | "lin" | "none" => Self::Linear,
            "srgb" | "iec6196621" => Self::Srgb,
            "gamma22" | "g22" => Self::Gamma22,
            "rec709" | "bt709" | "bt1886" => Self::Rec709,
            "pq" | "st2084" | "smptest2084" | "bt2100pq" => Self::Pq,
            "hlg" | "aribstdb67" | "bt2100hlg" => Self::Hlg,
            _ => return Err(Error::unsupported_transfer(s, "unknown transfer function")),
        };
        Ok(tf)
    }
}

/// Lowercases and strips separators so aliases compare loosely.
fn normalize_name(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_' | '.'))
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primaries_aliases() {
        assert_eq!("Display P3".parse::<ColorPrimaries>().unwrap(), ColorPrimaries::DisplayP3);
        assert_eq!("ITU-R BT.2020".parse::<ColorPrimaries>().unwrap(), ColorPrimaries::Rec2020);
        assert_eq!("ROMM RGB".parse::<ColorPrimaries>().unwrap(), ColorPrimaries::ProPhoto);
        assert_eq!("acescg".parse::<ColorPrimaries>().unwrap(), ColorPrimaries::AcesAp1);
        assert!(matches!(
            "CIE RGB".parse::<ColorPrimaries>(),
            Err(Error::UnsupportedPrimaries { .. })
        ));
    }

    #[test]
    fn test_transfer_aliases() {
        assert_eq!("PQ".parse::<TransferFunction>().unwrap(), TransferFunction::Pq);
        assert_eq!("SMPTE ST 2084".parse::<TransferFunction>().unwrap(), TransferFunction::Pq);
        assert_eq!("bt2100-hlg".parse::<TransferFunction>().unwrap(), TransferFunction::Hlg);
        assert_eq!("linear".parse::<TransferFunction>().unwrap(), TransferFunction::Linear);
        assert!(matches!(
            "s-log3".parse::<TransferFunction>(),
            Err(Error::UnsupportedTransferFunction { .. })
        ));
    }

    #[test]
    fn test_unspecified_has_no_chromaticities() {
        assert!(ColorPrimaries::Unspecified.chromaticities().is_none());
        for p in ColorPrimaries::ALL {
            assert!(p.chromaticities().is_some(), "{p}");
            assert!(p.is_specified());
        }
    }

    #[test]
    fn test_flags() {
        assert!(TransferFunction::Linear.is_linear());
        assert!(TransferFunction::Pq.is_hdr());
        assert!(TransferFunction::Hlg.is_hdr());
        assert!(!TransferFunction::Srgb.is_hdr());
    }
}
