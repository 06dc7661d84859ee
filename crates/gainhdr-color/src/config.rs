//! Conversion settings.
//!
//! [`ConversionConfig`] gathers every target-format parameter of one
//! conversion. It loads from YAML; primaries and transfer functions are
//! written by name and accept the usual aliases:
//!
//! ```yaml
//! target_primaries: ITU-R BT.2020
//! target_transfer: PQ
//! reference_white_nits: 203
//! bit_depth: 16          # omit or null for float output
//! dither: false
//! interpolation: bilinear
//! gamma_convention: power
//! ```

use std::path::Path;

use gainhdr_core::{ColorPrimaries, TransferFunction};
use gainhdr_ops::Interpolation;
use serde::{Deserialize, Serialize};

use crate::encode::DEFAULT_REFERENCE_WHITE_NITS;
use crate::{ColorError, ColorResult, GammaConvention};

/// Target-format parameters for [`HdrPipeline`](crate::HdrPipeline).
///
/// The default writes BT.2100 PQ (BT.2020 primaries) at 16 bits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawConfig", into = "RawConfig")]
pub struct ConversionConfig {
    /// Output primaries.
    pub target_primaries: ColorPrimaries,
    /// Output transfer function.
    pub target_transfer: TransferFunction,
    /// Luminance of linear 1.0 in cd/m2, used by PQ and HLG.
    pub reference_white_nits: f32,
    /// Integer bits per sample; `None` keeps float output.
    pub bit_depth: Option<u32>,
    /// Ordered dithering below 16 bits.
    pub dither: bool,
    /// Gain-map upsampling filter.
    pub interpolation: Interpolation,
    /// How the gain-map gamma is applied.
    pub gamma_convention: GammaConvention,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            target_primaries: ColorPrimaries::Rec2020,
            target_transfer: TransferFunction::Pq,
            reference_white_nits: DEFAULT_REFERENCE_WHITE_NITS,
            bit_depth: Some(16),
            dither: false,
            interpolation: Interpolation::Bilinear,
            gamma_convention: GammaConvention::Power,
        }
    }
}

impl ConversionConfig {
    /// Loads a config from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> ColorResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parses a YAML document; missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// [`ColorError::Core`] wrapping `UnsupportedPrimaries` or
    /// `UnsupportedTransferFunction` for unknown names, [`ColorError::Yaml`]
    /// for malformed documents.
    pub fn from_yaml_str(yaml: &str) -> ColorResult<Self> {
        let raw: RawConfig = serde_yaml::from_str(yaml)?;
        Self::from_raw(raw)
    }

    /// Serializes to YAML.
    pub fn to_yaml_string(&self) -> ColorResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Sets the output primaries.
    pub fn with_primaries(mut self, primaries: ColorPrimaries) -> Self {
        self.target_primaries = primaries;
        self
    }

    /// Sets the output transfer function.
    pub fn with_transfer(mut self, transfer: TransferFunction) -> Self {
        self.target_transfer = transfer;
        self
    }

    /// Sets the output bit depth (`None` for float).
    pub fn with_bit_depth(mut self, bits: Option<u32>) -> Self {
        self.bit_depth = bits;
        self
    }

    /// Sets the reference white luminance.
    pub fn with_reference_white(mut self, nits: f32) -> Self {
        self.reference_white_nits = nits;
        self
    }

    /// Enables or disables dithering.
    pub fn with_dither(mut self, dither: bool) -> Self {
        self.dither = dither;
        self
    }

    /// Sets the gain-map filter.
    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Sets the gamma convention.
    pub fn with_gamma_convention(mut self, convention: GammaConvention) -> Self {
        self.gamma_convention = convention;
        self
    }

    fn from_raw(raw: RawConfig) -> ColorResult<Self> {
        let defaults = Self::default();
        Ok(Self {
            target_primaries: match raw.target_primaries {
                Some(name) => name.parse()?,
                None => defaults.target_primaries,
            },
            target_transfer: match raw.target_transfer {
                Some(name) => name.parse()?,
                None => defaults.target_transfer,
            },
            reference_white_nits: raw.reference_white_nits.unwrap_or(defaults.reference_white_nits),
            bit_depth: raw.bit_depth.unwrap_or(defaults.bit_depth),
            dither: raw.dither.unwrap_or(defaults.dither),
            interpolation: raw.interpolation.unwrap_or(defaults.interpolation),
            gamma_convention: raw.gamma_convention.unwrap_or(defaults.gamma_convention),
        })
    }
}

/// On-disk form: names as strings, every key optional.
///
/// `bit_depth` distinguishes a missing key (default depth) from an explicit
/// `null` (float output).
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    target_primaries: Option<String>,
    #[serde(default)]
    target_transfer: Option<String>,
    #[serde(default)]
    reference_white_nits: Option<f32>,
    #[serde(default, with = "explicit_null")]
    bit_depth: Option<Option<u32>>,
    #[serde(default)]
    dither: Option<bool>,
    #[serde(default)]
    interpolation: Option<Interpolation>,
    #[serde(default)]
    gamma_convention: Option<GammaConvention>,
}

impl TryFrom<RawConfig> for ConversionConfig {
    type Error = ColorError;

    fn try_from(raw: RawConfig) -> ColorResult<Self> {
        Self::from_raw(raw)
    }
}

impl From<ConversionConfig> for RawConfig {
    fn from(cfg: ConversionConfig) -> Self {
        Self {
            target_primaries: Some(cfg.target_primaries.name().to_string()),
            target_transfer: Some(cfg.target_transfer.name().to_string()),
            reference_white_nits: Some(cfg.reference_white_nits),
            bit_depth: Some(cfg.bit_depth),
            dither: Some(cfg.dither),
            interpolation: Some(cfg.interpolation),
            gamma_convention: Some(cfg.gamma_convention),
        }
    }
}

/// `Option<Option<T>>` where a present `null` is `Some(None)`.
mod explicit_null {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S, T>(value: &Option<Option<T>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}
