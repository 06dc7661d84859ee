//! # gainhdr-transfer
//!
//! Transfer functions: the curves between linear light and stored values.
//!
//! # Terminology
//!
//! - **decode**: stored value -> linear light (EOTF for display curves,
//!   inverse OETF for scene curves)
//! - **encode**: linear light -> stored value
//!
//! # Domains
//!
//! | Curve | Stored | Linear (normalized) |
//! |-------|--------|---------------------|
//! | [`srgb`] | [0, 1] | [0, 1] |
//! | [`gamma`] | [0, 1] | [0, 1] |
//! | [`rec709`] | [0, 1] | [0, 1] |
//! | [`pq`] | [0, 1] | [0, 1] = [0, 10000] cd/m2 |
//! | [`hlg`] | [0, 1] | [0, 1] scene light |
//!
//! Every nonlinear curve clamps its input to its domain before evaluating,
//! so negative or NaN inputs never reach a fractional power. Linear is the
//! identity and does not clamp: float outputs keep negative and
//! super-white values for downstream tools.
//!
//! # Usage
//!
//! ```rust
//! use gainhdr_core::TransferFunction;
//! use gainhdr_transfer::{decode, encode};
//!
//! let lin = decode(TransferFunction::Srgb, 0.5);
//! assert!((lin - 0.214).abs() < 1e-3);
//!
//! // 203 cd/m2 reference white, normalized to the 10000 cd/m2 PQ peak
//! let code = encode(TransferFunction::Pq, 203.0 / 10000.0);
//! assert!((code - 0.5807).abs() < 1e-3);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod gamma;
pub mod hlg;
pub mod pq;
pub mod rec709;
pub mod srgb;

use gainhdr_core::TransferFunction;

/// Decodes a stored sample to normalized linear light.
#[inline]
pub fn decode(tf: TransferFunction, v: f32) -> f32 {
    match tf {
        TransferFunction::Linear => v,
        TransferFunction::Srgb => srgb::decode(v),
        TransferFunction::Gamma22 => gamma::decode(v, gamma::GAMMA_22),
        TransferFunction::Rec709 => rec709::decode(v),
        TransferFunction::Pq => pq::decode(v),
        TransferFunction::Hlg => hlg::decode(v),
    }
}

/// Encodes normalized linear light to a stored sample.
#[inline]
pub fn encode(tf: TransferFunction, l: f32) -> f32 {
    match tf {
        TransferFunction::Linear => l,
        TransferFunction::Srgb => srgb::encode(l),
        TransferFunction::Gamma22 => gamma::encode(l, gamma::GAMMA_22),
        TransferFunction::Rec709 => rec709::encode(l),
        TransferFunction::Pq => pq::encode(l),
        TransferFunction::Hlg => hlg::encode(l),
    }
}

/// Clamps to `[0, 1]`, mapping NaN to 0.
#[inline]
pub(crate) fn unit(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [TransferFunction; 6] = [
        TransferFunction::Linear,
        TransferFunction::Srgb,
        TransferFunction::Gamma22,
        TransferFunction::Rec709,
        TransferFunction::Pq,
        TransferFunction::Hlg,
    ];

    #[test]
    fn test_roundtrip_all_curves() {
        for tf in ALL {
            for i in 0..=50 {
                let x = i as f32 / 50.0;
                let back = decode(tf, encode(tf, x));
                assert!((back - x).abs() < 1e-4, "{tf}: x={x} back={back}");
            }
        }
    }

    #[test]
    fn test_endpoints() {
        for tf in ALL {
            assert_eq!(encode(tf, 0.0), 0.0, "{tf}");
            assert_eq!(encode(tf, 1.0), 1.0, "{tf}");
        }
    }

    #[test]
    fn test_linear_passes_out_of_range() {
        assert_eq!(encode(TransferFunction::Linear, -0.25), -0.25);
        assert_eq!(decode(TransferFunction::Linear, 4.0), 4.0);
    }

    #[test]
    fn test_nonlinear_clamps_negative_and_nan() {
        for tf in ALL.into_iter().filter(|tf| !tf.is_linear()) {
            assert_eq!(encode(tf, -1.0), 0.0, "{tf}");
            assert_eq!(encode(tf, f32::NAN), 0.0, "{tf}");
            assert_eq!(decode(tf, -1.0), 0.0, "{tf}");
            assert!(decode(tf, f32::NAN).is_finite(), "{tf}");
        }
    }
}
