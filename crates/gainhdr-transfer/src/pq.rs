//! Perceptual Quantizer (SMPTE ST 2084).
//!
//! Absolute curve: stored value 1.0 is 10000 cd/m2. Evaluated in f64 so
//! 16-bit codewords land on the same integer as a double-precision
//! reference.
//!
//! # Example
//!
//! ```rust
//! use gainhdr_transfer::pq;
//!
//! // SDR reference white (ITU-R BT.2408)
//! let v = pq::encode_nits(203.0);
//! assert!((v - 0.5807).abs() < 1e-4);
//! assert!((pq::decode_nits(v) - 203.0).abs() < 0.01);
//! ```

/// Peak luminance of the curve in cd/m2.
pub const PEAK_NITS: f32 = 10000.0;

const M1: f64 = 2610.0 / 16384.0;
const M2: f64 = 2523.0 / 4096.0 * 128.0;
const C1: f64 = 3424.0 / 4096.0;
const C2: f64 = 2413.0 / 4096.0 * 32.0;
const C3: f64 = 2392.0 / 4096.0 * 32.0;

/// Normalized linear (1.0 = 10000 cd/m2) -> PQ value.
///
/// Input is clamped to `[0, 1]`; 0 maps to exactly 0.
#[inline]
pub fn encode(y: f32) -> f32 {
    let y = crate::unit(y) as f64;
    if y <= 0.0 {
        return 0.0;
    }
    let p = y.powf(M1);
    ((C1 + C2 * p) / (1.0 + C3 * p)).powf(M2) as f32
}

/// PQ value -> normalized linear (1.0 = 10000 cd/m2).
#[inline]
pub fn decode(v: f32) -> f32 {
    let v = crate::unit(v) as f64;
    let vp = v.powf(1.0 / M2);
    let num = (vp - C1).max(0.0);
    let den = C2 - C3 * vp;
    (num / den).powf(1.0 / M1) as f32
}

/// Absolute luminance in cd/m2 -> PQ value, clamped to `[0, 10000]`.
#[inline]
pub fn encode_nits(nits: f32) -> f32 {
    encode(nits / PEAK_NITS)
}

/// PQ value -> absolute luminance in cd/m2.
#[inline]
pub fn decode_nits(v: f32) -> f32 {
    decode(v) * PEAK_NITS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        for nits in [0.0, 0.01, 0.1, 1.0, 10.0, 100.0, 203.0, 1000.0, 4000.0, 10000.0] {
            let back = decode_nits(encode_nits(nits));
            let err = (back - nits).abs() / nits.max(1.0);
            assert!(err < 1e-4, "nits={}, back={}", nits, back);
        }
    }

    #[test]
    fn test_known_values() {
        assert_eq!(encode(0.0), 0.0);
        assert!((encode(1.0) - 1.0).abs() < 1e-6);
        // 100 nits is close to half code
        assert!((encode_nits(100.0) - 0.50808).abs() < 1e-4);
    }

    #[test]
    fn test_clamps_above_peak() {
        assert_eq!(encode_nits(20000.0), encode_nits(10000.0));
        assert_eq!(encode_nits(-5.0), 0.0);
    }
}
