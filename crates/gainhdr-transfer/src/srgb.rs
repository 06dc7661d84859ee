//! sRGB transfer function (IEC 61966-2-1).
//!
//! Piecewise: a linear toe below the break point, a 2.4 power above it.
//! Display P3 uses the same curve.

const DECODE_BREAK: f32 = 0.04045;
const ENCODE_BREAK: f32 = 0.0031308;
const TOE_SLOPE: f32 = 12.92;
const OFFSET: f32 = 0.055;
const EXPONENT: f32 = 2.4;

/// Stored sRGB value -> linear light. Input is clamped to `[0, 1]`.
///
/// ```rust
/// use gainhdr_transfer::srgb::decode;
///
/// assert!((decode(0.5) - 0.214).abs() < 0.001);
/// ```
#[inline]
pub fn decode(v: f32) -> f32 {
    let v = crate::unit(v);
    if v >= 1.0 {
        return 1.0;
    }
    if v <= DECODE_BREAK {
        v / TOE_SLOPE
    } else {
        ((v + OFFSET) / (1.0 + OFFSET)).powf(EXPONENT)
    }
}

/// Linear light -> stored sRGB value. Input is clamped to `[0, 1]`.
///
/// Both ends are exact: `encode(0.0) == 0.0`, `encode(1.0) == 1.0`.
#[inline]
pub fn encode(l: f32) -> f32 {
    let l = crate::unit(l);
    if l >= 1.0 {
        return 1.0;
    }
    if l <= ENCODE_BREAK {
        l * TOE_SLOPE
    } else {
        (1.0 + OFFSET) * l.powf(1.0 / EXPONENT) - OFFSET
    }
}
