//! ITU-R BT.709 camera curve.
//!
//! `decode` is the exact inverse of the BT.709 OETF, not the BT.1886
//! display EOTF, so stored values round-trip.

const ALPHA: f32 = 1.099;
const BETA: f32 = 0.018;
const TOE_SLOPE: f32 = 4.5;
const EXPONENT: f32 = 0.45;

/// Linear -> stored value (BT.709 OETF).
#[inline]
pub fn encode(l: f32) -> f32 {
    let l = crate::unit(l);
    if l >= 1.0 {
        return 1.0;
    }
    if l < BETA {
        TOE_SLOPE * l
    } else {
        ALPHA * l.powf(EXPONENT) - (ALPHA - 1.0)
    }
}

/// Stored value -> linear (inverse OETF).
#[inline]
pub fn decode(v: f32) -> f32 {
    let v = crate::unit(v);
    if v >= 1.0 {
        return 1.0;
    }
    if v < TOE_SLOPE * BETA {
        v / TOE_SLOPE
    } else {
        ((v + (ALPHA - 1.0)) / ALPHA).powf(1.0 / EXPONENT)
    }
}
