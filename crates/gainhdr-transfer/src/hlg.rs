//! Hybrid Log-Gamma (ITU-R BT.2100).
//!
//! Relative, scene-referred curve. Linear 1.0 is the nominal peak; the
//! encoder upstream scales reference white against a 1000 cd/m2 peak.

const A: f64 = 0.17883277;
const B: f64 = 0.28466892; // 1 - 4a
const C: f64 = 0.55991073; // 0.5 - a * ln(4a)

const SQRT_BREAK: f64 = 1.0 / 12.0;

/// Scene light `[0, 1]` -> HLG value (OETF).
#[inline]
pub fn encode(e: f32) -> f32 {
    let e = crate::unit(e) as f64;
    if e >= 1.0 {
        return 1.0;
    }
    let v = if e <= SQRT_BREAK {
        (3.0 * e).sqrt()
    } else {
        A * (12.0 * e - B).ln() + C
    };
    v as f32
}

/// HLG value -> scene light (inverse OETF).
#[inline]
pub fn decode(v: f32) -> f32 {
    let v = crate::unit(v) as f64;
    if v >= 1.0 {
        return 1.0;
    }
    let e = if v <= 0.5 {
        v * v / 3.0
    } else {
        (((v - C) / A).exp() + B) / 12.0
    };
    e as f32
}
