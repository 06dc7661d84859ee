//! Pure power-law curves.

/// Gamma 2.2, the usual approximation of an sRGB display.
pub const GAMMA_22: f32 = 2.2;

/// Stored value -> linear: `v^gamma`, input clamped to `[0, 1]`.
#[inline]
pub fn decode(v: f32, gamma: f32) -> f32 {
    crate::unit(v).powf(gamma)
}

/// Linear -> stored value: `l^(1/gamma)`, input clamped to `[0, 1]`.
#[inline]
pub fn encode(l: f32, gamma: f32) -> f32 {
    crate::unit(l).powf(1.0 / gamma)
}
