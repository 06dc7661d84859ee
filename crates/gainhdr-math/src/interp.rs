//! Sample helpers: clamping for the gain model and quantizer, the bicubic
//! kernel for the resampler.

/// Clamps to `[0, 1]`, mapping NaN to 0.
#[inline]
pub fn saturate(value: f32) -> f32 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}

/// Catmull-Rom weights for the four taps around a sample.
///
/// `t` is the fractional offset from tap 1 toward tap 2, in `[0, 1)`.
/// The weights sum to 1, and `t = 0` yields `[0, 1, 0, 0]`, so the
/// kernel passes through the original samples.
#[inline]
pub fn catmull_rom_weights(t: f32) -> [f32; 4] {
    let t2 = t * t;
    let t3 = t2 * t;
    [
        0.5 * (-t3 + 2.0 * t2 - t),
        0.5 * (3.0 * t3 - 5.0 * t2 + 2.0),
        0.5 * (-3.0 * t3 + 4.0 * t2 + t),
        0.5 * (t3 - t2),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saturate() {
        assert_eq!(saturate(-0.5), 0.0);
        assert_eq!(saturate(1.5), 1.0);
        assert_eq!(saturate(0.25), 0.25);
        assert_eq!(saturate(f32::NAN), 0.0);
    }

    #[test]
    fn test_catmull_rom_interpolates() {
        assert_eq!(catmull_rom_weights(0.0), [0.0, 1.0, 0.0, 0.0]);
        for i in 0..10 {
            let w = catmull_rom_weights(i as f32 / 10.0);
            let sum: f32 = w.iter().sum();
            assert!((sum - 1.0).abs() < 1e-6);
        }
    }
}
