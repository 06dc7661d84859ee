//! Reference values from iPhone-style conversions.
//!
//! The Apple path decodes both the base and the gain map with the sRGB
//! curve and applies `m = 1 + (headroom - 1) * g`.

use approx::assert_relative_eq;
use gainhdr_color::{AppleHdrTags, GainMapMetadata, GainMapModel, Reconstructor};
use gainhdr_core::{ColorPrimaries, PixelBuffer, TransferFunction};
use gainhdr_ops::Quantizer;

fn linspace(n: usize) -> Vec<f32> {
    (0..n).map(|i| i as f32 / (n - 1) as f32).collect()
}

#[test]
fn test_apple_linear_gain_codewords() {
    let headroom = 4.0;
    let base = PixelBuffer::from_vec(2, 2, 3, ColorPrimaries::DisplayP3, TransferFunction::Srgb, linspace(12)).unwrap();
    let gain = PixelBuffer::gain_map(2, 2, TransferFunction::Srgb, linspace(4)).unwrap();

    let model = GainMapModel::from_metadata(&GainMapMetadata::from_headroom(headroom)).unwrap();
    let hdr = Reconstructor::new(model).reconstruct(base, Some(gain)).unwrap();
    assert!(hdr.data().iter().all(|&v| (0.0..=headroom).contains(&v)));

    // normalized to the headroom, 16-bit
    let scaled = hdr.data().iter().map(|v| v / headroom).collect();
    let scaled = hdr.derive(hdr.primaries(), hdr.transfer(), scaled).unwrap();
    let codes = Quantizer::new(16).unwrap().quantize(scaled);

    let expected: [u16; 12] = [0, 142, 454, 1260, 2268, 3635, 9344, 13107, 17630, 41622, 52790, 65535];
    assert_eq!(codes.data(), &expected);
}

#[test]
fn test_unit_interval_codewords() {
    let q = Quantizer::new(16).unwrap();
    let cases = [(0.0, 0), (0.1, 6554), (0.25, 16384), (0.5, 32768), (1.0, 65535), (-0.5, 0), (2.0, 65535)];
    for (v, code) in cases {
        assert_eq!(q.quantize_value(v), code, "{v}");
    }
}

#[test]
fn test_apple_tags_to_gain_curve() {
    let tags = AppleHdrTags::new(1.01, 0.012);
    let headroom = tags.headroom().unwrap();
    // stops = 2.303 - 0.303 * 0.012
    assert_relative_eq!(headroom, (2.303f64 - 0.303 * 0.012).exp2() as f32, max_relative = 1e-6);

    let model = GainMapModel::from_metadata(&tags.to_metadata().unwrap()).unwrap();
    assert_eq!(model.multiplier(0.0), 1.0);
    assert_relative_eq!(model.multiplier(1.0), headroom, max_relative = 1e-6);
    assert_relative_eq!(model.multiplier(0.5), 1.0 + (headroom - 1.0) * 0.5, max_relative = 1e-6);
    assert_eq!(tags.base_primaries().unwrap(), ColorPrimaries::DisplayP3);
}

#[test]
fn test_p3_to_bt2100_pq_codewords() {
    use gainhdr_color::{ColorSpaceTransform, TransferEncoder};

    let src = PixelBuffer::from_vec(
        2, 2, 3,
        ColorPrimaries::Rec2020, TransferFunction::Linear,
        vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 2.0, 0.0, 0.0, 0.0, 2.0, 2.0],
    )
    .unwrap();
    let same = ColorSpaceTransform::new(ColorPrimaries::Rec2020).apply(src).unwrap();
    let pq = TransferEncoder::new(TransferFunction::Pq, 203.0).unwrap().encode(same).unwrap();
    let codes = Quantizer::new(16).unwrap().quantize(pq);
    assert_eq!(codes.data(), &[0, 0, 0, 38055, 38055, 38055, 42871, 0, 0, 0, 42871, 42871]);
}
