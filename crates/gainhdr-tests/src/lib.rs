//! Integration tests for gainhdr crates.
//!
//! End-to-end checks that run buffers through several crates at once:
//! gain model, resampler, reconstruction, primaries conversion, transfer
//! encoding and quantization.

#[cfg(test)]
mod reference;

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use gainhdr_color::{
        ColorError, ColorSpaceTransform, ConversionConfig, GainMapMetadata, GainMapModel, HdrPipeline,
        Reconstructor, TransferEncoder,
    };
    use gainhdr_core::{ColorPrimaries, PixelBuffer, TransferFunction};
    use gainhdr_ops::{Interpolation, Quantizer, Resampler};

    fn gradient_base(w: u32, h: u32) -> PixelBuffer {
        let n = (w * h * 3) as usize;
        let data = (0..n).map(|i| i as f32 / (n - 1) as f32).collect();
        PixelBuffer::from_vec(w, h, 3, ColorPrimaries::DisplayP3, TransferFunction::Srgb, data).unwrap()
    }

    /// 0.18 gray doubled by the gain map, encoded as PQ at 203 nits.
    #[test]
    fn test_mid_gray_end_to_end() {
        let base = PixelBuffer::filled(2, 2, &[0.18; 3], ColorPrimaries::DisplayP3, TransferFunction::Linear).unwrap();
        let gain = PixelBuffer::gain_map(1, 1, TransferFunction::Linear, vec![0.5]).unwrap();
        let meta = GainMapMetadata::new(0.0, 2.0);

        let cfg = ConversionConfig::default().with_primaries(ColorPrimaries::DisplayP3);
        let out = HdrPipeline::new(cfg).run(base, Some(gain), Some(&meta)).unwrap();
        let q = out.as_quantized().unwrap();

        assert_eq!(q.primaries(), ColorPrimaries::DisplayP3);
        assert_eq!(q.transfer(), TransferFunction::Pq);
        assert_eq!(q.data(), &[31257; 12]);
    }

    /// The same scenario, stage by stage.
    #[test]
    fn test_mid_gray_stages() {
        let model = GainMapModel::from_metadata(&GainMapMetadata::new(0.0, 2.0)).unwrap();
        assert_eq!(model.multiplier(0.5), 2.0);

        let base = PixelBuffer::filled(2, 2, &[0.18; 3], ColorPrimaries::DisplayP3, TransferFunction::Linear).unwrap();
        let gain = PixelBuffer::gain_map(1, 1, TransferFunction::Linear, vec![0.5]).unwrap();
        let gain = Resampler::default().resample(gain, 2, 2).unwrap();
        assert_eq!(gain.data(), &[0.5; 4]);

        let linear = Reconstructor::new(model).reconstruct(base, Some(gain)).unwrap();
        for &v in linear.data() {
            assert_abs_diff_eq!(v, 0.36, epsilon = 1e-6);
        }

        let same = ColorSpaceTransform::new(ColorPrimaries::DisplayP3).apply(linear.clone()).unwrap();
        assert_eq!(same, linear);

        let encoded = TransferEncoder::new(TransferFunction::Pq, 203.0).unwrap().encode(same).unwrap();
        let q = Quantizer::new(16).unwrap().quantize(encoded);
        assert!(q.data().iter().all(|&c| c == 31257));
    }

    #[test]
    fn test_inverted_bounds_fall_back_to_base() {
        let meta = GainMapMetadata::new(2.0, 1.0);
        assert!(matches!(
            GainMapModel::from_metadata(&meta),
            Err(ColorError::InvalidMetadata { .. })
        ));

        let gain = PixelBuffer::gain_map(2, 2, TransferFunction::Srgb, vec![0.0, 0.25, 0.75, 1.0]).unwrap();
        let pipeline = HdrPipeline::default();
        let degraded = pipeline.run(gradient_base(4, 4), Some(gain), Some(&meta)).unwrap();
        let plain = pipeline.run(gradient_base(4, 4), None, None).unwrap();
        assert_eq!(degraded, plain);
    }

    #[test]
    fn test_unit_gain_reproduces_decoded_base() {
        let base = gradient_base(3, 2);
        let decoded: Vec<f32> = base
            .data()
            .iter()
            .map(|&v| gainhdr_transfer::decode(TransferFunction::Srgb, v))
            .collect();

        // min = max = 0 stops: every sample maps to 1
        let model = GainMapModel::from_metadata(&GainMapMetadata::new(0.0, 0.0)).unwrap();
        let gain = PixelBuffer::gain_map(3, 2, TransferFunction::Linear, vec![0.7; 6]).unwrap();
        let out = Reconstructor::new(model).reconstruct(base.clone(), Some(gain)).unwrap();
        assert_eq!(out.data(), decoded.as_slice());
        assert_eq!(out.transfer(), TransferFunction::Linear);

        let out = Reconstructor::new(GainMapModel::identity()).reconstruct(base, None).unwrap();
        assert_eq!(out.data(), decoded.as_slice());
    }

    #[test]
    fn test_equal_size_resample_is_passthrough() {
        let gain = PixelBuffer::gain_map(3, 3, TransferFunction::Srgb, (0..9).map(|i| i as f32 / 8.0).collect())
            .unwrap();
        for interp in Interpolation::ALL {
            let out = Resampler::new(interp).resample(gain.clone(), 3, 3).unwrap();
            assert_eq!(out, gain);
        }
    }

    #[test]
    fn test_quantizer_bounds_every_depth() {
        for bits in [8, 10, 12, 16] {
            let max = ((1u32 << bits) - 1) as u16;
            for dither in [false, true] {
                let q = Quantizer::new(bits).unwrap().with_dither(dither);
                assert_eq!(q.quantize_value(0.0), 0);
                assert_eq!(q.quantize_value(1.0), max);

                let ramp = (0..64 * 3).map(|i| i as f32 / 191.0).collect();
                let buf = PixelBuffer::from_vec(8, 8, 3, ColorPrimaries::Rec2020, TransferFunction::Pq, ramp).unwrap();
                assert!(q.quantize(buf).data().iter().all(|&c| c <= max));
            }
        }
    }

    #[test]
    fn test_gain_monotonic_through_pipeline() {
        let cfg = ConversionConfig::default().with_bit_depth(None);
        let pipeline = HdrPipeline::new(cfg);
        let meta = GainMapMetadata::new(-0.5, 3.0).with_gamma(1.8);

        let mut prev = f32::NEG_INFINITY;
        for i in 0..=10 {
            let s = i as f32 / 10.0;
            let base = PixelBuffer::filled(2, 2, &[0.4, 0.4, 0.4], ColorPrimaries::Srgb, TransferFunction::Srgb).unwrap();
            let gain = PixelBuffer::gain_map(2, 2, TransferFunction::Linear, vec![s; 4]).unwrap();
            let out = pipeline.run(base, Some(gain), Some(&meta)).unwrap();
            let v = out.as_float().unwrap().data()[0];
            assert!(v >= prev, "sample {s}: {v} < {prev}");
            prev = v;
        }
    }

    #[test]
    fn test_hlg_and_sdr_targets() {
        let meta = GainMapMetadata::from_headroom(2.0);
        let gain = || PixelBuffer::gain_map(2, 2, TransferFunction::Srgb, vec![1.0; 4]).unwrap();

        let hlg = ConversionConfig::default().with_transfer(TransferFunction::Hlg).with_bit_depth(Some(10));
        let out = HdrPipeline::new(hlg).run(gradient_base(4, 4), Some(gain()), Some(&meta)).unwrap();
        let q = out.as_quantized().unwrap();
        assert_eq!(q.transfer(), TransferFunction::Hlg);
        assert!(q.data().iter().all(|&c| c <= 1023));

        let sdr = ConversionConfig::default()
            .with_primaries(ColorPrimaries::Srgb)
            .with_transfer(TransferFunction::Srgb)
            .with_bit_depth(Some(8))
            .with_dither(true);
        let out = HdrPipeline::new(sdr).run(gradient_base(4, 4), Some(gain()), Some(&meta)).unwrap();
        let bytes = out.as_quantized().unwrap().to_u8().unwrap();
        assert_eq!(bytes.len(), 48);
        // doubled highlights clip at white
        assert_eq!(*bytes.last().unwrap(), 255);
    }

    #[test]
    fn test_wide_gamut_roundtrip() {
        let src = PixelBuffer::from_vec(
            2, 1, 3,
            ColorPrimaries::DisplayP3, TransferFunction::Linear,
            vec![0.2, 0.5, 0.9, 1.5, 0.0, 0.3],
        )
        .unwrap();
        let wide = ColorSpaceTransform::new(ColorPrimaries::Rec2020).apply(src.clone()).unwrap();
        let back = ColorSpaceTransform::new(ColorPrimaries::DisplayP3).apply(wide).unwrap();
        for (a, b) in back.data().iter().zip(src.data()) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-5);
        }
    }
}
