//! Property-based round-trip tests for the gradient codec.

use proptest::prelude::*;
use seere_core::{CompressionMode, GradientCodec};
use seere_zfp::ZfpCodec;

fn any_f32_bits() -> impl Strategy<Value = f32> {
    any::<u32>().prop_map(f32::from_bits)
}

fn gradient_buffer(max_len: usize) -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(-1.0f32..1.0f32, 0..max_len)
}

proptest! {
    #[test]
    fn prop_lossless_is_bit_exact_for_any_bits(
        values in prop::collection::vec(any_f32_bits(), 0..512)
    ) {
        let codec = ZfpCodec::new(CompressionMode::Lossless);
        prop_assert!(codec.verify_roundtrip(&values).unwrap());
    }

    #[test]
    fn prop_length_is_preserved_in_every_mode(
        values in gradient_buffer(300),
        mode_idx in 0usize..4
    ) {
        let mode = match mode_idx {
            0 => CompressionMode::Lossless,
            1 => CompressionMode::Precision(16),
            2 => CompressionMode::Accuracy(1e-3),
            _ => CompressionMode::Rate(8.0),
        };
        let codec = ZfpCodec::new(mode);
        let decoded = codec.decompress(&codec.compress(&values).unwrap()).unwrap();
        prop_assert_eq!(decoded.len(), values.len());
    }

    #[test]
    fn prop_accuracy_mode_bounds_absolute_error(
        values in gradient_buffer(300),
        tol_exp in 1u32..7
    ) {
        let tol = 10f64.powi(-(tol_exp as i32));
        let codec = ZfpCodec::new(CompressionMode::accuracy(tol).unwrap());
        let decoded = codec.decompress(&codec.compress(&values).unwrap()).unwrap();
        // Slack covers single-precision rounding in the final cast.
        for (a, b) in values.iter().zip(decoded.iter()) {
            prop_assert!(
                ((a - b).abs() as f64) <= tol + 1e-6,
                "tolerance {}: {} decoded as {}", tol, a, b
            );
        }
    }

    #[test]
    fn prop_rate_mode_size_is_predictable(
        values in gradient_buffer(300),
        rate in prop::sample::select(vec![4.0f64, 8.0, 16.0, 32.0])
    ) {
        let codec = ZfpCodec::new(CompressionMode::rate(rate).unwrap());
        let encoded = codec.compress(&values).unwrap();

        let blocks = values.len().div_ceil(4);
        let budget_bits = ((rate * 4.0 + 0.5) as u64).max(9) * blocks as u64;
        let expected = 22 + budget_bits.div_ceil(8) as usize;
        prop_assert_eq!(encoded.len(), expected);
    }

    #[test]
    fn prop_decode_never_panics_on_mangled_payload(
        values in gradient_buffer(64),
        cut in 0usize..32
    ) {
        let codec = ZfpCodec::new(CompressionMode::Precision(16));
        let mut encoded = codec.compress(&values).unwrap();
        let keep = encoded.len().saturating_sub(cut);
        encoded.truncate(keep);
        // Result may be an error or a short-read; it must not panic.
        let _ = codec.decompress(&encoded);
    }

    #[test]
    fn prop_signs_survive_lossy_coding(
        values in prop::collection::vec(0.05f32..1.0f32, 1..200),
        flips in prop::collection::vec(any::<bool>(), 200)
    ) {
        let signed: Vec<f32> = values
            .iter()
            .zip(flips.iter())
            .map(|(v, &flip)| if flip { -v } else { *v })
            .collect();
        let codec = ZfpCodec::new(CompressionMode::Accuracy(1e-3));
        let decoded = codec.decompress(&codec.compress(&signed).unwrap()).unwrap();
        for (a, b) in signed.iter().zip(decoded.iter()) {
            prop_assert!(a.signum() == b.signum() || b.abs() < 2e-3);
        }
    }
}
