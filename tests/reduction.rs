//! Precision comparison tests between sequential and vectorized summation.
//!
//! Every strategy usable on the host is checked against a naive left-to-right
//! sum and against `ndarray`'s sum, under both access regimes.

use alignsum::simd::{Access, SimdSum, Strategy};
use alignsum::utils::{uniform_samples, AlignedBuffer, BUFFER_ALIGNMENT};
use ndarray::Array1;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Sizes covering every tail residue for 4 and 2 lanes plus the reference size.
const SIZES: &[usize] = &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 1_000, 1_000_000];

fn sequential(values: &[f64]) -> f64 {
    let mut sum = 0.0;
    for &x in values {
        sum += x;
    }
    sum
}

/// Bound on the reordering error of summing `values`: n * eps * max|x| * n,
/// since the partial sums are bounded by n * max|x|.
fn tolerance(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let max_abs = values.iter().fold(0.0f64, |m, x| m.max(x.abs()));
    n * n * f64::EPSILON * max_abs + f64::MIN_POSITIVE
}

#[test]
fn test_small_integers_exact() {
    let buffer = AlignedBuffer::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0], BUFFER_ALIGNMENT).unwrap();

    for strategy in Strategy::available() {
        assert_eq!(strategy.sum(&buffer, Access::Aligned).unwrap(), 15.0);
        assert_eq!(strategy.sum(&buffer, Access::Unaligned).unwrap(), 15.0);
    }
}

#[test]
fn test_empty_is_zero() {
    let buffer = AlignedBuffer::from_slice(&[], BUFFER_ALIGNMENT).unwrap();

    for strategy in Strategy::available() {
        assert_eq!(strategy.sum(&buffer, Access::Aligned).unwrap(), 0.0);
        assert_eq!(strategy.sum(&[], Access::Unaligned).unwrap(), 0.0);
    }
}

#[test]
fn test_matches_sequential_sum() {
    for &size in SIZES {
        let samples = uniform_samples(size, Some(42));
        let buffer = AlignedBuffer::from_slice(&samples, BUFFER_ALIGNMENT).unwrap();
        let expected = sequential(&samples);
        let tol = tolerance(&samples);

        for strategy in Strategy::available() {
            let aligned = strategy.sum(&buffer, Access::Aligned).unwrap();
            let unaligned = strategy.sum(&buffer, Access::Unaligned).unwrap();

            assert!(aligned.is_finite() && unaligned.is_finite());
            assert!(
                (aligned - expected).abs() <= tol,
                "{strategy} aligned, n={size}: got {aligned}, expected {expected}"
            );
            // Same values, different loads: identical accumulation order.
            assert_eq!(aligned, unaligned, "{strategy}, n={size}");
        }
    }
}

#[test]
fn test_tail_residues_exact() {
    // Integers keep every partial sum exact, so any lane count must agree
    // bit for bit with the closed form.
    for size in 0..=17usize {
        let values: Vec<f64> = (1..=size).map(|i| i as f64).collect();
        let buffer = AlignedBuffer::from_slice(&values, BUFFER_ALIGNMENT).unwrap();
        let expected = (size * (size + 1) / 2) as f64;

        for strategy in Strategy::available() {
            assert_eq!(
                strategy.sum(&buffer, Access::Aligned).unwrap(),
                expected,
                "{strategy}, n={size}, residue={}",
                size % strategy.lanes()
            );
        }
    }
}

#[test]
fn test_against_ndarray() {
    let mut rng = StdRng::seed_from_u64(12345);
    let values: Vec<f64> = (0..65_537).map(|_| rng.random_range(-1e3..1e3)).collect();
    let reference = Array1::from(values.clone()).sum();
    let tol = tolerance(&values);

    let buffer = AlignedBuffer::from_slice(&values, BUFFER_ALIGNMENT).unwrap();

    for strategy in Strategy::available() {
        let sum = strategy.sum(&buffer, Access::Aligned).unwrap();
        println!("{strategy}: simd={sum:.12}, ndarray={reference:.12}");
        assert!((sum - reference).abs() <= tol);
    }
}

#[test]
fn test_shifted_view_drops_first_element() {
    let samples = uniform_samples(1_001, Some(3));
    let buffer = AlignedBuffer::from_slice(&samples, BUFFER_ALIGNMENT).unwrap();

    for strategy in Strategy::available() {
        let shifted = strategy.sum(&buffer[1..], Access::Unaligned).unwrap();
        let expected = sequential(&samples[1..]);
        assert!((shifted - expected).abs() <= tolerance(&samples));
    }
}

#[test]
fn test_deterministic_per_strategy() {
    let samples = uniform_samples(100_003, None);
    let buffer = AlignedBuffer::from_slice(&samples, BUFFER_ALIGNMENT).unwrap();

    for strategy in Strategy::available() {
        let first = strategy.sum(&buffer, Access::Aligned).unwrap();
        for _ in 0..5 {
            assert_eq!(strategy.sum(&buffer, Access::Aligned).unwrap(), first);
        }
    }
}

#[test]
fn test_slice_trait() {
    let buffer = AlignedBuffer::from_slice(&[0.5; 13], BUFFER_ALIGNMENT).unwrap();

    assert_eq!(buffer.simd_sum(), 6.5);
    assert_eq!(buffer.simd_sum_aligned().unwrap(), 6.5);
    assert_eq!(buffer.scalar_sum(), 6.5);
    assert_eq!(buffer[1..].simd_sum(), 6.0);
}
