use crate::simd::avx::f64x4::{F64x4, LANE_COUNT};
use crate::simd::traits::{HorizontalSum, SimdLoad};

/// Sums `values` with `_mm256_load_pd`.
///
/// # Safety
///
/// AVX must be available and `values.as_ptr()` must be 32-byte aligned
/// (or `values` empty).
#[target_feature(enable = "avx")]
pub unsafe fn sum_aligned(values: &[f64]) -> f64 {
    unsafe { reduce::<true>(values) }
}

/// Sums `values` with `_mm256_loadu_pd`.
///
/// # Safety
///
/// AVX must be available.
#[target_feature(enable = "avx")]
pub unsafe fn sum_unaligned(values: &[f64]) -> f64 {
    unsafe { reduce::<false>(values) }
}

#[inline(always)]
unsafe fn reduce<const ALIGNED: bool>(values: &[f64]) -> f64 {
    let chunks = values.chunks_exact(LANE_COUNT);
    let tail = chunks.remainder();

    let mut acc = unsafe { F64x4::zero() };

    for chunk in chunks {
        let lanes = match ALIGNED {
            true => unsafe { F64x4::load_aligned(chunk.as_ptr()) },
            false => unsafe { F64x4::load_unaligned(chunk.as_ptr()) },
        };
        acc = acc + lanes;
    }

    let mut sum = unsafe { acc.horizontal_sum() };

    for &x in tail {
        sum += x;
    }

    sum
}
