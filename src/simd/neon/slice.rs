use crate::simd::neon::f64x2::{F64x2, LANE_COUNT};
use crate::simd::traits::{HorizontalSum, SimdLoad};

/// Sums `values` on a 16-byte aligned view.
///
/// # Safety
///
/// NEON must be available and `values.as_ptr()` must be 16-byte aligned
/// (or `values` empty).
#[target_feature(enable = "neon")]
pub unsafe fn sum_aligned(values: &[f64]) -> f64 {
    unsafe { reduce::<true>(values) }
}

/// Sums `values` with no alignment requirement.
///
/// # Safety
///
/// NEON must be available.
#[target_feature(enable = "neon")]
pub unsafe fn sum_unaligned(values: &[f64]) -> f64 {
    unsafe { reduce::<false>(values) }
}

#[inline(always)]
unsafe fn reduce<const ALIGNED: bool>(values: &[f64]) -> f64 {
    let chunks = values.chunks_exact(LANE_COUNT);
    let tail = chunks.remainder();

    let mut acc = unsafe { F64x2::zero() };

    for chunk in chunks {
        let lanes = match ALIGNED {
            true => unsafe { F64x2::load_aligned(chunk.as_ptr()) },
            false => unsafe { F64x2::load_unaligned(chunk.as_ptr()) },
        };
        acc = acc + lanes;
    }

    let mut sum = unsafe { acc.horizontal_sum() };

    for &x in tail {
        sum += x;
    }

    sum
}
