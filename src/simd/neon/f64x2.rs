//! NEON 2-lane f64 SIMD vector implementation.

use std::arch::aarch64::*;

use std::ops::Add;

use crate::simd::traits::{Alignment, HorizontalSum, SimdLoad};

/// NEON memory alignment in bytes for full-speed `float64x2_t` loads.
pub const NEON_ALIGNMENT: usize = 16;

/// Number of f64 elements that fit in a NEON 128-bit vector.
pub const LANE_COUNT: usize = 2;

/// NEON SIMD vector containing 2 packed f64 values.
#[derive(Copy, Clone, Debug)]
pub struct F64x2 {
    pub elements: float64x2_t,
}

impl F64x2 {
    /// Returns a vector with both lanes set to `0.0`.
    ///
    /// # Safety
    ///
    /// NEON must be available on the running CPU.
    #[inline(always)]
    pub unsafe fn zero() -> Self {
        Self {
            elements: unsafe { vdupq_n_f64(0.0) },
        }
    }
}

impl Alignment<f64> for F64x2 {
    #[inline(always)]
    fn is_aligned(ptr: *const f64) -> bool {
        (ptr as usize) % NEON_ALIGNMENT == 0
    }
}

impl SimdLoad<f64> for F64x2 {
    type Output = Self;

    #[inline(always)]
    unsafe fn load_aligned(ptr: *const f64) -> Self::Output {
        debug_assert!(Self::is_aligned(ptr), "Pointer must be 16-byte aligned");

        Self {
            elements: unsafe { vld1q_f64(ptr) },
        }
    }

    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const f64) -> Self::Output {
        Self {
            elements: unsafe { vld1q_f64(ptr) },
        }
    }
}

impl HorizontalSum<f64> for F64x2 {
    /// Sums `l0 + l1`.
    #[inline(always)]
    unsafe fn horizontal_sum(&self) -> f64 {
        unsafe { vgetq_lane_f64::<0>(self.elements) + vgetq_lane_f64::<1>(self.elements) }
    }
}

impl Add for F64x2 {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { vaddq_f64(self.elements, rhs.elements) },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_sum() {
        let data = [1.25f64, 2.5];
        let sum = unsafe { F64x2::load_unaligned(data.as_ptr()).horizontal_sum() };
        assert_eq!(sum, 3.75);
    }

    #[test]
    fn test_add_lanes() {
        let a = [1.0f64, 2.0];
        let b = [3.0f64, 4.0];
        let sum = unsafe {
            (F64x2::load_unaligned(a.as_ptr()) + F64x2::load_unaligned(b.as_ptr()))
                .horizontal_sum()
        };
        assert_eq!(sum, 10.0);
    }
}
