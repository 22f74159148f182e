//! AVX 4-lane f64 SIMD vector implementation.
//!
//! `F64x4` wraps the `__m256d` intrinsic type and exposes exactly what a
//! summation needs: a zeroed accumulator, aligned and unaligned loads, lane-wise
//! addition and a horizontal reduction.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use std::ops::Add;

use crate::simd::traits::{Alignment, HorizontalSum, SimdLoad};

/// AVX memory alignment requirement in bytes.
///
/// `_mm256_load_pd` faults on addresses that are not a multiple of this value.
pub const AVX_ALIGNMENT: usize = 32;

/// Number of f64 elements that fit in an AVX 256-bit vector.
pub const LANE_COUNT: usize = 4;

/// AVX SIMD vector containing 4 packed f64 values.
#[derive(Copy, Clone, Debug)]
pub struct F64x4 {
    /// AVX 256-bit vector register containing 4 packed f64 values
    pub elements: __m256d,
}

impl F64x4 {
    /// Returns a vector with all lanes set to `0.0`.
    ///
    /// # Safety
    ///
    /// AVX must be available on the running CPU.
    #[inline(always)]
    pub unsafe fn zero() -> Self {
        Self {
            elements: unsafe { _mm256_setzero_pd() },
        }
    }
}

impl Alignment<f64> for F64x4 {
    #[inline(always)]
    fn is_aligned(ptr: *const f64) -> bool {
        (ptr as usize) % AVX_ALIGNMENT == 0
    }
}

impl SimdLoad<f64> for F64x4 {
    type Output = Self;

    /// Loads 4 elements from 32-byte aligned memory with `_mm256_load_pd`.
    ///
    /// # Safety
    ///
    /// Pointer must be 32-byte aligned and point to at least 4 valid f64 values.
    #[inline(always)]
    unsafe fn load_aligned(ptr: *const f64) -> Self::Output {
        debug_assert!(Self::is_aligned(ptr), "Pointer must be 32-byte aligned");

        Self {
            elements: unsafe { _mm256_load_pd(ptr) },
        }
    }

    /// Loads 4 elements from arbitrary memory with `_mm256_loadu_pd`.
    ///
    /// # Safety
    ///
    /// Pointer must point to at least 4 valid f64 values.
    #[inline(always)]
    unsafe fn load_unaligned(ptr: *const f64) -> Self::Output {
        Self {
            elements: unsafe { _mm256_loadu_pd(ptr) },
        }
    }
}

impl HorizontalSum<f64> for F64x4 {
    /// Spills the register and sums `((l0 + l1) + l2) + l3`.
    #[inline(always)]
    unsafe fn horizontal_sum(&self) -> f64 {
        let mut lanes = [0.0f64; LANE_COUNT];

        unsafe { _mm256_storeu_pd(lanes.as_mut_ptr(), self.elements) };

        ((lanes[0] + lanes[1]) + lanes[2]) + lanes[3]
    }
}

impl Add for F64x4 {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            elements: unsafe { _mm256_add_pd(self.elements, rhs.elements) },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{AlignedBuffer, BUFFER_ALIGNMENT};

    #[test]
    fn test_horizontal_sum_lane_order() {
        if !crate::simd::avx::is_available() {
            return;
        }

        let data = [1.0f64, 2.0, 3.0, 4.0];
        let sum = unsafe { F64x4::load_unaligned(data.as_ptr()).horizontal_sum() };
        assert_eq!(sum, 10.0);
    }

    #[test]
    fn test_aligned_and_unaligned_loads_agree() {
        if !crate::simd::avx::is_available() {
            return;
        }

        let buffer = AlignedBuffer::from_slice(&[0.5, 1.5, 2.5, 3.5], BUFFER_ALIGNMENT).unwrap();
        assert!(F64x4::is_aligned(buffer.as_ptr()));

        let (a, u) = unsafe {
            (
                F64x4::load_aligned(buffer.as_ptr()).horizontal_sum(),
                F64x4::load_unaligned(buffer.as_ptr()).horizontal_sum(),
            )
        };
        assert_eq!(a, u);
    }

    #[test]
    fn test_add_lanes() {
        if !crate::simd::avx::is_available() {
            return;
        }

        let a = [1.0f64, 2.0, 3.0, 4.0];
        let b = [10.0f64, 20.0, 30.0, 40.0];
        let sum = unsafe {
            (F64x4::load_unaligned(a.as_ptr()) + F64x4::load_unaligned(b.as_ptr()))
                .horizontal_sum()
        };
        assert_eq!(sum, 110.0);
    }
}
