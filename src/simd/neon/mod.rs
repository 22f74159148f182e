//! ARM NEON implementations for 128-bit double-precision reductions.
//!
//! NEON (Advanced SIMD) registers hold two packed `f64` values on AArch64.
//! Unlike AVX, NEON has a single load instruction (`vld1q_f64`) that accepts
//! any element-aligned address, so the aligned and unaligned kernels differ
//! only in the alignment precondition the caller has verified.
//!
//! # Architecture Requirements
//!
//! - **Target Architecture**: AArch64 (NEON is part of the base ISA)
//! - **Runtime Detection**: [`is_available`] is checked before dispatch
//!
//! # Performance Characteristics
//!
//! - **Vector Width**: 128 bits (2 × f64)
//! - **Memory Alignment**: Optimal with 16-byte aligned data

pub mod f64x2;

pub mod slice;

/// Returns `true` if the running CPU supports NEON.
#[inline]
pub fn is_available() -> bool {
    std::arch::is_aarch64_feature_detected!("neon")
}
