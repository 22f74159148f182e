//! AVX implementations for 256-bit double-precision reductions.
//!
//! This module contains the reduction kernels built on Intel's Advanced Vector
//! Extensions (AVX), which provide 256-bit registers holding four packed
//! `f64` values.
//!
//! # Architecture Requirements
//!
//! - **CPU Support**: Intel Sandy Bridge (2011+) or AMD Bulldozer (2011+)
//! - **Target Architecture**: x86 or x86_64
//! - **Compilation**: Kernels are compiled with `#[target_feature(enable = "avx")]`,
//!   so no global `-C target-feature` flag is needed
//! - **Runtime Detection**: [`is_available`] must return `true` before any kernel runs
//!
//! # Available Types
//!
//! - [`f64x4::F64x4`]: 256-bit vector containing 4 packed double-precision values
//!
//! # Performance Characteristics
//!
//! - **Vector Width**: 256 bits (4 × f64)
//! - **Memory Alignment**: `_mm256_load_pd` requires 32-byte aligned addresses;
//!   `_mm256_loadu_pd` accepts any address
//!
//! # Conditional Compilation
//!
//! This module is only compiled when the build script emits the `avx` cfg. When
//! it is absent the crate falls back to the scalar reduction.

pub mod f64x4;

pub mod slice;

/// Returns `true` if the running CPU supports AVX.
#[inline]
pub fn is_available() -> bool {
    is_x86_feature_detected!("avx")
}
