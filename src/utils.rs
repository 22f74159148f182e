use std::alloc::{alloc_zeroed, dealloc, Layout};
use std::mem;
use std::ops::Deref;
use std::ptr::{self, NonNull};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{allocation_error, layout_error, Result};

/// Alignment of the sample buffer in bytes.
///
/// 32 bytes covers the widest vector unit used by the crate (AVX `__m256d`),
/// and is therefore also valid for NEON (16) and scalar (8) reductions.
pub const BUFFER_ALIGNMENT: usize = 32;

/// A read-only `f64` buffer whose first element sits on a caller-chosen
/// byte boundary.
///
/// `Vec<f64>` only guarantees 8-byte alignment, which would make the
/// "aligned" half of the benchmark aligned by accident at best. This
/// container owns an allocation made with an explicit [`Layout`] and frees it
/// with the same layout in [`Drop`], so the memory is released on every exit
/// path of a run.
///
/// # Example
///
/// ```rust
/// use alignsum::utils::{AlignedBuffer, BUFFER_ALIGNMENT};
///
/// let buffer = AlignedBuffer::from_slice(&[1.0, 2.0, 3.0], BUFFER_ALIGNMENT).unwrap();
/// assert_eq!(buffer.as_ptr() as usize % BUFFER_ALIGNMENT, 0);
/// assert_eq!(&buffer[..], &[1.0, 2.0, 3.0]);
/// ```
pub struct AlignedBuffer {
    ptr: NonNull<f64>,
    len: usize,
    layout: Layout,
}

impl AlignedBuffer {
    /// Copies `values` into a fresh allocation aligned to `align` bytes.
    ///
    /// # Errors
    ///
    /// - [`BenchError::LayoutError`](crate::error::BenchError::LayoutError) if
    ///   `align` is not a power of two, is smaller than the alignment of `f64`,
    ///   or the byte size overflows.
    /// - [`BenchError::AllocationError`](crate::error::BenchError::AllocationError)
    ///   if the allocator returns null.
    pub fn from_slice(values: &[f64], align: usize) -> Result<Self> {
        let len = values.len();
        let buffer = Self::zeroed(len, align)?;

        // SAFETY: `buffer` owns `len` writable elements and `values` cannot
        // overlap a freshly allocated region.
        unsafe {
            ptr::copy_nonoverlapping(values.as_ptr(), buffer.ptr.as_ptr(), len);
        }

        Ok(buffer)
    }

    /// Allocates `len` zeroed elements aligned to `align` bytes.
    pub fn zeroed(len: usize, align: usize) -> Result<Self> {
        if align < mem::align_of::<f64>() {
            return Err(layout_error(
                len,
                align,
                "alignment must be at least the alignment of f64",
            ));
        }

        // Zero-length buffers still get a real allocation so the pointer
        // honours the requested alignment.
        let size = len
            .max(1)
            .checked_mul(mem::size_of::<f64>())
            .ok_or_else(|| layout_error(len, align, "buffer size overflows usize"))?;

        let layout = Layout::from_size_align(size, align)
            .map_err(|err| layout_error(size, align, err.to_string()))?;

        // SAFETY: `layout` has a non-zero size.
        let raw = unsafe { alloc_zeroed(layout) } as *mut f64;

        let ptr = NonNull::new(raw)
            .ok_or_else(|| allocation_error(size, align, "allocator returned null"))?;

        Ok(Self { ptr, len, layout })
    }

    /// Alignment the buffer was allocated with, in bytes.
    pub fn alignment(&self) -> usize {
        self.layout.align()
    }
}

impl Drop for AlignedBuffer {
    fn drop(&mut self) {
        // SAFETY: `ptr` was returned by `alloc_zeroed` with exactly `layout`.
        unsafe {
            dealloc(self.ptr.as_ptr() as *mut u8, self.layout);
        }
    }
}

impl Deref for AlignedBuffer {
    type Target = [f64];

    fn deref(&self) -> &Self::Target {
        // SAFETY: `ptr` is valid for `len` initialized elements for as long as
        // `self` lives, and nothing hands out mutable access after construction.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }
}

impl std::fmt::Debug for AlignedBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlignedBuffer")
            .field("len", &self.len)
            .field("alignment", &self.layout.align())
            .finish()
    }
}

/// Generates `len` values uniformly distributed in `[0.0, 1.0)`.
///
/// With `Some(seed)` the sequence is reproducible across runs; with `None`
/// the generator is seeded from the operating system.
pub fn uniform_samples(len: usize, seed: Option<u64>) -> Vec<f64> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    (0..len).map(|_| rng.random::<f64>()).collect()
}
