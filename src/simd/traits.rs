use crate::error::Result;

/// Alignment query for a vector type's natural load boundary.
pub trait Alignment<T> {
    /// Returns `true` if `ptr` satisfies the vector type's aligned-load
    /// requirement.
    fn is_aligned(ptr: *const T) -> bool;
}

/// Full-width loads from memory into a vector register.
pub trait SimdLoad<T> {
    type Output;

    /// Loads one full vector from memory on the type's natural boundary.
    ///
    /// # Safety
    ///
    /// `ptr` must be aligned as reported by [`Alignment::is_aligned`] and point
    /// to at least one full vector of readable values. The instruction set the
    /// implementation uses must be available on the running CPU.
    unsafe fn load_aligned(ptr: *const T) -> Self::Output;

    /// Loads one full vector from memory with no alignment requirement.
    ///
    /// # Safety
    ///
    /// `ptr` must point to at least one full vector of readable values. The
    /// instruction set the implementation uses must be available on the
    /// running CPU.
    unsafe fn load_unaligned(ptr: *const T) -> Self::Output;
}

/// Collapses all lanes of a vector into one scalar.
pub trait HorizontalSum<T> {
    /// Sums the lanes in ascending lane order.
    ///
    /// # Safety
    ///
    /// The instruction set the implementation uses must be available on the
    /// running CPU.
    unsafe fn horizontal_sum(&self) -> T;
}

/// Slice-level summation entry points.
pub trait SimdSum {
    /// Sums with the best strategy for this host using unaligned loads.
    fn simd_sum(&self) -> f64;

    /// Sums with the best strategy for this host using aligned loads.
    ///
    /// Fails with [`BenchError::MisalignedError`](crate::error::BenchError::MisalignedError)
    /// when the slice does not start on the strategy's vector boundary.
    fn simd_sum_aligned(&self) -> Result<f64>;

    /// Sequential left-to-right sum.
    fn scalar_sum(&self) -> f64;
}
