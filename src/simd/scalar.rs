//! Portable scalar reduction, compiled on every target.

/// Sums `values` sequentially in index order.
///
/// This is the reference ordering the vector strategies are compared against
/// and the fallback used whenever no vector unit is available.
#[inline(always)]
pub fn sum(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |acc, &x| acc + x)
}
