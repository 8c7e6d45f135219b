//! Square-matrix assignment kernel and precision dispatch.
//!
//! The orchestration layer treats the kernel as an opaque primitive: it
//! hands over a contiguous row-major square buffer and gets back the two
//! mapping vectors `x` (column assigned to each row) and `y` (row assigned
//! to each column), with `-1` for unmatched slots. Anything that looks like
//! shape handling, padding, cost limits, or totals lives outside the kernel.
//!
//! # Precision dispatch
//!
//! The kernel runs in one of two precisions, chosen once per call:
//!
//! | `prefer_f32` | input native precision | kernel |
//! |--------------|------------------------|--------|
//! | true         | any                    | f32    |
//! | false        | single (f32)           | f32    |
//! | false        | double (f64, i32, i64) | f64    |
//!
//! The reduced-precision kernel halves memory bandwidth and is the default;
//! totals are always re-accumulated in f64 against the original input, so
//! the precision choice affects only which assignment is found under
//! near-ties.

mod jv;

use crate::augment::SquareProblem;
use crate::error::Result;

pub use jv::JonkerVolgenant;

/// Numeric precision of a kernel invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    /// Reduced precision (f32 working buffer).
    Single,
    /// Full precision (f64 working buffer).
    Double,
}

impl Precision {
    /// Combine the caller preference with the input's native precision.
    /// A double-native buffer runs at full precision only when the caller
    /// explicitly disabled the reduced-precision preference.
    pub(crate) fn select(prefer_f32: bool, native: Precision) -> Precision {
        if prefer_f32 {
            Precision::Single
        } else {
            native
        }
    }
}

/// Scalar types the square kernel can operate on.
pub trait KernelScalar:
    Copy
    + PartialOrd
    + std::ops::Add<Output = Self>
    + std::ops::Sub<Output = Self>
    + Send
    + Sync
    + 'static
{
    /// Additive identity.
    const ZERO: Self;
    /// Largest finite value, used as a search ceiling.
    const MAX: Self;
}

impl KernelScalar for f32 {
    const ZERO: Self = 0.0;
    const MAX: Self = f32::MAX;
}

impl KernelScalar for f64 {
    const ZERO: Self = 0.0;
    const MAX: Self = f64::MAX;
}

/// Contract for an exact square-matrix assignment solver.
///
/// Given a `dim * dim` row-major buffer of finite costs, fill `x` and `y`
/// (both of length `dim`) with a minimum-cost perfect matching. An
/// implementation must be deterministic for a fixed buffer and must not
/// keep state between calls; the batch executor invokes it concurrently on
/// independent buffers.
pub trait SquareKernel<S: KernelScalar> {
    /// Solve the square problem, writing the row and column mappings.
    fn solve(&self, dim: usize, cost: &[S], x: &mut [isize], y: &mut [isize]) -> Result<()>;
}

/// Run the kernel on an augmented square problem at the chosen precision,
/// returning fresh mapping vectors over the square dimension.
pub(crate) fn run_square<K>(
    kernel: &K,
    square: &SquareProblem,
    precision: Precision,
) -> Result<(Vec<isize>, Vec<isize>)>
where
    K: SquareKernel<f32> + SquareKernel<f64>,
{
    let dim = square.dim;
    let mut x = vec![-1isize; dim];
    let mut y = vec![-1isize; dim];
    if dim == 0 {
        return Ok((x, y));
    }
    match precision {
        Precision::Single => {
            let reduced: Vec<f32> = square.data.iter().map(|&c| c as f32).collect();
            SquareKernel::<f32>::solve(kernel, dim, &reduced, &mut x, &mut y)?;
        }
        Precision::Double => {
            SquareKernel::<f64>::solve(kernel, dim, &square.data, &mut x, &mut y)?;
        }
    }
    Ok((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precision_selection() {
        assert_eq!(Precision::select(true, Precision::Double), Precision::Single);
        assert_eq!(Precision::select(true, Precision::Single), Precision::Single);
        assert_eq!(Precision::select(false, Precision::Double), Precision::Double);
        assert_eq!(Precision::select(false, Precision::Single), Precision::Single);
    }
}
