//! Jonker-Volgenant linear assignment solvers for dense cost matrices.
//!
//! Given an N x M cost matrix, this crate finds a minimum-cost one-to-one
//! matching between rows and columns, optionally rejecting matches above a
//! per-edge cost threshold. It is built for consumers (object tracking,
//! detection association, schedule matching) that solve many independent
//! instances and want the result in whichever index shape their pipeline
//! speaks.
//!
//! # Entry points
//!
//! | Function | Output shape | Batch variant |
//! |----------|--------------|---------------|
//! | [`solve_mapping`] | `x:[N]`, `y:[M]` vectors, -1 unmatched | |
//! | [`solve_pairs`] | parallel `rows`/`cols` arrays | [`solve_pairs_batch`] |
//! | [`solve_assignments`] | compact `[row, col]` pair list | [`solve_assignments_batch`] |
//!
//! All entry points accept the same [`SolveOptions`] and agree on the set
//! of matched pairs for a given input. Totals are always accumulated in
//! f64 against the original matrix, never against an internal padded,
//! transposed, or reduced-precision working buffer.
//!
//! # Rectangular inputs and cost limits
//!
//! A rectangular matrix is solved by zero-padding to a square once the
//! caller opts in with `SolveOptions::extend`. A finite
//! `SolveOptions::cost_limit` switches to a reject-edge augmentation that
//! handles rectangles and partial assignment in one mechanism: any pair
//! costing more than the limit is left unmatched instead of assigned.
//! Entries of `±inf` or `NaN` mark forbidden pairs; they never appear in a
//! result.
//!
//! # Example
//!
//! ```
//! use lap_jv::{solve_assignments, CostMatrix, SolveOptions};
//!
//! let cost = CostMatrix::from_rows(vec![
//!     vec![1000.0, 4.0, 1.0],
//!     vec![1.0, 1000.0, 3.0],
//!     vec![5.0, 1.0, 1000.0],
//! ]).unwrap();
//!
//! let result = solve_assignments(&cost, &SolveOptions::default()).unwrap();
//! assert_eq!(result.pairs, vec![[0, 2], [1, 0], [2, 1]]);
//! assert_eq!(result.total, Some(3.0));
//! ```
//!
//! # Feature flags
//!
//! - `parallel` (default): batch execution on a per-call rayon pool.
//!   Without it, batches run sequentially; results are identical.

mod augment;
mod batch;
mod canon;
mod mapper;
mod matrix;
mod solve;

pub mod error;
pub mod kernel;

pub use batch::{solve_assignments_batch, solve_pairs_batch, BatchAssignment, BatchAssignmentPairs};
pub use error::{Error, Result};
pub use kernel::{JonkerVolgenant, KernelScalar, Precision, SquareKernel};
pub use matrix::{CostMatrix, CostScalar};
pub use solve::{
    solve_assignments, solve_mapping, solve_pairs, Assignment, AssignmentPairs, Mapping,
    SolveOptions,
};
