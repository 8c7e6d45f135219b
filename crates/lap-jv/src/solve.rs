//! Single-instance solver pipeline and public entry points.
//!
//! Every entry point runs the same fixed pipeline: normalize orientation,
//! build the square kernel problem, pick a precision, run the kernel, trim
//! the result back to the original rectangle, and (optionally) accumulate
//! the total against the original matrix. The three entry points differ
//! only in the output shape they derive from the matched pairs.

use crate::augment::build_square;
use crate::canon::canonicalize;
use crate::error::Result;
use crate::kernel::{run_square, JonkerVolgenant, Precision, SquareKernel};
use crate::mapper;
use crate::matrix::{CostMatrix, CostScalar};

/// Options shared by all solver entry points.
///
/// # Example
///
/// ```
/// use lap_jv::SolveOptions;
///
/// let opts = SolveOptions::new().extend(true).cost_limit(0.8);
/// assert!(opts.extend);
/// assert_eq!(opts.cost_limit, 0.8);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SolveOptions {
    /// Permit rectangular inputs by zero-padding to a square. Default: false.
    pub extend: bool,
    /// Per-edge cost threshold. When finite, matches costing more than this
    /// are left unassigned (and rectangular inputs are admitted regardless
    /// of `extend`). Default: infinity.
    pub cost_limit: f64,
    /// Whether to accumulate the total assignment cost. Default: true.
    pub return_cost: bool,
    /// Run the kernel in reduced (f32) precision. Default: true. Totals are
    /// always accumulated in f64 from the original input either way.
    pub prefer_f32: bool,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            extend: false,
            cost_limit: f64::INFINITY,
            return_cost: true,
            prefer_f32: true,
        }
    }
}

impl SolveOptions {
    /// Default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Permit zero-padding for rectangular inputs.
    pub fn extend(mut self, extend: bool) -> Self {
        self.extend = extend;
        self
    }

    /// Set the per-edge cost threshold.
    pub fn cost_limit(mut self, cost_limit: f64) -> Self {
        self.cost_limit = cost_limit;
        self
    }

    /// Toggle total cost accumulation.
    pub fn return_cost(mut self, return_cost: bool) -> Self {
        self.return_cost = return_cost;
        self
    }

    /// Toggle the reduced-precision kernel preference.
    pub fn prefer_f32(mut self, prefer_f32: bool) -> Self {
        self.prefer_f32 = prefer_f32;
        self
    }
}

/// Row-to-column and column-to-row mapping vectors, lapjv style.
#[derive(Debug, Clone, PartialEq)]
pub struct Mapping {
    /// `x[i]` is the column assigned to row `i`, or -1.
    pub x: Vec<isize>,
    /// `y[j]` is the row assigned to column `j`, or -1.
    pub y: Vec<isize>,
    /// Total assignment cost, when requested.
    pub total: Option<f64>,
}

/// Parallel index arrays, SciPy style: `rows[k]` is matched to `cols[k]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// Matched row indices, strictly increasing.
    pub rows: Vec<usize>,
    /// Matched column indices, parallel to `rows`.
    pub cols: Vec<usize>,
    /// Total assignment cost, when requested.
    pub total: Option<f64>,
}

/// Compact pair list: each entry is `[row, col]`, sorted by row.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentPairs {
    /// Matched `[row, col]` pairs.
    pub pairs: Vec<[usize; 2]>,
    /// Total assignment cost, when requested.
    pub total: Option<f64>,
}

/// Run the pipeline down to the matched pair list in original coordinates.
pub(crate) fn matched_pairs<S, K>(
    cost: &CostMatrix<S>,
    opts: &SolveOptions,
    kernel: &K,
) -> Result<Vec<(usize, usize)>>
where
    S: CostScalar,
    K: SquareKernel<f32> + SquareKernel<f64>,
{
    let (n0, m0) = cost.shape();
    if n0 == 0 || m0 == 0 {
        return Ok(Vec::new());
    }

    let canon = canonicalize(cost);
    let square = build_square(&canon, opts.extend, opts.cost_limit)?;
    let precision = Precision::select(opts.prefer_f32, S::NATIVE);
    log::debug!(
        "solving {n0}x{m0}: policy {:?}, square dim {}, {:?} kernel",
        square.policy,
        square.dim,
        precision
    );

    let (x, _) = run_square(kernel, &square, precision)?;
    let mut pairs = mapper::assigned_pairs(&x, canon.rows, canon.cols, canon.transposed);
    // a row whose only partners are forbidden gets matched to a sentinel
    // edge by the kernel; drop it instead of reporting a forbidden pair
    pairs.retain(|&(r, c)| cost.get(r, c).to_f64().is_finite());
    Ok(pairs)
}

/// Sum the original entries at the matched pairs, in f64, skipping any
/// non-finite entry. 0.0 for an empty match.
fn accumulate_total<S: CostScalar>(cost: &CostMatrix<S>, pairs: &[(usize, usize)]) -> f64 {
    pairs
        .iter()
        .map(|&(r, c)| cost.get(r, c).to_f64())
        .filter(|v| v.is_finite())
        .sum()
}

fn maybe_total<S: CostScalar>(
    cost: &CostMatrix<S>,
    pairs: &[(usize, usize)],
    opts: &SolveOptions,
) -> Option<f64> {
    opts.return_cost.then(|| accumulate_total(cost, pairs))
}

/// Solve a single instance, returning mapping vectors over the original
/// shape with -1 for unmatched rows and columns.
///
/// # Example
///
/// ```
/// use lap_jv::{solve_mapping, CostMatrix, SolveOptions};
///
/// let cost = CostMatrix::from_rows(vec![
///     vec![1000.0, 4.0, 1.0],
///     vec![1.0, 1000.0, 3.0],
///     vec![5.0, 1.0, 1000.0],
/// ]).unwrap();
/// let result = solve_mapping(&cost, &SolveOptions::default()).unwrap();
/// assert_eq!(result.x, vec![2, 0, 1]);
/// assert_eq!(result.total, Some(3.0));
/// ```
pub fn solve_mapping<S: CostScalar>(
    cost: &CostMatrix<S>,
    opts: &SolveOptions,
) -> Result<Mapping> {
    let pairs = matched_pairs(cost, opts, &JonkerVolgenant)?;
    let total = maybe_total(cost, &pairs, opts);
    let (x, y) = mapper::mapping_vectors(&pairs, cost.rows(), cost.cols());
    Ok(Mapping { x, y, total })
}

/// Solve a single instance, returning parallel row and column index arrays.
///
/// # Example
///
/// ```
/// use lap_jv::{solve_pairs, CostMatrix, SolveOptions};
///
/// let cost = CostMatrix::from_rows(vec![
///     vec![1.0, 5.0],
///     vec![5.0, 1.0],
/// ]).unwrap();
/// let result = solve_pairs(&cost, &SolveOptions::default()).unwrap();
/// assert_eq!(result.rows, vec![0, 1]);
/// assert_eq!(result.cols, vec![0, 1]);
/// assert_eq!(result.total, Some(2.0));
/// ```
pub fn solve_pairs<S: CostScalar>(
    cost: &CostMatrix<S>,
    opts: &SolveOptions,
) -> Result<Assignment> {
    let pairs = matched_pairs(cost, opts, &JonkerVolgenant)?;
    let total = maybe_total(cost, &pairs, opts);
    let (rows, cols) = pairs.iter().copied().unzip();
    Ok(Assignment { rows, cols, total })
}

/// Solve a single instance, returning a compact `[row, col]` pair list.
///
/// # Example
///
/// ```
/// use lap_jv::{solve_assignments, CostMatrix, SolveOptions};
///
/// let cost = CostMatrix::from_rows(vec![
///     vec![1.0, 5.0],
///     vec![5.0, 1.0],
/// ]).unwrap();
/// let result = solve_assignments(&cost, &SolveOptions::default()).unwrap();
/// assert_eq!(result.pairs, vec![[0, 0], [1, 1]]);
/// ```
pub fn solve_assignments<S: CostScalar>(
    cost: &CostMatrix<S>,
    opts: &SolveOptions,
) -> Result<AssignmentPairs> {
    let pairs = matched_pairs(cost, opts, &JonkerVolgenant)?;
    let total = maybe_total(cost, &pairs, opts);
    let pairs = pairs.into_iter().map(|(r, c)| [r, c]).collect();
    Ok(AssignmentPairs { pairs, total })
}
