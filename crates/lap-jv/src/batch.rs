//! Batch execution over independent cost matrices.
//!
//! Each instance runs the full single-instance pipeline on its own buffers;
//! the batch layer only distributes instances over a worker pool and puts
//! the results back in input order. The pool is scoped to one call (no
//! process-global state), its size is capped at the batch size, and a
//! worker count of one (or a single-element batch) runs strictly
//! sequentially. Results are identical for every worker count; parallelism
//! changes wall-clock time only.
//!
//! A failure in any instance aborts the whole batch. Callers that need
//! per-instance error isolation should call the single-instance entry
//! points themselves.

use crate::error::Result;
use crate::matrix::{CostMatrix, CostScalar};
use crate::solve::{solve_assignments, solve_pairs, SolveOptions};

/// Batched parallel index arrays, aligned with the input batch order.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchAssignment {
    /// Per-instance totals, when requested.
    pub totals: Option<Vec<f64>>,
    /// Per-instance matched row indices.
    pub rows: Vec<Vec<usize>>,
    /// Per-instance matched column indices.
    pub cols: Vec<Vec<usize>>,
}

/// Batched compact pair lists, aligned with the input batch order.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchAssignmentPairs {
    /// Per-instance totals, when requested.
    pub totals: Option<Vec<f64>>,
    /// Per-instance `[row, col]` pair lists.
    pub pairs: Vec<Vec<[usize; 2]>>,
}

#[cfg(feature = "parallel")]
fn resolve_workers(workers: usize, batch_len: usize) -> usize {
    let workers = if workers == 0 {
        std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
    } else {
        workers
    };
    workers.min(batch_len).max(1)
}

/// Run `f` over every instance, in input order, optionally on a pool scoped
/// to this call. The output vector is index-aligned with `costs` no matter
/// in which order instances complete.
fn run_batch<S, T, F>(costs: &[CostMatrix<S>], workers: usize, f: F) -> Result<Vec<T>>
where
    S: CostScalar,
    T: Send,
    F: Fn(&CostMatrix<S>) -> Result<T> + Sync,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        let workers = resolve_workers(workers, costs.len());
        if workers > 1 && costs.len() > 1 {
            log::debug!("solving batch of {} instances on {workers} workers", costs.len());
            match rayon::ThreadPoolBuilder::new().num_threads(workers).build() {
                Ok(pool) => return pool.install(|| costs.par_iter().map(&f).collect()),
                Err(err) => {
                    log::warn!("thread pool unavailable ({err}); running sequentially");
                }
            }
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = workers;

    costs.iter().map(f).collect()
}

/// Solve a batch of cost matrices, returning parallel index arrays per
/// instance. Instances do not need to share a shape.
///
/// `workers == 0` uses the available parallelism; the worker count is
/// capped at the batch size. `BatchAssignment` entry `i` always corresponds
/// to `costs[i]`.
///
/// # Example
///
/// ```
/// use lap_jv::{solve_pairs_batch, CostMatrix, SolveOptions};
///
/// let batch = vec![
///     CostMatrix::from_rows(vec![vec![1.0, 5.0], vec![5.0, 1.0]]).unwrap(),
///     CostMatrix::from_rows(vec![vec![9.0, 1.0], vec![1.0, 9.0]]).unwrap(),
/// ];
/// let result = solve_pairs_batch(&batch, &SolveOptions::default(), 0).unwrap();
/// assert_eq!(result.totals, Some(vec![2.0, 2.0]));
/// assert_eq!(result.cols[0], vec![0, 1]);
/// assert_eq!(result.cols[1], vec![1, 0]);
/// ```
pub fn solve_pairs_batch<S: CostScalar>(
    costs: &[CostMatrix<S>],
    opts: &SolveOptions,
    workers: usize,
) -> Result<BatchAssignment> {
    let results = run_batch(costs, workers, |cost| solve_pairs(cost, opts))?;

    let mut totals = opts.return_cost.then(|| Vec::with_capacity(results.len()));
    let mut rows = Vec::with_capacity(results.len());
    let mut cols = Vec::with_capacity(results.len());
    for result in results {
        if let Some(totals) = totals.as_mut() {
            totals.push(result.total.unwrap_or(0.0));
        }
        rows.push(result.rows);
        cols.push(result.cols);
    }
    Ok(BatchAssignment { totals, rows, cols })
}

/// Solve a batch of cost matrices, returning a compact `[row, col]` pair
/// list per instance. See [`solve_pairs_batch`] for execution semantics.
pub fn solve_assignments_batch<S: CostScalar>(
    costs: &[CostMatrix<S>],
    opts: &SolveOptions,
    workers: usize,
) -> Result<BatchAssignmentPairs> {
    let results = run_batch(costs, workers, |cost| solve_assignments(cost, opts))?;

    let mut totals = opts.return_cost.then(|| Vec::with_capacity(results.len()));
    let mut pairs = Vec::with_capacity(results.len());
    for result in results {
        if let Some(totals) = totals.as_mut() {
            totals.push(result.total.unwrap_or(0.0));
        }
        pairs.push(result.pairs);
    }
    Ok(BatchAssignmentPairs { totals, pairs })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use rand::Rng;

    fn random_matrix(rows: usize, cols: usize) -> CostMatrix<f64> {
        let mut rng = rand::rng();
        let data = (0..rows * cols).map(|_| rng.random::<f64>()).collect();
        CostMatrix::from_vec(data, rows, cols).unwrap()
    }

    #[test]
    fn batch_matches_single_instance_results() {
        let batch = vec![
            random_matrix(4, 4),
            random_matrix(4, 6),
            random_matrix(6, 4),
        ];
        let opts = SolveOptions::new().extend(true);
        let result = solve_pairs_batch(&batch, &opts, 2).unwrap();

        for (i, cost) in batch.iter().enumerate() {
            let single = crate::solve::solve_pairs(cost, &opts).unwrap();
            assert_eq!(result.rows[i], single.rows);
            assert_eq!(result.cols[i], single.cols);
            assert_eq!(result.totals.as_ref().unwrap()[i], single.total.unwrap());
        }
    }

    #[test]
    fn results_are_identical_across_worker_counts() {
        let batch: Vec<_> = (0..6).map(|_| random_matrix(6, 8)).collect();
        let opts = SolveOptions::new().extend(true);

        let base = solve_assignments_batch(&batch, &opts, 1).unwrap();
        for workers in [0, 2, 4, 16] {
            let run = solve_assignments_batch(&batch, &opts, workers).unwrap();
            assert_eq!(run, base, "worker count {workers} changed the results");
        }
    }

    #[test]
    fn pair_and_parallel_batches_agree() {
        let batch: Vec<_> = (0..3).map(|_| random_matrix(5, 5)).collect();
        let opts = SolveOptions::default();

        let parallel = solve_pairs_batch(&batch, &opts, 2).unwrap();
        let compact = solve_assignments_batch(&batch, &opts, 2).unwrap();

        assert_eq!(parallel.totals, compact.totals);
        for i in 0..batch.len() {
            let rebuilt: Vec<[usize; 2]> = parallel.rows[i]
                .iter()
                .zip(&parallel.cols[i])
                .map(|(&r, &c)| [r, c])
                .collect();
            assert_eq!(rebuilt, compact.pairs[i]);
        }
    }

    #[test]
    fn empty_batch_yields_empty_outputs() {
        let batch: Vec<CostMatrix<f64>> = vec![];
        let result = solve_pairs_batch(&batch, &SolveOptions::default(), 4).unwrap();
        assert_eq!(result.totals, Some(vec![]));
        assert!(result.rows.is_empty());
        assert!(result.cols.is_empty());
    }

    #[test]
    fn one_bad_instance_aborts_the_batch() {
        let batch = vec![
            random_matrix(3, 3),
            random_matrix(3, 5), // rectangular, but extend stays off
            random_matrix(3, 3),
        ];
        let err = solve_pairs_batch(&batch, &SolveOptions::default(), 2);
        assert!(matches!(err, Err(Error::InvalidShape(_))));
    }

    #[test]
    fn return_cost_false_omits_batch_totals() {
        let batch = vec![random_matrix(3, 3)];
        let opts = SolveOptions::new().return_cost(false);
        let result = solve_assignments_batch(&batch, &opts, 1).unwrap();
        assert_eq!(result.totals, None);
        assert_eq!(result.pairs.len(), 1);
    }
}
