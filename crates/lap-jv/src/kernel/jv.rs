//! Dense Jonker-Volgenant assignment kernel.
//!
//! Classic three-phase JV: a column reduction pass, two rounds of
//! augmenting row reduction, then shortest augmenting paths (Dijkstra over
//! reduced costs) for whatever rows are still free. Works on a contiguous
//! row-major square buffer and keeps the dual column prices in `v`.
//!
//! Invariants maintained across phases: `x[i]` is the column assigned to
//! row `i` (or -1), `y[j]` the row assigned to column `j` (or -1), and
//! every assigned pair has reduced cost `cost[i][j] - v[j]` minimal over
//! its row.

use crate::error::{Error, Result};
use crate::kernel::{KernelScalar, SquareKernel};

/// The bundled Jonker-Volgenant solver.
#[derive(Debug, Clone, Copy, Default)]
pub struct JonkerVolgenant;

impl<S: KernelScalar> SquareKernel<S> for JonkerVolgenant {
    fn solve(&self, dim: usize, cost: &[S], x: &mut [isize], y: &mut [isize]) -> Result<()> {
        lapjv(dim, cost, x, y)
    }
}

/// Column reduction: assign every column to its cheapest row, keep only
/// rows that won a unique column, and transfer slack into the duals.
/// Returns the number of rows left unassigned.
fn column_reduction<S: KernelScalar>(
    dim: usize,
    cost: &[S],
    free_rows: &mut [usize],
    x: &mut [isize],
    y: &mut [isize],
    v: &mut [S],
) -> usize {
    for i in 0..dim {
        x[i] = -1;
        v[i] = S::MAX;
        y[i] = 0;
    }
    for i in 0..dim {
        let row = &cost[i * dim..(i + 1) * dim];
        for j in 0..dim {
            if row[j] < v[j] {
                v[j] = row[j];
                y[j] = i as isize;
            }
        }
    }

    let mut unique = vec![true; dim];
    let mut j = dim;
    while j > 0 {
        j -= 1;
        let i = y[j] as usize;
        if x[i] < 0 {
            x[i] = j as isize;
        } else {
            unique[i] = false;
            y[j] = -1;
        }
    }

    let mut n_free = 0;
    for i in 0..dim {
        if x[i] < 0 {
            free_rows[n_free] = i;
            n_free += 1;
        } else if unique[i] {
            let j = x[i] as usize;
            let row = &cost[i * dim..(i + 1) * dim];
            let mut min = S::MAX;
            for j2 in 0..dim {
                if j2 == j {
                    continue;
                }
                let c = row[j2] - v[j2];
                if c < min {
                    min = c;
                }
            }
            v[j] = v[j] - min;
        }
    }
    n_free
}

/// Augmenting row reduction: alternate free rows onto their best column,
/// bumping the previous owner when the dual price can be lowered.
/// Returns the number of rows still free afterwards.
fn augmenting_row_reduction<S: KernelScalar>(
    dim: usize,
    cost: &[S],
    n_free_rows: usize,
    free_rows: &mut [usize],
    x: &mut [isize],
    y: &mut [isize],
    v: &mut [S],
) -> usize {
    let mut current = 0;
    let mut new_free_rows = 0;
    let mut rr_cnt = 0usize;

    while current < n_free_rows {
        rr_cnt += 1;
        let free_i = free_rows[current];
        current += 1;
        let row = &cost[free_i * dim..(free_i + 1) * dim];

        // minimum and second minimum reduced cost over the row
        let mut j1 = 0isize;
        let mut j2 = -1isize;
        let mut v1 = row[0] - v[0];
        let mut v2 = S::MAX;
        for j in 1..dim {
            let c = row[j] - v[j];
            if c < v2 {
                if c >= v1 {
                    v2 = c;
                    j2 = j as isize;
                } else {
                    v2 = v1;
                    v1 = c;
                    j2 = j1;
                    j1 = j as isize;
                }
            }
        }

        let mut i0 = y[j1 as usize];
        let v1_new = v[j1 as usize] - (v2 - v1);
        let v1_lowers = v1_new < v[j1 as usize];

        if rr_cnt < current * dim {
            if v1_lowers {
                v[j1 as usize] = v1_new;
            } else if i0 >= 0 && j2 >= 0 {
                j1 = j2;
                i0 = y[j2 as usize];
            }
            if i0 >= 0 {
                if v1_lowers {
                    current -= 1;
                    free_rows[current] = i0 as usize;
                } else {
                    free_rows[new_free_rows] = i0 as usize;
                    new_free_rows += 1;
                }
            }
        } else if i0 >= 0 {
            free_rows[new_free_rows] = i0 as usize;
            new_free_rows += 1;
        }
        x[free_i] = j1;
        y[j1 as usize] = free_i as isize;
    }
    new_free_rows
}

/// Partition `cols[lo..]` so that columns at distance equal to the minimum
/// come first; returns the end of that minimal group.
fn select_minimal_columns<S: KernelScalar>(
    dim: usize,
    lo: usize,
    d: &[S],
    cols: &mut [usize],
) -> usize {
    let mut hi = lo + 1;
    let mut mind = d[cols[lo]];
    for k in hi..dim {
        let j = cols[k];
        if d[j] <= mind {
            if d[j] < mind {
                hi = lo;
                mind = d[j];
            }
            cols[k] = cols[hi];
            cols[hi] = j;
            hi += 1;
        }
    }
    hi
}

/// Relax distances out of the current minimal group. Returns an unassigned
/// column that closes an augmenting path, or -1 when the group is spent.
#[allow(clippy::too_many_arguments)]
fn scan_columns<S: KernelScalar>(
    dim: usize,
    cost: &[S],
    plo: &mut usize,
    phi: &mut usize,
    d: &mut [S],
    cols: &mut [usize],
    pred: &mut [usize],
    y: &[isize],
    v: &[S],
) -> isize {
    let mut lo = *plo;
    let mut hi = *phi;

    while lo != hi {
        let mut j = cols[lo];
        lo += 1;

        debug_assert!(y[j] >= 0, "scanned column must be assigned");
        let i = y[j] as usize;
        let mind = d[j];
        let row = &cost[i * dim..(i + 1) * dim];
        let h = row[j] - v[j] - mind;

        for k in hi..dim {
            j = cols[k];
            let cred_ij = row[j] - v[j] - h;
            if cred_ij < d[j] {
                d[j] = cred_ij;
                pred[j] = i;
                if cred_ij == mind {
                    if y[j] < 0 {
                        return j as isize;
                    }
                    cols[k] = cols[hi];
                    cols[hi] = j;
                    hi += 1;
                }
            }
        }
    }
    *plo = lo;
    *phi = hi;
    -1
}

/// Dijkstra over reduced costs from a free row to the nearest unassigned
/// column, updating the duals of columns that became final on the way.
fn shortest_augmenting_path<S: KernelScalar>(
    dim: usize,
    cost: &[S],
    start_row: usize,
    y: &[isize],
    v: &mut [S],
    pred: &mut [usize],
) -> isize {
    let mut lo = 0;
    let mut hi = 0;
    let mut final_j = -1isize;
    let mut n_ready = 0;
    let mut cols: Vec<usize> = (0..dim).collect();
    let mut d = vec![S::ZERO; dim];

    let row = &cost[start_row * dim..(start_row + 1) * dim];
    for j in 0..dim {
        pred[j] = start_row;
        d[j] = row[j] - v[j];
    }

    while final_j == -1 {
        if lo == hi {
            n_ready = lo;
            hi = select_minimal_columns(dim, lo, &d, &mut cols);
            for k in lo..hi {
                let j = cols[k];
                if y[j] < 0 {
                    final_j = j as isize;
                }
            }
        }
        if final_j == -1 {
            final_j = scan_columns(dim, cost, &mut lo, &mut hi, &mut d, &mut cols, pred, y, v);
        }
    }

    let mind = d[cols[lo]];
    for k in 0..n_ready {
        let j = cols[k];
        v[j] = v[j] + (d[j] - mind);
    }
    final_j
}

/// Augment the partial assignment with one shortest path per free row.
fn augment_solution<S: KernelScalar>(
    dim: usize,
    cost: &[S],
    n_free_rows: usize,
    free_rows: &[usize],
    x: &mut [isize],
    y: &mut [isize],
    v: &mut [S],
) {
    let mut pred = vec![0usize; dim];

    for &free_row in &free_rows[..n_free_rows] {
        let mut i = -1isize;
        let mut steps = 0;
        let mut j = shortest_augmenting_path(dim, cost, free_row, y, v, &mut pred);
        debug_assert!(j >= 0 && (j as usize) < dim);
        // walk the path backwards, flipping assignments
        while i != free_row as isize {
            i = pred[j as usize] as isize;
            y[j as usize] = i;
            let tmp = j;
            j = x[i as usize];
            x[i as usize] = tmp;
            steps += 1;
            debug_assert!(steps <= dim, "augmenting path longer than the problem size");
        }
    }
}

/// Solve a square assignment problem in place.
///
/// `cost` is a `dim * dim` row-major buffer of finite costs; `x` and `y`
/// receive the row-to-column and column-to-row mappings.
pub(crate) fn lapjv<S: KernelScalar>(
    dim: usize,
    cost: &[S],
    x: &mut [isize],
    y: &mut [isize],
) -> Result<()> {
    if dim == 0 {
        return Err(Error::KernelFailure("cost matrix must be non-empty".into()));
    }
    if cost.len() != dim * dim || x.len() != dim || y.len() != dim {
        return Err(Error::KernelFailure(format!(
            "buffer lengths do not match problem size {dim}"
        )));
    }

    let mut free_rows = vec![0usize; dim];
    let mut v = vec![S::ZERO; dim];

    let mut n_free = column_reduction(dim, cost, &mut free_rows, x, y, &mut v);
    let mut pass = 0;
    while n_free > 0 && pass < 2 {
        n_free = augmenting_row_reduction(dim, cost, n_free, &mut free_rows, x, y, &mut v);
        pass += 1;
    }
    if n_free > 0 {
        augment_solution(dim, cost, n_free, &free_rows, x, y, &mut v);
    }
    Ok(())
}
