//! Orientation normalization.
//!
//! The square kernel is fastest when the working matrix has no more rows
//! than columns, so a tall input is transposed up front and every index is
//! mapped back on the way out. The transpose decision is carried through the
//! pipeline as an explicit flag instead of shared state.

use crate::matrix::{CostMatrix, CostScalar};

/// An f64 working copy of the input in rows <= cols orientation.
#[derive(Debug)]
pub(crate) struct Canonical {
    pub data: Vec<f64>,
    pub rows: usize,
    pub cols: usize,
    pub transposed: bool,
}

/// Copy `cost` into a contiguous f64 buffer, transposing when the input is
/// taller than wide. Always succeeds, including for zero-sized shapes.
pub(crate) fn canonicalize<S: CostScalar>(cost: &CostMatrix<S>) -> Canonical {
    let (n0, m0) = cost.shape();
    if n0 > m0 {
        let mut data = Vec::with_capacity(n0 * m0);
        for j in 0..m0 {
            for i in 0..n0 {
                data.push(cost.get(i, j).to_f64());
            }
        }
        Canonical { data, rows: m0, cols: n0, transposed: true }
    } else {
        let data = cost.as_slice().iter().map(|&v| v.to_f64()).collect();
        Canonical { data, rows: n0, cols: m0, transposed: false }
    }
}

impl Canonical {
    pub(crate) fn get(&self, row: usize, col: usize) -> f64 {
        debug_assert!(row < self.rows && col < self.cols);
        self.data[row * self.cols + col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_input_passes_through() {
        let m = CostMatrix::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3).unwrap();
        let c = canonicalize(&m);
        assert!(!c.transposed);
        assert_eq!((c.rows, c.cols), (2, 3));
        assert_eq!(c.get(1, 2), 6.0);
    }

    #[test]
    fn tall_input_is_transposed() {
        let m = CostMatrix::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 3, 2).unwrap();
        let c = canonicalize(&m);
        assert!(c.transposed);
        assert_eq!((c.rows, c.cols), (2, 3));
        // canonical (i, j) reads original (j, i)
        assert_eq!(c.get(0, 2), 5.0);
        assert_eq!(c.get(1, 0), 2.0);
    }

    #[test]
    fn integer_input_converts_to_f64() {
        let m = CostMatrix::from_vec(vec![1i32, -2, 3, -4], 2, 2).unwrap();
        let c = canonicalize(&m);
        assert_eq!(c.get(1, 1), -4.0);
    }
}
