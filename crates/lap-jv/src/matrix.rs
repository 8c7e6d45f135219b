//! Dense cost matrix storage and scalar abstraction.
//!
//! A [`CostMatrix`] is a contiguous row-major buffer plus a shape. It is the
//! read-only input to every solver entry point: the pipeline derives working
//! buffers from it but never mutates it, and the final total is always
//! accumulated against the original entries, never a padded or transposed
//! copy.

use crate::error::{Error, Result};
use crate::kernel::Precision;

/// Scalar types accepted as cost matrix entries.
///
/// The pipeline converts entries to `f64` once while canonicalizing, and
/// accumulates totals in `f64` regardless of the kernel precision.
/// `NATIVE` records the precision the type carries natively, which feeds the
/// kernel precision selection: only double-native inputs are ever promoted
/// to the full-precision kernel.
pub trait CostScalar: Copy + Send + Sync + 'static {
    /// Precision this scalar carries natively.
    const NATIVE: Precision;

    /// Lossless (or best-effort, for wide integers) conversion to `f64`.
    fn to_f64(self) -> f64;
}

impl CostScalar for f32 {
    const NATIVE: Precision = Precision::Single;
    fn to_f64(self) -> f64 {
        f64::from(self)
    }
}

impl CostScalar for f64 {
    const NATIVE: Precision = Precision::Double;
    fn to_f64(self) -> f64 {
        self
    }
}

impl CostScalar for i32 {
    const NATIVE: Precision = Precision::Double;
    fn to_f64(self) -> f64 {
        f64::from(self)
    }
}

impl CostScalar for i64 {
    const NATIVE: Precision = Precision::Double;
    fn to_f64(self) -> f64 {
        self as f64
    }
}

/// A dense cost matrix in row-major order.
///
/// Entry `(i, j)` is the cost of assigning row `i` to column `j`. Entries
/// may be `±inf` or `NaN` to mark a pair as forbidden; forbidden pairs never
/// appear in a returned assignment.
///
/// # Example
///
/// ```
/// use lap_jv::CostMatrix;
///
/// let m = CostMatrix::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3).unwrap();
/// assert_eq!(m.shape(), (2, 3));
/// assert_eq!(m.get(1, 2), 6.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix<S> {
    data: Vec<S>,
    rows: usize,
    cols: usize,
}

impl<S: CostScalar> CostMatrix<S> {
    /// Create a matrix from a row-major buffer.
    ///
    /// Fails with [`Error::InvalidShape`] when `data.len() != rows * cols`.
    pub fn from_vec(data: Vec<S>, rows: usize, cols: usize) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(Error::InvalidShape(format!(
                "buffer of length {} does not hold a {}x{} matrix",
                data.len(),
                rows,
                cols
            )));
        }
        Ok(Self { data, rows, cols })
    }

    /// Create a matrix from nested rows.
    ///
    /// Fails with [`Error::InvalidShape`] when the rows are ragged.
    pub fn from_rows(rows: Vec<Vec<S>>) -> Result<Self> {
        let n = rows.len();
        let m = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(n * m);
        for row in &rows {
            if row.len() != m {
                return Err(Error::InvalidShape(format!(
                    "ragged row of length {} in a matrix with {} columns",
                    row.len(),
                    m
                )));
            }
            data.extend_from_slice(row);
        }
        Ok(Self { data, rows: n, cols: m })
    }

    /// `(rows, cols)` of the matrix.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Entry at `(row, col)`.
    ///
    /// # Panics
    /// Panics when the coordinates are out of bounds.
    pub fn get(&self, row: usize, col: usize) -> S {
        assert!(row < self.rows && col < self.cols, "index out of bounds");
        self.data[row * self.cols + col]
    }

    /// The underlying row-major buffer.
    pub fn as_slice(&self) -> &[S] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_vec_checks_length() {
        assert!(CostMatrix::from_vec(vec![1.0f64; 6], 2, 3).is_ok());
        assert!(matches!(
            CostMatrix::from_vec(vec![1.0f64; 5], 2, 3),
            Err(Error::InvalidShape(_))
        ));
    }

    #[test]
    fn from_rows_rejects_ragged_input() {
        let err = CostMatrix::from_rows(vec![vec![1.0f64, 2.0], vec![3.0]]);
        assert!(matches!(err, Err(Error::InvalidShape(_))));
    }

    #[test]
    fn row_major_indexing() {
        let m = CostMatrix::from_vec(vec![1i32, 2, 3, 4, 5, 6], 3, 2).unwrap();
        assert_eq!(m.get(0, 1), 2);
        assert_eq!(m.get(2, 0), 5);
        assert_eq!(m.shape(), (3, 2));
    }

    #[test]
    fn zero_sized_shapes_are_valid() {
        let m = CostMatrix::<f64>::from_vec(vec![], 0, 4).unwrap();
        assert_eq!(m.shape(), (0, 4));
        let m = CostMatrix::<f64>::from_rows(vec![]).unwrap();
        assert_eq!(m.shape(), (0, 0));
    }
}
