//! Gaussian elimination and the quantities derived from it: rank, null space, column space,
//! determinant and inverse

use crate::error::{check_dim, LinalgError};
use crate::matrix::{Matrix, RowOps};
use crate::tolerance::{Tolerance, DEFAULT_TOLERANCE};
use log::{debug, trace};
use rustc_hash::FxHashSet;

/// Pivot positions and free columns found by Gaussian elimination
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Pivots {
    /// `(row, column)` of the leading entry of every non-zero row, in row order. Rows are
    /// `0..rank` and every column appears at most once.
    positions: Vec<(usize, usize)>,

    /// columns without a pivot, in increasing order
    free_columns: Vec<usize>,
}

impl Pivots {
    #[inline]
    pub fn positions(&self) -> &[(usize, usize)] {
        &self.positions
    }

    /// Pivot columns, in the order of the pivot rows
    pub fn columns(&self) -> Vec<usize> {
        self.positions.iter().map(|&(_, col)| col).collect()
    }

    #[inline]
    pub fn free_columns(&self) -> &[usize] {
        &self.free_columns
    }

    /// The number of pivots, which is also the number of pivot columns
    #[inline]
    pub fn rank(&self) -> usize {
        self.positions.len()
    }

    /// Columns of `original` at the pivot columns, as a `rows x rank` matrix
    pub fn column_space(&self, original: &Matrix) -> Matrix {
        let cols = self.columns();
        Matrix::build(original.rows(), cols.len(), |i, k| original[(i, cols[k])])
    }

    /// The standard parametrization of the solutions of `reduced * x = 0`, one column per
    /// free variable. `reduced` must be the matrix these pivots were read from.
    pub fn null_space(&self, reduced: &Matrix) -> Matrix {
        let mut result = Matrix::zeros(reduced.cols(), self.free_columns.len());

        for &(prow, pcol) in &self.positions {
            for (j, &f) in self.free_columns.iter().enumerate() {
                result[(pcol, j)] = -reduced[(prow, f)];
            }
        }

        for (i, &col) in self.free_columns.iter().enumerate() {
            result[(col, i)] = 1.0;
        }

        result
    }
}

impl Matrix {
    /// Reduce to reduced row echelon form while performing matching row operations on `proxy`,
    /// returning the pivots and free columns
    ///
    /// The forward pass walks the columns left to right, keeping track of the next pivot row.
    /// For each column the remaining rows are stably sorted by decreasing magnitude in that
    /// column. If the best candidate is close to zero, the column is free and its remaining
    /// entries are zeroed; otherwise it becomes a pivot column and is cleared below the pivot
    /// row. Afterwards, entries below the absolute tolerance are snapped to zero, the pivot
    /// columns are cleared upwards (last pivot first), and each pivot row is scaled by its pivot.
    ///
    /// Every column holds at most one pivot, so the pivot rows are exactly the non-zero rows of
    /// the result and the rank is the number of pivots.
    fn gauss_helper(&mut self, tolerance: Tolerance, proxy: &mut impl RowOps) -> Pivots {
        let rows = self.rows();
        let cols = self.cols();
        let mut row = 0;
        let mut positions: Vec<(usize, usize)> = vec![];

        for pcol in 0..cols {
            if row == rows {
                break;
            }

            let order = self.row_order(row, |r| -r[pcol].abs());
            self.permute_rows(row, &order);
            proxy.permute_rows(row, &order);

            let pivot = self[(row, pcol)];
            if tolerance.is_zero(pivot) {
                trace!("gauss: column {} has no pivot", pcol);
                for i in row..rows {
                    self[(i, pcol)] = 0.0;
                }
                continue;
            }

            for i in (row + 1)..rows {
                let factor = self[(i, pcol)] / pivot;
                self.sub_scaled_row(row, i, factor);
                proxy.sub_scaled_row(row, i, factor);
                self[(i, pcol)] = 0.0;
            }

            positions.push((row, pcol));
            row += 1;
        }

        self.zero_small_values(tolerance.absolute);

        let pivot_cols: FxHashSet<usize> = positions.iter().map(|&(_, col)| col).collect();
        let free_columns: Vec<usize> = (0..cols).filter(|c| !pivot_cols.contains(c)).collect();

        for &(prow, pcol) in positions.iter().rev() {
            let pivot = self[(prow, pcol)];
            for i in (0..prow).rev() {
                let factor = self[(i, pcol)] / pivot;
                self.sub_scaled_row(prow, i, factor);
                proxy.sub_scaled_row(prow, i, factor);
                self[(i, pcol)] = 0.0;
            }
        }

        for &(prow, pcol) in &positions {
            let k = 1.0 / self[(prow, pcol)];
            self.scale_row(prow, k);
            proxy.scale_row(prow, k);
            self[(prow, pcol)] = 1.0;
        }

        debug!(
            "gauss: reduced {}x{} matrix, pivots {:?}, free columns {:?}",
            rows, cols, positions, free_columns
        );

        Pivots {
            positions,
            free_columns,
        }
    }

    /// Reduce the matrix to reduced row echelon form, in place
    #[inline]
    pub fn gauss_inplace(&mut self) -> Pivots {
        self.gauss_helper(DEFAULT_TOLERANCE, &mut ())
    }

    /// Reduce the matrix to reduced row echelon form in place, treating values within
    /// `tolerance` of zero as zero
    #[inline]
    pub fn gauss_inplace_with(&mut self, tolerance: Tolerance) -> Pivots {
        self.gauss_helper(tolerance, &mut ())
    }

    /// Returns a reduced row echelon copy of the matrix along with its pivots
    pub fn gauss(&self) -> (Matrix, Pivots) {
        let mut reduced = self.clone();
        let pivots = reduced.gauss_inplace();
        (reduced, pivots)
    }

    /// Compute the rank of the matrix using gaussian elimination
    #[inline]
    pub fn rank(&self) -> usize {
        self.clone().gauss_inplace().rank()
    }

    /// Returns a basis of the column space: the columns of the original matrix at the pivot
    /// columns, as a `rows x rank` matrix
    pub fn column_space(&self) -> Matrix {
        let (_, pivots) = self.gauss();
        pivots.column_space(self)
    }

    /// Returns a basis of the null space as the columns of a `cols x free_columns` matrix
    pub fn null_space(&self) -> Matrix {
        let (reduced, pivots) = self.gauss();
        pivots.null_space(&reduced)
    }

    /// Bring the matrix to upper triangular form in place, using partial pivoting, and return
    /// the sign (`1.0` or `-1.0`) picked up by row swaps
    ///
    /// Columns that are entirely zero on and below the diagonal are left alone.
    pub fn upper_triangular_inplace(&mut self) -> f64 {
        let mut sign = 1.0;

        for step in 0..self.diagonal_size() {
            let mut max_row = step;
            let mut max_val = self[(step, step)].abs();
            for row in (step + 1)..self.rows() {
                let val = self[(row, step)].abs();
                if val > max_val {
                    max_val = val;
                    max_row = row;
                }
            }

            if max_val == 0.0 {
                trace!("upper_triangular: column {} has no pivot", step);
                continue;
            }

            if max_row != step {
                self.swap_rows(step, max_row);
                sign = -sign;
            }

            let pivot = self[(step, step)];
            for i in (step + 1)..self.rows() {
                let factor = self[(i, step)] / pivot;
                self.sub_scaled_row(step, i, factor);
                self[(i, step)] = 0.0;
            }
        }

        sign
    }

    /// Returns an upper triangular copy of the matrix and the sign picked up by row swaps
    pub fn upper_triangular(&self) -> (Matrix, f64) {
        let mut m = self.clone();
        let sign = m.upper_triangular_inplace();
        (m, sign)
    }

    /// Compute the determinant of a square matrix by triangularization
    ///
    /// The result is the sign of the row permutation times the product of the diagonal, and is
    /// exactly `0.0` when a diagonal entry is zero. No tolerance is applied, so badly scaled
    /// matrices keep their determinant.
    ///
    /// # Errors
    ///
    /// [`LinalgError::DimensionMismatch`] if the matrix is not square.
    pub fn determinant(&self) -> Result<f64, LinalgError> {
        check_dim(self.rows(), self.cols())?;
        let (triangular, sign) = self.upper_triangular();

        let mut det = sign;
        for i in 0..triangular.diagonal_size() {
            let d = triangular[(i, i)];
            if d == 0.0 {
                debug!("determinant: zero on the diagonal at {}", i);
                return Ok(0.0);
            }
            det *= d;
        }

        debug!("determinant: sign {}, value {}", sign, det);
        Ok(det)
    }

    /// Compute the inverse of an invertible matrix
    ///
    /// # Errors
    ///
    /// [`LinalgError::DimensionMismatch`] if the matrix is not square, and
    /// [`LinalgError::Singular`] if it is not invertible.
    pub fn inverse(&self) -> Result<Matrix, LinalgError> {
        check_dim(self.rows(), self.cols())?;
        let mut inv = Matrix::identity(self.cols());
        let pivots = self.clone().gauss_helper(DEFAULT_TOLERANCE, &mut inv);

        if pivots.rank() != self.cols() {
            return Err(LinalgError::Singular);
        }

        Ok(inv)
    }
}
