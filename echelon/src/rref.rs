use crate::elimination::Pivots;
use crate::matrix::Matrix;
use crate::tolerance::{Tolerance, DEFAULT_TOLERANCE};
use std::fmt;

/// A matrix in reduced row echelon form, together with its pivots and the matrix it was
/// reduced from
///
/// Elimination runs once, on construction. Rank, null space and column space are then read
/// off the cached [`Pivots`].
#[derive(Clone, Debug, PartialEq)]
pub struct Rref<'a> {
    original: &'a Matrix,
    reduced: Matrix,
    pivots: Pivots,
}

impl<'a> Rref<'a> {
    pub fn new(matrix: &'a Matrix) -> Self {
        Rref::with_tolerance(matrix, DEFAULT_TOLERANCE)
    }

    /// Reduce `matrix`, treating values within `tolerance` of zero as zero
    pub fn with_tolerance(matrix: &'a Matrix, tolerance: Tolerance) -> Self {
        let mut reduced = matrix.clone();
        let pivots = reduced.gauss_inplace_with(tolerance);
        Rref {
            original: matrix,
            reduced,
            pivots,
        }
    }

    #[inline]
    pub fn rank(&self) -> usize {
        self.pivots.rank()
    }

    /// Null space basis as the columns of a `cols x free_columns` matrix
    pub fn null_space(&self) -> Matrix {
        self.pivots.null_space(&self.reduced)
    }

    /// Column space basis, taken from the columns of the original matrix
    pub fn column_space(&self) -> Matrix {
        self.pivots.column_space(self.original)
    }

    #[inline]
    pub fn pivots(&self) -> &Pivots {
        &self.pivots
    }

    #[inline]
    pub fn pivot_columns(&self) -> Vec<usize> {
        self.pivots.columns()
    }

    #[inline]
    pub fn free_columns(&self) -> &[usize] {
        self.pivots.free_columns()
    }

    #[inline]
    pub fn original(&self) -> &'a Matrix {
        self.original
    }

    /// The reduced matrix
    #[inline]
    pub fn matrix(&self) -> &Matrix {
        &self.reduced
    }

    /// Consumes the view, returning the reduced matrix and its pivots
    pub fn into_parts(self) -> (Matrix, Pivots) {
        (self.reduced, self.pivots)
    }
}

impl fmt::Display for Rref<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.reduced, f)
    }
}
