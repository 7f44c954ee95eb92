use crate::error::{check_dim, check_index, LinalgError};
use crate::tolerance::Tolerance;
use crate::vector::{VecSlice, Vector};
use rand::Rng;
use std::{
    fmt,
    ops::{Index, IndexMut, Mul},
};

/// A dense matrix of `f64`s, stored as a list of row [`Vector`]s
///
/// The logical shape is tracked explicitly by `rows` and `cols`, so a matrix may have zero rows
/// but a non-zero number of columns (or vice versa). Every row always has exactly `cols` scalars.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    /// the number of rows in the matrix
    rows: usize,

    /// the number of columns in the matrix, i.e. the dimension of every row
    cols: usize,

    /// the rows of the matrix, in order
    data: Vec<Vector>,
}

/// Elementary row operations
///
/// Gaussian elimination drives a second `RowOps` value (a "proxy") with exactly the same
/// operations it applies to the matrix being reduced. `()` is the proxy that does nothing.
pub trait RowOps {
    fn swap_rows(&mut self, a: usize, b: usize);

    /// Reorders the rows from `start` onwards, so that the new row `start + k` is the old row
    /// `start + order[k]`
    fn permute_rows(&mut self, start: usize, order: &[usize]);

    /// `row[to] -= factor * row[from]`
    fn sub_scaled_row(&mut self, from: usize, to: usize, factor: f64);

    /// `row[row] *= factor`
    fn scale_row(&mut self, row: usize, factor: f64);
}

impl Matrix {
    /// Creates an all-zero matrix with the given shape.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Matrix {
            rows,
            cols,
            data: (0..rows).map(|_| Vector::zeros(cols)).collect(),
        }
    }

    pub fn identity(size: usize) -> Self {
        Matrix::build(size, size, |i, j| if i == j { 1.0 } else { 0.0 })
    }

    /// Builds a matrix by calling `f(i, j)` for every entry, in row-major order.
    pub fn build(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let data = (0..rows)
            .map(|i| (0..cols).map(|j| f(i, j)).collect())
            .collect();
        Matrix { rows, cols, data }
    }

    /// Creates a matrix with entries drawn uniformly from `[-1, 1)`.
    #[inline]
    pub fn random(rng: &mut impl Rng, rows: usize, cols: usize) -> Self {
        Matrix::build(rows, cols, |_, _| rng.random_range(-1.0..1.0))
    }

    /// Constructs a matrix from a list of rows, each given as a list of scalars.
    ///
    /// # Errors
    ///
    /// [`LinalgError::EmptyInput`] if `rows` is empty, [`LinalgError::DimensionMismatch`] if
    /// the rows have different lengths.
    pub fn from_rows<T, R>(rows: &[R]) -> Result<Self, LinalgError>
    where
        T: Into<f64> + Copy,
        R: AsRef<[T]>,
    {
        Matrix::from_row_vectors(
            rows.iter()
                .map(|r| Vector::new(r.as_ref().iter().copied())),
        )
    }

    /// Constructs a matrix from a list of columns, each given as a list of scalars.
    ///
    /// # Errors
    ///
    /// [`LinalgError::EmptyInput`] if `columns` is empty, [`LinalgError::DimensionMismatch`] if
    /// the columns have different lengths.
    pub fn from_columns<T, C>(columns: &[C]) -> Result<Self, LinalgError>
    where
        T: Into<f64> + Copy,
        C: AsRef<[T]>,
    {
        Matrix::from_column_vectors(
            columns
                .iter()
                .map(|c| Vector::new(c.as_ref().iter().copied())),
        )
    }

    /// Constructs a matrix whose rows are the given vectors.
    pub fn from_row_vectors(
        rows: impl IntoIterator<Item = Vector>,
    ) -> Result<Self, LinalgError> {
        let mut rows = rows.into_iter().peekable();
        let cols = rows.peek().ok_or(LinalgError::EmptyInput)?.dim();
        let mut result = Matrix::zeros(0, cols);
        for row in rows {
            result.append_row(row)?;
        }
        Ok(result)
    }

    /// Constructs a matrix whose columns are the given vectors.
    pub fn from_column_vectors<V: AsRef<VecSlice>>(
        columns: impl IntoIterator<Item = V>,
    ) -> Result<Self, LinalgError> {
        let mut columns = columns.into_iter().peekable();
        let rows = columns.peek().ok_or(LinalgError::EmptyInput)?.as_ref().dim();
        let mut result = Matrix::zeros(rows, 0);
        for column in columns {
            result.append_column(column.as_ref())?;
        }
        Ok(result)
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns `(rows, cols)`
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// The length of the main diagonal, `min(rows, cols)`
    #[inline]
    pub fn diagonal_size(&self) -> usize {
        usize::min(self.rows, self.cols)
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Returns the row at `index`.
    #[inline]
    pub fn row(&self, index: usize) -> Result<&VecSlice, LinalgError> {
        check_index(index, self.rows)?;
        Ok(&*self.data[index])
    }

    /// Returns the row at `index` for modification. Its length cannot change.
    #[inline]
    pub fn row_mut(&mut self, index: usize) -> Result<&mut VecSlice, LinalgError> {
        check_index(index, self.rows)?;
        Ok(&mut *self.data[index])
    }

    /// Replaces the row at `index`.
    ///
    /// # Errors
    ///
    /// [`LinalgError::IndexOutOfRange`] for a bad index, [`LinalgError::DimensionMismatch`] if
    /// `row.dim() != cols`.
    pub fn set_row(&mut self, index: usize, row: Vector) -> Result<(), LinalgError> {
        check_index(index, self.rows)?;
        check_dim(self.cols, row.dim())?;
        self.data[index] = row;
        Ok(())
    }

    /// Returns the entry at row `i`, column `j`.
    pub fn get(&self, i: usize, j: usize) -> Result<f64, LinalgError> {
        self.row(i)?.get(j)
    }

    /// Sets the entry at row `i`, column `j`.
    pub fn set(&mut self, i: usize, j: usize, value: f64) -> Result<(), LinalgError> {
        self.row_mut(i)?.set(j, value)
    }

    /// Returns a new vector holding column `index`.
    pub fn column(&self, index: usize) -> Result<Vector, LinalgError> {
        check_index(index, self.cols)?;
        Ok(self.data.iter().map(|row| row[index]).collect())
    }

    /// Returns an iterator over the rows.
    #[inline]
    pub fn iter_rows(&self) -> impl Iterator<Item = &VecSlice> {
        self.data.iter().map(|row| row.as_vec_slice())
    }

    /// Returns an iterator over copies of the columns.
    pub fn columns(&self) -> impl Iterator<Item = Vector> + '_ {
        (0..self.cols).map(move |j| self.data.iter().map(|row| row[j]).collect())
    }

    /// Appends a row, increasing `rows` by one.
    pub fn append_row(&mut self, row: Vector) -> Result<(), LinalgError> {
        check_dim(self.cols, row.dim())?;
        self.data.push(row);
        self.rows += 1;
        Ok(())
    }

    /// Appends a column, increasing `cols` by one.
    pub fn append_column(&mut self, column: &VecSlice) -> Result<(), LinalgError> {
        check_dim(self.rows, column.dim())?;
        for (row, v) in self.data.iter_mut().zip(column.iter()) {
            row.append(v);
        }
        self.cols += 1;
        Ok(())
    }

    /// Returns a transposed copy of the matrix
    pub fn transposed(&self) -> Self {
        Matrix {
            rows: self.cols,
            cols: self.rows,
            data: self.columns().collect(),
        }
    }

    /// Returns the row order that sorts the rows from `start` onwards by ascending `key`.
    ///
    /// The sort is stable. The result is suitable for [`RowOps::permute_rows`].
    ///
    /// # Panics
    ///
    /// If `start > rows`.
    pub fn row_order(&self, start: usize, mut key: impl FnMut(&VecSlice) -> f64) -> Vec<usize> {
        assert!(
            start <= self.rows,
            "Cannot order rows from {} in a matrix with {} rows",
            start,
            self.rows
        );
        let keys: Vec<f64> = self.data[start..].iter().map(|row| key(row.as_vec_slice())).collect();
        let mut order: Vec<usize> = (0..keys.len()).collect();
        order.sort_by(|&a, &b| keys[a].total_cmp(&keys[b]));
        order
    }

    /// Stable-sorts the rows from `start` onwards by ascending `key`, in place.
    ///
    /// # Panics
    ///
    /// If `start > rows`.
    pub fn sort_rows(&mut self, start: usize, key: impl FnMut(&VecSlice) -> f64) {
        let order = self.row_order(start, key);
        self.permute_rows(start, &order);
    }

    /// Sets every entry with `|v| < tolerance` to zero, in place.
    pub fn zero_small_values(&mut self, tolerance: f64) {
        for row in self.data.iter_mut() {
            row.zero_small_values(tolerance);
        }
    }

    /// Compares two matrices entrywise within `tolerance`. Matrices of different shapes are
    /// never close.
    pub fn is_close(&self, other: &Matrix, tolerance: Tolerance) -> bool {
        self.dimensions() == other.dimensions()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| a.is_close(b, tolerance))
    }

    /// Multiplies two matrices.
    ///
    /// # Errors
    ///
    /// [`LinalgError::DimensionMismatch`] if `self.cols() != rhs.rows()`.
    pub fn try_mul(&self, rhs: &Matrix) -> Result<Matrix, LinalgError> {
        check_dim(self.cols, rhs.rows)?;
        let rhs_columns: Vec<Vector> = rhs.columns().collect();
        let mut res = Matrix::zeros(self.rows, rhs.cols);
        for (i, row) in self.data.iter().enumerate() {
            for (j, column) in rhs_columns.iter().enumerate() {
                res.data[i][j] = row.dot(column)?;
            }
        }
        Ok(res)
    }

    /// Multiplies the matrix by a column vector, giving a vector of dimension `rows`.
    ///
    /// # Errors
    ///
    /// [`LinalgError::DimensionMismatch`] if `vector.dim() != self.cols()`.
    pub fn try_mul_vector(&self, vector: &VecSlice) -> Result<Vector, LinalgError> {
        check_dim(self.cols, vector.dim())?;
        self.data.iter().map(|row| row.dot(vector)).collect()
    }
}

impl RowOps for () {
    #[inline]
    fn swap_rows(&mut self, _: usize, _: usize) {}

    #[inline]
    fn permute_rows(&mut self, _: usize, _: &[usize]) {}

    #[inline]
    fn sub_scaled_row(&mut self, _: usize, _: usize, _: f64) {}

    #[inline]
    fn scale_row(&mut self, _: usize, _: f64) {}
}

impl RowOps for Matrix {
    #[inline]
    fn swap_rows(&mut self, a: usize, b: usize) {
        self.data.swap(a, b);
    }

    fn permute_rows(&mut self, start: usize, order: &[usize]) {
        let mut tail = self.data.split_off(start);
        self.data
            .extend(order.iter().map(|&k| std::mem::take(&mut tail[k])));
    }

    fn sub_scaled_row(&mut self, from: usize, to: usize, factor: f64) {
        if from < to {
            let (head, tail) = self.data.split_at_mut(to);
            tail[0].sub_scaled_in(&head[from], factor);
        } else if from > to {
            let (head, tail) = self.data.split_at_mut(from);
            head[to].sub_scaled_in(&tail[0], factor);
        } else {
            self.data[to].scale_in(1.0 - factor);
        }
    }

    #[inline]
    fn scale_row(&mut self, row: usize, factor: f64) {
        self.data[row].scale_in(factor);
    }
}

/// `matrix[i]` is row `i`
impl Index<usize> for Matrix {
    type Output = VecSlice;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl IndexMut<usize> for Matrix {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.data[index]
    }
}

/// `matrix[(i, j)]` is the entry at row `i`, column `j`
impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    #[inline]
    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.data[index.0][index.1]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    #[inline]
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        &mut self.data[index.0][index.1]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.data.iter() {
            writeln!(f, "{}", row)?;
        }

        Ok(())
    }
}

impl Mul for &Matrix {
    type Output = Matrix;
    fn mul(self, rhs: Self) -> Self::Output {
        self.try_mul(rhs).unwrap_or_else(|e| {
            panic!(
                "Attempting to multiply matrices of incompatible dimensions: {}",
                e
            )
        })
    }
}

impl Mul<&Vector> for &Matrix {
    type Output = Vector;

    fn mul(self, rhs: &Vector) -> Self::Output {
        self.try_mul_vector(rhs)
            .unwrap_or_else(|e| panic!("Cannot multiply matrix by vector: {}", e))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tolerance::DEFAULT_TOLERANCE;
    use crate::vector;
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn shape() {
        let m = Matrix::zeros(4, 3);
        assert_eq!(m.dimensions(), (4, 3));
        assert_eq!(m.diagonal_size(), 3);
        assert!(!m.is_square());
        assert_eq!(Matrix::zeros(0, 3).cols(), 3);
    }

    #[test]
    fn identity() {
        let m = Matrix::identity(10);
        for i in 0..10 {
            for j in 0..10 {
                assert_eq!(m[(i, j)], if i == j { 1.0 } else { 0.0 });
            }
        }
    }

    #[test]
    fn rows_get_set() {
        let mut m = Matrix::zeros(3, 3);
        m.set_row(0, vector![1, 2, 3]).unwrap();
        assert_eq!(m.row(0).unwrap().to_vector(), vector![1, 2, 3]);
        assert_eq!(
            m.set_row(1, vector![1, 2]),
            Err(LinalgError::DimensionMismatch {
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            m.set_row(3, vector![1, 2, 3]),
            Err(LinalgError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert!(m.row(3).is_err());

        m.set(2, 1, 5.0).unwrap();
        assert_eq!(m.get(2, 1), Ok(5.0));
        assert_eq!(m[2][1], 5.0);
        assert!(m.get(2, 3).is_err());
        assert!(m.set(3, 0, 1.0).is_err());
    }

    #[test]
    fn construction_helpers() {
        let by_rows = Matrix::from_rows(&[[1, 2, 3], [4, 5, 6]]).unwrap();
        let by_cols = Matrix::from_columns(&[[1, 4], [2, 5], [3, 6]]).unwrap();
        assert_eq!(by_rows, by_cols);
        assert_eq!(by_rows.dimensions(), (2, 3));

        let by_row_vectors =
            Matrix::from_row_vectors(vec![vector![1, 2, 3], vector![4, 5, 6]]).unwrap();
        let by_col_vectors =
            Matrix::from_column_vectors(&[vector![1, 4], vector![2, 5], vector![3, 6]]).unwrap();
        assert_eq!(by_rows, by_row_vectors);
        assert_eq!(by_rows, by_col_vectors);

        let empty: &[[f64; 2]] = &[];
        assert_eq!(Matrix::from_rows(empty), Err(LinalgError::EmptyInput));
        assert!(Matrix::from_rows(&[vec![1.0, 2.0], vec![1.0]]).is_err());
        assert!(Matrix::from_columns(&[vec![1.0, 2.0], vec![1.0]]).is_err());
    }

    #[test]
    fn columns() {
        let m = Matrix::from_rows(&[[1, 2], [3, 4], [5, 6]]).unwrap();
        assert_eq!(m.column(1).unwrap(), vector![2, 4, 6]);
        assert_eq!(
            m.column(2),
            Err(LinalgError::IndexOutOfRange { index: 2, len: 2 })
        );
        assert_eq!(m.columns().count(), 2);
    }

    #[test]
    fn append() {
        let mut m = Matrix::from_rows(&[[1, 2]]).unwrap();
        m.append_row(vector![3, 4]).unwrap();
        m.append_column(&vector![5, 6]).unwrap();
        assert_eq!(m, Matrix::from_rows(&[[1, 2, 5], [3, 4, 6]]).unwrap());
        assert!(m.append_row(vector![1, 2]).is_err());
        assert!(m.append_column(&vector![1, 2, 3]).is_err());
        assert_eq!(m.dimensions(), (2, 3));
    }

    #[test]
    fn transpose() {
        let mut rng = SmallRng::seed_from_u64(1);
        let m = Matrix::random(&mut rng, 10, 4);
        let n = m.transposed();
        assert_eq!(n.dimensions(), (4, 10));
        for i in 0..m.rows() {
            for j in 0..m.cols() {
                assert_eq!(m[(i, j)], n[(j, i)]);
            }
        }
        assert_eq!(n.transposed(), m);
    }

    #[test]
    fn matrix_mult() {
        let mut rng = SmallRng::seed_from_u64(1);
        let m1 = Matrix::random(&mut rng, 8, 10);
        let m2 = Matrix::random(&mut rng, 10, 7);
        let m3 = &m1 * &m2;
        assert_eq!(m3.dimensions(), (8, 7));

        for i in 0..m3.rows() {
            for j in 0..m3.cols() {
                let mut x = 0.0;
                for k in 0..m1.cols() {
                    x += m1[(i, k)] * m2[(k, j)];
                }
                assert!((m3[(i, j)] - x).abs() < 1e-12);
            }
        }

        assert_eq!(&m1 * &Matrix::identity(10), m1);
        assert!(m2.try_mul(&m1).is_err());
    }

    #[test]
    #[should_panic(
        expected = "Attempting to multiply matrices of incompatible dimensions: dimension mismatch: expected 3, found 2"
    )]
    fn matrix_mult_mismatch() {
        let _ = &Matrix::zeros(2, 3) * &Matrix::zeros(2, 3);
    }

    #[test]
    fn matrix_vector_mult() {
        // a non-square matrix maps a 3-vector to a 2-vector
        let m = Matrix::from_rows(&[[1, 0, 1], [0, 1, 1]]).unwrap();
        assert_eq!(&m * &vector![1, 2, 3], vector![4, 5]);
        assert_eq!(
            m.try_mul_vector(&vector![1, 2]),
            Err(LinalgError::DimensionMismatch {
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    #[should_panic(expected = "Cannot multiply matrix by vector")]
    fn matrix_vector_mult_mismatch() {
        let _ = &Matrix::zeros(2, 3) * &vector![1, 2];
    }

    #[test]
    fn row_ops() {
        let mut m = Matrix::from_rows(&[[1, 2], [3, 4], [5, 6]]).unwrap();
        m.swap_rows(0, 2);
        assert_eq!(m, Matrix::from_rows(&[[5, 6], [3, 4], [1, 2]]).unwrap());
        m.sub_scaled_row(2, 0, 5.0);
        assert_eq!(m[0].to_vector(), vector![0, -4]);
        m.sub_scaled_row(0, 1, 0.5);
        assert_eq!(m[1].to_vector(), vector![3, 6]);
        m.scale_row(1, 1.0 / 3.0);
        assert_eq!(m[1].to_vector(), vector![1, 2]);
        m.sub_scaled_row(2, 2, 0.5);
        assert_eq!(m[2].to_vector(), vector![0.5, 1]);

        // the unit proxy accepts anything
        RowOps::swap_rows(&mut (), 0, 100);
        RowOps::sub_scaled_row(&mut (), 1, 2, 3.0);
    }

    #[test]
    fn sort_rows() {
        let mut m = Matrix::from_rows(&[[9, 0], [1, 1], [-3, 2], [3, 3], [0, 4]]).unwrap();
        m.sort_rows(1, |row| -row[0].abs());
        // rows from index 1 sorted by descending magnitude, ties keep their order
        assert_eq!(
            m,
            Matrix::from_rows(&[[9, 0], [-3, 2], [3, 3], [1, 1], [0, 4]]).unwrap()
        );
        assert_eq!(m.row_order(0, |row| row[1]), vec![0, 3, 1, 2, 4]);
        assert!(m.row_order(5, |row| row[0]).is_empty());
    }

    #[test]
    #[should_panic(expected = "Cannot order rows from 6 in a matrix with 5 rows")]
    fn row_order_out_of_range() {
        let m = Matrix::zeros(5, 2);
        let _ = m.row_order(6, |row| row[0]);
    }

    #[test]
    fn zero_small_values() {
        let mut m = Matrix::from_rows(&[[1e-12, 1.0], [-1e-10, 2e-9]]).unwrap();
        m.zero_small_values(1e-9);
        assert_eq!(m, Matrix::from_rows(&[[0.0, 1.0], [0.0, 2e-9]]).unwrap());
    }

    #[test]
    fn closeness() {
        let a = Matrix::identity(2);
        let mut b = Matrix::identity(2);
        b[(0, 1)] = 1e-12;
        assert_ne!(a, b);
        assert!(a.is_close(&b, DEFAULT_TOLERANCE));
        assert!(!a.is_close(&Matrix::identity(3), DEFAULT_TOLERANCE));
    }

    #[test]
    fn display() {
        let m = Matrix::from_rows(&[[1, 2], [3, 4]]).unwrap();
        assert_eq!(m.to_string(), "[1, 2]\n[3, 4]\n");
    }
}
