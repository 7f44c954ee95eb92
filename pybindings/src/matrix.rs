use pyo3::exceptions::PyValueError;
use pyo3::{prelude::*, IntoPyObjectExt};

use echelon::{Matrix, Pivots, Rref, Tolerance};
use rand::{rngs::SmallRng, SeedableRng};

use crate::to_py_err;
use crate::vector::PyVector;

#[pyclass(name = "Matrix")]
#[derive(Clone)]
pub struct PyMatrix {
    pub(crate) inner: Matrix,
}

#[pymethods]
impl PyMatrix {
    /// Creates a new all-zero Matrix with the given shape
    #[new]
    pub fn new(rows: usize, cols: usize) -> Self {
        PyMatrix {
            inner: Matrix::zeros(rows, cols),
        }
    }

    #[staticmethod]
    pub fn identity(size: usize) -> Self {
        PyMatrix {
            inner: Matrix::identity(size),
        }
    }

    /// Creates a new random Matrix with entries in [-1, 1)
    #[staticmethod]
    #[pyo3(signature = (rows, cols, seed=None))]
    pub fn random(rows: usize, cols: usize, seed: Option<u64>) -> Self {
        let mut rng = if let Some(s) = seed {
            SmallRng::seed_from_u64(s)
        } else {
            SmallRng::from_os_rng()
        };

        PyMatrix {
            inner: Matrix::random(&mut rng, rows, cols),
        }
    }

    /// Builds a Matrix from a Python function giving the value at (i, j)
    #[staticmethod]
    pub fn build(rows: usize, cols: usize, func: PyObject) -> PyResult<Self> {
        Python::with_gil(|py| {
            let mut err = None;
            let matrix = Matrix::build(rows, cols, |i, j| {
                match func.call1(py, (i, j)).and_then(|v| v.extract::<f64>(py)) {
                    Ok(val) => val,
                    Err(e) => {
                        err.get_or_insert(e);
                        0.0
                    }
                }
            });
            match err {
                Some(e) => Err(e),
                None => Ok(PyMatrix { inner: matrix }),
            }
        })
    }

    /// Creates a Matrix from a list of rows
    #[staticmethod]
    pub fn from_rows(rows: Vec<Vec<f64>>) -> PyResult<Self> {
        Matrix::from_rows(&rows)
            .map(PyMatrix::from)
            .map_err(to_py_err)
    }

    /// Creates a Matrix from a list of columns
    #[staticmethod]
    pub fn from_columns(columns: Vec<Vec<f64>>) -> PyResult<Self> {
        Matrix::from_columns(&columns)
            .map(PyMatrix::from)
            .map_err(to_py_err)
    }

    #[staticmethod]
    pub fn from_row_vectors(rows: Vec<PyVector>) -> PyResult<Self> {
        Matrix::from_row_vectors(rows.into_iter().map(|v| v.inner))
            .map(PyMatrix::from)
            .map_err(to_py_err)
    }

    #[staticmethod]
    pub fn from_column_vectors(columns: Vec<PyVector>) -> PyResult<Self> {
        Matrix::from_column_vectors(columns.into_iter().map(|v| v.inner))
            .map(PyMatrix::from)
            .map_err(to_py_err)
    }

    #[getter]
    pub fn rows(&self) -> usize {
        self.inner.rows()
    }

    #[getter]
    pub fn cols(&self) -> usize {
        self.inner.cols()
    }

    /// Returns (rows, cols)
    #[getter]
    pub fn dimensions(&self) -> (usize, usize) {
        self.inner.dimensions()
    }

    #[getter]
    pub fn diagonal_size(&self) -> usize {
        self.inner.diagonal_size()
    }

    pub fn is_square(&self) -> bool {
        self.inner.is_square()
    }

    /// Returns a copy of row i
    pub fn row(&self, i: usize) -> PyResult<PyVector> {
        let row = self.inner.row(i).map_err(to_py_err)?;
        Ok(PyVector::from(row.to_vector()))
    }

    /// Returns a copy of column j
    pub fn column(&self, j: usize) -> PyResult<PyVector> {
        self.inner.column(j).map(PyVector::from).map_err(to_py_err)
    }

    /// Replaces row i
    pub fn set_row(&mut self, i: usize, row: &PyVector) -> PyResult<()> {
        self.inner
            .set_row(i, row.inner.clone())
            .map_err(to_py_err)
    }

    pub fn append_row(&mut self, row: &PyVector) -> PyResult<()> {
        self.inner.append_row(row.inner.clone()).map_err(to_py_err)
    }

    pub fn append_column(&mut self, column: &PyVector) -> PyResult<()> {
        self.inner.append_column(&column.inner).map_err(to_py_err)
    }

    /// Returns the transpose of the matrix
    pub fn transposed(&self) -> Self {
        PyMatrix::from(self.inner.transposed())
    }

    /// Sets every entry with magnitude below tol to zero
    #[pyo3(signature = (tol=1e-9))]
    pub fn zero_small_values(&mut self, tol: f64) {
        self.inner.zero_small_values(tol);
    }

    /// Reduces to reduced row echelon form in place, returning (pivots, free_columns)
    pub fn gauss_inplace(&mut self) -> (Vec<(usize, usize)>, Vec<usize>) {
        let pivots = self.inner.gauss_inplace();
        pivots_to_lists(&pivots)
    }

    /// Returns (reduced, pivots, free_columns)
    pub fn gauss(&self) -> (Self, Vec<(usize, usize)>, Vec<usize>) {
        let (reduced, pivots) = self.inner.gauss();
        let (positions, free) = pivots_to_lists(&pivots);
        (PyMatrix::from(reduced), positions, free)
    }

    pub fn rank(&self) -> usize {
        self.inner.rank()
    }

    pub fn column_space(&self) -> Self {
        PyMatrix::from(self.inner.column_space())
    }

    pub fn null_space(&self) -> Self {
        PyMatrix::from(self.inner.null_space())
    }

    /// Returns (triangular, sign)
    pub fn upper_triangular(&self) -> (Self, f64) {
        let (m, sign) = self.inner.upper_triangular();
        (PyMatrix::from(m), sign)
    }

    pub fn determinant(&self) -> PyResult<f64> {
        self.inner.determinant().map_err(to_py_err)
    }

    pub fn inverse(&self) -> PyResult<Self> {
        self.inner.inverse().map(PyMatrix::from).map_err(to_py_err)
    }

    /// Compares entrywise within the given tolerances
    #[pyo3(signature = (other, rel_tol=1e-9, abs_tol=1e-9))]
    pub fn is_close(&self, other: &PyMatrix, rel_tol: f64, abs_tol: f64) -> bool {
        self.inner
            .is_close(&other.inner, Tolerance::new(rel_tol, abs_tol))
    }

    /// Returns a copy of the matrix
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Converts the matrix to a list of rows
    pub fn to_list(&self) -> Vec<Vec<f64>> {
        self.inner
            .iter_rows()
            .map(|row| row.as_slice().to_vec())
            .collect()
    }

    pub fn __str__(&self) -> String {
        self.inner.to_string()
    }

    pub fn __repr__(&self) -> String {
        format!("Matrix(rows={}, cols={})", self.inner.rows(), self.inner.cols())
    }

    /// Support for indexing with [i, j]
    pub fn __getitem__(&self, key: (usize, usize)) -> PyResult<f64> {
        self.inner.get(key.0, key.1).map_err(to_py_err)
    }

    /// Support for item assignment with [i, j] = value
    pub fn __setitem__(&mut self, key: (usize, usize), value: f64) -> PyResult<()> {
        self.inner.set(key.0, key.1, value).map_err(to_py_err)
    }

    /// Multiplication by a Matrix or a Vector using the * operator
    pub fn __mul__(&self, other: &Bound<'_, PyAny>) -> PyResult<PyObject> {
        let py = other.py();
        if let Ok(m) = other.extract::<PyRef<'_, PyMatrix>>() {
            let product = self.inner.try_mul(&m.inner).map_err(to_py_err)?;
            PyMatrix::from(product).into_py_any(py)
        } else if let Ok(v) = other.extract::<PyRef<'_, PyVector>>() {
            let product = self.inner.try_mul_vector(&v.inner).map_err(to_py_err)?;
            PyVector::from(product).into_py_any(py)
        } else {
            Err(PyValueError::new_err(
                "Matrix can only be multiplied by a Matrix or a Vector",
            ))
        }
    }

    /// Exact equality; see is_close for comparisons within a tolerance
    pub fn __eq__(&self, other: &PyMatrix) -> bool {
        self.inner == other.inner
    }

    pub fn __ne__(&self, other: &PyMatrix) -> bool {
        !self.__eq__(other)
    }
}

fn pivots_to_lists(pivots: &Pivots) -> (Vec<(usize, usize)>, Vec<usize>) {
    (pivots.positions().to_vec(), pivots.free_columns().to_vec())
}

/// Reduced row echelon form of a matrix, computed once on construction
#[pyclass(name = "Rref")]
#[derive(Clone)]
pub struct PyRref {
    original: Matrix,
    reduced: Matrix,
    pivots: Pivots,
}

#[pymethods]
impl PyRref {
    #[new]
    #[pyo3(signature = (matrix, rel_tol=1e-9, abs_tol=1e-9))]
    pub fn new(matrix: &PyMatrix, rel_tol: f64, abs_tol: f64) -> Self {
        let (reduced, pivots) =
            Rref::with_tolerance(&matrix.inner, Tolerance::new(rel_tol, abs_tol)).into_parts();
        PyRref {
            original: matrix.inner.clone(),
            reduced,
            pivots,
        }
    }

    #[getter]
    pub fn rank(&self) -> usize {
        self.pivots.rank()
    }

    #[getter]
    pub fn pivots(&self) -> Vec<(usize, usize)> {
        self.pivots.positions().to_vec()
    }

    #[getter]
    pub fn pivot_columns(&self) -> Vec<usize> {
        self.pivots.columns()
    }

    #[getter]
    pub fn free_columns(&self) -> Vec<usize> {
        self.pivots.free_columns().to_vec()
    }

    /// The matrix this was reduced from
    #[getter]
    pub fn original(&self) -> PyMatrix {
        PyMatrix::from(self.original.clone())
    }

    /// The reduced matrix
    #[getter]
    pub fn matrix(&self) -> PyMatrix {
        PyMatrix::from(self.reduced.clone())
    }

    pub fn null_space(&self) -> PyMatrix {
        PyMatrix::from(self.pivots.null_space(&self.reduced))
    }

    pub fn column_space(&self) -> PyMatrix {
        PyMatrix::from(self.pivots.column_space(&self.original))
    }

    pub fn __str__(&self) -> String {
        self.reduced.to_string()
    }

    pub fn __repr__(&self) -> String {
        format!(
            "Rref(rows={}, cols={}, rank={})",
            self.reduced.rows(),
            self.reduced.cols(),
            self.pivots.rank()
        )
    }
}

impl From<Matrix> for PyMatrix {
    fn from(inner: Matrix) -> Self {
        PyMatrix { inner }
    }
}

impl From<PyMatrix> for Matrix {
    fn from(py_matrix: PyMatrix) -> Self {
        py_matrix.inner
    }
}
