use pyo3::prelude::*;

use echelon::{Tolerance, Vector};
use rand::{rngs::SmallRng, SeedableRng};

use crate::matrix::PyMatrix;
use crate::to_py_err;

#[pyclass(name = "Vector")]
#[derive(Clone)]
pub struct PyVector {
    pub(crate) inner: Vector,
}

#[pymethods]
impl PyVector {
    /// Creates a new Vector from a list of floats
    #[new]
    pub fn new(values: Vec<f64>) -> Self {
        PyVector {
            inner: Vector::from(values),
        }
    }

    /// Creates a new all-zero Vector of the given dimension
    #[staticmethod]
    pub fn zeros(dim: usize) -> Self {
        PyVector {
            inner: Vector::zeros(dim),
        }
    }

    /// Creates a new random Vector with entries in [-1, 1)
    #[staticmethod]
    #[pyo3(signature = (dim, seed=None))]
    pub fn random(dim: usize, seed: Option<u64>) -> Self {
        let mut rng = if let Some(s) = seed {
            SmallRng::seed_from_u64(s)
        } else {
            SmallRng::from_os_rng()
        };

        PyVector {
            inner: Vector::random(&mut rng, dim),
        }
    }

    /// Returns the number of entries
    #[getter]
    pub fn dim(&self) -> usize {
        self.inner.dim()
    }

    /// Dot product with another Vector
    pub fn dot(&self, other: &PyVector) -> PyResult<f64> {
        self.inner.dot(&other.inner).map_err(to_py_err)
    }

    /// Euclidean length
    #[getter]
    pub fn length(&self) -> f64 {
        self.inner.length()
    }

    /// Returns a unit vector in the same direction
    pub fn normalized(&self) -> PyResult<Self> {
        self.inner.normalized().map(PyVector::from).map_err(to_py_err)
    }

    /// Projects other onto this vector, returning the projection and its coefficient
    pub fn project(&self, other: &PyVector) -> PyResult<(Self, f64)> {
        let (projection, alpha) = self.inner.project(&other.inner).map_err(to_py_err)?;
        Ok((PyVector::from(projection), alpha))
    }

    /// Index of the first non-zero entry, or None
    #[getter]
    pub fn pivot_index(&self) -> Option<usize> {
        self.inner.pivot_index()
    }

    /// Checks if every entry is zero
    pub fn is_zero(&self) -> bool {
        self.inner.is_zero()
    }

    /// Compares entrywise within the given tolerances
    #[pyo3(signature = (other, rel_tol=1e-9, abs_tol=1e-9))]
    pub fn is_close(&self, other: &PyVector, rel_tol: f64, abs_tol: f64) -> bool {
        self.inner
            .is_close(&other.inner, Tolerance::new(rel_tol, abs_tol))
    }

    /// Returns a copy of the vector
    pub fn copy(&self) -> Self {
        self.clone()
    }

    pub fn to_list(&self) -> Vec<f64> {
        self.inner.as_slice().to_vec()
    }

    /// Converts to a single-row Matrix
    pub fn to_row_matrix(&self) -> PyResult<PyMatrix> {
        echelon::Matrix::from_row_vectors([self.inner.clone()])
            .map(PyMatrix::from)
            .map_err(to_py_err)
    }

    /// Converts to a single-column Matrix
    pub fn to_column_matrix(&self) -> PyResult<PyMatrix> {
        echelon::Matrix::from_column_vectors([&self.inner])
            .map(PyMatrix::from)
            .map_err(to_py_err)
    }

    pub fn __str__(&self) -> String {
        self.inner.to_string()
    }

    pub fn __repr__(&self) -> String {
        format!("Vector({})", self.inner)
    }

    pub fn __len__(&self) -> usize {
        self.inner.dim()
    }

    /// Support for indexing with [i]
    pub fn __getitem__(&self, i: usize) -> PyResult<f64> {
        self.inner.get(i).map_err(to_py_err)
    }

    /// Support for item assignment with [i] = value
    pub fn __setitem__(&mut self, i: usize, value: f64) -> PyResult<()> {
        self.inner.set(i, value).map_err(to_py_err)
    }

    pub fn __add__(&self, other: &PyVector) -> PyResult<Self> {
        self.inner
            .try_add(&other.inner)
            .map(PyVector::from)
            .map_err(to_py_err)
    }

    pub fn __sub__(&self, other: &PyVector) -> PyResult<Self> {
        self.inner
            .try_sub(&other.inner)
            .map(PyVector::from)
            .map_err(to_py_err)
    }

    /// Scalar multiplication using the * operator
    pub fn __mul__(&self, k: f64) -> Self {
        PyVector::from(self.inner.scaled(k))
    }

    pub fn __rmul__(&self, k: f64) -> Self {
        self.__mul__(k)
    }

    /// Scalar division using the / operator
    pub fn __truediv__(&self, k: f64) -> PyResult<Self> {
        self.inner.divided(k).map(PyVector::from).map_err(to_py_err)
    }

    pub fn __neg__(&self) -> Self {
        PyVector::from(-&self.inner)
    }

    /// Exact equality; see is_close for comparisons within a tolerance
    pub fn __eq__(&self, other: &PyVector) -> bool {
        self.inner == other.inner
    }

    pub fn __ne__(&self, other: &PyVector) -> bool {
        !self.__eq__(other)
    }
}

impl From<Vector> for PyVector {
    fn from(inner: Vector) -> Self {
        PyVector { inner }
    }
}

impl From<PyVector> for Vector {
    fn from(py_vector: PyVector) -> Self {
        py_vector.inner
    }
}
