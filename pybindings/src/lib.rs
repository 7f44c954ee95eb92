// There seems to be some issues with the pyo3 bindings generation on methods returning
// a `PyResult<T>`.
#![allow(clippy::useless_conversion)]

pub mod matrix;
pub mod vector;

use crate::matrix::{PyMatrix, PyRref};
use crate::vector::PyVector;
use echelon::LinalgError;
use pyo3::exceptions::{PyIndexError, PyValueError, PyZeroDivisionError};
use pyo3::prelude::*;

/// Converts a library error into the closest Python exception
pub(crate) fn to_py_err(e: LinalgError) -> PyErr {
    match e {
        LinalgError::IndexOutOfRange { .. } => PyIndexError::new_err(e.to_string()),
        LinalgError::DivisionByZero | LinalgError::ZeroLength => {
            PyZeroDivisionError::new_err(e.to_string())
        }
        _ => PyValueError::new_err(e.to_string()),
    }
}

fn inner_vectors(vectors: &[PyVector]) -> Vec<&echelon::VecSlice> {
    vectors.iter().map(|v| &*v.inner).collect()
}

/// Weighted sum of the basis vectors
#[pyfunction]
fn linear_combination(basis: Vec<PyVector>, scalars: Vec<f64>) -> PyResult<PyVector> {
    echelon::linear_combination(&inner_vectors(&basis), &scalars)
        .map(PyVector::from)
        .map_err(to_py_err)
}

/// Checks that every pair of distinct vectors is orthogonal
#[pyfunction]
fn is_orthogonal(vectors: Vec<PyVector>) -> PyResult<bool> {
    echelon::is_orthogonal(&inner_vectors(&vectors)).map_err(to_py_err)
}

/// Checks that the vectors are linearly independent
#[pyfunction]
fn is_basis(vectors: Vec<PyVector>) -> PyResult<bool> {
    echelon::is_basis(&inner_vectors(&vectors)).map_err(to_py_err)
}

/// Gram-Schmidt orthogonalization of a basis
#[pyfunction]
#[pyo3(signature = (basis, normalize=true))]
fn gram_schmidt(basis: Vec<PyVector>, normalize: bool) -> PyResult<Vec<PyVector>> {
    let result = echelon::gram_schmidt(&inner_vectors(&basis), normalize).map_err(to_py_err)?;
    Ok(result.into_iter().map(PyVector::from).collect())
}

/// Computes `aᵗ M b`
#[pyfunction]
fn bilinear(matrix: &PyMatrix, a: &PyVector, b: &PyVector) -> PyResult<f64> {
    echelon::bilinear(&matrix.inner, &a.inner, &b.inner).map_err(to_py_err)
}

/// Computes `vᵗ M v`
#[pyfunction]
fn quadratic(matrix: &PyMatrix, v: &PyVector) -> PyResult<f64> {
    echelon::quadratic(&matrix.inner, &v.inner).map_err(to_py_err)
}

/// Least squares solution of `a * x = b`
#[pyfunction]
fn least_squares(a: &PyMatrix, b: &PyVector) -> PyResult<PyVector> {
    echelon::least_squares(&a.inner, &b.inner)
        .map(PyVector::from)
        .map_err(to_py_err)
}

#[pymodule]
#[pyo3(name = "echelon")]
fn echelon_module(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyVector>()?;
    m.add_class::<PyMatrix>()?;
    m.add_class::<PyRref>()?;
    m.add_function(wrap_pyfunction!(linear_combination, m)?)?;
    m.add_function(wrap_pyfunction!(is_orthogonal, m)?)?;
    m.add_function(wrap_pyfunction!(is_basis, m)?)?;
    m.add_function(wrap_pyfunction!(gram_schmidt, m)?)?;
    m.add_function(wrap_pyfunction!(bilinear, m)?)?;
    m.add_function(wrap_pyfunction!(quadratic, m)?)?;
    m.add_function(wrap_pyfunction!(least_squares, m)?)?;
    Ok(())
}
