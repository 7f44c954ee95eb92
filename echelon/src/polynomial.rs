//! Polynomials in one variable, differentiated through a linear operator on their
//! coefficient vectors

use crate::error::LinalgError;
use crate::matrix::Matrix;
use crate::vector::{VecSlice, Vector};
use std::fmt;

/// A polynomial, stored as its coefficients from the highest power down to the constant term
#[derive(Clone, Debug, PartialEq)]
pub struct Polynomial {
    coefficients: Vector,
}

impl Polynomial {
    /// Constructs a polynomial from its coefficients, highest power first. Leading zeros are
    /// dropped, except for the constant term of the zero polynomial.
    ///
    /// # Errors
    ///
    /// [`LinalgError::EmptyInput`] if no coefficients are given.
    pub fn new(coefficients: &VecSlice) -> Result<Self, LinalgError> {
        if coefficients.is_empty() {
            return Err(LinalgError::EmptyInput);
        }
        let first = coefficients
            .pivot_index()
            .unwrap_or(coefficients.dim() - 1);
        Ok(Polynomial {
            coefficients: coefficients[first..coefficients.dim()].to_vector(),
        })
    }

    /// The degree of the polynomial
    #[inline]
    pub fn power(&self) -> usize {
        self.coefficients.dim() - 1
    }

    #[inline]
    pub fn coefficients(&self) -> &VecSlice {
        &self.coefficients
    }

    /// Evaluates the polynomial at `x`
    pub fn evaluate(&self, x: f64) -> f64 {
        let power = self.power();
        self.coefficients
            .iter()
            .enumerate()
            .map(|(i, c)| c * x.powi((power - i) as i32))
            .sum()
    }

    /// The differentiation operator on coefficient vectors of this length: an `n x n` matrix
    /// with `n - i` at `(i, i - 1)`.
    pub fn d_dx(&self) -> Matrix {
        let n = self.coefficients.dim();
        let mut op = Matrix::zeros(n, n);
        for i in 1..n {
            op[(i, i - 1)] = (n - i) as f64;
        }
        op
    }

    pub fn derivative(&self) -> Polynomial {
        let coefficients = &self.d_dx() * &self.coefficients;
        Polynomial {
            coefficients: strip_leading_zeros(coefficients),
        }
    }
}

fn strip_leading_zeros(coefficients: Vector) -> Vector {
    match coefficients.pivot_index() {
        Some(0) => coefficients,
        Some(first) => coefficients.as_vec_slice()[first..coefficients.dim()].to_vector(),
        None => Vector::zeros(1),
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let power = self.power();
        for (i, c) in self.coefficients.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            if i == power {
                write!(f, "{}", c)?;
            } else if c == 1.0 {
                write!(f, "x^{}", power - i)?;
            } else {
                write!(f, "{}x^{}", c, power - i)?;
            }
        }
        Ok(())
    }
}
