use std::fmt;

/// Errors raised by vector, matrix and elimination operations
///
/// Every fallible operation in this crate returns `Result<_, LinalgError>`. None of these
/// are recovered internally: they signal a misuse by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinalgError {
    /// Operand shapes are incompatible, e.g. adding vectors of different dimensions
    DimensionMismatch { expected: usize, found: usize },

    /// An element, row or column index lies outside `0..len`
    IndexOutOfRange { index: usize, len: usize },

    /// Division of a vector by the scalar `0`
    DivisionByZero,

    /// Normalizing or projecting onto a vector of length zero
    ZeroLength,

    /// A construction helper or algorithm was given an empty list
    EmptyInput,

    /// An algorithm's precondition or postcondition does not hold
    Precondition(&'static str),

    /// The matrix is not invertible (or the normal equations are rank deficient)
    Singular,

    /// An iterative method did not reach its tolerance
    NoConvergence { iterations: usize },
}

impl fmt::Display for LinalgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinalgError::DimensionMismatch { expected, found } => {
                write!(f, "dimension mismatch: expected {}, found {}", expected, found)
            }
            LinalgError::IndexOutOfRange { index, len } => {
                write!(f, "index {} out of range for length {}", index, len)
            }
            LinalgError::DivisionByZero => write!(f, "division by zero"),
            LinalgError::ZeroLength => write!(f, "vector has zero length"),
            LinalgError::EmptyInput => write!(f, "input must not be empty"),
            LinalgError::Precondition(msg) => write!(f, "precondition violated: {}", msg),
            LinalgError::Singular => write!(f, "matrix is singular"),
            LinalgError::NoConvergence { iterations } => {
                write!(f, "no convergence after {} iterations", iterations)
            }
        }
    }
}

impl std::error::Error for LinalgError {}

/// Returns `Ok(())` if `found == expected`, otherwise a [`LinalgError::DimensionMismatch`]
#[inline]
pub(crate) fn check_dim(expected: usize, found: usize) -> Result<(), LinalgError> {
    if expected == found {
        Ok(())
    } else {
        Err(LinalgError::DimensionMismatch { expected, found })
    }
}

/// Returns `Ok(())` if `index < len`, otherwise a [`LinalgError::IndexOutOfRange`]
#[inline]
pub(crate) fn check_index(index: usize, len: usize) -> Result<(), LinalgError> {
    if index < len {
        Ok(())
    } else {
        Err(LinalgError::IndexOutOfRange { index, len })
    }
}
