use crate::error::{check_dim, LinalgError};
use crate::matrix::Matrix;
use crate::rref::Rref;
use crate::vector::{VecSlice, Vector};
use log::debug;

/// Least squares solution of `a * x = b` through the normal equations `aᵗa x = aᵗb`
///
/// The augmented system `[aᵗa | aᵗb]` is row reduced and the solution read off its last
/// column.
///
/// # Errors
///
/// [`LinalgError::DimensionMismatch`] if `b.dim() != a.rows()`, and [`LinalgError::Singular`]
/// if the columns of `a` are linearly dependent.
pub fn least_squares(a: &Matrix, b: &VecSlice) -> Result<Vector, LinalgError> {
    check_dim(a.rows(), b.dim())?;
    let n = a.cols();
    let at = a.transposed();

    let mut system = at.try_mul(a)?;
    system.append_column(&at.try_mul_vector(b)?)?;

    let rref = Rref::new(&system);
    if rref.pivot_columns() != (0..n).collect::<Vec<_>>() {
        debug!(
            "least_squares: normal equations have pivots {:?}, expected {} columns",
            rref.pivot_columns(),
            n
        );
        return Err(LinalgError::Singular);
    }

    let solution = rref.matrix().column(n)?;
    debug!("least_squares: solution {}", solution);
    Ok(solution)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tolerance::{Tolerance, DEFAULT_TOLERANCE};
    use crate::vector;
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn overdetermined() {
        let a = Matrix::from_rows(&[[4, 2], [5, 2], [2, 6], [3, 0]]).unwrap();
        let b = vector![8, 4, 2, 8];
        let x = least_squares(&a, &b).unwrap();

        assert!(x.is_close(
            &vector![2440.0 / 1476.0, -456.0 / 1476.0],
            DEFAULT_TOLERANCE
        ));

        // the residual is orthogonal to the columns of a
        let residual = &(&a * &x) - &b;
        let normal = &a.transposed() * &residual;
        assert!(normal.is_close(&Vector::zeros(2), DEFAULT_TOLERANCE));
    }

    #[test]
    fn square_system_is_solved_exactly() {
        let mut rng = SmallRng::seed_from_u64(1);
        let a = Matrix::random(&mut rng, 4, 4);
        let x = Vector::random(&mut rng, 4);
        let b = &a * &x;

        let solution = least_squares(&a, &b).unwrap();
        assert!(solution.is_close(&x, Tolerance::new(1e-9, 1e-7)));
    }

    #[test]
    fn dependent_columns() {
        let a = Matrix::from_rows(&[[1, 2], [2, 4], [3, 6]]).unwrap();
        assert_eq!(
            least_squares(&a, &vector![1, 2, 3]),
            Err(LinalgError::Singular)
        );
    }

    #[test]
    fn wrong_rhs() {
        let a = Matrix::identity(3);
        assert_eq!(
            least_squares(&a, &vector![1, 2]),
            Err(LinalgError::DimensionMismatch {
                expected: 3,
                found: 2
            })
        );
    }
}
