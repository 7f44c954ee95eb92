//! Algorithms over lists of vectors: linear combinations, orthogonality and basis checks,
//! Gram-Schmidt orthogonalization, and bilinear/quadratic forms.

use crate::error::{check_dim, LinalgError};
use crate::matrix::Matrix;
use crate::tolerance::DEFAULT_TOLERANCE;
use crate::vector::{VecSlice, Vector};
use log::debug;

/// Computes `Σ scalars[i] * basis[i]`.
///
/// # Errors
///
/// [`LinalgError::EmptyInput`] if `basis` is empty, and [`LinalgError::DimensionMismatch`] if
/// the number of scalars differs from the number of vectors or the vectors have different
/// dimensions.
pub fn linear_combination<V: AsRef<VecSlice>>(
    basis: &[V],
    scalars: &[f64],
) -> Result<Vector, LinalgError> {
    let first = basis.first().ok_or(LinalgError::EmptyInput)?;
    check_dim(basis.len(), scalars.len())?;

    let mut result = Vector::zeros(first.as_ref().dim());
    for (v, &s) in basis.iter().zip(scalars) {
        check_dim(result.dim(), v.as_ref().dim())?;
        result.sub_scaled_in(v.as_ref(), -s);
    }
    Ok(result)
}

/// Returns true if every pair of distinct vectors has a dot product close to zero.
pub fn is_orthogonal<V: AsRef<VecSlice>>(vectors: &[V]) -> Result<bool, LinalgError> {
    for (i, a) in vectors.iter().enumerate() {
        for b in &vectors[i + 1..] {
            if !DEFAULT_TOLERANCE.is_zero(a.as_ref().dot(b.as_ref())?) {
                return Ok(false);
            }
        }
    }
    Ok(true)
}

/// Returns true if the vectors are linearly independent, i.e. the column space of the matrix
/// having them as columns has one dimension per vector.
///
/// # Errors
///
/// [`LinalgError::EmptyInput`] if `vectors` is empty, and [`LinalgError::DimensionMismatch`]
/// if the vectors have different dimensions.
pub fn is_basis<V: AsRef<VecSlice>>(vectors: &[V]) -> Result<bool, LinalgError> {
    let m = Matrix::from_column_vectors(vectors)?;
    Ok(m.column_space().cols() == vectors.len())
}

/// Gram-Schmidt orthogonalization
///
/// Each output vector is the corresponding input minus its projections onto the outputs
/// computed so far. With `normalize`, every output is scaled to unit length.
///
/// # Errors
///
/// [`LinalgError::Precondition`] if `basis` is not linearly independent, or if the result
/// fails the orthogonality check. Errors of [`is_basis`] are propagated.
pub fn gram_schmidt<V: AsRef<VecSlice>>(
    basis: &[V],
    normalize: bool,
) -> Result<Vec<Vector>, LinalgError> {
    if !is_basis(basis)? {
        return Err(LinalgError::Precondition("vectors do not form a basis"));
    }

    let mut result: Vec<Vector> = Vec::with_capacity(basis.len());
    for e in basis {
        let e = e.as_ref();
        let mut terms = vec![e.to_vector()];
        let mut scalars = vec![1.0];
        for v in &result {
            scalars.push(-v.project(e)?.1);
            terms.push(v.clone());
        }
        result.push(linear_combination(&terms, &scalars)?);
    }

    if normalize {
        result = result
            .iter()
            .map(|v| v.normalized())
            .collect::<Result<_, _>>()?;
    }

    if !is_orthogonal(&result)? {
        return Err(LinalgError::Precondition("result is not orthogonal"));
    }

    debug!(
        "gram_schmidt: orthogonalized {} vectors of dimension {}",
        result.len(),
        result[0].dim()
    );
    Ok(result)
}

/// Computes `aᵗ M b` as the `1 x 1` product `row(a) * M * column(b)`.
///
/// # Errors
///
/// [`LinalgError::DimensionMismatch`] unless `a.dim() == M.rows()` and `b.dim() == M.cols()`.
pub fn bilinear(matrix: &Matrix, a: &VecSlice, b: &VecSlice) -> Result<f64, LinalgError> {
    let row = Matrix::from_row_vectors([a.to_vector()])?;
    let column = Matrix::from_column_vectors([b])?;
    let result = row.try_mul(matrix)?.try_mul(&column)?;
    Ok(result[(0, 0)])
}

/// Computes `vᵗ M v`.
#[inline]
pub fn quadratic(matrix: &Matrix, v: &VecSlice) -> Result<f64, LinalgError> {
    bilinear(matrix, v, v)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tolerance::Tolerance;
    use crate::vector;
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn combination() {
        let basis = [vector![1, 0], vector![0, 1]];
        assert_eq!(linear_combination(&basis, &[5.0, -2.0]), Ok(vector![5, -2]));

        let basis = [vector![1, 2, 3], vector![0, 1, -1], vector![2, 0, 0]];
        let v = linear_combination(&basis, &[2.0, -1.0, 0.5]).unwrap();
        assert_eq!(v, vector![3, 3, 7]);
    }

    #[test]
    fn combination_errors() {
        let empty: [Vector; 0] = [];
        assert_eq!(
            linear_combination(&empty, &[]),
            Err(LinalgError::EmptyInput)
        );
        assert!(matches!(
            linear_combination(&[vector![1, 0]], &[1.0, 2.0]),
            Err(LinalgError::DimensionMismatch { .. })
        ));
        assert!(matches!(
            linear_combination(&[vector![1, 0], vector![1, 0, 0]], &[1.0, 2.0]),
            Err(LinalgError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn orthogonality() {
        assert_eq!(is_orthogonal(&[vector![1, 0], vector![0, 1]]), Ok(true));
        assert_eq!(is_orthogonal(&[vector![1, 1], vector![1, -1]]), Ok(true));
        assert_eq!(is_orthogonal(&[vector![1, 1], vector![1, 0]]), Ok(false));
        assert_eq!(is_orthogonal(&[vector![1, 1]]), Ok(true));
    }

    #[test]
    fn basis() {
        assert_eq!(is_basis(&[vector![1, 0], vector![0, 1]]), Ok(true));
        assert_eq!(is_basis(&[vector![1, 2], vector![2, 4]]), Ok(false));
        assert_eq!(
            is_basis(&[vector![1, 0, 0], vector![0, 1, 0], vector![1, 1, 0]]),
            Ok(false)
        );
        assert_eq!(
            is_basis(&[vector![1, 1, 1], vector![1, 1, 1], vector![1, 2, 3]]),
            Ok(false)
        );
        let empty: [Vector; 0] = [];
        assert_eq!(is_basis(&empty), Err(LinalgError::EmptyInput));
    }

    #[test]
    fn gram_schmidt_example() {
        let basis = [vector![1, 2, -3], vector![1, 0, -5], vector![-2, 1, 1]];

        let orthogonal = gram_schmidt(&basis, false).unwrap();
        assert_eq!(orthogonal[0], basis[0]);
        assert!(orthogonal[1].is_close(
            &vector![-1.0 / 7.0, -16.0 / 7.0, -11.0 / 7.0],
            DEFAULT_TOLERANCE
        ));
        assert_eq!(is_orthogonal(&orthogonal), Ok(true));

        let orthonormal = gram_schmidt(&basis, true).unwrap();
        for v in &orthonormal {
            assert!(DEFAULT_TOLERANCE.is_close(v.length(), 1.0));
        }
    }

    #[test]
    fn gram_schmidt_spans() {
        let mut rng = SmallRng::seed_from_u64(1);
        let basis: Vec<Vector> = (0..4).map(|_| Vector::random(&mut rng, 4)).collect();
        let result = gram_schmidt(&basis, true).unwrap();

        assert_eq!(is_orthogonal(&result), Ok(true));

        // every input vector is the sum of its projections onto the orthonormal outputs
        for v in &basis {
            let coefficients: Vec<f64> = result.iter().map(|e| e.dot(v).unwrap()).collect();
            let rebuilt = linear_combination(&result, &coefficients).unwrap();
            assert!(rebuilt.is_close(v, Tolerance::new(1e-9, 1e-9)));
        }
    }

    #[test]
    fn gram_schmidt_not_a_basis() {
        assert_eq!(
            gram_schmidt(&[vector![1, 2], vector![2, 4]], true),
            Err(LinalgError::Precondition("vectors do not form a basis"))
        );
        assert_eq!(
            gram_schmidt(
                &[vector![1, 1, 1], vector![1, 1, 1], vector![1, 2, 3]],
                true
            ),
            Err(LinalgError::Precondition("vectors do not form a basis"))
        );
    }

    #[test]
    fn forms() {
        let id = Matrix::identity(2);
        assert_eq!(bilinear(&id, &vector![2, 2], &vector![3, 3]), Ok(12.0));
        assert_eq!(quadratic(&id, &vector![2, 2]), Ok(8.0));

        let m = Matrix::from_rows(&[[1, 2, 0], [0, 1, 3]]).unwrap();
        // [1, 1] * m = [1, 3, 3]
        assert_eq!(bilinear(&m, &vector![1, 1], &vector![1, 0, 1]), Ok(4.0));
        assert!(bilinear(&m, &vector![1, 1, 1], &vector![1, 0, 1]).is_err());
        assert!(quadratic(&m, &vector![1, 1]).is_err());
    }
}
