//! Numerical helpers in one variable: fixed points, midpoint-rule integration of a derivative,
//! and Newton's method on polynomials

use crate::error::LinalgError;
use crate::polynomial::Polynomial;
use log::{debug, trace};

/// Iteration limit for [`fixed_point`] and [`newton_solver`]
pub const MAX_ITERATIONS: usize = 10_000;

/// Finds `y` with `f(y) ≈ y` by iterating `y ← f(y)`, starting from `f(initial)`, until
/// `|f(y) - y| < eps`.
///
/// # Errors
///
/// [`LinalgError::NoConvergence`] after [`MAX_ITERATIONS`] steps.
pub fn fixed_point(f: impl Fn(f64) -> f64, initial: f64, eps: f64) -> Result<f64, LinalgError> {
    let mut y = f(initial);
    for i in 0..MAX_ITERATIONS {
        let e = f(y) - y;
        if e.abs() < eps {
            debug!("fixed_point: converged to {} after {} iterations", y, i);
            return Ok(y);
        }
        y += e;
    }
    Err(LinalgError::NoConvergence {
        iterations: MAX_ITERATIONS,
    })
}

/// Approximates `f(value)` as `f(initial)` plus the midpoint-rule integral of `df_dx` over
/// `steps` equal intervals between `initial` and `value`.
///
/// # Errors
///
/// [`LinalgError::DivisionByZero`] if `steps == 0`.
pub fn euler_approximation(
    initial: f64,
    value: f64,
    steps: usize,
    f: impl Fn(f64) -> f64,
    df_dx: impl Fn(f64) -> f64,
) -> Result<f64, LinalgError> {
    if steps == 0 {
        return Err(LinalgError::DivisionByZero);
    }
    let dx = (value - initial) / steps as f64;
    let sum: f64 = (0..steps)
        .map(|i| df_dx(initial + dx * (2 * i + 1) as f64 * 0.5))
        .sum();
    Ok(f(initial) + dx * sum)
}

/// Newton's method: iterates `x ← x - p(x) / p'(x)` from `x0` until `|p(x)| <= eps`, returning
/// every iterate, starting with `x0`.
///
/// # Errors
///
/// [`LinalgError::DivisionByZero`] if the derivative vanishes at an iterate, and
/// [`LinalgError::NoConvergence`] after [`MAX_ITERATIONS`] steps.
pub fn newton_solver(x0: f64, p: &Polynomial, eps: f64) -> Result<Vec<f64>, LinalgError> {
    let dp = p.derivative();
    let mut x = x0;
    let mut y = p.evaluate(x);
    let mut iterates = vec![x0];

    while y.abs() > eps {
        if iterates.len() > MAX_ITERATIONS {
            return Err(LinalgError::NoConvergence {
                iterations: MAX_ITERATIONS,
            });
        }
        let slope = dp.evaluate(x);
        if slope == 0.0 {
            return Err(LinalgError::DivisionByZero);
        }
        x -= y / slope;
        y = p.evaluate(x);
        trace!("newton_solver: x = {}, p(x) = {}", x, y);
        iterates.push(x);
    }

    debug!("newton_solver: root {} after {} steps", x, iterates.len() - 1);
    Ok(iterates)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::vector;

    #[test]
    fn cosine_fixed_point() {
        let y = fixed_point(f64::cos, 1.0, 1e-10).unwrap();
        assert!((y.cos() - y).abs() < 1e-9);
        assert!((y - 0.739085133).abs() < 1e-8);
    }

    #[test]
    fn diverging_fixed_point() {
        assert_eq!(
            fixed_point(|y| 2.0 * y + 1.0, 1.0, 1e-10),
            Err(LinalgError::NoConvergence {
                iterations: MAX_ITERATIONS
            })
        );
    }

    #[test]
    fn midpoint_rule() {
        // exact for a linear derivative
        let v = euler_approximation(0.0, 3.0, 10, |x| x * x, |x| 2.0 * x).unwrap();
        assert!((v - 9.0).abs() < 1e-9);

        let v = euler_approximation(0.0, 1.0, 1000, f64::exp, f64::exp).unwrap();
        assert!((v - 1f64.exp()).abs() < 1e-6);

        assert_eq!(
            euler_approximation(0.0, 1.0, 0, f64::exp, f64::exp),
            Err(LinalgError::DivisionByZero)
        );
    }

    #[test]
    fn newton() {
        let p = Polynomial::new(&vector![-2, -4, 5, -6]).unwrap();
        let iterates = newton_solver(-4.0, &p, 1e-10).unwrap();

        assert_eq!(iterates[0], -4.0);
        let root = *iterates.last().unwrap();
        assert!(p.evaluate(root).abs() <= 1e-10);
        assert!((root - -3.11276443).abs() < 1e-7);
    }

    #[test]
    fn newton_at_root() {
        let p = Polynomial::new(&vector![1, -2]).unwrap();
        assert_eq!(newton_solver(2.0, &p, 1e-10), Ok(vec![2.0]));
    }

    #[test]
    fn newton_flat() {
        let p = Polynomial::new(&vector![1, 0, 1]).unwrap();
        assert_eq!(
            newton_solver(0.0, &p, 1e-10),
            Err(LinalgError::DivisionByZero)
        );
    }
}
