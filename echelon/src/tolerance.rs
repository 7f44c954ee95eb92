//! Floating point closeness checks used by pivoting, rank detection and orthogonality tests

/// Relative and absolute tolerance for comparing two `f64`s
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerance {
    /// tolerance relative to the larger magnitude of the two values
    pub relative: f64,

    /// tolerance floor, used when both values are near zero
    pub absolute: f64,
}

/// The default tolerance: `1e-9` relative and absolute
pub const DEFAULT_TOLERANCE: Tolerance = Tolerance {
    relative: 1e-9,
    absolute: 1e-9,
};

impl Default for Tolerance {
    fn default() -> Self {
        DEFAULT_TOLERANCE
    }
}

impl Tolerance {
    pub fn new(relative: f64, absolute: f64) -> Self {
        Tolerance { relative, absolute }
    }

    /// Returns true if `|a - b| <= max(relative * max(|a|, |b|), absolute)`
    #[inline]
    pub fn is_close(&self, a: f64, b: f64) -> bool {
        (a - b).abs() <= f64::max(self.relative * f64::max(a.abs(), b.abs()), self.absolute)
    }

    /// Returns true if `a` is close to `0.0`
    #[inline]
    pub fn is_zero(&self, a: f64) -> bool {
        self.is_close(a, 0.0)
    }
}

/// Checks closeness of two values using [`DEFAULT_TOLERANCE`]
#[inline]
pub fn is_close(a: f64, b: f64) -> bool {
    DEFAULT_TOLERANCE.is_close(a, b)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn close_values() {
        assert!(is_close(1.0, 1.0 + 1e-12));
        assert!(is_close(0.0, 5e-10));
        assert!(!is_close(0.0, 1e-8));
        assert!(is_close(1e12, 1e12 + 100.0));
        assert!(!is_close(1.0, 1.001));
    }

    #[test]
    fn custom_tolerance() {
        let tol = Tolerance::new(0.0, 0.1);
        assert!(tol.is_zero(0.05));
        assert!(!tol.is_zero(0.2));
        assert_eq!(Tolerance::default(), DEFAULT_TOLERANCE);
    }
}
