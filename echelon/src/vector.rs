use crate::error::{check_dim, check_index, LinalgError};
use crate::tolerance::Tolerance;
use rand::Rng;
use ref_cast::RefCast;
use std::fmt;
use std::ops::{
    Add, AddAssign, Deref, DerefMut, Index, IndexMut, Mul, Neg, Range, Sub, SubAssign,
};

/// A vector of `f64` scalars with a fixed dimension
///
/// `Vector` owns its storage. Most read-only operations (dot products, lengths, projections)
/// are implemented on [`VecSlice`], which `Vector` dereferences to, so they also work on
/// borrowed rows of a [`crate::Matrix`].
///
/// # Examples
///
/// ```
/// use echelon::{vector, Vector};
///
/// let v = vector![4, 3];
/// assert_eq!(v.length(), 5.0);
/// assert_eq!(v.dot(&Vector::new([1, 1])).unwrap(), 7.0);
/// ```
///
/// # Note
///
/// Equality is exact elementwise equality. Use [`VecSlice::is_close`] to compare within a
/// [`Tolerance`].
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Vector(Vec<f64>);

/// A borrowed run of scalars, represented as a slice of `f64`s
///
/// Provides arithmetic that does not need to own its data. Rows of a matrix and vectors both
/// dereference to this type.
#[derive(RefCast, PartialEq, Debug)]
#[repr(transparent)]
pub struct VecSlice([f64]);

/// Builds a [`Vector`] from a list of numeric expressions, converting each one to `f64`
#[macro_export]
macro_rules! vector {
    ($($x:expr),* $(,)?) => {
        $crate::Vector::from(vec![$(($x) as f64),*])
    };
}

impl VecSlice {
    /// Returns a copy of the slice as a [`Vector`].
    #[inline]
    pub fn to_vector(&self) -> Vector {
        Vector(self.0.to_vec())
    }

    /// Number of scalars
    #[inline]
    pub fn dim(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.0
    }

    /// Returns an iterator over the scalars.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }

    /// Returns a mutable iterator over the scalars.
    #[inline]
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut f64> {
        self.0.iter_mut()
    }

    /// Returns the scalar at `index`.
    ///
    /// # Errors
    ///
    /// [`LinalgError::IndexOutOfRange`] if `index >= dim`.
    #[inline]
    pub fn get(&self, index: usize) -> Result<f64, LinalgError> {
        check_index(index, self.dim())?;
        Ok(self.0[index])
    }

    /// Sets the scalar at `index`.
    ///
    /// # Errors
    ///
    /// [`LinalgError::IndexOutOfRange`] if `index >= dim`.
    #[inline]
    pub fn set(&mut self, index: usize, value: f64) -> Result<(), LinalgError> {
        check_index(index, self.dim())?;
        self.0[index] = value;
        Ok(())
    }

    /// Computes the dot product of two slices of equal dimension.
    pub fn dot(&self, rhs: &VecSlice) -> Result<f64, LinalgError> {
        check_dim(self.dim(), rhs.dim())?;
        Ok(self.0.iter().zip(rhs.0.iter()).map(|(a, b)| a * b).sum())
    }

    /// Euclidean length, `sqrt(dot(self, self))`
    #[inline]
    pub fn length(&self) -> f64 {
        self.0.iter().map(|a| a * a).sum::<f64>().sqrt()
    }

    /// Index of the first non-zero scalar, or `None` if every scalar is exactly zero.
    #[inline]
    pub fn pivot_index(&self) -> Option<usize> {
        self.0.iter().position(|&v| v != 0.0)
    }

    /// Returns true if every scalar is exactly zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.pivot_index().is_none()
    }

    /// Compares two slices elementwise within `tolerance`. Slices of different dimension are
    /// never close.
    pub fn is_close(&self, rhs: &VecSlice, tolerance: Tolerance) -> bool {
        self.dim() == rhs.dim()
            && self
                .0
                .iter()
                .zip(rhs.0.iter())
                .all(|(&a, &b)| tolerance.is_close(a, b))
    }

    /// Returns a new vector with every scalar multiplied by `k`.
    pub fn scaled(&self, k: f64) -> Vector {
        self.iter().map(|a| a * k).collect()
    }

    /// Elementwise sum.
    pub fn try_add(&self, rhs: &VecSlice) -> Result<Vector, LinalgError> {
        check_dim(self.dim(), rhs.dim())?;
        Ok(self.iter().zip(rhs.iter()).map(|(a, b)| a + b).collect())
    }

    /// Elementwise difference.
    pub fn try_sub(&self, rhs: &VecSlice) -> Result<Vector, LinalgError> {
        check_dim(self.dim(), rhs.dim())?;
        Ok(self.iter().zip(rhs.iter()).map(|(a, b)| a - b).collect())
    }

    /// Divides every scalar by `k`, computed as multiplication by `1 / k`.
    ///
    /// # Errors
    ///
    /// [`LinalgError::DivisionByZero`] if `k == 0`.
    pub fn divided(&self, k: f64) -> Result<Vector, LinalgError> {
        if k == 0.0 {
            return Err(LinalgError::DivisionByZero);
        }
        Ok(self.scaled(1.0 / k))
    }

    /// Projects `other` onto `self`.
    ///
    /// Returns the projection vector together with the coefficient
    /// `dot(self, other) / dot(self, self)`, so that the projection equals `self * coefficient`.
    ///
    /// # Errors
    ///
    /// [`LinalgError::ZeroLength`] if `self` is the zero vector, and
    /// [`LinalgError::DimensionMismatch`] if the dimensions differ.
    pub fn project(&self, other: &VecSlice) -> Result<(Vector, f64), LinalgError> {
        let norm_sq = self.dot(self)?;
        if norm_sq == 0.0 {
            return Err(LinalgError::ZeroLength);
        }
        let alpha = self.dot(other)? / norm_sq;
        Ok((self.scaled(alpha), alpha))
    }

    /// Returns a unit vector pointing in the same direction.
    ///
    /// # Errors
    ///
    /// [`LinalgError::ZeroLength`] if the length is zero.
    pub fn normalized(&self) -> Result<Vector, LinalgError> {
        let length = self.length();
        if length == 0.0 {
            return Err(LinalgError::ZeroLength);
        }
        Ok(self.scaled(1.0 / length))
    }

    /// Subtracts `factor * source` from `self`, in place. Dimensions must match.
    #[inline]
    pub fn sub_scaled_in(&mut self, source: &VecSlice, factor: f64) {
        for (a, b) in self.0.iter_mut().zip(source.0.iter()) {
            *a -= b * factor;
        }
    }

    /// Multiplies every scalar by `k`, in place.
    #[inline]
    pub fn scale_in(&mut self, k: f64) {
        for a in self.0.iter_mut() {
            *a *= k;
        }
    }

    /// Replaces every scalar with `|v| < tolerance` by `0.0`.
    #[inline]
    pub fn zero_small_values(&mut self, tolerance: f64) {
        for a in self.0.iter_mut() {
            if a.abs() < tolerance {
                *a = 0.0;
            }
        }
    }
}

impl Index<usize> for VecSlice {
    type Output = f64;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IndexMut<usize> for VecSlice {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.0[index]
    }
}

impl Index<Range<usize>> for VecSlice {
    type Output = VecSlice;

    fn index(&self, index: Range<usize>) -> &Self::Output {
        VecSlice::ref_cast(&self.0[index])
    }
}

impl Vector {
    /// Creates a vector from any sequence of values convertible to `f64`.
    pub fn new<T: Into<f64>>(values: impl IntoIterator<Item = T>) -> Self {
        values.into_iter().map(Into::into).collect()
    }

    #[inline]
    pub fn zeros(dim: usize) -> Self {
        Vector(vec![0.0; dim])
    }

    /// Creates a vector with scalars drawn uniformly from `[-1, 1)`.
    #[inline]
    pub fn random(rng: &mut impl Rng, dim: usize) -> Self {
        (0..dim).map(|_| rng.random_range(-1.0..1.0)).collect()
    }

    /// Appends a scalar, increasing the dimension by one.
    #[inline]
    pub fn append(&mut self, value: f64) {
        self.0.push(value);
    }

    #[inline]
    pub fn as_vec_slice(&self) -> &VecSlice {
        self
    }

    #[inline]
    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

impl Deref for Vector {
    type Target = VecSlice;
    fn deref(&self) -> &Self::Target {
        VecSlice::ref_cast(&self.0)
    }
}

impl DerefMut for Vector {
    fn deref_mut(&mut self) -> &mut Self::Target {
        VecSlice::ref_cast_mut(&mut self.0)
    }
}

impl Index<usize> for Vector {
    type Output = f64;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IndexMut<usize> for Vector {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.0[index]
    }
}

impl fmt::Display for VecSlice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", v)?;
        }
        write!(f, "]")
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_vec_slice(), f)
    }
}

impl AsRef<VecSlice> for Vector {
    fn as_ref(&self) -> &VecSlice {
        self
    }
}

impl AsRef<VecSlice> for VecSlice {
    fn as_ref(&self) -> &VecSlice {
        self
    }
}

impl From<Vec<f64>> for Vector {
    fn from(value: Vec<f64>) -> Self {
        Vector(value)
    }
}

impl From<&[f64]> for Vector {
    fn from(value: &[f64]) -> Self {
        Vector(value.to_vec())
    }
}

impl From<Vector> for Vec<f64> {
    fn from(value: Vector) -> Self {
        value.0
    }
}

impl FromIterator<f64> for Vector {
    fn from_iter<T: IntoIterator<Item = f64>>(iter: T) -> Self {
        Vector(Vec::from_iter(iter))
    }
}

impl<'a> IntoIterator for &'a Vector {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Elementwise sum
///
/// # Panics
///
/// Panics if the dimensions differ. Use [`VecSlice::try_add`] for a fallible version.
impl Add for &Vector {
    type Output = Vector;

    fn add(self, rhs: Self) -> Self::Output {
        self.try_add(rhs)
            .unwrap_or_else(|e| panic!("Cannot add vectors: {}", e))
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Self) -> Self::Output {
        &self + &rhs
    }
}

/// Elementwise difference
///
/// # Panics
///
/// Panics if the dimensions differ. Use [`VecSlice::try_sub`] for a fallible version.
impl Sub for &Vector {
    type Output = Vector;

    fn sub(self, rhs: Self) -> Self::Output {
        self.try_sub(rhs)
            .unwrap_or_else(|e| panic!("Cannot subtract vectors: {}", e))
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Self) -> Self::Output {
        &self - &rhs
    }
}

impl AddAssign<&Vector> for Vector {
    fn add_assign(&mut self, rhs: &Vector) {
        assert_eq!(
            self.dim(),
            rhs.dim(),
            "Vectors must have the same dimension for addition"
        );
        for (a, b) in self.0.iter_mut().zip(rhs.0.iter()) {
            *a += b;
        }
    }
}

impl SubAssign<&Vector> for Vector {
    fn sub_assign(&mut self, rhs: &Vector) {
        assert_eq!(
            self.dim(),
            rhs.dim(),
            "Vectors must have the same dimension for subtraction"
        );
        self.sub_scaled_in(rhs, 1.0);
    }
}

impl Mul<f64> for &Vector {
    type Output = Vector;

    fn mul(self, rhs: f64) -> Self::Output {
        self.scaled(rhs)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(mut self, rhs: f64) -> Self::Output {
        self.scale_in(rhs);
        self
    }
}

impl Mul<&Vector> for f64 {
    type Output = Vector;

    fn mul(self, rhs: &Vector) -> Self::Output {
        rhs.scaled(self)
    }
}

impl Mul<Vector> for f64 {
    type Output = Vector;

    fn mul(self, rhs: Vector) -> Self::Output {
        rhs * self
    }
}

impl Neg for &Vector {
    type Output = Vector;

    fn neg(self) -> Self::Output {
        self.scaled(-1.0)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Self::Output {
        self * -1.0
    }
}
