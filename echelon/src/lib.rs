//! `echelon` is a Rust library for dense linear algebra over `f64`, built around Gaussian
//! elimination. Some features include:
//! - vectors with checked arithmetic, dot products, projection and normalization
//! - matrices with checked element access, row and column construction helpers, transpose and
//!   multiplication
//! - reduction to reduced row echelon form, with pivot and free column tracking
//! - rank, null space, column space, determinant and inverse
//! - linear combinations, orthogonality and basis checks, Gram-Schmidt orthogonalization,
//!   bilinear and quadratic forms
//! - a few consumers of the above: polynomials with a differentiation operator, one-variable
//!   calculus helpers, and least squares through the normal equations
//!
//! The main data structures provided by this crate are:
//! - [`Vector`]: an owned vector of `f64`s, which dereferences to the unsized [`VecSlice`]
//! - [`Matrix`]: a row-major matrix of [`Vector`] rows, which implements elementary row
//!   operations through the [`RowOps`] trait
//! - [`Rref`]: the reduced row echelon form of a matrix together with its [`Pivots`]
//!
//! Floating point comparisons go through a [`Tolerance`], by default [`DEFAULT_TOLERANCE`].
//! Fallible operations return a [`LinalgError`].

#![allow(
    clippy::needless_range_loop,
    clippy::uninlined_format_args,
    clippy::float_cmp,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use
)]
pub mod algorithms;
pub mod calculus;
pub mod elimination;
pub mod error;
pub mod least_squares;
pub mod matrix;
pub mod polynomial;
pub mod rref;
pub mod tolerance;
pub mod vector;

pub use algorithms::{bilinear, gram_schmidt, is_basis, is_orthogonal, linear_combination, quadratic};
pub use elimination::Pivots;
pub use error::LinalgError;
pub use least_squares::least_squares;
pub use matrix::{Matrix, RowOps};
pub use polynomial::Polynomial;
pub use rref::Rref;
pub use tolerance::{is_close, Tolerance, DEFAULT_TOLERANCE};
pub use vector::{VecSlice, Vector};
