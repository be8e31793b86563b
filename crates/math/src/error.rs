//! Errors reported by the checked helpers (`try_inverse`, `try_normalized`).
//!
//! The arithmetic operators never fail: degenerate input propagates as
//! infinity or NaN. These errors only come out of the opt-in `try_*` calls.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum MathError {
    /// The matrix has a zero or non-finite determinant.
    #[error("matrix is not invertible (determinant = {determinant})")]
    SingularMatrix { determinant: f64 },

    /// A vector or quaternion with zero or non-finite length was normalized
    /// or inverted.
    #[error("cannot normalize or invert a value of zero length")]
    ZeroLength,
}

pub type Result<T> = core::result::Result<T, MathError>;
