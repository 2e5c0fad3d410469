//! Error taxonomy for kernel operations.
//!
//! Every variant keeps the name of the operation that failed (`caller`) and, where it
//! applies, the offending index or shapes.

use thiserror::Error;

/// Failure of a kernel operation.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GeomError {
    /// A denominator, length or determinant is below the degeneracy tolerance.
    #[error("divide by zero in {caller}")]
    DivideByZero { caller: &'static str },

    /// Malformed input to a constructor or operation.
    #[error("invalid parameter in {caller}: {message}")]
    InvalidParameter {
        caller: &'static str,
        message: String,
    },

    /// Index outside a one-dimensional container.
    #[error("index {index} out of bounds (size = {size}) in {caller}")]
    IndexOutOfBounds {
        caller: &'static str,
        index: usize,
        size: usize,
    },

    /// Flat pixel/element index outside a two-dimensional container.
    #[error("index {index} out of bounds (width = {width}, height = {height}) in {caller}")]
    PixelOutOfBounds {
        caller: &'static str,
        index: usize,
        width: usize,
        height: usize,
    },

    /// Two operands whose shapes must agree do not.
    #[error("size mismatch in {caller}: expected {expected:?}, found {found:?}")]
    SizeMismatch {
        caller: &'static str,
        expected: (usize, usize),
        found: (usize, usize),
    },

    /// Gauss-Jordan elimination met a zero pivot.
    #[error("matrix is not invertible ({caller})")]
    NotInvertible { caller: &'static str },

    /// Gaussian elimination met a zero pivot.
    #[error("system is not solvable ({caller})")]
    NotSolvable { caller: &'static str },

    /// Text import failed.
    #[error("cannot parse {what}: {message}")]
    Parse { what: &'static str, message: String },
}

/// Result type for kernel operations.
pub type GeomResult<T> = Result<T, GeomError>;

impl GeomError {
    #[inline]
    pub(crate) fn divide_by_zero(caller: &'static str) -> Self {
        Self::DivideByZero { caller }
    }

    #[inline]
    pub(crate) fn invalid(caller: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            caller,
            message: message.into(),
        }
    }

    #[inline]
    pub(crate) fn out_of_bounds(caller: &'static str, index: usize, size: usize) -> Self {
        Self::IndexOutOfBounds {
            caller,
            index,
            size,
        }
    }

    #[inline]
    pub(crate) fn parse(what: &'static str, message: impl Into<String>) -> Self {
        Self::Parse {
            what,
            message: message.into(),
        }
    }
}
