use std::fmt;

use thiserror::Error;

/// Result alias used by every checked operation in the crate.
pub type Result<T> = std::result::Result<T, NnError>;

/// Row/column pair used in error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub rows: usize,
    pub cols: usize,
}

impl Shape {
    pub fn new(rows: usize, cols: usize) -> Shape {
        Shape { rows, cols }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Precondition violations surfaced by the matrix and network engines.
///
/// An operation returning any of these has left its arguments untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NnError {
    /// A matrix was requested with zero rows or zero columns.
    #[error("invalid dimensions {rows}x{cols}: rows and cols must both be at least 1")]
    InvalidDimensions { rows: usize, cols: usize },

    /// Operand shapes are incompatible for `op`.
    #[error("shape mismatch in {op}: expected {expected}, found {found}")]
    ShapeMismatch {
        op: &'static str,
        expected: Shape,
        found: Shape,
    },

    /// A numeric or structural parameter is outside its accepted range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Backing storage for a `rows x cols` matrix could not be reserved.
    #[error("failed to allocate storage for a {rows}x{cols} matrix")]
    AllocationFailure { rows: usize, cols: usize },
}

impl NnError {
    pub(crate) fn shape_mismatch(op: &'static str, expected: Shape, found: Shape) -> NnError {
        NnError::ShapeMismatch { op, expected, found }
    }
}
