use std::{
    error::Error,
    fmt::{self, Display},
};

/// The result type used by every kernel operation.
pub type Result<T> = std::result::Result<T, LinalgErr>;

/// Errors produced by the dense matrix kernel when its inputs have the wrong shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinalgErr {
    /// A shape invariant was violated (e.g. a vector length that doesn't match a column count).
    DimensionMismatch {
        /// The operation that detected the mismatch.
        op: &'static str,
        /// Observed dimension.
        got: usize,
        /// Expected dimension.
        expected: usize,
    },

    /// The operation requires at least one row.
    Empty { op: &'static str },
}

impl Display for LinalgErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinalgErr::DimensionMismatch { op, got, expected } => {
                write!(f, "dimension mismatch in {op}: got {got}, expected {expected}")
            }
            LinalgErr::Empty { op } => write!(f, "{op} requires a non empty matrix"),
        }
    }
}

impl Error for LinalgErr {}
