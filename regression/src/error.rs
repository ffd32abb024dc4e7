use std::{
    error::Error,
    fmt::{self, Display},
};

use linalg::LinalgErr;
use rand_distr::{NormalError, uniform::Error as UniformError};

/// The result type used in the entire regression crate.
pub type Result<T> = std::result::Result<T, RegressionErr>;

/// The regression crate's error type.
#[derive(Debug)]
pub enum RegressionErr {
    /// A kernel operation received inputs of the wrong shape.
    Linalg(LinalgErr),
    /// Predictions were requested from a model that hasn't been fitted.
    NotFitted,
    /// The parameter generator ran out before every column got an initial value.
    ParamGenExhausted { got: usize, expected: usize },
    /// An input is invalid for domain reasons.
    InvalidInput(&'static str),
    /// A random distribution couldn't be built from the given bounds.
    Distribution(String),
}

impl Display for RegressionErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegressionErr::Linalg(e) => write!(f, "{e}"),
            RegressionErr::NotFitted => write!(f, "the model has not been fitted yet"),
            RegressionErr::ParamGenExhausted { got, expected } => write!(
                f,
                "the parameter generator produced {got} initial parameters of the expected {expected}"
            ),
            RegressionErr::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            RegressionErr::Distribution(msg) => write!(f, "invalid distribution: {msg}"),
        }
    }
}

impl Error for RegressionErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RegressionErr::Linalg(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LinalgErr> for RegressionErr {
    fn from(value: LinalgErr) -> Self {
        Self::Linalg(value)
    }
}

impl From<NormalError> for RegressionErr {
    fn from(value: NormalError) -> Self {
        Self::Distribution(value.to_string())
    }
}

impl From<UniformError> for RegressionErr {
    fn from(value: UniformError) -> Self {
        Self::Distribution(value.to_string())
    }
}
