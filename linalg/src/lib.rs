mod error;
mod ops;

pub use error::{LinalgErr, Result};
pub use ops::{dot, expand_to_column, flatten, from_rows, matmul, scale, subtract, transpose};
