pub mod config;
pub mod dataset;
pub mod error;
pub mod initialization;
pub mod loss;
mod model;
pub mod optimization;

pub use config::FitConfig;
pub use dataset::{Dataset, SyntheticSpec};
pub use error::{RegressionErr, Result};
pub use model::{DEFAULT_TRAINING_ITERATIONS, FittedParams, LinearRegression, ModelState};
