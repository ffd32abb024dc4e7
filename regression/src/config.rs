use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::model::DEFAULT_TRAINING_ITERATIONS;

/// The step size used when none is configured.
pub const DEFAULT_LEARNING_RATE: f64 = 0.05;

/// Hyperparameters for a single `LinearRegression::fit` call.
///
/// Every field is optional when deserializing, missing ones take their default value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitConfig {
    /// Step size of each gradient descent update.
    pub learning_rate: f64,
    /// Number of gradient descent steps.
    pub iterations: usize,
    /// Stops early once the norm of the mean gradient drops below this value.
    pub tolerance: Option<f64>,
    /// Seed for the parameter initialization, the OS seeds it when missing.
    pub seed: Option<u64>,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            learning_rate: DEFAULT_LEARNING_RATE,
            iterations: DEFAULT_TRAINING_ITERATIONS,
            tolerance: None,
            seed: None,
        }
    }
}

impl FitConfig {
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builds the random number generator used to initialize the parameters.
    pub(crate) fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}
