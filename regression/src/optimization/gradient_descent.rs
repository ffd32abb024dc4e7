use ndarray::{Array1, ArrayView1};

use super::Optimizer;

/// Gradient descent optimization algorithm.
#[derive(Debug, Clone, Copy)]
pub struct GradientDescent {
    learning_rate: f64,
}

impl GradientDescent {
    /// Returns a new `GradientDescent`.
    ///
    /// # Arguments
    /// * `learning_rate` - The *length* of the steps taken on `update_params`.
    pub fn new(learning_rate: f64) -> Self {
        Self { learning_rate }
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }
}

impl Optimizer for GradientDescent {
    /// Makes a step in the opposite direction of the gradient, with a length of
    /// `learning_rate / samples`.
    fn update_params(
        &mut self,
        params: ArrayView1<f64>,
        grad: ArrayView1<f64>,
        samples: usize,
    ) -> linalg::Result<Array1<f64>> {
        let step = linalg::scale(grad, self.learning_rate / samples as f64);
        linalg::subtract(params, step.view())
    }
}
