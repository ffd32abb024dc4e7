use ndarray::{Array1, ArrayView1};

pub trait Optimizer {
    /// Computes the parameters that follow `params` after one step of the algorithm.
    ///
    /// # Arguments
    /// * `params` - The current parameters.
    /// * `grad` - The gradient summed over every sample of the batch.
    /// * `samples` - The amount of samples the gradient was summed over.
    fn update_params(
        &mut self,
        params: ArrayView1<f64>,
        grad: ArrayView1<f64>,
        samples: usize,
    ) -> linalg::Result<Array1<f64>>;
}
