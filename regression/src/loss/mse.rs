use ndarray::ArrayView1;

use super::LossFn;

/// Mean squared error loss function.
#[derive(Debug, Default, Clone, Copy)]
pub struct Mse;

impl Mse {
    /// Returns a new `Mse`.
    pub fn new() -> Self {
        Self
    }
}

impl LossFn for Mse {
    fn loss(&self, y_pred: ArrayView1<f64>, y: ArrayView1<f64>) -> linalg::Result<f64> {
        let err = linalg::subtract(y_pred, y)?;
        Ok(err.mapv(|x| x.powi(2)).mean().unwrap_or_default())
    }
}
