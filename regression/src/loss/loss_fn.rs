use ndarray::ArrayView1;

pub trait LossFn {
    /// Computes the loss between the predictions and the targets.
    ///
    /// # Errors
    /// `DimensionMismatch` if both vectors don't have the same length.
    fn loss(&self, y_pred: ArrayView1<f64>, y: ArrayView1<f64>) -> linalg::Result<f64>;
}
