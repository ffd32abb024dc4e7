use ndarray::Array1;

use crate::{RegressionErr, Result};

/// A `ParamGen` generates values for the initial state of the model's parameters.
pub trait ParamGen {
    /// Should sample at most `n` parameters.
    ///
    /// # Returns
    /// `None` once the generator is exhausted.
    fn sample(&mut self, n: usize) -> Option<Vec<f64>>;

    /// Samples exactly `n` parameters.
    ///
    /// # Errors
    /// `ParamGenExhausted` if the generator runs out, or hands out an empty sample, before
    /// producing `n` values.
    fn sample_exact(&mut self, n: usize) -> Result<Array1<f64>> {
        let mut params = Vec::with_capacity(n);
        while params.len() < n {
            match self.sample(n - params.len()) {
                Some(chunk) if !chunk.is_empty() => params.extend(chunk),
                _ => break,
            }
        }

        if params.len() != n {
            return Err(RegressionErr::ParamGenExhausted {
                got: params.len(),
                expected: n,
            });
        }

        Ok(Array1::from_vec(params))
    }
}
