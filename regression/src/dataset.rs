use linalg::LinalgErr;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use rand::Rng;
use rand_distr::{Distribution, Normal, NormalError, Uniform};

use crate::{RegressionErr, Result};

/// A feature matrix together with its targets, one target per row.
///
/// Column 0 of the feature matrix is expected to be the bias column (all ones).
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    x: Array2<f64>,
    y: Array1<f64>,
}

impl Dataset {
    /// Creates a new `Dataset`.
    ///
    /// # Returns
    /// `DimensionMismatch` if `y` doesn't have one entry per row of `x`.
    pub fn new(x: Array2<f64>, y: Array1<f64>) -> Result<Self> {
        if x.nrows() != y.len() {
            return Err(LinalgErr::DimensionMismatch {
                op: "dataset",
                got: y.len(),
                expected: x.nrows(),
            }
            .into());
        }

        Ok(Self { x, y })
    }

    /// Creates a new `Dataset` out of plain rows.
    ///
    /// # Returns
    /// `DimensionMismatch` if the rows don't all have the same length or if `y` doesn't have one
    /// entry per row.
    pub fn from_rows(rows: &[Vec<f64>], y: Vec<f64>) -> Result<Self> {
        let x = linalg::from_rows(rows)?;
        Self::new(x, Array1::from_vec(y))
    }

    pub fn x(&self) -> ArrayView2<'_, f64> {
        self.x.view()
    }

    pub fn y(&self) -> ArrayView1<'_, f64> {
        self.y.view()
    }

    /// Returns the amount of samples (rows).
    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    /// Returns the amount of columns, the bias column included.
    pub fn n_cols(&self) -> usize {
        self.x.ncols()
    }
}

/// Describes a synthetic linear dataset `y = X · coefficients + noise`.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticSpec {
    /// Amount of rows to generate.
    pub samples: usize,
    /// True parameters, the intercept first.
    pub coefficients: Vec<f64>,
    /// Standard deviation of the gaussian noise added to every target.
    pub std_dev: f64,
    /// Inclusive lower bound of the feature values.
    pub x_low: f64,
    /// Exclusive upper bound of the feature values.
    pub x_high: f64,
}

impl SyntheticSpec {
    pub fn new(
        samples: usize,
        coefficients: Vec<f64>,
        std_dev: f64,
        x_low: f64,
        x_high: f64,
    ) -> Self {
        Self {
            samples,
            coefficients,
            std_dev,
            x_low,
            x_high,
        }
    }

    /// Generates a dataset with these settings.
    ///
    /// Every row starts with the bias value `1.0` and its remaining columns are drawn uniformly
    /// from `[x_low, x_high)`.
    ///
    /// # Errors
    /// * `InvalidInput` if there are no samples or no coefficients.
    /// * `Distribution` if the feature range is invalid or the standard deviation is negative or
    ///   not finite.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Dataset> {
        if self.samples == 0 {
            return Err(RegressionErr::InvalidInput("a dataset needs at least one sample"));
        }

        if self.coefficients.is_empty() {
            return Err(RegressionErr::InvalidInput(
                "a dataset needs at least the intercept coefficient",
            ));
        }

        // `Normal::new` accepts negative deviations
        if self.std_dev < 0. || !self.std_dev.is_finite() {
            return Err(NormalError::BadVariance.into());
        }

        let features = Uniform::new(self.x_low, self.x_high)?;
        let noise = Normal::new(0., self.std_dev)?;

        let cols = self.coefficients.len();
        let mut x = Array2::<f64>::ones((self.samples, cols));
        x.rows_mut().into_iter().for_each(|mut row| {
            row.iter_mut()
                .skip(1)
                .for_each(|v| *v = features.sample(rng));
        });

        let coefficients = ArrayView1::from(&self.coefficients[..]);
        let mut y = linalg::dot(x.view(), coefficients)?;
        y.iter_mut().for_each(|v| *v += noise.sample(rng));

        Dataset::new(x, y)
    }
}
