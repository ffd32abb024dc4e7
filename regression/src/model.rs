use log::{Level, debug, info, log_enabled};
use ndarray::{Array1, ArrayView1, ArrayView2, s};

use crate::{
    FitConfig, RegressionErr, Result,
    initialization::{INIT_HIGH, INIT_LOW, ParamGen, RandParamGen},
    loss::{LossFn, Mse},
    optimization::{GradientDescent, Optimizer},
};

/// Number of gradient descent steps taken by a default `fit`.
pub const DEFAULT_TRAINING_ITERATIONS: usize = 3000;

/// Progress is logged every this many iterations.
const LOG_EVERY: usize = 500;

/// The parameters found by a successful fit.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedParams {
    intercept: f64,
    coefficients: Array1<f64>,
    iterations: usize,
}

impl FittedParams {
    /// Splits a full parameter vector into the intercept and the coefficients.
    fn new(params: ArrayView1<f64>, iterations: usize) -> Self {
        Self {
            intercept: params[0],
            coefficients: params.slice(s![1..]).to_owned(),
            iterations,
        }
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Returns one coefficient per feature, the bias column excluded.
    pub fn coefficients(&self) -> ArrayView1<'_, f64> {
        self.coefficients.view()
    }

    /// Returns the amount of gradient descent steps that were taken.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Returns the intercept followed by the coefficients.
    pub fn params(&self) -> Array1<f64> {
        std::iter::once(self.intercept)
            .chain(self.coefficients.iter().copied())
            .collect()
    }

    /// Predicts the targets of `x`, which must include the bias column.
    pub fn predict(&self, x: ArrayView2<f64>) -> Result<Array1<f64>> {
        Ok(linalg::dot(x, self.params().view())?)
    }

    /// Returns the mean squared error of the predictions of `x` against `y`.
    pub fn mse(&self, x: ArrayView2<f64>, y: ArrayView1<f64>) -> Result<f64> {
        let y_pred = self.predict(x)?;
        Ok(Mse.loss(y_pred.view(), y)?)
    }
}

/// Whether a model has been fitted.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ModelState {
    #[default]
    Unfitted,
    Fitted(FittedParams),
}

impl ModelState {
    /// Replaces the state with `params` and returns a reference to them.
    fn insert_fitted(&mut self, params: FittedParams) -> &FittedParams {
        *self = ModelState::Fitted(params);
        let ModelState::Fitted(params) = self else {
            unreachable!("the state was just set");
        };
        params
    }
}

/// Linear regression trained with full batch gradient descent.
///
/// The model starts `Unfitted` and holds its parameters once a call to `fit` succeeds. A failed
/// fit leaves the previous state untouched.
#[derive(Debug, Clone, Default)]
pub struct LinearRegression {
    config: FitConfig,
    state: ModelState,
}

impl LinearRegression {
    /// Creates a new unfitted `LinearRegression`.
    ///
    /// # Arguments
    /// * `config` - The hyperparameters used by every call to `fit`.
    pub fn new(config: FitConfig) -> Self {
        Self {
            config,
            state: ModelState::Unfitted,
        }
    }

    pub fn config(&self) -> &FitConfig {
        &self.config
    }

    pub fn state(&self) -> &ModelState {
        &self.state
    }

    pub fn is_fitted(&self) -> bool {
        matches!(self.state, ModelState::Fitted(_))
    }

    pub fn fitted(&self) -> Option<&FittedParams> {
        match &self.state {
            ModelState::Fitted(params) => Some(params),
            ModelState::Unfitted => None,
        }
    }

    /// Returns the intercept, `None` until the model is fitted.
    pub fn intercept(&self) -> Option<f64> {
        self.fitted().map(FittedParams::intercept)
    }

    /// Returns the coefficients, `None` until the model is fitted.
    pub fn coefficients(&self) -> Option<ArrayView1<'_, f64>> {
        self.fitted().map(FittedParams::coefficients)
    }

    /// Predicts the targets of `x`, which must include the bias column.
    ///
    /// # Errors
    /// `NotFitted` before the first successful fit.
    pub fn predict(&self, x: ArrayView2<f64>) -> Result<Array1<f64>> {
        self.fitted().ok_or(RegressionErr::NotFitted)?.predict(x)
    }

    /// Fits the model to `x` and `y`, starting from parameters drawn uniformly from `[0, 10)`.
    ///
    /// The random number generator is seeded from the config when it has a seed.
    ///
    /// # Arguments
    /// * `x` - The feature matrix, its first column being the bias column.
    /// * `y` - The targets, one per row of `x`.
    ///
    /// # Errors
    /// `DimensionMismatch` if the shapes of `x` and `y` aren't compatible.
    pub fn fit(&mut self, x: ArrayView2<f64>, y: ArrayView1<f64>) -> Result<&FittedParams> {
        let rng = self.config.rng();
        let mut param_gen = RandParamGen::uniform(rng, x.ncols(), INIT_LOW, INIT_HIGH)?;
        self.fit_with(x, y, &mut param_gen)
    }

    /// Same as `fit` but the initial parameters are sampled from `param_gen`.
    ///
    /// # Errors
    /// * `InvalidInput` if `x` has no columns.
    /// * `ParamGenExhausted` if `param_gen` can't provide a parameter per column.
    /// * `DimensionMismatch` if the shapes of `x` and `y` aren't compatible.
    pub fn fit_with<G>(
        &mut self,
        x: ArrayView2<f64>,
        y: ArrayView1<f64>,
        param_gen: &mut G,
    ) -> Result<&FittedParams>
    where
        G: ParamGen + ?Sized,
    {
        let cols = x.ncols();
        if cols == 0 {
            return Err(RegressionErr::InvalidInput(
                "the feature matrix needs at least the bias column",
            ));
        }

        let init = param_gen.sample_exact(cols)?;

        let mut optimizer = GradientDescent::new(self.config.learning_rate);
        info!(
            "fitting linear regression: rows={} cols={cols} iterations={} learning_rate={}",
            x.nrows(),
            self.config.iterations,
            optimizer.learning_rate(),
        );

        let (params, iterations) = self.descend(x, y, init, &mut optimizer)?;

        let y_pred = linalg::dot(x, params.view())?;
        let loss = Mse.loss(y_pred.view(), y)?;
        info!("linear regression fitted after {iterations} iterations: mse={loss}");

        let fitted = FittedParams::new(params.view(), iterations);
        Ok(self.state.insert_fitted(fitted))
    }

    /// Runs the gradient descent loop.
    ///
    /// # Returns
    /// The final parameters and the amount of steps taken.
    fn descend<O: Optimizer>(
        &self,
        x: ArrayView2<f64>,
        y: ArrayView1<f64>,
        mut params: Array1<f64>,
        optimizer: &mut O,
    ) -> Result<(Array1<f64>, usize)> {
        let rows = x.nrows();
        // loop invariant
        let xt = linalg::transpose(x)?;

        for iteration in 0..self.config.iterations {
            let y_pred = linalg::dot(x, params.view())?;
            let error = linalg::subtract(y_pred.view(), y)?;
            let column = linalg::expand_to_column(error.view());
            let grad = linalg::flatten(linalg::matmul(xt.view(), column.view())?.view());

            if log_enabled!(Level::Debug) && iteration % LOG_EVERY == 0 {
                let loss = Mse.loss(y_pred.view(), y)?;
                debug!(iteration = iteration, loss = loss; "gradient descent progress");
            }

            if let Some(tolerance) = self.config.tolerance {
                let norm = grad.dot(&grad).sqrt() / rows as f64;
                if norm < tolerance {
                    debug!(iteration = iteration, norm = norm; "gradient below tolerance, stopping");
                    return Ok((params, iteration));
                }
            }

            params = optimizer.update_params(params.view(), grad.view(), rows)?;
        }

        Ok((params, self.config.iterations))
    }
}

#[cfg(test)]
mod tests {
    use ndarray::{Array2, array};

    use super::*;
    use crate::initialization::FixedParamGen;
    use linalg::LinalgErr;

    fn line() -> (Array2<f64>, Array1<f64>) {
        let x = array![[1., 0.], [1., 1.], [1., 2.], [1., 3.]];
        let y = array![1., 3., 5., 7.];
        (x, y)
    }

    #[test]
    fn starts_unfitted() {
        let model = LinearRegression::default();

        assert_eq!(model.config(), &FitConfig::default());
        assert_eq!(model.state(), &ModelState::Unfitted);
        assert!(!model.is_fitted());
        assert!(model.intercept().is_none());
        assert!(model.coefficients().is_none());
    }

    #[test]
    fn single_step_matches_hand_computation() {
        let x = array![[1., 1.], [1., 2.]];
        let y = array![1., 2.];
        let mut model = LinearRegression::new(FitConfig::default().with_iterations(1));

        let fitted = model
            .fit_with(x.view(), y.view(), &mut FixedParamGen::repeat(0., 2))
            .unwrap();

        // error = [-1, -2], grad = X^T error = [-3, -5], step = 0.05 / 2
        assert!((fitted.intercept() - 0.075).abs() < 1e-12);
        assert!((fitted.coefficients()[0] - 0.125).abs() < 1e-12);
        assert_eq!(fitted.iterations(), 1);
    }

    #[test]
    fn fits_an_exact_line() {
        let (x, y) = line();
        let mut model = LinearRegression::default();

        model
            .fit_with(x.view(), y.view(), &mut FixedParamGen::repeat(5., 2))
            .unwrap();

        let intercept = model.intercept().unwrap();
        let coefficients = model.coefficients().unwrap();
        assert!((intercept - 1.).abs() < 1e-6, "intercept: {intercept}");
        assert_eq!(coefficients.len(), 1);
        assert!((coefficients[0] - 2.).abs() < 1e-6, "coefficient: {}", coefficients[0]);
        assert_eq!(model.fitted().unwrap().iterations(), DEFAULT_TRAINING_ITERATIONS);
    }

    #[test]
    fn predicts_with_fitted_params() {
        let (x, y) = line();
        let mut model = LinearRegression::default();
        model
            .fit_with(x.view(), y.view(), &mut FixedParamGen::repeat(0., 2))
            .unwrap();

        let y_pred = model.predict(array![[1., 10.]].view()).unwrap();
        assert!((y_pred[0] - 21.).abs() < 1e-5);
        assert!(model.fitted().unwrap().mse(x.view(), y.view()).unwrap() < 1e-10);
    }

    #[test]
    fn predict_before_fit_fails() {
        let model = LinearRegression::default();
        let x = array![[1., 2.]];

        assert!(matches!(model.predict(x.view()), Err(RegressionErr::NotFitted)));
    }

    #[test]
    fn target_length_mismatch() {
        let (x, _) = line();
        let y = array![1., 3., 5.];
        let mut model = LinearRegression::default();

        let err = model
            .fit_with(x.view(), y.view(), &mut FixedParamGen::repeat(0., 2))
            .unwrap_err();

        assert!(matches!(
            err,
            RegressionErr::Linalg(LinalgErr::DimensionMismatch {
                op: "subtract",
                got: 3,
                expected: 4
            })
        ));
        assert!(!model.is_fitted());
    }

    #[test]
    fn empty_matrix_is_rejected() {
        let x = Array2::<f64>::zeros((0, 2));
        let y = Array1::<f64>::zeros(0);
        let mut model = LinearRegression::default();

        assert!(matches!(
            model.fit(x.view(), y.view()),
            Err(RegressionErr::Linalg(LinalgErr::Empty { .. }))
        ));
        assert!(!model.is_fitted());
    }

    #[test]
    fn no_columns_is_rejected() {
        let x = Array2::<f64>::zeros((3, 0));
        let y = Array1::<f64>::zeros(3);
        let mut model = LinearRegression::default();

        assert!(matches!(
            model.fit(x.view(), y.view()),
            Err(RegressionErr::InvalidInput(_))
        ));
    }

    #[test]
    fn failed_refit_keeps_previous_params() {
        let (x, y) = line();
        let mut model = LinearRegression::default();
        model
            .fit_with(x.view(), y.view(), &mut FixedParamGen::repeat(0., 2))
            .unwrap();
        let before = model.state().clone();

        let short_y = array![1., 3.];
        assert!(model.fit(x.view(), short_y.view()).is_err());
        assert_eq!(model.state(), &before);
    }

    #[test]
    fn exhausted_param_gen() {
        let (x, y) = line();
        let mut model = LinearRegression::default();

        let err = model
            .fit_with(x.view(), y.view(), &mut FixedParamGen::repeat(0., 1))
            .unwrap_err();

        assert!(matches!(
            err,
            RegressionErr::ParamGenExhausted {
                got: 1,
                expected: 2
            }
        ));
    }

    #[test]
    fn same_seed_same_fit() {
        let (x, y) = line();
        let config = FitConfig::default().with_seed(9).with_iterations(50);

        let mut a = LinearRegression::new(config);
        let mut b = LinearRegression::new(config);
        a.fit(x.view(), y.view()).unwrap();
        b.fit(x.view(), y.view()).unwrap();

        assert_eq!(a.state(), b.state());
    }

    #[test]
    fn tolerance_stops_early() {
        let (x, y) = line();
        let config = FitConfig::default()
            .with_iterations(100_000)
            .with_tolerance(1e-6);
        let mut model = LinearRegression::new(config);

        let fitted = model
            .fit_with(x.view(), y.view(), &mut FixedParamGen::repeat(0., 2))
            .unwrap();

        assert!(fitted.iterations() < 100_000);
        assert!((fitted.intercept() - 1.).abs() < 1e-3);
        assert!((fitted.coefficients()[0] - 2.).abs() < 1e-3);
    }

    #[test]
    fn refit_overwrites() {
        let (x, y) = line();
        let mut model = LinearRegression::default();
        model
            .fit_with(x.view(), y.view(), &mut FixedParamGen::repeat(0., 2))
            .unwrap();

        let y = array![2., 2., 2., 2.];
        model
            .fit_with(x.view(), y.view(), &mut FixedParamGen::repeat(0., 2))
            .unwrap();

        assert!((model.intercept().unwrap() - 2.).abs() < 1e-6);
        assert!(model.coefficients().unwrap()[0].abs() < 1e-6);
    }
}
