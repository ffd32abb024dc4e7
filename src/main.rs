use log::debug;
use regression::{FitConfig, LinearRegression, SyntheticSpec};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // y = 1 + 7x with gaussian noise of standard deviation 2
    let spec = SyntheticSpec::new(100, vec![1., 7.], 2., 0., 10.);
    let data = spec.generate(&mut rand::rng())?;

    let mut model = LinearRegression::new(FitConfig::default());
    debug!("fit config: {}", serde_json::to_string(model.config())?);

    let fitted = model.fit(data.x(), data.y())?;

    println!("Intercept: {}", fitted.intercept());
    println!("Coefficients: {:?}", fitted.coefficients().to_vec());

    Ok(())
}
