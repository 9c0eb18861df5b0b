use anyhow::{Context, Result};
use log::error;

use gcode_cost::config::{Config, InputSource};
use gcode_cost::error::EstimateError;
use gcode_cost::estimate::EstimationResult;
use gcode_cost::pipeline::{process_request, read_gcode};
use gcode_cost::slicer::PrusaSlicer;

fn main() -> Result<()> {
    let config = Config::from_args_and_env()?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .init();

    let result = run(&config).inspect_err(|e| {
        if let Some(estimate_err) = e.downcast_ref::<EstimateError>() {
            error!("{:?} fault: {}", estimate_err.classify(), estimate_err);
        }
    })?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn run(config: &Config) -> Result<EstimationResult> {
    let estimator = config.estimator()?;

    match &config.source {
        InputSource::GCode(path) => {
            let document =
                read_gcode(path).with_context(|| format!("failed to read {}", path.display()))?;
            Ok(estimator.estimate(&document, &config.params)?)
        }
        InputSource::Model(request) => {
            let slicer = PrusaSlicer::new(&config.slicer);
            Ok(process_request(
                &estimator,
                request,
                &slicer,
                &config.profiles_dir,
            )?)
        }
    }
}
