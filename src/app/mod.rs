mod report;
mod runner;

pub use report::{report_outcome, report_system};
pub use runner::run_ccd;

use crate::config::{Args, Config, SystemConfig};
use crate::io::{build_system, setup_output};
use crate::models::PairingModel;
use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use std::fs;
use tracing::{info, warn};

pub struct CcdApplication {
    args: Args,
    config: Config,
}

impl CcdApplication {
    pub fn from_cli() -> Result<Self> {
        let args = Args::parse();
        let config = load_config(&args)?;
        Ok(Self { args, config })
    }

    pub fn new(args: Args, config: Config) -> Self {
        Self { args, config }
    }

    pub fn run(self) -> Result<()> {
        setup_output(self.args.output.as_ref());
        info!("Configuration loaded:\n{:?}", self.config);

        let params = self.config.ccd_params.clone().apply_args(&self.args);
        params.validate().wrap_err("Invalid CCD parameters")?;

        let system = build_system(&self.config.system).wrap_err("Failed to build CCD input")?;
        report_system(&system);

        let outcome = run_ccd(&system, &params)?;
        let reference_energy = match &self.config.system {
            SystemConfig::Pairing(model) => Some(reference_energy(model)?),
            SystemConfig::Explicit { .. } => None,
        };
        report_outcome(&outcome, reference_energy);

        if params.require_convergence() {
            outcome
                .converged()
                .wrap_err("CCD iteration did not converge")?;
        } else if !outcome.is_converged() {
            warn!("Continuing with an unconverged CCD energy");
        }

        Ok(())
    }
}

fn reference_energy(model: &PairingModel) -> Result<f64> {
    model
        .reference_energy()
        .wrap_err("Failed to evaluate reference energy")
}

fn load_config(args: &Args) -> Result<Config> {
    let config_content = fs::read_to_string(&args.config_file)
        .wrap_err_with(|| format!("Unable to read configuration file: {}", args.config_file))?;

    let config =
        Config::from_yaml(&config_content).wrap_err("Failed to parse configuration file")?;

    Ok(config)
}
