use crate::ccd_impl::{CcdOutcome, CCD};
use crate::config::CcdParams;
use crate::system::CcdSystem;
use color_eyre::eyre::{Result, WrapErr};
use tracing::info;

/// Configure and run the CCD driver for a validated system.
pub fn run_ccd(system: &CcdSystem, params: &CcdParams) -> Result<CcdOutcome> {
    info!("\n===========================================");
    info!("       Starting CCD Calculation");
    info!("===========================================");

    let mut ccd = CCD::new(system, params.max_iterations(), params.tolerance())
        .with_mixing(params.mixing());
    let outcome = ccd.solve().wrap_err("CCD calculation failed")?;

    Ok(outcome)
}
