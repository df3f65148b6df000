//! CCD Calculation Command-Line Interface
//!
//! This is the main entry point for running CCD calculations with YAML configuration.

use ccd::app::CcdApplication;
use color_eyre::eyre::Result;

fn main() -> Result<()> {
    color_eyre::install()?;
    CcdApplication::from_cli()?.run()
}
