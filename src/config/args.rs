//! Command-line argument parsing for CCD calculations

use clap::Parser;

/// Coupled-cluster doubles correlation energy with YAML configuration
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "config.yaml")]
    pub config_file: String,

    /// Override convergence threshold on |ΔE|
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Override maximum CCD iterations
    #[arg(long)]
    pub max_iterations: Option<usize>,

    /// Override amplitude mixing (0.0 disables damping)
    #[arg(long)]
    pub mixing: Option<f64>,

    /// Report non-convergence as a warning instead of failing
    #[arg(long)]
    pub allow_unconverged: bool,

    /// Override output file: (default stdout)
    #[arg(short, long)]
    pub output: Option<String>,
}
