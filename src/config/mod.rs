//! Configuration management for CCD calculations
//!
//! This module handles configuration structures, defaults, and validation
//! for the input system and the CCD iteration.

mod args;

pub use args::Args;

use crate::ccd_impl::{DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};
use crate::error::{CcdError, Result};
use crate::models::PairingModel;
use serde::{Deserialize, Serialize};

/// Main configuration structure for CCD calculations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub system: SystemConfig,
    #[serde(default)]
    pub ccd_params: CcdParams,
}

/// Where the CCD input comes from
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum SystemConfig {
    /// Pairing Hamiltonian built in memory
    #[serde(rename = "pairing")]
    Pairing(PairingModel),

    /// Explicit basis, energies and matrix elements
    #[serde(rename = "explicit")]
    Explicit {
        n_sp: usize,
        n_fermi: usize,
        sp_energies: Vec<f64>,
        /// Entries `[p, q, r, s, value]` for <pq||rs>
        #[serde(default)]
        tbme: Vec<TbmeEntry>,
    },
}

/// One matrix element <pq||rs> = value
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct TbmeEntry(pub usize, pub usize, pub usize, pub usize, pub f64);

/// CCD-specific parameters
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CcdParams {
    pub tolerance: Option<f64>,
    pub max_iterations: Option<usize>,
    pub mixing: Option<f64>,
    pub require_convergence: Option<bool>,
}

impl Default for CcdParams {
    fn default() -> Self {
        CcdParams {
            tolerance: Some(DEFAULT_TOLERANCE),
            max_iterations: Some(DEFAULT_MAX_ITERATIONS),
            mixing: Some(0.0),
            require_convergence: Some(true),
        }
    }
}

impl CcdParams {
    /// Apply default values to any missing parameters
    pub fn with_defaults(mut self) -> Self {
        let defaults = Self::default();
        if self.tolerance.is_none() {
            self.tolerance = defaults.tolerance;
        }
        if self.max_iterations.is_none() {
            self.max_iterations = defaults.max_iterations;
        }
        if self.mixing.is_none() {
            self.mixing = defaults.mixing;
        }
        if self.require_convergence.is_none() {
            self.require_convergence = defaults.require_convergence;
        }
        self
    }

    /// Override file values with whatever was given on the command line
    pub fn apply_args(mut self, args: &Args) -> Self {
        if args.tolerance.is_some() {
            self.tolerance = args.tolerance;
        }
        if args.max_iterations.is_some() {
            self.max_iterations = args.max_iterations;
        }
        if args.mixing.is_some() {
            self.mixing = args.mixing;
        }
        if args.allow_unconverged {
            self.require_convergence = Some(false);
        }
        self
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance.unwrap_or(DEFAULT_TOLERANCE)
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations.unwrap_or(DEFAULT_MAX_ITERATIONS)
    }

    pub fn mixing(&self) -> f64 {
        self.mixing.unwrap_or(0.0)
    }

    pub fn require_convergence(&self) -> bool {
        self.require_convergence.unwrap_or(true)
    }

    pub fn validate(&self) -> Result<()> {
        let tolerance = self.tolerance();
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(CcdError::InvalidConfig(format!(
                "tolerance must be a non-negative number, got {tolerance}"
            )));
        }
        if self.max_iterations() == 0 {
            return Err(CcdError::InvalidConfig(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        let mixing = self.mixing();
        if !(0.0..1.0).contains(&mixing) {
            return Err(CcdError::InvalidConfig(format!(
                "mixing must lie in [0, 1), got {mixing}"
            )));
        }
        Ok(())
    }
}

impl Config {
    /// Apply default values to any missing configuration fields
    pub fn with_defaults(mut self) -> Self {
        self.ccd_params = self.ccd_params.with_defaults();
        self
    }

    pub fn from_yaml(content: &str) -> std::result::Result<Self, serde_yml::Error> {
        Ok(serde_yml::from_str::<Config>(content)?.with_defaults())
    }
}
