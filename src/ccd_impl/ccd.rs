//! CCD iteration driver
//!
//! Starts from the MBPT2 amplitudes and applies the amplitude equations until
//! the correlation energy changes by no more than the tolerance, or until the
//! iteration cap is reached.

use super::amplitudes::{
    correlation_energy, initial_amplitudes, mix_amplitudes, update_amplitudes,
};
use crate::error::{CcdError, Result};
use crate::system::CcdSystem;
use tracing::{debug, info, warn};

pub const DEFAULT_TOLERANCE: f64 = 1e-5;
pub const DEFAULT_MAX_ITERATIONS: usize = 200;

/// Terminal state of a CCD run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvergenceStatus {
    Converged,
    MaxIterationsExceeded,
}

/// Result of a CCD run
#[derive(Debug, Clone)]
pub struct CcdOutcome {
    /// Final (or last computed) correlation energy
    pub energy: f64,

    pub status: ConvergenceStatus,

    /// Number of amplitude updates performed
    pub iterations: usize,

    /// |E_new − E_old| of the last iteration
    pub energy_diff: f64,

    /// Energy of the zeroth-order amplitudes
    pub mbpt2_energy: f64,

    /// Energy after every iteration; entry 0 is the MBPT2 energy
    pub history: Vec<f64>,
}

impl CcdOutcome {
    pub fn is_converged(&self) -> bool {
        self.status == ConvergenceStatus::Converged
    }

    /// The converged energy, or [`CcdError::NotConverged`] carrying the last one.
    pub fn converged(&self) -> Result<f64> {
        match self.status {
            ConvergenceStatus::Converged => Ok(self.energy),
            ConvergenceStatus::MaxIterationsExceeded => Err(CcdError::NotConverged {
                iterations: self.iterations,
                energy: self.energy,
                energy_diff: self.energy_diff,
            }),
        }
    }

    /// Successive |ΔE| values, one per iteration.
    pub fn energy_diffs(&self) -> Vec<f64> {
        self.history.windows(2).map(|w| (w[1] - w[0]).abs()).collect()
    }
}

/// CCD calculation structure
///
/// Holds a reference to the (immutable) system and the iteration settings.
pub struct CCD<'a> {
    system: &'a CcdSystem,

    /// Maximum number of amplitude updates
    pub max_iterations: usize,

    /// Convergence threshold on |ΔE|
    pub tolerance: f64,

    /// Weight of the previous amplitudes in the damped update, in [0, 1)
    pub mixing: f64,

    /// CCD correlation energy (set by [`CCD::solve`])
    pub correlation_energy: Option<f64>,
}

impl<'a> CCD<'a> {
    pub fn new(system: &'a CcdSystem, max_iterations: usize, tolerance: f64) -> Self {
        CCD {
            system,
            max_iterations,
            tolerance,
            mixing: 0.0,
            correlation_energy: None,
        }
    }

    pub fn with_mixing(mut self, mixing: f64) -> Self {
        self.mixing = mixing;
        self
    }

    fn validate_settings(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(CcdError::InvalidConfig(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(CcdError::InvalidConfig(format!(
                "tolerance must be a non-negative number, got {}",
                self.tolerance
            )));
        }
        if !(0.0..1.0).contains(&self.mixing) {
            return Err(CcdError::InvalidConfig(format!(
                "mixing must lie in [0, 1), got {}",
                self.mixing
            )));
        }
        Ok(())
    }

    /// Solve the CCD equations iteratively.
    ///
    /// Invalid settings, degenerate denominators and divergence abort with an
    /// error. Hitting the iteration cap is not an error here: the outcome
    /// carries the last energy with [`ConvergenceStatus::MaxIterationsExceeded`].
    pub fn solve(&mut self) -> Result<CcdOutcome> {
        self.validate_settings()?;

        info!("===========================================");
        info!("     Starting CCD Iterations");
        info!("===========================================");
        info!("Single-particle states: {}", self.system.n_sp());
        info!("Occupied states: {}", self.system.num_occ());
        info!("Unoccupied states: {}", self.system.num_unocc());
        info!("Max iterations: {}", self.max_iterations);
        info!("Convergence threshold: {:.2e}", self.tolerance);
        if self.mixing > 0.0 {
            info!("Amplitude mixing: {:.3}", self.mixing);
        }

        let mut t2 = initial_amplitudes(self.system)?;
        let mbpt2_energy = correlation_energy(self.system, &t2);
        info!("Initial energy (MBPT2): {:.12}", mbpt2_energy);
        info!("");
        info!("{:>5} {:>18} {:>18} {:>15}", "Iter", "E_CCD", "ΔE", "max|ΔT|");
        info!("{}", "-".repeat(60));

        let mut old_energy = mbpt2_energy;
        let mut energy_diff = f64::INFINITY;
        let mut history = vec![mbpt2_energy];

        for iteration in 1..=self.max_iterations {
            let new_t2 = update_amplitudes(self.system, &t2)?;
            let new_t2 = mix_amplitudes(new_t2, &t2, self.mixing);
            let amplitude_change = new_t2.max_abs_diff(&t2);
            t2 = new_t2;

            let new_energy = correlation_energy(self.system, &t2);
            let delta_e = new_energy - old_energy;
            energy_diff = delta_e.abs();
            history.push(new_energy);

            info!(
                "{:5} {:18.12} {:18.12} {:15.10}",
                iteration, new_energy, delta_e, amplitude_change
            );

            if !new_energy.is_finite() || !t2.is_finite() {
                warn!("Correlation energy diverged at iteration {}", iteration);
                debug!("Energy history: {:?}", history);
                self.correlation_energy = None;
                return Err(CcdError::Diverged {
                    iteration,
                    energy: new_energy,
                });
            }

            if energy_diff <= self.tolerance {
                info!("");
                info!("===========================================");
                info!("       CCD Converged!");
                info!("===========================================");
                info!("Final CCD correlation energy: {:.12}", new_energy);
                info!("Number of iterations: {}", iteration);
                info!("Final energy change: {:.3e}", energy_diff);
                info!("===========================================");

                self.correlation_energy = Some(new_energy);
                return Ok(CcdOutcome {
                    energy: new_energy,
                    status: ConvergenceStatus::Converged,
                    iterations: iteration,
                    energy_diff,
                    mbpt2_energy,
                    history,
                });
            }

            old_energy = new_energy;
        }

        let iterations = self.max_iterations;
        let energy = old_energy;
        warn!("");
        warn!("===========================================");
        warn!("       CCD NOT Converged");
        warn!("===========================================");
        warn!("Stopped after {} iterations", iterations);
        warn!("Last CCD correlation energy: {:.12}", energy);
        warn!("Last energy change: {:.3e}", energy_diff);
        warn!("Consider increasing max_iterations or enabling amplitude mixing");
        debug!("Energy history: {:?}", history);

        self.correlation_energy = Some(energy);
        Ok(CcdOutcome {
            energy,
            status: ConvergenceStatus::MaxIterationsExceeded,
            iterations,
            energy_diff,
            mbpt2_energy,
            history,
        })
    }

    /// Get the correlation energy
    pub fn get_correlation_energy(&self) -> Option<f64> {
        self.correlation_energy
    }
}

/// Run CCD without amplitude mixing.
pub fn solve_ccd(system: &CcdSystem, max_iterations: usize, tolerance: f64) -> Result<CcdOutcome> {
    CCD::new(system, max_iterations, tolerance).solve()
}
