//! CCD (Coupled Cluster Doubles) implementation module
//!
//! This module provides the CCD method for calculating the ground-state
//! correlation energy of a many-body system from its antisymmetrized two-body
//! matrix elements and single-particle energies.
//!
//! # Overview
//!
//! CCD uses an exponential ansatz restricted to double excitations:
//!
//! |Ψ⟩ = exp(T₂) |Φ₀⟩
//!
//! The T₂ amplitudes are found by fixed-point iteration of the CCD amplitude
//! equations, starting from the MBPT2 guess. The correlation energy is
//!
//! E = 1/4 Σ_ijab ⟨ij||ab⟩ t_ij^ab
//!
//! # Usage
//!
//! ```rust,ignore
//! use ccd::models::PairingModel;
//! use ccd::CCD;
//!
//! let system = PairingModel::new(4, 4, 1.0, 0.5).build()?;
//! let outcome = CCD::new(&system, 200, 1e-5).solve()?;
//! let correlation_energy = outcome.converged()?;
//! ```

mod amplitudes;
mod ccd;

pub use amplitudes::{correlation_energy, initial_amplitudes, mix_amplitudes, update_amplitudes};
pub use ccd::{
    solve_ccd, CcdOutcome, ConvergenceStatus, CCD, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE,
};
