//! Error types for CCD calculations

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CcdError {
    /// A single-particle label (or a flattened offset) lies outside the basis.
    #[error("index {label} out of range for a basis of {n_sp} states")]
    IndexOutOfRange { label: usize, n_sp: usize },

    #[error("basis must contain at least one single-particle state")]
    EmptyBasis,

    #[error("Fermi level {n_fermi} outside [0, {n_sp}]")]
    FermiLevelOutOfRange { n_fermi: usize, n_sp: usize },

    #[error("{what}: expected length {expected}, found {found}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("{what} contains non-finite values")]
    NonFiniteInput { what: &'static str },

    /// ε_i + ε_j − ε_a − ε_b vanished for the named excitation.
    #[error(
        "degenerate energy denominator {denominator:e} for (i, j, a, b) = ({i}, {j}, {a}, {b})"
    )]
    DegenerateDenominator {
        i: usize,
        j: usize,
        a: usize,
        b: usize,
        denominator: f64,
    },

    #[error(
        "CCD not converged after {iterations} iterations (last energy {energy:.12}, |ΔE| = {energy_diff:e})"
    )]
    NotConverged {
        iterations: usize,
        energy: f64,
        energy_diff: f64,
    },

    /// The iteration produced a non-finite energy or amplitude.
    #[error("CCD iteration diverged at iteration {iteration} (energy {energy})")]
    Diverged { iteration: usize, energy: f64 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, CcdError>;
