//! Pairing model
//!
//! H = δ Σ_pσ p a†_pσ a_pσ − (g/2) Σ_pq P†_p P_q,   P†_p = a†_p+ a†_p−
//!
//! on `levels` doubly degenerate levels. Spin-orbital `2p` is level `p` spin
//! up and `2p + 1` is level `p` spin down. The only non-zero antisymmetrized
//! matrix elements couple a spin-paired bra to a spin-paired ket,
//! <p+ p−||q+ q−> = −g/2, and their antisymmetric partners.

use crate::error::{CcdError, Result};
use crate::system::CcdSystem;
use crate::tensor::Tensor4;
use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PairingModel {
    /// Number of doubly degenerate levels
    pub levels: usize,

    /// Number of particles; must be even and fill whole levels
    pub particles: usize,

    /// Level spacing δ
    pub delta: f64,

    /// Pairing strength g
    pub g: f64,
}

impl PairingModel {
    pub fn new(levels: usize, particles: usize, delta: f64, g: f64) -> Self {
        PairingModel {
            levels,
            particles,
            delta,
            g,
        }
    }

    pub fn n_sp(&self) -> usize {
        2 * self.levels
    }

    fn validate(&self) -> Result<()> {
        if self.levels == 0 {
            return Err(CcdError::EmptyBasis);
        }
        if self.particles % 2 != 0 {
            return Err(CcdError::InvalidConfig(format!(
                "pairing model needs an even particle number, got {}",
                self.particles
            )));
        }
        if self.particles > self.n_sp() {
            return Err(CcdError::FermiLevelOutOfRange {
                n_fermi: self.particles,
                n_sp: self.n_sp(),
            });
        }
        if !self.delta.is_finite() || !self.g.is_finite() {
            return Err(CcdError::NonFiniteInput {
                what: "pairing model parameters",
            });
        }
        Ok(())
    }

    /// Antisymmetrized two-body matrix elements <pq||rs>.
    pub fn tbme(&self) -> Result<Tensor4> {
        let n = self.n_sp();
        let mut v = Tensor4::zeros(n);
        let half_g = 0.5 * self.g;

        for p in 0..self.levels {
            for q in 0..self.levels {
                let (p_up, p_down) = (2 * p, 2 * p + 1);
                let (q_up, q_down) = (2 * q, 2 * q + 1);
                v.set(p_up, p_down, q_up, q_down, -half_g)?;
                v.set(p_down, p_up, q_up, q_down, half_g)?;
                v.set(p_up, p_down, q_down, q_up, half_g)?;
                v.set(p_down, p_up, q_down, q_up, -half_g)?;
            }
        }
        Ok(v)
    }

    /// Hartree-Fock single-particle energies ε_p = δ·level(p) + Σ_i <pi||pi>.
    pub fn sp_energies(&self, tbme: &Tensor4) -> DVector<f64> {
        DVector::from_fn(self.n_sp(), |p, _| {
            let level = (p / 2) as f64;
            let mean_field: f64 = (0..self.particles).map(|i| tbme[(p, i, p, i)]).sum();
            self.delta * level + mean_field
        })
    }

    /// Energy of the filled reference state.
    ///
    /// E_ref = Σ_i h_ii + 1/2 Σ_ij <ij||ij>
    pub fn reference_energy(&self) -> Result<f64> {
        self.validate()?;
        let tbme = self.tbme()?;
        let one_body: f64 = (0..self.particles)
            .map(|i| self.delta * (i / 2) as f64)
            .sum();
        let mut two_body = 0.0;
        for i in 0..self.particles {
            for j in 0..self.particles {
                two_body += 0.5 * tbme[(i, j, i, j)];
            }
        }
        Ok(one_body + two_body)
    }

    /// Build the CCD input with the Fermi level at `particles`.
    pub fn build(&self) -> Result<CcdSystem> {
        self.validate()?;
        let tbme = self.tbme()?;
        let sp_energies = self.sp_energies(&tbme);
        debug!("Pairing model single-particle energies: {:?}", sp_energies.as_slice());
        CcdSystem::new(self.n_sp(), self.particles, sp_energies, tbme)
    }
}
