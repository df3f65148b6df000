//! Validated input for a CCD calculation
//!
//! A [`CcdSystem`] bundles the basis size, the Fermi level, the single-particle
//! energies and the antisymmetrized two-body matrix elements <pq||rs>. It is
//! built once, checked once, and only read afterwards.

use crate::error::{CcdError, Result};
use crate::tensor::Tensor4;
use nalgebra::DVector;
use std::ops::Range;

#[derive(Debug, Clone)]
pub struct CcdSystem {
    n_sp: usize,
    n_fermi: usize,
    sp_energies: DVector<f64>,
    tbme: Tensor4,
}

impl CcdSystem {
    /// Validate and assemble the inputs.
    ///
    /// States `0..n_fermi` are occupied in the reference, `n_fermi..n_sp` are
    /// unoccupied. The TBME tensor is assumed antisymmetric in its bra and
    /// ket pairs; that is not checked here.
    pub fn new(
        n_sp: usize,
        n_fermi: usize,
        sp_energies: DVector<f64>,
        tbme: Tensor4,
    ) -> Result<Self> {
        if n_sp == 0 {
            return Err(CcdError::EmptyBasis);
        }
        if n_fermi > n_sp {
            return Err(CcdError::FermiLevelOutOfRange { n_fermi, n_sp });
        }
        if sp_energies.len() != n_sp {
            return Err(CcdError::LengthMismatch {
                what: "single-particle energies",
                expected: n_sp,
                found: sp_energies.len(),
            });
        }
        if tbme.n_sp() != n_sp {
            return Err(CcdError::LengthMismatch {
                what: "two-body matrix elements",
                expected: n_sp.pow(4),
                found: tbme.as_slice().len(),
            });
        }
        if !sp_energies.iter().all(|e| e.is_finite()) {
            return Err(CcdError::NonFiniteInput {
                what: "single-particle energies",
            });
        }
        if !tbme.is_finite() {
            return Err(CcdError::NonFiniteInput {
                what: "two-body matrix elements",
            });
        }

        Ok(CcdSystem {
            n_sp,
            n_fermi,
            sp_energies,
            tbme,
        })
    }

    /// Convenience constructor from flat lists, as produced by external loaders.
    pub fn from_flat(
        n_sp: usize,
        n_fermi: usize,
        sp_energies: Vec<f64>,
        tbme: Vec<f64>,
    ) -> Result<Self> {
        let tbme = Tensor4::from_vec(n_sp, tbme)?;
        Self::new(n_sp, n_fermi, DVector::from_vec(sp_energies), tbme)
    }

    pub fn n_sp(&self) -> usize {
        self.n_sp
    }

    pub fn n_fermi(&self) -> usize {
        self.n_fermi
    }

    pub fn num_occ(&self) -> usize {
        self.n_fermi
    }

    pub fn num_unocc(&self) -> usize {
        self.n_sp - self.n_fermi
    }

    pub fn occupied(&self) -> Range<usize> {
        0..self.n_fermi
    }

    pub fn unoccupied(&self) -> Range<usize> {
        self.n_fermi..self.n_sp
    }

    pub fn sp_energies(&self) -> &DVector<f64> {
        &self.sp_energies
    }

    pub fn tbme(&self) -> &Tensor4 {
        &self.tbme
    }

    /// Energy denominator ε_i + ε_j − ε_a − ε_b.
    ///
    /// Fails with [`CcdError::DegenerateDenominator`] when it lies within
    /// machine epsilon of zero, relative to the size of the four energies.
    pub fn denominator(&self, i: usize, j: usize, a: usize, b: usize) -> Result<f64> {
        let e = &self.sp_energies;
        let denominator = e[i] + e[j] - e[a] - e[b];
        let scale = (e[i].abs() + e[j].abs() + e[a].abs() + e[b].abs()).max(1.0);
        if denominator.abs() <= f64::EPSILON * scale {
            return Err(CcdError::DegenerateDenominator {
                i,
                j,
                a,
                b,
                denominator,
            });
        }
        Ok(denominator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(n_sp: usize, n_fermi: usize) -> Result<CcdSystem> {
        let energies = (0..n_sp).map(|p| p as f64).collect();
        CcdSystem::from_flat(n_sp, n_fermi, energies, vec![0.0; n_sp.pow(4)])
    }

    #[test]
    fn test_partition() {
        let system = flat(6, 2).unwrap();
        assert_eq!(system.occupied(), 0..2);
        assert_eq!(system.unoccupied(), 2..6);
        assert_eq!(system.num_occ(), 2);
        assert_eq!(system.num_unocc(), 4);
    }

    #[test]
    fn test_fermi_level_bounds() {
        assert!(flat(4, 0).is_ok());
        assert!(flat(4, 4).is_ok());
        assert_eq!(
            flat(4, 5).unwrap_err(),
            CcdError::FermiLevelOutOfRange { n_fermi: 5, n_sp: 4 }
        );
    }

    #[test]
    fn test_length_mismatches() {
        let err = CcdSystem::from_flat(4, 2, vec![0.0; 3], vec![0.0; 256]).unwrap_err();
        assert!(matches!(err, CcdError::LengthMismatch { expected: 4, found: 3, .. }));

        let err = CcdSystem::from_flat(4, 2, vec![0.0; 4], vec![0.0; 200]).unwrap_err();
        assert!(matches!(err, CcdError::LengthMismatch { expected: 256, found: 200, .. }));

        assert_eq!(
            CcdSystem::from_flat(0, 0, vec![], vec![]).unwrap_err(),
            CcdError::EmptyBasis
        );
    }

    #[test]
    fn test_rejects_non_finite() {
        let err = CcdSystem::from_flat(2, 1, vec![0.0, f64::NAN], vec![0.0; 16]).unwrap_err();
        assert!(matches!(err, CcdError::NonFiniteInput { .. }));
    }

    #[test]
    fn test_denominator() {
        let system = CcdSystem::from_flat(4, 2, vec![-1.0, -0.5, 0.5, 1.0], vec![0.0; 256])
            .unwrap();
        assert_eq!(system.denominator(0, 1, 2, 3).unwrap(), -3.0);

        let degenerate =
            CcdSystem::from_flat(4, 2, vec![0.5, 0.5, 0.5, 0.5], vec![0.0; 256]).unwrap();
        assert!(matches!(
            degenerate.denominator(0, 1, 2, 3),
            Err(CcdError::DegenerateDenominator { i: 0, j: 1, a: 2, b: 3, .. })
        ));
    }

    #[test]
    fn test_denominator_degeneracy_scales_with_energies() {
        // cancels exactly in real arithmetic, leaves ~1e-13 in floating point
        let energies = vec![1000.1, 1000.2, 1000.0, 1000.3000000000001];
        let system = CcdSystem::from_flat(4, 2, energies, vec![0.0; 256]).unwrap();
        match system.denominator(0, 1, 2, 3) {
            Err(CcdError::DegenerateDenominator { denominator, .. }) => {
                assert!(denominator.abs() < 1e-12);
            }
            other => panic!("expected DegenerateDenominator, got {:?}", other),
        }

        // small but genuine gaps at the same scale are kept
        let energies = vec![1000.0, 1000.0, 1000.0, 1000.001];
        let system = CcdSystem::from_flat(4, 2, energies, vec![0.0; 256]).unwrap();
        assert!((system.denominator(0, 1, 2, 3).unwrap() + 0.001).abs() < 1e-9);
    }
}
