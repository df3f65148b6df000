//! Build CCD input systems from configuration

use crate::config::{SystemConfig, TbmeEntry};
use crate::error::Result;
use crate::system::CcdSystem;
use crate::tensor::Tensor4;
use nalgebra::DVector;
use tracing::info;

/// Build the validated system described by the configuration.
pub fn build_system(config: &SystemConfig) -> Result<CcdSystem> {
    match config {
        SystemConfig::Pairing(model) => {
            info!(
                "Building pairing model: {} levels, {} particles, δ = {}, g = {}",
                model.levels, model.particles, model.delta, model.g
            );
            model.build()
        }
        SystemConfig::Explicit {
            n_sp,
            n_fermi,
            sp_energies,
            tbme,
        } => {
            info!(
                "Building explicit system: {} states, Fermi level {}, {} matrix elements",
                n_sp,
                n_fermi,
                tbme.len()
            );
            let tensor = explicit_tbme(*n_sp, tbme)?;
            CcdSystem::new(
                *n_sp,
                *n_fermi,
                DVector::from_vec(sp_energies.clone()),
                tensor,
            )
        }
    }
}

/// Expand listed matrix elements into a full antisymmetric tensor.
///
/// Each entry <pq||rs> = v also sets <qp||rs> = <pq||sr> = −v,
/// <qp||sr> = v, and the same four elements of <rs||pq>. Later entries
/// overwrite earlier ones.
pub fn explicit_tbme(n_sp: usize, entries: &[TbmeEntry]) -> Result<Tensor4> {
    let mut v = Tensor4::zeros(n_sp);
    for &TbmeEntry(p, q, r, s, value) in entries {
        for ((p, q), (r, s)) in [((p, q), (r, s)), ((r, s), (p, q))] {
            v.set(p, q, r, s, value)?;
            v.set(q, p, r, s, -value)?;
            v.set(p, q, s, r, -value)?;
            v.set(q, p, s, r, value)?;
        }
    }
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CcdError;
    use crate::models::PairingModel;

    #[test]
    fn test_explicit_tbme_fills_partners() {
        let v = explicit_tbme(4, &[TbmeEntry(0, 1, 2, 3, -0.2)]).unwrap();
        assert_eq!(v[(0, 1, 2, 3)], -0.2);
        assert_eq!(v[(1, 0, 2, 3)], 0.2);
        assert_eq!(v[(0, 1, 3, 2)], 0.2);
        assert_eq!(v[(1, 0, 3, 2)], -0.2);
        assert_eq!(v[(2, 3, 0, 1)], -0.2);
        assert_eq!(v[(3, 2, 1, 0)], -0.2);
        assert_eq!(v[(0, 2, 1, 3)], 0.0);
    }

    #[test]
    fn test_explicit_tbme_rejects_bad_labels() {
        let err = explicit_tbme(4, &[TbmeEntry(0, 1, 2, 4, 1.0)]).unwrap_err();
        assert_eq!(err, CcdError::IndexOutOfRange { label: 4, n_sp: 4 });
    }

    #[test]
    fn test_build_system_variants() {
        let pairing = build_system(&SystemConfig::Pairing(PairingModel::new(2, 2, 1.0, 0.5)))
            .unwrap();
        assert_eq!((pairing.n_sp(), pairing.n_fermi()), (4, 2));

        let explicit = build_system(&SystemConfig::Explicit {
            n_sp: 4,
            n_fermi: 2,
            sp_energies: vec![-1.0, -1.0, 1.0],
            tbme: vec![],
        });
        assert!(matches!(explicit, Err(CcdError::LengthMismatch { .. })));
    }
}
