//! Amplitude equations for CCD
//!
//! Storage convention: `T2[a, b, i, j]` holds t_ij^ab and `TBME[p, q, r, s]`
//! holds <pq||rs>. Every function here takes immutable inputs and returns a
//! freshly allocated tensor; nothing is updated in place.

use crate::antisym::{p_pair, p_pair_pair};
use crate::error::Result;
use crate::system::CcdSystem;
use crate::tensor::{index, Tensor4};
use rayon::prelude::*;

/// Correlation energy
///
/// E = 1/4 Σ_ij Σ_ab <ij||ab> t_ij^ab
///
/// Summed sequentially in a fixed order so repeated runs agree bit for bit.
pub fn correlation_energy(system: &CcdSystem, t2: &Tensor4) -> f64 {
    let v = system.tbme();
    let mut energy = 0.0;
    for i in system.occupied() {
        for j in system.occupied() {
            for a in system.unoccupied() {
                for b in system.unoccupied() {
                    energy += 0.25 * v[(i, j, a, b)] * t2[(a, b, i, j)];
                }
            }
        }
    }
    energy
}

/// Zeroth-order (MBPT2) amplitudes
///
/// t_ij^ab = <ab||ij> / (ε_i + ε_j − ε_a − ε_b)
///
/// Entries outside the occupied-pair/unoccupied-pair block stay zero.
pub fn initial_amplitudes(system: &CcdSystem) -> Result<Tensor4> {
    let v = system.tbme();
    let values = for_each_excitation(system, |i, j, a, b| {
        let denominator = system.denominator(i, j, a, b)?;
        Ok(v[(a, b, i, j)] / denominator)
    })?;
    Ok(scatter(system.n_sp(), values))
}

/// One sweep of the CCD amplitude equations.
///
/// For every occupied pair (i, j) and unoccupied pair (a, b):
///
/// ```text
/// D_ij^ab t_ij^ab = <ab||ij>
///     + 1/2 Σ_cd <ab||cd> t_ij^cd
///     + 1/2 Σ_kl <kl||ij> t_kl^ab
///     + P(ij|ab) Σ_kc <kb||cj> t_ik^ac
///     + 1/4 Σ_klcd <kl||cd> t_ij^cd t_kl^ab
///     + P(ij) Σ_klcd <kl||cd> t_ik^ac t_jl^bd
///     − 1/2 P(ij) Σ_klcd <kl||cd> t_ik^dc t_lj^ab
///     − 1/2 P(ab) Σ_klcd <kl||cd> t_lk^ac t_ij^db
/// ```
///
/// with D_ij^ab = ε_i + ε_j − ε_a − ε_b. The right-hand side only reads
/// `t2_old`, so output cells are computed independently in parallel.
pub fn update_amplitudes(system: &CcdSystem, t2_old: &Tensor4) -> Result<Tensor4> {
    let values = for_each_excitation(system, |i, j, a, b| {
        let denominator = system.denominator(i, j, a, b)?;
        Ok(numerator(system, t2_old, i, j, a, b) / denominator)
    })?;
    Ok(scatter(system.n_sp(), values))
}

fn numerator(system: &CcdSystem, t: &Tensor4, i: usize, j: usize, a: usize, b: usize) -> f64 {
    let v = system.tbme();
    let occ = system.occupied();
    let unocc = system.unoccupied();

    let mut sum = v[(a, b, i, j)];

    // particle-particle ladder
    for c in unocc.clone() {
        for d in unocc.clone() {
            sum += 0.5 * v[(a, b, c, d)] * t[(c, d, i, j)];
        }
    }

    // hole-hole ladder
    for k in occ.clone() {
        for l in occ.clone() {
            sum += 0.5 * v[(k, l, i, j)] * t[(a, b, k, l)];
        }
    }

    // particle-hole ring
    sum += p_pair_pair(i, j, a, b, |i, j, a, b| {
        let mut ring = 0.0;
        for k in occ.clone() {
            for c in unocc.clone() {
                ring += v[(k, b, c, j)] * t[(a, c, i, k)];
            }
        }
        ring
    });

    sum += 0.25
        * sum_klcd(system, |k, l, c, d| {
            v[(k, l, c, d)] * t[(c, d, i, j)] * t[(a, b, k, l)]
        });

    sum += p_pair(i, j, |i, j| {
        sum_klcd(system, |k, l, c, d| {
            v[(k, l, c, d)] * t[(a, c, i, k)] * t[(b, d, j, l)]
        })
    });

    sum -= 0.5
        * p_pair(i, j, |i, j| {
            sum_klcd(system, |k, l, c, d| {
                v[(k, l, c, d)] * t[(d, c, i, k)] * t[(a, b, l, j)]
            })
        });

    sum -= 0.5
        * p_pair(a, b, |a, b| {
            sum_klcd(system, |k, l, c, d| {
                v[(k, l, c, d)] * t[(a, c, l, k)] * t[(d, b, i, j)]
            })
        });

    sum
}

/// Σ over k, l occupied and c, d unoccupied.
fn sum_klcd<F>(system: &CcdSystem, f: F) -> f64
where
    F: Fn(usize, usize, usize, usize) -> f64,
{
    let mut sum = 0.0;
    for k in system.occupied() {
        for l in system.occupied() {
            for c in system.unoccupied() {
                for d in system.unoccupied() {
                    sum += f(k, l, c, d);
                }
            }
        }
    }
    sum
}

/// Evaluate `f(i, j, a, b)` on every occupied/unoccupied excitation.
///
/// Occupied pairs are distributed over the rayon pool; each worker returns
/// its own `(offset, value)` list. The first error aborts the whole sweep.
fn for_each_excitation<F>(system: &CcdSystem, f: F) -> Result<Vec<(usize, f64)>>
where
    F: Fn(usize, usize, usize, usize) -> Result<f64> + Sync,
{
    let n = system.n_sp();
    let pairs: Vec<(usize, usize)> = system
        .occupied()
        .flat_map(|i| system.occupied().map(move |j| (i, j)))
        .collect();

    let chunks: Vec<Vec<(usize, f64)>> = pairs
        .par_iter()
        .map(|&(i, j)| -> Result<Vec<(usize, f64)>> {
            let mut local_results = Vec::with_capacity(system.num_unocc().pow(2));
            for a in system.unoccupied() {
                for b in system.unoccupied() {
                    local_results.push((index(a, b, i, j, n)?, f(i, j, a, b)?));
                }
            }
            Ok(local_results)
        })
        .collect::<Result<_>>()?;

    Ok(chunks.into_iter().flatten().collect())
}

fn scatter(n_sp: usize, values: Vec<(usize, f64)>) -> Tensor4 {
    let mut t2 = Tensor4::zeros(n_sp);
    for (offset, value) in values {
        t2.set_offset(offset, value);
    }
    t2
}

/// Linear damping of an amplitude update: (1 − α)·new + α·old.
pub fn mix_amplitudes(t2_new: Tensor4, t2_old: &Tensor4, mixing: f64) -> Tensor4 {
    if mixing == 0.0 {
        return t2_new;
    }
    t2_new.blend(t2_old, mixing)
}
