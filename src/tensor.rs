//! Dense four-index tensors over a single-particle basis
//!
//! Both the two-body matrix elements and the T2 amplitudes live in a flat
//! `Vec<f64>` of length `n_sp^4`, addressed in row-major (mixed-radix) order:
//!
//! offset(p, q, r, s) = p·n³ + q·n² + r·n + s
//!
//! The free functions [`index`] and [`decode`] are the checked bijection
//! between label tuples and offsets; [`Tensor4`] wraps the storage so that
//! every access from outside the hot loops goes through that check.

use crate::error::{CcdError, Result};
use std::ops::Index;

/// Map four single-particle labels to a flat offset.
///
/// Every label must lie in `[0, n_sp)`.
pub fn index(p: usize, q: usize, r: usize, s: usize, n_sp: usize) -> Result<usize> {
    for label in [p, q, r, s] {
        if label >= n_sp {
            return Err(CcdError::IndexOutOfRange { label, n_sp });
        }
    }
    Ok(((p * n_sp + q) * n_sp + r) * n_sp + s)
}

/// Inverse of [`index`].
pub fn decode(offset: usize, n_sp: usize) -> Result<(usize, usize, usize, usize)> {
    if offset >= n_sp.pow(4) {
        return Err(CcdError::IndexOutOfRange {
            label: offset,
            n_sp,
        });
    }
    let s = offset % n_sp;
    let r = (offset / n_sp) % n_sp;
    let q = (offset / (n_sp * n_sp)) % n_sp;
    let p = offset / (n_sp * n_sp * n_sp);
    Ok((p, q, r, s))
}

/// Four-index real tensor of shape `n_sp × n_sp × n_sp × n_sp`.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor4 {
    n_sp: usize,
    data: Vec<f64>,
}

impl Tensor4 {
    pub fn zeros(n_sp: usize) -> Self {
        Tensor4 {
            n_sp,
            data: vec![0.0; n_sp.pow(4)],
        }
    }

    /// Wrap flattened data, checking its length against `n_sp^4`.
    pub fn from_vec(n_sp: usize, data: Vec<f64>) -> Result<Self> {
        let expected = n_sp.pow(4);
        if data.len() != expected {
            return Err(CcdError::LengthMismatch {
                what: "four-index tensor",
                expected,
                found: data.len(),
            });
        }
        Ok(Tensor4 { n_sp, data })
    }

    pub fn n_sp(&self) -> usize {
        self.n_sp
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn get(&self, p: usize, q: usize, r: usize, s: usize) -> Result<f64> {
        Ok(self.data[index(p, q, r, s, self.n_sp)?])
    }

    pub fn set(&mut self, p: usize, q: usize, r: usize, s: usize, value: f64) -> Result<()> {
        let offset = index(p, q, r, s, self.n_sp)?;
        self.data[offset] = value;
        Ok(())
    }

    /// Write `value` at a precomputed offset.
    pub(crate) fn set_offset(&mut self, offset: usize, value: f64) {
        self.data[offset] = value;
    }

    #[inline]
    pub(crate) fn offset(&self, p: usize, q: usize, r: usize, s: usize) -> usize {
        debug_assert!(p < self.n_sp && q < self.n_sp && r < self.n_sp && s < self.n_sp);
        ((p * self.n_sp + q) * self.n_sp + r) * self.n_sp + s
    }

    /// Largest absolute element-wise difference between two tensors of the same shape.
    pub fn max_abs_diff(&self, other: &Tensor4) -> f64 {
        self.data
            .iter()
            .zip(other.data.iter())
            .map(|(x, y)| (x - y).abs())
            .fold(0.0, f64::max)
    }

    /// Weighted average `(1 − weight)·self + weight·other`.
    pub fn blend(&self, other: &Tensor4, weight: f64) -> Tensor4 {
        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(x, y)| (1.0 - weight) * x + weight * y)
            .collect();
        Tensor4 {
            n_sp: self.n_sp,
            data,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|x| x.is_finite())
    }
}

/// Unchecked-by-`Result` element access for contraction loops.
///
/// Panics on out-of-range labels, like slice indexing.
impl Index<(usize, usize, usize, usize)> for Tensor4 {
    type Output = f64;

    #[inline]
    fn index(&self, (p, q, r, s): (usize, usize, usize, usize)) -> &f64 {
        assert!(
            p < self.n_sp && q < self.n_sp && r < self.n_sp && s < self.n_sp,
            "tensor label out of range: ({p}, {q}, {r}, {s}) for n_sp = {}",
            self.n_sp
        );
        &self.data[self.offset(p, q, r, s)]
    }
}
