//! Antisymmetrization (permutation) operators
//!
//! P(x, y) f = f(x, y) − f(y, x)
//!
//! P(ij|ab) f = P(i, j) P(a, b) f
//!            = f(i, j, a, b) − f(j, i, a, b) − f(i, j, b, a) + f(j, i, b, a)
//!
//! These act on expressions, not numbers: the closure is evaluated once per
//! index assignment and the results are combined with signs.

/// Apply P(x, y) to a two-index expression.
#[inline]
pub fn p_pair<F>(x: usize, y: usize, f: F) -> f64
where
    F: Fn(usize, usize) -> f64,
{
    f(x, y) - f(y, x)
}

/// Apply P(ij|ab) to a four-index expression `f(i, j, a, b)`.
#[inline]
pub fn p_pair_pair<F>(i: usize, j: usize, a: usize, b: usize, f: F) -> f64
where
    F: Fn(usize, usize, usize, usize) -> f64,
{
    p_pair(i, j, |i, j| p_pair(a, b, |a, b| f(i, j, a, b)))
}
