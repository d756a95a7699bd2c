//! Composite Newton-Cotes rules: midpoint, trapezoidal, Simpson.
//!
//! Each rule applies a fixed formula to every subinterval `[a, b]` of the
//! partition and sums the contributions left to right.

use ni_core::Result;
use num_traits::Zero;

use super::Integrator;
use crate::integrand::Integrand;
use crate::partition::Partition;

// ── Midpoint ─────────────────────────────────────────────────────────────────

/// `(b − a) f((a + b)/2)`. Exact through degree 1, convergence order 2.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Midpoint;

impl Integrator for Midpoint {
    fn integrate<I: Integrand>(&self, f: &I, partition: &Partition) -> Result<I::Output> {
        partition
            .subintervals()
            .try_fold(<I::Output as Zero>::zero(), |acc, (a, b)| {
                Ok(acc + f.evaluate(0.5 * (a + b))? * (b - a))
            })
    }
}

// ── Trapezoidal ──────────────────────────────────────────────────────────────

/// `(b − a)/2 (f(a) + f(b))`. Exact through degree 1, convergence order 2.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Trapezoidal;

impl Integrator for Trapezoidal {
    fn integrate<I: Integrand>(&self, f: &I, partition: &Partition) -> Result<I::Output> {
        partition
            .subintervals()
            .try_fold(<I::Output as Zero>::zero(), |acc, (a, b)| {
                Ok(acc + (f.evaluate(a)? + f.evaluate(b)?) * (0.5 * (b - a)))
            })
    }
}

// ── Simpson ──────────────────────────────────────────────────────────────────

/// `(b − a)/6 (f(a) + 4 f((a + b)/2) + f(b))`. Exact through degree 3,
/// convergence order 4.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Simpson;

impl Integrator for Simpson {
    fn integrate<I: Integrand>(&self, f: &I, partition: &Partition) -> Result<I::Output> {
        partition
            .subintervals()
            .try_fold(<I::Output as Zero>::zero(), |acc, (a, b)| {
                let fa = f.evaluate(a)?;
                let fm = f.evaluate(0.5 * (a + b))?;
                let fb = f.evaluate(b)?;
                Ok(acc + (fa + fm * 4.0 + fb) * ((b - a) / 6.0))
            })
    }
}
