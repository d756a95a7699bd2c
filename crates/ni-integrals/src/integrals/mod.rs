//! Quadrature rules.
//!
//! Provides composite midpoint, trapezoidal, and Simpson rules, and
//! composite Gaussian quadrature over the Legendre, Chebyshev, Gegenbauer,
//! Jacobi, and Exponential families.

pub mod cache;
pub mod composite;
pub mod gaussian;
pub mod gaussianquadratures;

use std::fmt;

use ni_core::Result;

use crate::integrand::Integrand;
use crate::partition::Partition;

pub use composite::{Midpoint, Simpson, Trapezoidal};
pub use gaussian::GaussianRule;

/// A quadrature rule applied over a partition.
///
/// The result type is the integrand's value type, real or complex.
pub trait Integrator {
    /// Integrate `f` over `partition`, summing subinterval contributions
    /// left to right.
    fn integrate<I: Integrand>(&self, f: &I, partition: &Partition) -> Result<I::Output>;
}

/// Choice of rule.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rule {
    /// Composite midpoint rule.
    Midpoint,
    /// Composite trapezoidal rule.
    Trapezoidal,
    /// Composite Simpson rule.
    Simpson,
    /// Composite Gaussian rule.
    Gaussian(GaussianRule),
}

impl Rule {
    /// Gauss-Legendre rule with `number_of_nodes` points.
    pub fn gauss_legendre(number_of_nodes: usize) -> Result<Self> {
        GaussianRule::legendre(number_of_nodes).map(Rule::Gaussian)
    }

    /// Check the configuration-time invariants of the rule.
    pub fn validate(&self) -> Result<()> {
        match self {
            Rule::Gaussian(g) => g.validate(),
            _ => Ok(()),
        }
    }

    /// Theoretical `(exact degree, convergence order)` of the rule.
    ///
    /// For Gaussian rules this is `(2N − 1, 2N)`.
    pub fn nominal_orders(&self) -> (u32, u32) {
        match self {
            Rule::Midpoint | Rule::Trapezoidal => (1, 2),
            Rule::Simpson => (3, 4),
            Rule::Gaussian(g) => {
                let n = g.number_of_nodes() as u32;
                ((2 * n).saturating_sub(1), 2 * n)
            }
        }
    }
}

impl From<GaussianRule> for Rule {
    fn from(g: GaussianRule) -> Self {
        Rule::Gaussian(g)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Midpoint => f.write_str("Midpoint"),
            Rule::Trapezoidal => f.write_str("Trapezoidal"),
            Rule::Simpson => f.write_str("Simpson"),
            Rule::Gaussian(g) => write!(
                f,
                "Gaussian({} nodes, {}, alpha = {}, beta = {})",
                g.number_of_nodes(),
                g.family(),
                g.alpha(),
                g.beta()
            ),
        }
    }
}

impl Integrator for Rule {
    fn integrate<I: Integrand>(&self, f: &I, partition: &Partition) -> Result<I::Output> {
        match self {
            Rule::Midpoint => Midpoint.integrate(f, partition),
            Rule::Trapezoidal => Trapezoidal.integrate(f, partition),
            Rule::Simpson => Simpson.integrate(f, partition),
            Rule::Gaussian(g) => g.integrate(f, partition),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ni_core::Real;

    #[test]
    fn dispatch_matches_direct_rules() {
        let p = Partition::new(0.0, 2.0, 3).unwrap();
        let f = |x: Real| x.exp();
        assert_eq!(
            Rule::Simpson.integrate(&f, &p).unwrap(),
            Simpson.integrate(&f, &p).unwrap()
        );
        assert_eq!(
            Rule::Midpoint.integrate(&f, &p).unwrap(),
            Midpoint.integrate(&f, &p).unwrap()
        );
        let g = GaussianRule::legendre(4).unwrap();
        assert_eq!(
            Rule::from(g).integrate(&f, &p).unwrap(),
            g.integrate(&f, &p).unwrap()
        );
    }

    #[test]
    fn nominal_orders() {
        assert_eq!(Rule::Midpoint.nominal_orders(), (1, 2));
        assert_eq!(Rule::Trapezoidal.nominal_orders(), (1, 2));
        assert_eq!(Rule::Simpson.nominal_orders(), (3, 4));
        assert_eq!(Rule::gauss_legendre(5).unwrap().nominal_orders(), (9, 10));
    }

    #[test]
    fn display() {
        assert_eq!(Rule::Simpson.to_string(), "Simpson");
        assert_eq!(
            Rule::gauss_legendre(2).unwrap().to_string(),
            "Gaussian(2 nodes, Legendre, alpha = 1, beta = 1)"
        );
    }
}
