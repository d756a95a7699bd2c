//! # ni-integrals
//!
//! Definite integrals of real- and complex-valued functions over a finite
//! interval: composite midpoint, trapezoidal and Simpson rules, composite
//! Gaussian quadrature over the Legendre, Chebyshev, Gegenbauer, Jacobi and
//! Exponential families, and an estimator that measures a rule's exact
//! polynomial degree and convergence order empirically.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Quadrature rules and Gaussian node/weight tables.
pub mod integrals;

/// Integrand adapter and monomial probes.
pub mod integrand;

/// Integration configurations and their builder.
pub mod integration;

/// Polynomial and convergence order estimation.
pub mod order;

/// Uniform partitions of an interval.
pub mod partition;

/// Real and complex result types.
pub mod scalar;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use integrals::cache::NodeTableCache;
pub use integrals::gaussianquadratures::{jacobi_nodes_weights, GaussianQuadrature, PolynomialFamily};
pub use integrals::{GaussianRule, Integrator, Midpoint, Rule, Simpson, Trapezoidal};
pub use integrand::{Fallible, Integrand, Monomial};
pub use integration::{Integration, IntegrationBuilder};
pub use order::{
    estimate_orders, estimate_polynomial_order, EstimatorSettings, OrderEstimator, OrderPair,
};
pub use partition::{partition, Partition};
pub use scalar::{close, Scalar};
