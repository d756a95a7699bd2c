//! # numint
//!
//! Definite integrals of real- and complex-valued functions over a finite
//! interval, with composite Newton-Cotes rules, composite Gaussian
//! quadrature over classical orthogonal-polynomial families, and an
//! empirical estimator of a rule's polynomial and convergence orders.
//!
//! This crate is a **façade** that re-exports the workspace crates.
//! Application code should depend on this crate rather than on the
//! individual `ni-*` crates.
//!
//! ## Quick start
//!
//! ```rust
//! use numint::prelude::*;
//!
//! let q = Integration::builder(-1.0, 1.0)
//!     .with_gaussian(3, PolynomialFamily::Legendre)
//!     .build(|x: f64| x * x)
//!     .unwrap();
//! assert!((q.compute_integral().unwrap() - 2.0 / 3.0).abs() < 1e-14);
//!
//! let orders = estimate_orders(&q).unwrap();
//! assert_eq!((orders.polynomial_order, orders.convergence_order), (5, 6));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, and error definitions.
pub use ni_core as core;

/// Quadrature rules, node tables, configurations, and order estimation.
pub use ni_integrals as integrals;

/// The items most programs need.
pub mod prelude {
    pub use ni_core::{Error, Real, Result, Size};
    pub use ni_integrals::{
        estimate_orders, estimate_polynomial_order, Fallible, GaussianRule, Integrand,
        Integration, IntegrationBuilder, Integrator, OrderPair, PolynomialFamily, Rule,
    };
}
