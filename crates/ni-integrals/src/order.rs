//! Empirical order estimation.
//!
//! The estimator probes a configured rule with monomial integrands `xᵏ`
//! and compares each result to its closed form:
//!
//! * the **polynomial order** is the highest degree `k` integrated exactly
//!   (absolute error below the tolerance) on a single subinterval;
//! * the **convergence order** is the slope `p` of `error ~ hᵖ`, measured
//!   from two runs at a coarse and a fine subdivision with degree
//!   `polynomial_order + 1`, which the rule cannot integrate exactly.
//!
//! Estimation never modifies the configuration it is given: every probe is
//! a fresh [`Integration`] built from a copy of its rule.

use log::{debug, trace, warn};
use ni_core::{ensure, fail, Real, Result, Size};

use crate::integrals::Rule;
use crate::integrand::{Integrand, Monomial};
use crate::integration::Integration;
use crate::scalar::Scalar;

/// Interval on which [`estimate_orders`] measures both orders.
pub const PROBE_BEGIN: Real = 0.0;
/// See [`PROBE_BEGIN`].
pub const PROBE_END: Real = 1.0;

/// `(polynomial_order, convergence_order)` of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrderPair {
    /// Highest exactly integrated polynomial degree.
    pub polynomial_order: u32,
    /// Empirical exponent of the error in the step size.
    pub convergence_order: u32,
}

impl OrderPair {
    /// `true` when the convergence order is one above the polynomial order,
    /// as it is for every rule in this crate.
    pub fn is_consistent(&self) -> bool {
        self.convergence_order == self.polynomial_order + 1
    }
}

/// Tunables of the estimation protocol.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EstimatorSettings {
    /// Absolute error below which a probe counts as exact.
    pub tolerance: Real,
    /// Highest degree probed before giving up.
    pub max_degree: u32,
    /// Subdivision count of the coarse convergence run.
    pub coarse_subdivisions: Size,
    /// Subdivision count of the fine convergence run.
    pub fine_subdivisions: Size,
}

impl Default for EstimatorSettings {
    fn default() -> Self {
        Self {
            tolerance: 1e-8,
            max_degree: 64,
            coarse_subdivisions: 1,
            fine_subdivisions: 10,
        }
    }
}

impl EstimatorSettings {
    fn validate(&self) -> Result<()> {
        ensure!(
            self.tolerance.is_finite() && self.tolerance > 0.0,
            "estimation tolerance must be positive, got {}",
            self.tolerance
        );
        ensure!(
            self.max_degree <= i32::MAX as u32 - 1,
            "maximum probed degree {} is too large",
            self.max_degree
        );
        ensure!(
            self.coarse_subdivisions >= 1,
            "coarse subdivision count must be at least 1"
        );
        ensure!(
            self.fine_subdivisions > self.coarse_subdivisions,
            "fine subdivision count {} must exceed the coarse count {}",
            self.fine_subdivisions,
            self.coarse_subdivisions
        );
        Ok(())
    }
}

/// Drives a rule with monomial probes.
///
/// # Example
/// ```
/// use ni_integrals::{Integration, OrderEstimator, Rule};
///
/// let simpson = Integration::new(2.0, 5.0, 8, Rule::Simpson, |x: f64| x.cos()).unwrap();
/// let orders = OrderEstimator::default().orders(&simpson).unwrap();
/// assert_eq!((orders.polynomial_order, orders.convergence_order), (3, 4));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OrderEstimator {
    settings: EstimatorSettings,
}

impl OrderEstimator {
    /// Estimator with custom settings.
    ///
    /// # Errors
    /// `InvalidConfiguration` if the tolerance is not positive or the fine
    /// subdivision count does not exceed the coarse one.
    pub fn new(settings: EstimatorSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }

    /// The settings in use.
    pub fn settings(&self) -> &EstimatorSettings {
        &self.settings
    }

    /// Highest degree the configured rule integrates exactly over the
    /// configured interval, using a single subinterval.
    ///
    /// # Errors
    /// `EstimationFailed` if even constants are not integrated exactly, if
    /// every degree up to `max_degree` is, or if a probe is not finite.
    pub fn polynomial_order<F: Integrand>(&self, integration: &Integration<F>) -> Result<u32> {
        self.polynomial_order_on::<F::Output>(integration.rule(), integration.begin(), integration.end())
    }

    /// Highest exact degree and empirical convergence order, both measured
    /// on `[0, 1]` whatever the configured interval.
    ///
    /// # Errors
    /// `EstimationFailed` if either search has no defined result,
    /// `NodeGeneration` if a Gaussian table cannot be built.
    pub fn orders<F: Integrand>(&self, integration: &Integration<F>) -> Result<OrderPair> {
        let rule = integration.rule();
        let polynomial_order =
            self.polynomial_order_on::<F::Output>(rule, PROBE_BEGIN, PROBE_END)?;
        let convergence_order =
            self.convergence_order_on::<F::Output>(rule, polynomial_order, PROBE_BEGIN, PROBE_END)?;
        let pair = OrderPair {
            polynomial_order,
            convergence_order,
        };
        debug!("{rule}: polynomial order {polynomial_order}, convergence order {convergence_order}");
        if !pair.is_consistent() {
            warn!(
                "{rule}: convergence order {convergence_order} is not polynomial order + 1 = {}",
                polynomial_order + 1
            );
        }
        Ok(pair)
    }

    fn polynomial_order_on<T: Scalar>(&self, rule: &Rule, begin: Real, end: Real) -> Result<u32> {
        let tol = self.settings.tolerance;
        for degree in 0..=self.settings.max_degree {
            let error = probe_error::<T>(rule, degree, begin, end, 1)?;
            trace!("{rule}: degree {degree} on [{begin}, {end}] has error {error:e}");
            if !error.is_finite() {
                fail!(
                    EstimationFailed,
                    "{rule}: degree {degree} probe produced a non-finite error"
                );
            }
            if error >= tol {
                if degree == 0 {
                    fail!(
                        EstimationFailed,
                        "{rule}: constants are not integrated exactly (error {error:e})"
                    );
                }
                return Ok(degree - 1);
            }
        }
        fail!(
            EstimationFailed,
            "{rule}: every degree up to {} was integrated exactly",
            self.settings.max_degree
        )
    }

    fn convergence_order_on<T: Scalar>(
        &self,
        rule: &Rule,
        polynomial_order: u32,
        begin: Real,
        end: Real,
    ) -> Result<u32> {
        let degree = polynomial_order + 1;
        let coarse_n = self.settings.coarse_subdivisions;
        let fine_n = self.settings.fine_subdivisions;
        let coarse = probe_error::<T>(rule, degree, begin, end, coarse_n)?;
        let fine = probe_error::<T>(rule, degree, begin, end, fine_n)?;
        trace!("{rule}: degree {degree} errors {coarse:e} (n = {coarse_n}), {fine:e} (n = {fine_n})");
        let defined = |e: Real| e.is_finite() && e > 0.0;
        if !defined(coarse) || !defined(fine) {
            fail!(
                EstimationFailed,
                "{rule}: convergence order undefined for errors {coarse:e} and {fine:e}"
            );
        }
        let ratio = (fine_n as Real / coarse_n as Real).log10();
        let slope = (fine.log10() - coarse.log10()).abs() / ratio;
        Ok(slope.round() as u32)
    }
}

/// `|Q(xᵏ) − ∫ₐᵇ xᵏ dx|` with `subdivision_n` subintervals.
fn probe_error<T: Scalar>(
    rule: &Rule,
    degree: u32,
    begin: Real,
    end: Real,
    subdivision_n: Size,
) -> Result<Real> {
    let monomial = Monomial::<T>::new(degree as i32);
    let value = Integration::new(begin, end, subdivision_n, *rule, monomial)?.compute_integral()?;
    Ok((value - monomial.exact_integral(begin, end)).modulus())
}

/// Polynomial order with the default settings.
///
/// See [`OrderEstimator::polynomial_order`].
pub fn estimate_polynomial_order<F: Integrand>(integration: &Integration<F>) -> Result<u32> {
    OrderEstimator::default().polynomial_order(integration)
}

/// Order pair with the default settings.
///
/// See [`OrderEstimator::orders`].
pub fn estimate_orders<F: Integrand>(integration: &Integration<F>) -> Result<OrderPair> {
    OrderEstimator::default().orders(integration)
}
