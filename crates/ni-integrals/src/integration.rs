//! Integration configurations.
//!
//! An [`Integration`] bundles an interval, a subdivision count, a rule, and
//! an integrand, together with the partition derived from them. It is an
//! immutable value: every `with_*` method consumes it and returns a newly
//! validated configuration whose partition has been recomputed.

use std::fmt;

use ni_core::{ensure, Real, Result, Size};

use crate::integrals::{GaussianRule, Integrator, Rule};
use crate::integrand::Integrand;
use crate::partition::Partition;

/// A validated integration configuration.
///
/// # Example
/// ```
/// use ni_integrals::{Integration, Rule};
///
/// let simpson = Integration::new(0.0, 2.0, 4, Rule::Simpson, |x: f64| x.powi(3)).unwrap();
/// assert!((simpson.compute_integral().unwrap() - 4.0).abs() < 1e-12);
/// assert_eq!(simpson.step_size(), 0.5);
/// ```
#[derive(Clone)]
pub struct Integration<F> {
    begin: Real,
    end: Real,
    subdivision_n: Size,
    rule: Rule,
    integrand: F,
    partition: Partition,
}

impl Integration<()> {
    /// Start a builder over `[begin, end]`.
    pub fn builder(begin: Real, end: Real) -> IntegrationBuilder {
        IntegrationBuilder::new(begin, end)
    }
}

impl<F> Integration<F> {
    /// Validate and build a configuration.
    ///
    /// # Errors
    /// `InvalidConfiguration` if `subdivision_n == 0`, if `end <= begin` or
    /// either bound is not finite, if the step is too short to separate
    /// neighbouring boundaries, or if a Gaussian rule has no nodes.
    pub fn new(begin: Real, end: Real, subdivision_n: Size, rule: Rule, integrand: F) -> Result<Self> {
        rule.validate()?;
        let partition = Partition::new(begin, end, subdivision_n)?;
        Ok(Self {
            begin,
            end,
            subdivision_n,
            rule,
            integrand,
            partition,
        })
    }

    /// Shorthand for a Gaussian configuration.
    pub fn gaussian(
        begin: Real,
        end: Real,
        subdivision_n: Size,
        rule: GaussianRule,
        integrand: F,
    ) -> Result<Self> {
        Self::new(begin, end, subdivision_n, Rule::Gaussian(rule), integrand)
    }

    /// Lower bound.
    pub fn begin(&self) -> Real {
        self.begin
    }

    /// Upper bound.
    pub fn end(&self) -> Real {
        self.end
    }

    /// Number of subintervals.
    pub fn subdivision_n(&self) -> Size {
        self.subdivision_n
    }

    /// The configured rule.
    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    /// The integrand.
    pub fn integrand(&self) -> &F {
        &self.integrand
    }

    /// The derived partition.
    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    /// Uniform step `(end − begin)/subdivision_n`.
    pub fn step_size(&self) -> Real {
        self.partition.step_size()
    }

    /// Same configuration over `[begin, end]`.
    pub fn with_interval(self, begin: Real, end: Real) -> Result<Self> {
        Self::new(begin, end, self.subdivision_n, self.rule, self.integrand)
    }

    /// Same configuration with `subdivision_n` subintervals.
    pub fn with_subdivisions(self, subdivision_n: Size) -> Result<Self> {
        Self::new(self.begin, self.end, subdivision_n, self.rule, self.integrand)
    }

    /// Same configuration with the subdivision count implied by the step
    /// `h`: `subdivision_n = ⌊(end − begin)/h⌋`.
    ///
    /// # Errors
    /// `InvalidConfiguration` if `h` is not a positive finite number, is
    /// longer than the interval, or is too short to separate neighbouring
    /// boundaries.
    pub fn with_step_size(self, h: Real) -> Result<Self> {
        ensure!(h.is_finite() && h > 0.0, "step size must be positive, got {h}");
        let n = ((self.end - self.begin) / h).floor();
        ensure!(
            n >= 1.0,
            "step size {h} exceeds the interval length {}",
            self.end - self.begin
        );
        ensure!(n <= Size::MAX as Real, "step size {h} is too small");
        self.with_subdivisions(n as Size)
    }

    /// Same configuration with another rule.
    pub fn with_rule(self, rule: Rule) -> Result<Self> {
        Self::new(self.begin, self.end, self.subdivision_n, rule, self.integrand)
    }

    /// Same configuration with another integrand.
    pub fn with_integrand<G>(self, integrand: G) -> Integration<G> {
        Integration {
            begin: self.begin,
            end: self.end,
            subdivision_n: self.subdivision_n,
            rule: self.rule,
            integrand,
            partition: self.partition,
        }
    }
}

impl<F: Integrand> Integration<F> {
    /// Integrate the configured integrand with the configured rule.
    ///
    /// Deterministic: with an unchanged configuration and a deterministic
    /// integrand the result is bit-identical across calls.
    ///
    /// # Errors
    /// `NodeGeneration` on the first use of a Gaussian rule whose table
    /// cannot be generated, and `IntegrandEvaluation` carrying the
    /// integrand's own error.
    pub fn compute_integral(&self) -> Result<F::Output> {
        self.rule.integrate(&self.integrand, &self.partition)
    }
}

impl<F> fmt::Debug for Integration<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Integration")
            .field("begin", &self.begin)
            .field("end", &self.end)
            .field("subdivision_n", &self.subdivision_n)
            .field("rule", &self.rule)
            .finish_non_exhaustive()
    }
}

// ── Builder ──────────────────────────────────────────────────────────────────

/// Step-by-step construction of an [`Integration`].
///
/// Defaults: one subinterval, midpoint rule.
///
/// # Example
/// ```
/// use ni_integrals::{Integration, PolynomialFamily};
///
/// let gauss = Integration::builder(-1.0, 1.0)
///     .with_gaussian(3, PolynomialFamily::Legendre)
///     .build(|x: f64| x * x)
///     .unwrap();
/// assert!((gauss.compute_integral().unwrap() - 2.0 / 3.0).abs() < 1e-14);
/// ```
#[derive(Debug, Clone)]
pub struct IntegrationBuilder {
    begin: Real,
    end: Real,
    subdivision_n: Size,
    step_size: Option<Real>,
    rule: RuleChoice,
}

#[derive(Debug, Clone)]
enum RuleChoice {
    Ready(Rule),
    Gaussian {
        number_of_nodes: Size,
        family: Result<crate::PolynomialFamily>,
        alpha: Option<Real>,
        beta: Option<Real>,
    },
}

impl IntegrationBuilder {
    /// Begin building over `[begin, end]`.
    pub fn new(begin: Real, end: Real) -> Self {
        Self {
            begin,
            end,
            subdivision_n: 1,
            step_size: None,
            rule: RuleChoice::Ready(Rule::Midpoint),
        }
    }

    /// Number of subintervals.
    pub fn with_subdivisions(mut self, subdivision_n: Size) -> Self {
        self.subdivision_n = subdivision_n;
        self.step_size = None;
        self
    }

    /// Derive the subdivision count from a step size.
    pub fn with_step_size(mut self, h: Real) -> Self {
        self.step_size = Some(h);
        self
    }

    /// Use a fully specified rule.
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rule = RuleChoice::Ready(rule);
        self
    }

    /// Use an `number_of_nodes`-point Gaussian rule of `family`.
    pub fn with_gaussian(mut self, number_of_nodes: Size, family: crate::PolynomialFamily) -> Self {
        self.rule = RuleChoice::Gaussian {
            number_of_nodes,
            family: Ok(family),
            alpha: None,
            beta: None,
        };
        self
    }

    /// Use a Gaussian rule whose family is given by name.
    ///
    /// An unknown name is reported by [`build`](Self::build).
    pub fn with_gaussian_named(mut self, number_of_nodes: Size, family: &str) -> Self {
        self.rule = RuleChoice::Gaussian {
            number_of_nodes,
            family: family.parse(),
            alpha: None,
            beta: None,
        };
        self
    }

    /// Shape parameter `alpha` of a Gaussian rule.
    pub fn with_alpha(mut self, value: Real) -> Self {
        match &mut self.rule {
            RuleChoice::Gaussian { alpha, .. } => *alpha = Some(value),
            RuleChoice::Ready(Rule::Gaussian(g)) => *g = g.with_alpha(value),
            RuleChoice::Ready(_) => {}
        }
        self
    }

    /// Shape parameter `beta` of a Gaussian rule.
    pub fn with_beta(mut self, value: Real) -> Self {
        match &mut self.rule {
            RuleChoice::Gaussian { beta, .. } => *beta = Some(value),
            RuleChoice::Ready(Rule::Gaussian(g)) => *g = g.with_beta(value),
            RuleChoice::Ready(_) => {}
        }
        self
    }

    /// Validate and produce the configuration.
    pub fn build<F>(self, integrand: F) -> Result<Integration<F>> {
        let rule = match self.rule {
            RuleChoice::Ready(rule) => rule,
            RuleChoice::Gaussian {
                number_of_nodes,
                family,
                alpha,
                beta,
            } => {
                let mut g = GaussianRule::new(number_of_nodes, family?)?;
                if let Some(a) = alpha {
                    g = g.with_alpha(a);
                }
                if let Some(b) = beta {
                    g = g.with_beta(b);
                }
                Rule::Gaussian(g)
            }
        };
        let integration = Integration::new(self.begin, self.end, 1, rule, integrand)?;
        match self.step_size {
            Some(h) => integration.with_step_size(h),
            None => integration.with_subdivisions(self.subdivision_n),
        }
    }
}
