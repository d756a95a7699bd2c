//! Orthogonal-polynomial node/weight generation on the reference interval
//! [−1, 1].
//!
//! Legendre, Gegenbauer, Jacobi, and Exponential tables come from the
//! Golub-Welsch algorithm: the monic three-term recurrence of the family is
//! written as a symmetric tridiagonal (Jacobi) matrix whose eigenvalues are
//! the nodes, and whose normalized eigenvectors' first components, squared
//! and scaled by the weight's total mass μ₀, are the weights. The two
//! Chebyshev families have closed forms.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use log::debug;
use nalgebra::{DMatrix, SymmetricEigen};
use ni_core::{ensure_post, fail, Error, Real, Result, Size};
use num_traits::Zero;
use statrs::function::gamma::ln_gamma;

use crate::integrand::Integrand;

/// Left end of the reference interval.
pub const REFERENCE_BEGIN: Real = -1.0;

/// Right end of the reference interval.
pub const REFERENCE_END: Real = 1.0;

/// Length of the reference interval.
pub const REFERENCE_LENGTH: Real = REFERENCE_END - REFERENCE_BEGIN;

const MAX_EIGEN_SWEEPS_PER_NODE: usize = 1_000;
const MASS_TOLERANCE: Real = 1.0e-10;

// ═══════════════════════════════════════════════════════════════════════════════
// Families
// ═══════════════════════════════════════════════════════════════════════════════

/// Orthogonal polynomial family, identified by its weight on [−1, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PolynomialFamily {
    /// w(x) = 1.
    Legendre,
    /// w(x) = (1 − x²)^(−1/2).
    ChebyshevFirstKind,
    /// w(x) = (1 − x²)^(1/2).
    ChebyshevSecondKind,
    /// w(x) = (1 − x²)^(α − 1/2), α > −1/2.
    Gegenbauer,
    /// w(x) = (1 − x)^α (1 + x)^β, α, β > −1.
    Jacobi,
    /// w(x) = |x|^α, α > −1.
    Exponential,
}

impl PolynomialFamily {
    /// Every supported family.
    pub const ALL: [PolynomialFamily; 6] = [
        PolynomialFamily::Legendre,
        PolynomialFamily::ChebyshevFirstKind,
        PolynomialFamily::ChebyshevSecondKind,
        PolynomialFamily::Gegenbauer,
        PolynomialFamily::Jacobi,
        PolynomialFamily::Exponential,
    ];

    /// Canonical display name.
    pub fn name(&self) -> &'static str {
        match self {
            PolynomialFamily::Legendre => "Legendre",
            PolynomialFamily::ChebyshevFirstKind => "Chebyshev Type 1",
            PolynomialFamily::ChebyshevSecondKind => "Chebyshev Type 2",
            PolynomialFamily::Gegenbauer => "Gegenbauer",
            PolynomialFamily::Jacobi => "Jacobi",
            PolynomialFamily::Exponential => "Exponential",
        }
    }

    /// Whether the weight depends on `alpha`.
    pub fn uses_alpha(&self) -> bool {
        matches!(
            self,
            PolynomialFamily::Gegenbauer | PolynomialFamily::Jacobi | PolynomialFamily::Exponential
        )
    }

    /// Whether the weight depends on `beta`.
    pub fn uses_beta(&self) -> bool {
        matches!(self, PolynomialFamily::Jacobi)
    }

    /// The weight function w(x) on the reference interval.
    ///
    /// Parameters the family does not use are ignored.
    pub fn weight(&self, x: Real, alpha: Real, beta: Real) -> Real {
        match self {
            PolynomialFamily::Legendre => 1.0,
            PolynomialFamily::ChebyshevFirstKind => 1.0 / (1.0 - x * x).sqrt(),
            PolynomialFamily::ChebyshevSecondKind => (1.0 - x * x).sqrt(),
            PolynomialFamily::Gegenbauer => (1.0 - x * x).powf(alpha - 0.5),
            PolynomialFamily::Jacobi => (1.0 - x).powf(alpha) * (1.0 + x).powf(beta),
            PolynomialFamily::Exponential => x.abs().powf(alpha),
        }
    }
}

impl fmt::Display for PolynomialFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PolynomialFamily {
    type Err = Error;

    /// Accepts the canonical names case-insensitively, plus
    /// `chebyshev1`/`chebyshev-1`/`chebyshev2`/`chebyshev-2`.
    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "legendre" => Ok(PolynomialFamily::Legendre),
            "chebyshevtype1" | "chebyshev1" | "chebyshev" => Ok(PolynomialFamily::ChebyshevFirstKind),
            "chebyshevtype2" | "chebyshev2" => Ok(PolynomialFamily::ChebyshevSecondKind),
            "gegenbauer" => Ok(PolynomialFamily::Gegenbauer),
            "jacobi" => Ok(PolynomialFamily::Jacobi),
            "exponential" => Ok(PolynomialFamily::Exponential),
            _ => fail!(InvalidConfiguration, "unknown polynomial family `{s}`"),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Node/weight table
// ═══════════════════════════════════════════════════════════════════════════════

/// A Gauss quadrature rule on [−1, 1]: nodes in increasing order and their
/// strictly positive weights.
///
/// `Σ wᵢ f(xᵢ)` reproduces `∫ f(x) w(x) dx` for every polynomial `f` of
/// degree at most `2N − 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianQuadrature {
    x: Vec<Real>,
    w: Vec<Real>,
}

impl GaussianQuadrature {
    /// Generate the `n`-node table of `family`.
    ///
    /// # Errors
    /// `NodeGeneration` if `n == 0`, if a parameter the family uses lies
    /// outside the weight's integrability domain, or if the eigenvalue
    /// iteration fails to produce a valid table.
    ///
    /// # Example
    /// ```
    /// use ni_integrals::{GaussianQuadrature, PolynomialFamily};
    ///
    /// let q = GaussianQuadrature::new(PolynomialFamily::Legendre, 3, 0.0, 0.0).unwrap();
    /// let value = q.integrate_reference(&|x: f64| x.powi(4)).unwrap();
    /// assert!((value - 0.4).abs() < 1e-14);
    /// ```
    pub fn new(family: PolynomialFamily, n: Size, alpha: Real, beta: Real) -> Result<Self> {
        ensure_post!(n >= 1, "{family}: number of nodes must be positive");
        let q = match family {
            PolynomialFamily::Legendre => jacobi_nodes_weights(n, 0.0, 0.0)?,
            PolynomialFamily::ChebyshevFirstKind => chebyshev_first_kind(n),
            PolynomialFamily::ChebyshevSecondKind => chebyshev_second_kind(n),
            PolynomialFamily::Gegenbauer => {
                ensure_post!(
                    alpha > -0.5,
                    "Gegenbauer weight needs alpha > -1/2, got {alpha}"
                );
                jacobi_nodes_weights(n, alpha - 0.5, alpha - 0.5)?
            }
            PolynomialFamily::Jacobi => jacobi_nodes_weights(n, alpha, beta)?,
            PolynomialFamily::Exponential => {
                let rec = exponential_recurrence(n, alpha)?;
                golub_welsch(&rec)?
            }
        };
        debug!(
            "generated {n}-node {family} table (alpha = {alpha}, beta = {beta}), mass {}",
            q.total_mass()
        );
        Ok(q)
    }

    /// Quadrature nodes.
    pub fn x(&self) -> &[Real] {
        &self.x
    }

    /// Quadrature weights.
    pub fn w(&self) -> &[Real] {
        &self.w
    }

    /// Number of quadrature points.
    pub fn order(&self) -> usize {
        self.x.len()
    }

    /// `Σ wᵢ`, the total mass of the weight function.
    pub fn total_mass(&self) -> Real {
        self.w.iter().sum()
    }

    /// Evaluate `∫₋₁¹ f(x) w(x) dx ≈ Σ wᵢ f(xᵢ)`.
    pub fn integrate_reference<I: Integrand>(&self, f: &I) -> Result<I::Output> {
        self.x
            .iter()
            .zip(self.w.iter())
            .try_fold(<I::Output as Zero>::zero(), |acc, (&xi, &wi)| {
                Ok(acc + f.evaluate(xi)? * wi)
            })
    }
}

/// Gauss-Jacobi nodes and weights for (1 − x)^α (1 + x)^β on [−1, 1].
///
/// Legendre is α = β = 0; Gegenbauer with parameter λ is α = β = λ − 1/2.
pub fn jacobi_nodes_weights(n: Size, alpha: Real, beta: Real) -> Result<GaussianQuadrature> {
    let rec = jacobi_recurrence(n, alpha, beta)?;
    golub_welsch(&rec)
}

// ═══════════════════════════════════════════════════════════════════════════════
// Recurrences
// ═══════════════════════════════════════════════════════════════════════════════

/// Monic three-term recurrence `p₍ₖ₊₁₎ = (x − aₖ) pₖ − bₖ p₍ₖ₋₁₎` truncated
/// at degree `n`.
#[derive(Debug, Clone)]
struct Recurrence {
    /// a₀ … a₍ₙ₋₁₎.
    diag: Vec<Real>,
    /// b₁ … b₍ₙ₋₁₎ (squared off-diagonal of the Jacobi matrix).
    off_sq: Vec<Real>,
    /// μ₀ = ∫ w(x) dx.
    mu0: Real,
}

fn jacobi_recurrence(n: Size, alpha: Real, beta: Real) -> Result<Recurrence> {
    ensure_post!(n >= 1, "Jacobi: number of nodes must be positive");
    ensure_post!(
        alpha.is_finite() && beta.is_finite() && alpha > -1.0 && beta > -1.0,
        "Jacobi weight needs alpha, beta > -1, got alpha = {alpha}, beta = {beta}"
    );

    let ab = alpha + beta;
    // μ₀ = 2^(α+β+1) Γ(α+1) Γ(β+1) / Γ(α+β+2)
    let mu0 = ((ab + 1.0) * std::f64::consts::LN_2 + ln_gamma(alpha + 1.0) + ln_gamma(beta + 1.0)
        - ln_gamma(ab + 2.0))
    .exp();

    let mut diag = Vec::with_capacity(n);
    diag.push((beta - alpha) / (ab + 2.0));
    for k in 1..n {
        let s = 2.0 * k as Real + ab;
        diag.push((beta * beta - alpha * alpha) / (s * (s + 2.0)));
    }

    let off_sq = (1..n)
        .map(|k| {
            let kk = k as Real;
            if k == 1 {
                // the general form is 0/0 when α + β = −1
                4.0 * (1.0 + alpha) * (1.0 + beta) / ((2.0 + ab).powi(2) * (3.0 + ab))
            } else {
                let s = 2.0 * kk + ab;
                4.0 * kk * (kk + alpha) * (kk + beta) * (kk + ab)
                    / (s * s * (s + 1.0) * (s - 1.0))
            }
        })
        .collect();

    Ok(Recurrence { diag, off_sq, mu0 })
}

fn exponential_recurrence(n: Size, alpha: Real) -> Result<Recurrence> {
    ensure_post!(n >= 1, "Exponential: number of nodes must be positive");
    ensure_post!(
        alpha.is_finite() && alpha > -1.0,
        "Exponential weight needs alpha > -1, got {alpha}"
    );
    let off_sq = (1..n)
        .map(|k| {
            let kk = k as Real;
            let num = kk + if k % 2 == 1 { alpha } else { 0.0 };
            num * num / ((2.0 * kk + alpha).powi(2) - 1.0)
        })
        .collect();
    Ok(Recurrence {
        diag: vec![0.0; n],
        off_sq,
        mu0: 2.0 / (alpha + 1.0),
    })
}

// ═══════════════════════════════════════════════════════════════════════════════
// Golub-Welsch
// ═══════════════════════════════════════════════════════════════════════════════

fn golub_welsch(rec: &Recurrence) -> Result<GaussianQuadrature> {
    let n = rec.diag.len();
    ensure_post!(
        rec.mu0.is_finite() && rec.mu0 > 0.0,
        "weight mass is not a positive finite number: {}",
        rec.mu0
    );
    ensure_post!(
        rec.diag.iter().all(|a| a.is_finite()),
        "recurrence has non-finite diagonal coefficients"
    );
    ensure_post!(
        rec.off_sq.iter().all(|b| b.is_finite() && *b > 0.0),
        "recurrence is degenerate: off-diagonal coefficients must be positive"
    );

    let (x, w) = if n == 1 {
        (vec![rec.diag[0]], vec![rec.mu0])
    } else {
        let mut j = DMatrix::<Real>::zeros(n, n);
        for (i, &a) in rec.diag.iter().enumerate() {
            j[(i, i)] = a;
        }
        for (i, &b) in rec.off_sq.iter().enumerate() {
            let s = b.sqrt();
            j[(i, i + 1)] = s;
            j[(i + 1, i)] = s;
        }
        let eigen = SymmetricEigen::try_new(j, Real::EPSILON, MAX_EIGEN_SWEEPS_PER_NODE * n)
            .ok_or_else(|| {
                Error::NodeGeneration(format!(
                    "symmetric eigenvalue iteration did not converge for {n} nodes"
                ))
            })?;
        let mut pairs: Vec<(Real, Real)> = (0..n)
            .map(|k| {
                let v0 = eigen.eigenvectors[(0, k)];
                (eigen.eigenvalues[k], rec.mu0 * v0 * v0)
            })
            .collect();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
        pairs.into_iter().unzip()
    };

    check_table(&x, &w, rec.mu0)?;
    Ok(GaussianQuadrature { x, w })
}

fn check_table(x: &[Real], w: &[Real], mu0: Real) -> Result<()> {
    ensure_post!(
        x.iter().all(|&xi| xi > REFERENCE_BEGIN && xi < REFERENCE_END),
        "nodes must lie strictly inside [{REFERENCE_BEGIN}, {REFERENCE_END}]"
    );
    ensure_post!(
        x.windows(2).all(|p| p[0] < p[1]),
        "nodes are not strictly increasing"
    );
    ensure_post!(
        w.iter().all(|&wi| wi.is_finite() && wi > 0.0),
        "weights must be strictly positive"
    );
    let mass: Real = w.iter().sum();
    ensure_post!(
        (mass - mu0).abs() <= MASS_TOLERANCE * mu0,
        "weights sum to {mass}, expected {mu0}"
    );
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════════
// Chebyshev closed forms
// ═══════════════════════════════════════════════════════════════════════════════

/// Nodes xᵢ = −cos((2i+1)π / (2n)), weights π/n.
fn chebyshev_first_kind(n: Size) -> GaussianQuadrature {
    let nn = n as Real;
    let x = (0..n)
        .map(|i| -((2 * i + 1) as Real * PI / (2.0 * nn)).cos())
        .collect();
    GaussianQuadrature {
        x,
        w: vec![PI / nn; n],
    }
}

/// Nodes xᵢ = −cos((i+1)π / (n+1)), weights π/(n+1) sin²θᵢ.
fn chebyshev_second_kind(n: Size) -> GaussianQuadrature {
    let n1 = (n + 1) as Real;
    let (x, w) = (0..n)
        .map(|i| {
            let theta = (i + 1) as Real * PI / n1;
            (-theta.cos(), PI / n1 * theta.sin().powi(2))
        })
        .unzip();
    GaussianQuadrature { x, w }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn assert_near(a: Real, b: Real, tol: Real) {
        assert!(
            (a - b).abs() < tol,
            "expected {b}, got {a}, diff = {}",
            (a - b).abs()
        );
    }

    fn moment(q: &GaussianQuadrature, k: i32) -> Real {
        q.integrate_reference(&|x: Real| x.powi(k)).unwrap()
    }

    #[test]
    fn legendre_three_nodes() {
        let q = GaussianQuadrature::new(PolynomialFamily::Legendre, 3, 0.0, 0.0).unwrap();
        let r = (0.6_f64).sqrt();
        assert_near(q.x()[0], -r, 1e-14);
        assert_near(q.x()[1], 0.0, 1e-14);
        assert_near(q.x()[2], r, 1e-14);
        assert_near(q.w()[0], 5.0 / 9.0, 1e-14);
        assert_near(q.w()[1], 8.0 / 9.0, 1e-14);
        assert_near(q.w()[2], 5.0 / 9.0, 1e-14);
    }

    #[test]
    fn legendre_single_node() {
        let q = GaussianQuadrature::new(PolynomialFamily::Legendre, 1, 0.0, 0.0).unwrap();
        assert_eq!(q.order(), 1);
        assert_near(q.x()[0], 0.0, 1e-15);
        assert_near(q.w()[0], 2.0, 1e-14);
    }

    #[test]
    fn legendre_exact_up_to_degree() {
        for n in [1_usize, 2, 3, 5, 8] {
            let q = GaussianQuadrature::new(PolynomialFamily::Legendre, n, 0.0, 0.0).unwrap();
            for k in 0..(2 * n as i32) {
                let exact = if k % 2 == 0 { 2.0 / (k + 1) as Real } else { 0.0 };
                assert_near(moment(&q, k), exact, 1e-12);
            }
            let k = 2 * n as i32;
            assert!((moment(&q, k) - 2.0 / (k + 1) as Real).abs() > 1e-8);
        }
    }

    #[test]
    fn chebyshev_first_kind_mass() {
        let q = GaussianQuadrature::new(PolynomialFamily::ChebyshevFirstKind, 10, 0.0, 0.0).unwrap();
        assert_near(q.total_mass(), PI, 1e-12);
        // ∫ x² / √(1 − x²) dx = π/2
        assert_near(moment(&q, 2), PI / 2.0, 1e-12);
    }

    #[test]
    fn chebyshev_second_kind_mass() {
        let q = GaussianQuadrature::new(PolynomialFamily::ChebyshevSecondKind, 10, 0.0, 0.0).unwrap();
        assert_near(q.total_mass(), PI / 2.0, 1e-12);
        // ∫ x² √(1 − x²) dx = π/8
        assert_near(moment(&q, 2), PI / 8.0, 1e-12);
    }

    #[test]
    fn chebyshev_closed_forms_match_golub_welsch() {
        let closed = chebyshev_first_kind(7);
        let gw = jacobi_nodes_weights(7, -0.5, -0.5).unwrap();
        for (a, b) in closed.x().iter().zip(gw.x()) {
            assert_near(*a, *b, 1e-12);
        }
        for (a, b) in closed.w().iter().zip(gw.w()) {
            assert_near(*a, *b, 1e-12);
        }

        let closed = chebyshev_second_kind(6);
        let gw = jacobi_nodes_weights(6, 0.5, 0.5).unwrap();
        for (a, b) in closed.x().iter().zip(gw.x()) {
            assert_near(*a, *b, 1e-12);
        }
    }

    #[test]
    fn gegenbauer_one_is_chebyshev_second_kind() {
        let g = GaussianQuadrature::new(PolynomialFamily::Gegenbauer, 5, 1.0, 0.0).unwrap();
        let c = GaussianQuadrature::new(PolynomialFamily::ChebyshevSecondKind, 5, 0.0, 0.0).unwrap();
        for (a, b) in g.x().iter().zip(c.x()) {
            assert_near(*a, *b, 1e-12);
        }
        assert_near(g.total_mass(), PI / 2.0, 1e-12);
    }

    #[test]
    fn jacobi_mass_and_moments() {
        // ∫ (1 − x)² (1 + x) dx = 4/3 ;  ∫ x (1 − x)² (1 + x) dx = −4/15
        let q = GaussianQuadrature::new(PolynomialFamily::Jacobi, 4, 2.0, 1.0).unwrap();
        assert_near(q.total_mass(), 4.0 / 3.0, 1e-12);
        assert_near(moment(&q, 1), -4.0 / 15.0, 1e-12);
    }

    #[test]
    fn jacobi_reduces_to_legendre() {
        let q = jacobi_nodes_weights(5, 0.0, 0.0).unwrap();
        assert_near(moment(&q, 4), 0.4, 1e-12);
    }

    #[test]
    fn exponential_moments() {
        let alpha = 2.0;
        let q = GaussianQuadrature::new(PolynomialFamily::Exponential, 4, alpha, 0.0).unwrap();
        assert_near(q.total_mass(), 2.0 / (alpha + 1.0), 1e-12);
        assert_near(moment(&q, 2), 2.0 / (alpha + 3.0), 1e-12);
        assert_near(moment(&q, 6), 2.0 / (alpha + 7.0), 1e-12);
        assert_near(moment(&q, 3), 0.0, 1e-12);
    }

    #[test]
    fn ignored_parameters_do_not_matter() {
        let a = GaussianQuadrature::new(PolynomialFamily::Legendre, 4, 7.0, -3.0).unwrap();
        let b = GaussianQuadrature::new(PolynomialFamily::Legendre, 4, 0.0, 0.0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn degenerate_parameters_fail() {
        for (family, alpha, beta) in [
            (PolynomialFamily::Jacobi, -1.0, 0.0),
            (PolynomialFamily::Jacobi, 0.0, -2.5),
            (PolynomialFamily::Jacobi, Real::NAN, 0.0),
            (PolynomialFamily::Gegenbauer, -0.5, 0.0),
            (PolynomialFamily::Exponential, -1.0, 0.0),
        ] {
            let err = GaussianQuadrature::new(family, 3, alpha, beta).unwrap_err();
            assert!(err.is_node_generation(), "{family}: {err}");
        }
    }

    #[test]
    fn zero_nodes_fail() {
        for family in PolynomialFamily::ALL {
            let err = GaussianQuadrature::new(family, 0, 1.0, 1.0).unwrap_err();
            assert!(err.is_node_generation());
        }
    }

    #[test]
    fn family_names_round_trip() {
        for family in PolynomialFamily::ALL {
            assert_eq!(family.name().parse::<PolynomialFamily>().unwrap(), family);
        }
        assert_eq!(
            "chebyshev-2".parse::<PolynomialFamily>().unwrap(),
            PolynomialFamily::ChebyshevSecondKind
        );
        assert_eq!(
            " LEGENDRE ".parse::<PolynomialFamily>().unwrap(),
            PolynomialFamily::Legendre
        );
        assert!("Laguerre"
            .parse::<PolynomialFamily>()
            .unwrap_err()
            .is_invalid_configuration());
    }

    #[test]
    fn weight_functions() {
        assert_eq!(PolynomialFamily::Legendre.weight(0.3, 5.0, 5.0), 1.0);
        assert_near(PolynomialFamily::Jacobi.weight(0.0, 2.0, 3.0), 1.0, 1e-15);
        assert_near(PolynomialFamily::Jacobi.weight(0.5, 1.0, 1.0), 0.75, 1e-15);
        assert_near(PolynomialFamily::Gegenbauer.weight(0.6, 1.0, 0.0), 0.8, 1e-15);
        assert_near(PolynomialFamily::Exponential.weight(-0.5, 2.0, 0.0), 0.25, 1e-15);
    }

    proptest! {
        #[test]
        fn tables_satisfy_invariants(
            n in 1_usize..24,
            alpha in -0.9_f64..4.0,
            beta in -0.9_f64..4.0,
            family_index in 0_usize..6,
        ) {
            let family = PolynomialFamily::ALL[family_index];
            let alpha = if family == PolynomialFamily::Gegenbauer { alpha.max(-0.4) } else { alpha };
            let q = GaussianQuadrature::new(family, n, alpha, beta).unwrap();
            prop_assert_eq!(q.order(), n);
            for pair in q.x().windows(2) {
                prop_assert!(pair[0] < pair[1]);
            }
            for &xi in q.x() {
                prop_assert!(xi > -1.0 && xi < 1.0);
            }
            for &wi in q.w() {
                prop_assert!(wi > 0.0);
            }
        }
    }
}
