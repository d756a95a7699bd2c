//! Evaluating user functions at real abscissas.
//!
//! Any closure `Fn(Real) -> T` with `T: Scalar` is an [`Integrand`]. A
//! closure that can fail is wrapped in [`Fallible`]; its error reaches the
//! caller inside [`Error::IntegrandEvaluation`] untouched.

use std::marker::PhantomData;

use ni_core::{Error, Real, Result};

use crate::scalar::Scalar;

/// A function of one real variable with real or complex values.
///
/// Implementations should be pure: rules may evaluate the same abscissa
/// more than once and results are only meaningful if the function has no
/// side effects.
pub trait Integrand {
    /// Value type, and hence type of the integral.
    type Output: Scalar;

    /// Evaluate at `x`.
    fn evaluate(&self, x: Real) -> Result<Self::Output>;
}

impl<F, T> Integrand for F
where
    F: Fn(Real) -> T,
    T: Scalar,
{
    type Output = T;

    #[inline]
    fn evaluate(&self, x: Real) -> Result<T> {
        Ok(self(x))
    }
}

/// Adapter for integrands that may fail.
///
/// # Example
/// ```
/// use ni_integrals::integrand::{Fallible, Integrand};
///
/// #[derive(Debug)]
/// struct Negative;
/// impl std::fmt::Display for Negative {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         f.write_str("negative argument")
///     }
/// }
/// impl std::error::Error for Negative {}
///
/// let sqrt = Fallible(|x: f64| if x < 0.0 { Err(Negative) } else { Ok(x.sqrt()) });
/// assert_eq!(sqrt.evaluate(4.0).unwrap(), 2.0);
/// assert!(sqrt.evaluate(-1.0).unwrap_err().integrand_error::<Negative>().is_some());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Fallible<F>(pub F);

impl<F, T, E> Integrand for Fallible<F>
where
    F: Fn(Real) -> std::result::Result<T, E>,
    T: Scalar,
    E: std::error::Error + Send + Sync + 'static,
{
    type Output = T;

    #[inline]
    fn evaluate(&self, x: Real) -> Result<T> {
        (self.0)(x).map_err(Error::integrand)
    }
}

/// The monomial `x ↦ xᵏ`, valued in `T`.
///
/// Used as the probe integrand of the order estimator.
#[derive(Debug, Clone, Copy)]
pub struct Monomial<T> {
    degree: i32,
    _field: PhantomData<fn() -> T>,
}

impl<T: Scalar> Monomial<T> {
    /// Monomial of the given degree.
    pub fn new(degree: i32) -> Self {
        Self {
            degree,
            _field: PhantomData,
        }
    }

    /// The exponent `k`.
    pub fn degree(&self) -> i32 {
        self.degree
    }

    /// Closed-form `∫ₐᵇ xᵏ dx = (bᵏ⁺¹ − aᵏ⁺¹)/(k+1)`.
    pub fn exact_integral(&self, a: Real, b: Real) -> T {
        let k1 = self.degree + 1;
        T::from_real((b.powi(k1) - a.powi(k1)) / k1 as Real)
    }
}

impl<T: Scalar> Integrand for Monomial<T> {
    type Output = T;

    #[inline]
    fn evaluate(&self, x: Real) -> Result<T> {
        Ok(T::from_real(x.powi(self.degree)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    #[derive(Debug)]
    struct Boom;

    impl std::fmt::Display for Boom {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("boom")
        }
    }

    impl std::error::Error for Boom {}

    #[test]
    fn closures_are_integrands() {
        let f = |x: Real| x * x;
        assert_eq!(f.evaluate(3.0).unwrap(), 9.0);
        let g = |x: Real| Complex64::new(x, -x);
        assert_eq!(g.evaluate(2.0).unwrap(), Complex64::new(2.0, -2.0));
    }

    #[test]
    fn fallible_passes_error_through() {
        let f = Fallible(|x: Real| if x > 1.0 { Err(Boom) } else { Ok(x) });
        assert_eq!(f.evaluate(0.5).unwrap(), 0.5);
        let err = f.evaluate(2.0).unwrap_err();
        assert!(err.integrand_error::<Boom>().is_some());
    }

    #[test]
    fn monomial_values() {
        let m = Monomial::<Real>::new(3);
        assert_eq!(m.evaluate(2.0).unwrap(), 8.0);
        assert_eq!(Monomial::<Real>::new(0).evaluate(0.0).unwrap(), 1.0);
        assert!((m.exact_integral(0.0, 2.0) - 4.0).abs() < 1e-15);
        let c = Monomial::<Complex64>::new(1).exact_integral(-1.0, 3.0);
        assert_eq!(c, Complex64::new(4.0, 0.0));
    }
}
