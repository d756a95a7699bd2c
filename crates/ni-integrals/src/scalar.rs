//! Numeric result types an integrand may return.
//!
//! Every rule is written once over [`Scalar`]; `Real` and [`Complex64`] are
//! the two implementations.

use std::fmt::Debug;
use std::ops::{Add, Mul, Sub};

use ni_core::Real;
use num_complex::Complex64;
use num_traits::Zero;

/// Field in which an integral is accumulated.
///
/// Arguments are always real; only the values (and hence the integral)
/// may be complex.
pub trait Scalar:
    Copy
    + Debug
    + PartialEq
    + Zero
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Real, Output = Self>
    + Send
    + Sync
    + 'static
{
    /// Embed a real value.
    fn from_real(x: Real) -> Self;

    /// Absolute value (modulus for complex values).
    fn modulus(self) -> Real;

    /// `true` if no component is NaN or infinite.
    fn is_finite(self) -> bool;
}

impl Scalar for Real {
    #[inline]
    fn from_real(x: Real) -> Self {
        x
    }

    #[inline]
    fn modulus(self) -> Real {
        self.abs()
    }

    #[inline]
    fn is_finite(self) -> bool {
        Real::is_finite(self)
    }
}

impl Scalar for Complex64 {
    #[inline]
    fn from_real(x: Real) -> Self {
        Complex64::new(x, 0.0)
    }

    #[inline]
    fn modulus(self) -> Real {
        self.norm()
    }

    #[inline]
    fn is_finite(self) -> bool {
        self.re.is_finite() && self.im.is_finite()
    }
}

/// Return `true` if `|a - b| <= epsilon`.
#[inline]
pub fn close<T: Scalar>(a: T, b: T, epsilon: Real) -> bool {
    (a - b).modulus() <= epsilon
}
