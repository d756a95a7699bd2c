//! Error types for numint.
//!
//! Every failure of the quadrature engine is one variant of a single
//! `thiserror`-derived enum. The `ensure!`, `ensure_post!`, and `fail!`
//! macros defined here are the usual way of producing them.

use std::sync::Arc;

use thiserror::Error;

/// Boxed error raised by a user-supplied integrand.
pub type IntegrandError = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// The top-level error type used throughout numint.
#[derive(Debug, Error, Clone)]
pub enum Error {
    /// A configuration value was rejected: non-positive subdivision or node
    /// count, an empty or inverted interval, an unknown polynomial family.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The orthogonal-polynomial node/weight table could not be produced.
    #[error("node generation failed: {0}")]
    NodeGeneration(String),

    /// The integrand itself failed. The caller's error is kept as-is.
    #[error("integrand evaluation failed: {0}")]
    IntegrandEvaluation(#[source] IntegrandError),

    /// An order-estimation diagnostic could not produce a defined result.
    #[error("order estimation failed: {0}")]
    EstimationFailed(String),
}

impl Error {
    /// Wrap an error raised by an integrand.
    pub fn integrand<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::IntegrandEvaluation(Arc::new(err))
    }

    /// The integrand's original error, if this is an
    /// [`IntegrandEvaluation`](Error::IntegrandEvaluation) of type `E`.
    pub fn integrand_error<E>(&self) -> Option<&E>
    where
        E: std::error::Error + 'static,
    {
        match self {
            Error::IntegrandEvaluation(inner) => inner.downcast_ref::<E>(),
            _ => None,
        }
    }

    /// `true` for [`InvalidConfiguration`](Error::InvalidConfiguration).
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, Error::InvalidConfiguration(_))
    }

    /// `true` for [`NodeGeneration`](Error::NodeGeneration).
    pub fn is_node_generation(&self) -> bool {
        matches!(self, Error::NodeGeneration(_))
    }

    /// `true` for [`EstimationFailed`](Error::EstimationFailed).
    pub fn is_estimation_failed(&self) -> bool {
        matches!(self, Error::EstimationFailed(_))
    }
}

/// Shorthand `Result` type used throughout numint.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Reject a configuration value.
///
/// Returns `Err(Error::InvalidConfiguration(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use ni_core::ensure;
/// fn positive(n: usize) -> ni_core::Result<usize> {
///     ensure!(n > 0, "count must be positive, got {n}");
///     Ok(n)
/// }
/// assert!(positive(1).is_ok());
/// assert!(positive(0).unwrap_err().is_invalid_configuration());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::InvalidConfiguration(
                format!($($msg)*)
            ));
        }
    };
}

/// Check a postcondition of a computed node/weight table.
///
/// Returns `Err(Error::NodeGeneration(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use ni_core::ensure_post;
/// fn weight(w: f64) -> ni_core::Result<f64> {
///     ensure_post!(w > 0.0, "weight must be positive, got {w}");
///     Ok(w)
/// }
/// assert!(weight(0.5).is_ok());
/// assert!(weight(-0.5).unwrap_err().is_node_generation());
/// ```
#[macro_export]
macro_rules! ensure_post {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::NodeGeneration(
                format!($($msg)*)
            ));
        }
    };
}

/// Return immediately with the named message-carrying variant.
///
/// # Example
/// ```
/// use ni_core::fail;
/// fn always_err() -> ni_core::Result<()> {
///     fail!(EstimationFailed, "no inexact degree below {}", 64);
/// }
/// assert!(always_err().unwrap_err().is_estimation_failed());
/// ```
#[macro_export]
macro_rules! fail {
    ($kind:ident, $($msg:tt)*) => {
        return Err($crate::errors::Error::$kind(format!($($msg)*)))
    };
}
