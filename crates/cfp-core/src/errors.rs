//! Error types for cfpricer.
//!
//! A single `thiserror`-derived enum covers the whole workspace. Invalid
//! inputs (negative volatility, maturity before the pricing date, ...) are
//! reported as [`Error::Precondition`] through the `ensure!` macro, while a
//! Fourier integral that does not settle is reported as the distinct
//! [`Error::Convergence`] kind so callers can retry with other settings.

use thiserror::Error;

/// The top-level error type used throughout cfpricer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Precondition violated: invalid model, market or contract input.
    #[error("precondition not satisfied: {0}")]
    Precondition(String),

    /// Postcondition violated.
    #[error("postcondition not satisfied: {0}")]
    Postcondition(String),

    /// Invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A numerical integral failed to converge within its limits.
    #[error(
        "{method}: no convergence after {evaluations} evaluations \
         (upper limit {upper_limit}, residual {residual:e})"
    )]
    Convergence {
        /// Name of the integration scheme that gave up.
        method: &'static str,
        /// Number of integrand evaluations spent.
        evaluations: usize,
        /// Last integration bound reached.
        upper_limit: f64,
        /// Size of the last unresolved contribution.
        residual: f64,
    },

    /// Malformed configuration input (file, field or value).
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// `true` for errors caused by invalid inputs rather than numerics.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::Precondition(_) | Error::InvalidArgument(_) | Error::Config(_)
        )
    }

    /// `true` when a numerical procedure failed to converge.
    pub fn is_convergence(&self) -> bool {
        matches!(self, Error::Convergence { .. })
    }
}

/// Shorthand `Result` type used throughout cfpricer.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returns `Err(Error::Precondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use cfp_core::{ensure, errors::Error};
/// fn positive(x: f64) -> cfp_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(positive(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Precondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::Postcondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use cfp_core::{ensure_post, errors::Error};
/// fn compute(x: f64) -> cfp_core::errors::Result<f64> {
///     let result = x * 2.0;
///     ensure_post!(result > 0.0, "result must be positive, got {result}");
///     Ok(result)
/// }
/// assert!(compute(1.0).is_ok());
/// assert!(compute(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure_post {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Postcondition(
                format!($($msg)*)
            ));
        }
    };
}
