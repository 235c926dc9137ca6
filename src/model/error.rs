//! Error types for osq.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error returned from startup and the terminal shell
//!   - [`GatewayError`] - A call to the remote search service failed
//!   - [`crate::config::ConfigError`] - Configuration could not be loaded or is invalid
//!   - `std::io::Error` - Terminal failures
//!
//! # Recovery Strategy
//!
//! Gateway errors are **non-fatal** once the UI is running: the search session
//! keeps its last good screen, raises a failure notice, and the user retries.
//! They only become fatal through `--check`, where reporting them is the point.
//! Configuration and terminal errors are fatal and propagate to `main`.

use std::time::Duration;
use thiserror::Error;

/// Top-level application error.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration file or values were rejected.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// The remote service could not be reached or answered badly.
    #[error("Search service error: {0}")]
    Gateway(#[from] GatewayError),

    /// Terminal or TUI rendering error.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Broad class of a gateway failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The service is unreachable or did not answer in time.
    Network,
    /// The service answered with an error status or a payload of the wrong shape.
    BadResponse,
}

/// A failed call to the remote search service.
///
/// Carries rendered messages rather than the transport's error values so it can
/// be cloned into UI state and compared in tests.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Connection refused, DNS failure, reset, or any other transport failure.
    #[error("service unreachable: {0}")]
    Unreachable(String),

    /// No response within the configured timeout.
    #[error("request timed out after {}s", .0.as_secs())]
    TimedOut(Duration),

    /// The service answered with a non-success HTTP status.
    #[error("service returned HTTP {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// The service's `error` message, or the raw body when it has none.
        message: String,
    },

    /// The body could not be decoded into the expected shape.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl GatewayError {
    /// Classify this failure.
    pub fn kind(&self) -> FailureKind {
        match self {
            GatewayError::Unreachable(_) | GatewayError::TimedOut(_) => FailureKind::Network,
            GatewayError::Status { .. } | GatewayError::Malformed(_) => FailureKind::BadResponse,
        }
    }
}
