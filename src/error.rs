//! Configuration error types.
//!
//! This module contains error types raised when a template is constructed or
//! used with an invalid configuration.
//!
//! # Error Handling
//!
//! Configuration problems are surfaced fail-fast: [`ConfigError`] values are
//! returned from [`HttpTemplateBuilder::build`](crate::HttpTemplateBuilder::build)
//! before a template exists, or from typed facade operations before any
//! network call is made.
//!
//! # Example
//!
//! ```rust
//! use http_template::{ConfigError, HttpTemplate, RetryPolicy};
//!
//! let result = HttpTemplate::builder()
//!     .retry_policy(RetryPolicy {
//!         max_attempts: 0,
//!         ..RetryPolicy::default()
//!     })
//!     .build();
//! assert!(matches!(result, Err(ConfigError::NoAttemptsAllowed { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur when constructing or using a template configuration.
///
/// Each variant provides a clear, actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A typed body operation was requested without a codec configured.
    #[error("No body codec is configured. Configure a codec to use typed request or response bodies.")]
    MissingCodec,

    /// The retry policy does not allow even a single attempt.
    #[error("Retry policy must allow at least one attempt, got {attempts}.")]
    NoAttemptsAllowed {
        /// The invalid attempt count that was provided.
        attempts: u32,
    },
}
