//! HTTP-specific error types.
//!
//! This module contains the error types raised by template operations.
//!
//! # Error Handling
//!
//! Different failure scenarios get specific types:
//!
//! - [`RetryableStatusError`]: a write attempt returned a transient gateway
//!   status (502–504)
//! - [`RetriesExhaustedError`]: every attempt allowed by the retry policy
//!   failed with a retryable status
//! - [`RequestFailedError`]: a completed request's status fell outside the
//!   success band
//! - [`HttpError`]: unified error type encompassing all of the above plus
//!   transport, codec, and configuration failures
//!
//! # Example
//!
//! ```rust,ignore
//! use http_template::HttpError;
//!
//! match template.post("https://api.example.com/things", &body).await {
//!     Ok(response) => println!("created: {}", response.code()),
//!     Err(HttpError::Failed(e)) => println!("rejected with {}", e.code),
//!     Err(HttpError::RetriesExhausted(e)) => println!("gave up after {} attempts", e.attempts),
//!     Err(HttpError::Transport(e)) => println!("network problem: {e}"),
//!     Err(other) => println!("{other}"),
//! }
//! ```

use thiserror::Error;

use crate::error::ConfigError;
use crate::template::codec::CodecError;
use crate::template::response::Response;

/// Error raised when a write attempt returns a transient gateway status.
///
/// This is the signal the retry driver watches for. Callers observe it only
/// when a non-retried write variant hits a 502–504, or wrapped inside
/// [`RetriesExhaustedError`] once retries run out.
#[derive(Debug, Error)]
#[error("{method} {uri} returned transient status {code}: {message}")]
pub struct RetryableStatusError {
    /// The HTTP status code of the attempt (502–504).
    pub code: u16,
    /// The HTTP method of the attempt.
    pub method: String,
    /// The request URI.
    pub uri: String,
    /// The response body of the failed attempt, as text.
    pub message: String,
}

/// Error raised when every attempt allowed by the retry policy failed with a
/// retryable status.
#[derive(Debug, Error)]
#[error("exhausted {attempts} attempts, last failure: {last}")]
pub struct RetriesExhaustedError {
    /// The total number of attempts made.
    pub attempts: u32,
    /// The failure observed on the final attempt.
    #[source]
    pub last: RetryableStatusError,
}

/// Error raised when a completed request's status code falls outside the
/// success band.
///
/// Carries the full [`Response`] so callers can inspect the body and headers
/// the server sent alongside the failing status.
#[derive(Debug, Error)]
#[error("request to {uri} failed with status {code}: {response}")]
pub struct RequestFailedError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The request URI.
    pub uri: String,
    /// Snapshot of the completed response.
    pub response: Response,
}

/// Unified error type for all template operations.
///
/// Use pattern matching to handle specific failures at API boundaries.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Transport-level fault: connectivity, timeout, or a malformed response.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A write attempt returned a transient gateway status.
    #[error(transparent)]
    RetryableStatus(#[from] RetryableStatusError),

    /// All attempts allowed by the retry policy were used up.
    #[error(transparent)]
    RetriesExhausted(#[from] RetriesExhaustedError),

    /// A completed request's status fell outside the success band.
    #[error(transparent)]
    Failed(#[from] RequestFailedError),

    /// Body encoding or decoding failed.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// The template is not configured for the requested operation.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
