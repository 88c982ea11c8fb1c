//! The request template layer.
//!
//! This module provides the uniform request/response abstraction over the
//! HTTP transport. It handles single-attempt execution, response
//! normalization, status classification, and bounded retry of write
//! operations.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`HttpTemplate`]: the verb-level facade and public entry point
//! - [`HttpTemplateBuilder`]: construction-time configuration
//! - [`Response`]: a completed response (status code, body bytes, headers)
//! - [`Headers`]: an ordered header multimap preserving duplicates
//! - [`StatusClass`]: classification of a status code
//! - [`RetryPolicy`] / [`WaitStrategy`]: retry configuration for writes
//! - [`BodyCodec`] / [`JsonCodec`]: pluggable body encoding
//! - [`HttpError`]: unified error type for all operations
//!
//! # Retry Behavior
//!
//! Write operations (`post`, `put`, and their typed variants) retry
//! automatically on transient gateway statuses:
//!
//! - **502 (Bad Gateway), 503 (Service Unavailable), 504 (Gateway
//!   Timeout)**: retried up to the policy's attempt budget, waiting between
//!   attempts
//! - **Any other status**: never retried; statuses outside 200–204 fail the
//!   operation after the final attempt
//! - **Transport faults**: never retried, surfaced immediately
//!
//! Raw-byte writes (`post_bytes`, `put_bytes`), form posts, GET, HEAD, and
//! DELETE perform a single attempt.

mod codec;
mod errors;
mod executor;
mod headers;
mod http_template;
mod response;
mod retry;
mod status;

pub use codec::{BodyCodec, CodecError, JsonCodec};
pub use errors::{HttpError, RequestFailedError, RetriesExhaustedError, RetryableStatusError};
pub use headers::Headers;
pub use http_template::{HttpTemplate, HttpTemplateBuilder, APPLICATION_JSON};
pub use response::Response;
pub use retry::{is_retryable_failure, RetryPolicy, WaitStrategy};
pub use status::{is_read_failed, is_write_retryable, StatusClass};
