//! # http-template
//!
//! A uniform HTTP request/response layer over [`reqwest`], providing a
//! single normalized [`Response`] value type, automatic bounded retry of
//! write operations on transient server failures, pluggable body
//! encoding/decoding, and consistent header injection across all verbs.
//!
//! ## Overview
//!
//! This crate provides:
//! - A verb-level facade ([`HttpTemplate`]) for GET, HEAD, POST, PUT, and
//!   DELETE, with fire-and-forget and typed-deserialization variants
//! - A normalized [`Response`] value: status code, fully buffered body
//!   bytes, and an ordered header multimap ([`Headers`])
//! - Status classification ([`StatusClass`]) with distinct read-failure and
//!   write-retry predicates
//! - Bounded retry of writes on 502–504 under a configurable
//!   [`RetryPolicy`] with fixed or exponential-backoff waits
//! - An optional, pluggable [`BodyCodec`] (JSON by default) for structured
//!   payloads
//!
//! ## Quick Start
//!
//! ```rust
//! use http_template::HttpTemplate;
//!
//! // Default configuration: JSON in and out, 5 attempts for writes.
//! let template = HttpTemplate::new();
//! assert_eq!(template.accept_type(), "application/json");
//! ```
//!
//! ## Making Requests
//!
//! ```rust,ignore
//! use http_template::HttpTemplate;
//!
//! let template = HttpTemplate::new();
//!
//! // Raw GET: any status comes back as a Response.
//! let response = template.get("https://api.example.com/widgets/1", None).await?;
//! println!("{} bytes", response.body().len());
//!
//! // Typed GET: validated against the 200-204 success band, decoded via
//! // the codec.
//! #[derive(serde::Deserialize)]
//! struct Widget { id: u64 }
//! let widget: Widget = template.get_json("https://api.example.com/widgets/1").await?;
//!
//! // POST: serialized via the codec, retried on 502-504, validated.
//! let created = template.post("https://api.example.com/widgets", &widget).await?;
//! ```
//!
//! ## Retry Behavior
//!
//! Write operations retry on 502, 503, and 504 up to the policy's attempt
//! budget; all other statuses and every transport fault propagate without
//! retry. See the [`template`] module documentation for the full matrix.
//!
//! ```rust
//! use std::time::Duration;
//! use http_template::{HttpTemplate, RetryPolicy, WaitStrategy};
//!
//! let template = HttpTemplate::builder()
//!     .retry_policy(RetryPolicy {
//!         max_attempts: 3,
//!         wait: WaitStrategy::ExponentialBackoff {
//!             initial: Duration::from_millis(250),
//!             max: Duration::from_secs(8),
//!         },
//!         ..RetryPolicy::default()
//!     })
//!     .build()
//!     .unwrap();
//! # let _ = template;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: all configuration lives on the template instance
//! - **Fail-fast validation**: invalid configuration is rejected at build
//!   time, and typed operations without a codec fail before any network call
//! - **Thread-safe**: the template is `Send + Sync` and immutable after
//!   construction
//! - **Errors always propagate**: even fire-and-forget operations surface
//!   terminal failures; only response bodies are optional
//! - **Async-first**: designed for use with the Tokio runtime; one in-flight
//!   attempt per call, no background tasks

pub mod error;
pub mod template;

// Re-export public types at crate root for convenience
pub use error::ConfigError;
pub use template::{
    is_read_failed, is_retryable_failure, is_write_retryable, BodyCodec, CodecError, Headers,
    HttpError, HttpTemplate, HttpTemplateBuilder, JsonCodec, RequestFailedError, Response,
    RetriesExhaustedError, RetryPolicy, RetryableStatusError, StatusClass, WaitStrategy,
    APPLICATION_JSON,
};
