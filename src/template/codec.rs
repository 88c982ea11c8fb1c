//! Pluggable body encoding and decoding.
//!
//! Structured request and response bodies pass through a [`BodyCodec`].
//! The trait pivots on [`serde_json::Value`] so it stays object-safe: typed
//! values are bridged to and from `Value` at the facade, and the codec only
//! decides how a `Value` becomes wire bytes. The shipped [`JsonCodec`] is the
//! default; a template built [`without_codec`](crate::HttpTemplateBuilder::without_codec)
//! is restricted to raw string and byte operations.

use std::fmt;

use thiserror::Error;

/// Error produced by a [`BodyCodec`] while encoding or decoding a payload.
#[derive(Debug, Error)]
#[error("codec error: {0}")]
pub struct CodecError(#[source] Box<dyn std::error::Error + Send + Sync>);

impl CodecError {
    /// Wraps an underlying encoding or decoding failure.
    #[must_use]
    pub fn new(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Box::new(source))
    }
}

/// Converts structured payloads to and from request/response body bytes.
///
/// Implementations must be `Send + Sync`; a codec is part of a template's
/// immutable configuration and is shared across concurrent calls.
pub trait BodyCodec: fmt::Debug + Send + Sync {
    /// Encodes a structured value into request body bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError`] if the value cannot be represented in the
    /// codec's wire format.
    fn serialize(&self, value: &serde_json::Value) -> Result<Vec<u8>, CodecError>;

    /// Decodes response body bytes into a structured value.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError`] if the bytes are not a valid document in the
    /// codec's wire format.
    fn deserialize(&self, bytes: &[u8]) -> Result<serde_json::Value, CodecError>;
}

/// The default JSON codec, backed by `serde_json`.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonCodec;

impl BodyCodec for JsonCodec {
    fn serialize(&self, value: &serde_json::Value) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(value).map_err(CodecError::new)
    }

    fn deserialize(&self, bytes: &[u8]) -> Result<serde_json::Value, CodecError> {
        serde_json::from_slice(bytes).map_err(CodecError::new)
    }
}
