//! The verb-level request template.
//!
//! This module provides [`HttpTemplate`], the public entry point tying the
//! executor, retry driver, and codec together into ergonomic per-verb
//! operations.

use std::collections::HashMap;
use std::fmt;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ConfigError;
use crate::template::codec::{BodyCodec, CodecError, JsonCodec};
use crate::template::errors::{HttpError, RequestFailedError};
use crate::template::executor::RequestExecutor;
use crate::template::response::Response;
use crate::template::retry::{self, RetryPolicy};
use crate::template::status::is_read_failed;

/// The default content and accept type.
pub const APPLICATION_JSON: &str = "application/json";

/// A uniform request/response layer over an HTTP transport.
///
/// The template issues requests through a shared [`reqwest::Client`],
/// normalizes every completed round trip into a [`Response`], and retries
/// write operations that fail with a transient gateway status (502–504)
/// under a configurable [`RetryPolicy`].
///
/// # Thread Safety
///
/// `HttpTemplate` is `Send + Sync` and holds no mutable state; all
/// configuration is fixed at construction. It can be shared freely across
/// async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use http_template::HttpTemplate;
///
/// let template = HttpTemplate::new();
///
/// // Raw GET: any status comes back as a Response.
/// let response = template.get("https://api.example.com/widgets/1", None).await?;
/// println!("{}", response.code());
///
/// // Typed POST: serialized via the codec, retried on 502-504,
/// // validated against the 200-204 success band.
/// let created = template
///     .post("https://api.example.com/widgets", &widget)
///     .await?;
/// ```
#[derive(Debug)]
pub struct HttpTemplate {
    executor: RequestExecutor,
    codec: Option<Box<dyn BodyCodec>>,
    content_type: String,
    retry_policy: RetryPolicy,
}

// Verify HttpTemplate is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpTemplate>();
};

impl HttpTemplate {
    /// Creates a template with the default configuration: JSON content and
    /// accept types, the JSON codec, and the default retry policy.
    ///
    /// # Panics
    ///
    /// Panics if the underlying transport cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS
    /// initialization failure).
    #[must_use]
    pub fn new() -> Self {
        Self::builder()
            .build()
            .expect("default configuration is valid")
    }

    /// Creates a new builder for constructing an `HttpTemplate`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::time::Duration;
    /// use http_template::{HttpTemplate, RetryPolicy, WaitStrategy};
    ///
    /// let template = HttpTemplate::builder()
    ///     .content_type("application/xml")
    ///     .retry_policy(RetryPolicy {
    ///         max_attempts: 3,
    ///         wait: WaitStrategy::Fixed(Duration::from_millis(500)),
    ///         ..RetryPolicy::default()
    ///     })
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(template.content_type(), "application/xml");
    /// ```
    #[must_use]
    pub fn builder() -> HttpTemplateBuilder {
        HttpTemplateBuilder::default()
    }

    /// Returns the content type sent with request bodies.
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Returns the accept type sent with every request.
    #[must_use]
    pub fn accept_type(&self) -> &str {
        self.executor.accept_type()
    }

    /// Returns the retry policy applied to write operations.
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    /// Returns `true` if a body codec is configured.
    #[must_use]
    pub const fn has_codec(&self) -> bool {
        self.codec.is_some()
    }

    /// Issues a GET request and returns the completed response.
    ///
    /// No status validation is applied: a 404 or 500 comes back as a normal
    /// [`Response`]. Extra headers are applied verbatim, except that any
    /// entry named `Content-Type` (compared case-insensitively) is dropped.
    /// Entries differing only in ASCII case are each applied under the
    /// transport's normalized name, in an unspecified relative order.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Transport`] on a transport-level fault.
    pub async fn get(
        &self,
        uri: &str,
        extra_headers: Option<&HashMap<String, String>>,
    ) -> Result<Response, HttpError> {
        self.executor
            .execute_read(Method::GET, uri, extra_headers, true)
            .await
    }

    /// Issues a GET request and returns the body as a string.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Failed`] if the status code falls outside the
    /// 200–204 success band, and [`HttpError::Transport`] on a
    /// transport-level fault.
    pub async fn get_string(&self, uri: &str) -> Result<String, HttpError> {
        let response = self.get(uri, None).await?;
        let response = Self::validate(uri, response)?;
        Ok(response.body_string().into_owned())
    }

    /// Issues a GET request and decodes the body via the configured codec.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingCodec`] (before any network call) if no
    /// codec is configured, [`HttpError::Failed`] if the status code falls
    /// outside the 200–204 success band, and [`HttpError::Codec`] if the
    /// body cannot be decoded into `T`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// #[derive(serde::Deserialize)]
    /// struct Widget { id: u64, name: String }
    ///
    /// let widget: Widget = template.get_json("https://api.example.com/widgets/1").await?;
    /// ```
    pub async fn get_json<T: DeserializeOwned>(&self, uri: &str) -> Result<T, HttpError> {
        let codec = self.codec.as_deref().ok_or(ConfigError::MissingCodec)?;
        let response = self.get(uri, None).await?;
        let response = Self::validate(uri, response)?;
        let value = codec.deserialize(response.body())?;
        serde_json::from_value(value).map_err(|e| CodecError::new(e).into())
    }

    /// Issues a HEAD request, following redirects.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Transport`] on a transport-level fault.
    pub async fn head(&self, uri: &str) -> Result<Response, HttpError> {
        self.head_with_redirects(uri, true).await
    }

    /// Issues a HEAD request with an explicit redirect-following toggle.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Transport`] on a transport-level fault.
    pub async fn head_with_redirects(
        &self,
        uri: &str,
        follow_redirects: bool,
    ) -> Result<Response, HttpError> {
        self.executor
            .execute_read(Method::HEAD, uri, None, follow_redirects)
            .await
    }

    /// Issues a POST with a codec-serialized body, retrying transient
    /// gateway failures.
    ///
    /// The final response (after retries succeeded or were never needed) is
    /// validated against the 200–204 success band.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingCodec`] if no codec is configured,
    /// [`HttpError::RetriesExhausted`] once the retry budget is spent on
    /// 502–504 responses, [`HttpError::Failed`] if the final status falls
    /// outside the success band, and [`HttpError::Transport`] on a
    /// transport-level fault (never retried).
    pub async fn post<T: Serialize + ?Sized>(
        &self,
        uri: &str,
        body: &T,
    ) -> Result<Response, HttpError> {
        let bytes = self.encode_body(body)?;
        self.write_with_retry(Method::POST, uri, bytes).await
    }

    /// Issues a PUT with a codec-serialized body, retrying transient gateway
    /// failures.
    ///
    /// # Errors
    ///
    /// As for [`post`](Self::post).
    pub async fn put<T: Serialize + ?Sized>(
        &self,
        uri: &str,
        body: &T,
    ) -> Result<Response, HttpError> {
        let bytes = self.encode_body(body)?;
        self.write_with_retry(Method::PUT, uri, bytes).await
    }

    /// Issues a POST whose body is the display form of `body`.
    ///
    /// This is the write path for codec-less templates; it is retried and
    /// validated exactly like [`post`](Self::post).
    ///
    /// # Errors
    ///
    /// As for [`post`](Self::post), minus the codec requirement.
    pub async fn post_text(
        &self,
        uri: &str,
        body: impl fmt::Display + Send,
    ) -> Result<Response, HttpError> {
        let bytes = body.to_string().into_bytes();
        self.write_with_retry(Method::POST, uri, bytes).await
    }

    /// Issues a POST and returns the body of the validated response as a
    /// string.
    ///
    /// # Errors
    ///
    /// As for [`post`](Self::post).
    pub async fn post_for_string<T: Serialize + ?Sized>(
        &self,
        uri: &str,
        body: &T,
    ) -> Result<String, HttpError> {
        let response = self.post(uri, body).await?;
        Ok(response.body_string().into_owned())
    }

    /// Issues a POST and discards the response body.
    ///
    /// Only the body is optional: terminal failures still propagate as
    /// errors exactly as for [`post`](Self::post).
    ///
    /// # Errors
    ///
    /// As for [`post`](Self::post).
    pub async fn post_fire_and_forget<T: Serialize + ?Sized>(
        &self,
        uri: &str,
        body: &T,
    ) -> Result<(), HttpError> {
        self.post(uri, body).await.map(|_| ())
    }

    /// Issues a POST with a raw byte body, bypassing the codec.
    ///
    /// Performs a single attempt: a transient gateway status (502–504)
    /// surfaces as [`HttpError::RetryableStatus`] without retry, and no
    /// success-band validation is applied to other statuses. When
    /// `content_type` is `None` the template's default content type is used.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::RetryableStatus`] on 502–504 and
    /// [`HttpError::Transport`] on a transport-level fault.
    pub async fn post_bytes(
        &self,
        uri: &str,
        bytes: impl Into<Vec<u8>> + Send,
        content_type: Option<&str>,
        extra_headers: Option<&HashMap<String, String>>,
    ) -> Result<Response, HttpError> {
        let content_type = content_type.unwrap_or(&self.content_type);
        self.executor
            .execute_write(Method::POST, uri, bytes.into(), content_type, extra_headers)
            .await
    }

    /// Issues a PUT with a raw byte body, bypassing the codec.
    ///
    /// Performs a single attempt with the same semantics as
    /// [`post_bytes`](Self::post_bytes).
    ///
    /// # Errors
    ///
    /// As for [`post_bytes`](Self::post_bytes).
    pub async fn put_bytes(
        &self,
        uri: &str,
        bytes: impl Into<Vec<u8>> + Send,
        content_type: Option<&str>,
    ) -> Result<Response, HttpError> {
        let content_type = content_type.unwrap_or(&self.content_type);
        self.executor
            .execute_write(Method::PUT, uri, bytes.into(), content_type, None)
            .await
    }

    /// Issues a url-encoded form POST.
    ///
    /// Performs a single attempt, validated against the 200–204 success
    /// band but never retried. The form encoding supplies its own
    /// `Content-Type`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Failed`] if the status code falls outside the
    /// success band and [`HttpError::Transport`] on a transport-level fault.
    pub async fn post_form(
        &self,
        uri: &str,
        values: &HashMap<String, String>,
    ) -> Result<Response, HttpError> {
        let response = self.executor.execute_form(uri, values).await?;
        Self::validate(uri, response)
    }

    /// Issues a DELETE request.
    ///
    /// Performs a single attempt with no retry and no status validation:
    /// any completed response, including 4xx/5xx, comes back as a normal
    /// [`Response`].
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Transport`] on a transport-level fault.
    pub async fn delete(&self, uri: &str) -> Result<Response, HttpError> {
        self.executor
            .execute_read(Method::DELETE, uri, None, true)
            .await
    }

    /// Serializes a typed body via the configured codec.
    fn encode_body<T: Serialize + ?Sized>(&self, body: &T) -> Result<Vec<u8>, HttpError> {
        let codec = self.codec.as_deref().ok_or(ConfigError::MissingCodec)?;
        let value = serde_json::to_value(body).map_err(CodecError::new)?;
        Ok(codec.serialize(&value)?)
    }

    /// Runs a write attempt under the retry policy, then validates the final
    /// status against the success band exactly once.
    async fn write_with_retry(
        &self,
        method: Method,
        uri: &str,
        body: Vec<u8>,
    ) -> Result<Response, HttpError> {
        let response = retry::call_with_retry(&self.retry_policy, || {
            self.executor.execute_write(
                method.clone(),
                uri,
                body.clone(),
                &self.content_type,
                None,
            )
        })
        .await?;
        Self::validate(uri, response)
    }

    /// Fails with [`RequestFailedError`] when the status code is outside the
    /// 200–204 success band.
    fn validate(uri: &str, response: Response) -> Result<Response, HttpError> {
        if is_read_failed(response.code()) {
            return Err(RequestFailedError {
                code: response.code(),
                uri: uri.to_string(),
                response,
            }
            .into());
        }
        Ok(response)
    }
}

impl Default for HttpTemplate {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing [`HttpTemplate`] instances.
///
/// All fields have defaults; `build` only fails when the supplied retry
/// policy is invalid.
///
/// # Defaults
///
/// - `client`: a fresh rustls-backed [`reqwest::Client`]
/// - `content_type` / `accept_type`: [`APPLICATION_JSON`]
/// - `retry_policy`: [`RetryPolicy::default`] (5 attempts, fixed 1 s wait)
/// - codec: [`JsonCodec`], unless [`without_codec`](Self::without_codec)
///
/// # Example
///
/// ```rust
/// use http_template::HttpTemplate;
///
/// let template = HttpTemplate::builder()
///     .accept_type("text/plain")
///     .without_codec()
///     .build()
///     .unwrap();
///
/// assert_eq!(template.accept_type(), "text/plain");
/// assert!(!template.has_codec());
/// ```
#[derive(Debug, Default)]
pub struct HttpTemplateBuilder {
    client: Option<reqwest::Client>,
    content_type: Option<String>,
    accept_type: Option<String>,
    retry_policy: Option<RetryPolicy>,
    codec: Option<Box<dyn BodyCodec>>,
    codec_disabled: bool,
}

impl HttpTemplateBuilder {
    /// Supplies the transport the template issues requests through.
    ///
    /// Timeouts, proxies, and TLS settings belong on this client; the
    /// template adds none of its own.
    #[must_use]
    pub fn client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Sets the content type sent with request bodies.
    #[must_use]
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Sets the accept type sent with every request.
    #[must_use]
    pub fn accept_type(mut self, accept_type: impl Into<String>) -> Self {
        self.accept_type = Some(accept_type.into());
        self
    }

    /// Sets the retry policy applied to write operations.
    #[must_use]
    pub fn retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = Some(retry_policy);
        self
    }

    /// Replaces the default JSON codec.
    #[must_use]
    pub fn codec(mut self, codec: impl BodyCodec + 'static) -> Self {
        self.codec = Some(Box::new(codec));
        self.codec_disabled = false;
        self
    }

    /// Configures the template without any body codec.
    ///
    /// Typed operations ([`HttpTemplate::get_json`], [`HttpTemplate::post`],
    /// [`HttpTemplate::put`]) then fail fast with
    /// [`ConfigError::MissingCodec`]; raw string and byte operations remain
    /// available.
    #[must_use]
    pub fn without_codec(mut self) -> Self {
        self.codec = None;
        self.codec_disabled = true;
        self
    }

    /// Builds the template, validating the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoAttemptsAllowed`] if the retry policy's
    /// `max_attempts` is zero.
    ///
    /// # Panics
    ///
    /// Panics if the underlying transport cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS
    /// initialization failure).
    pub fn build(self) -> Result<HttpTemplate, ConfigError> {
        let retry_policy = self.retry_policy.unwrap_or_default();
        if retry_policy.max_attempts == 0 {
            return Err(ConfigError::NoAttemptsAllowed {
                attempts: retry_policy.max_attempts,
            });
        }

        let client = self.client.unwrap_or_else(|| {
            reqwest::Client::builder()
                .use_rustls_tls()
                .build()
                .expect("Failed to create HTTP client")
        });

        let codec = if self.codec_disabled {
            tracing::debug!("template configured without a body codec; typed operations will fail");
            None
        } else {
            Some(
                self.codec
                    .unwrap_or_else(|| Box::new(JsonCodec) as Box<dyn BodyCodec>),
            )
        };

        Ok(HttpTemplate {
            executor: RequestExecutor::new(
                client,
                self.accept_type
                    .unwrap_or_else(|| APPLICATION_JSON.to_string()),
            ),
            codec,
            content_type: self
                .content_type
                .unwrap_or_else(|| APPLICATION_JSON.to_string()),
            retry_policy,
        })
    }
}
