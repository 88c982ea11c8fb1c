//! Single-attempt request execution.
//!
//! The executor performs exactly one network attempt: it builds the transport
//! request, issues it, drains the response body fully into memory, and maps
//! the result into a [`Response`]. Write attempts additionally classify the
//! status code and fail with [`RetryableStatusError`] on a transient gateway
//! status, which is the signal the retry loop upstream watches for.
//!
//! Transport resources are scoped to the attempt: the request and response
//! handles are released on every exit path, including faults, by reqwest's
//! owned types.

use std::collections::HashMap;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Method;

use crate::template::errors::{HttpError, RetryableStatusError};
use crate::template::headers::Headers;
use crate::template::response::Response;
use crate::template::status::is_write_retryable;

/// Issues single request attempts against the transport.
///
/// Holds the transport handles and the accept type applied to every request.
/// A second, redirect-disabled transport exists solely for HEAD requests that
/// opt out of redirect following, since the transport fixes its redirect
/// policy at construction time.
#[derive(Debug)]
pub(crate) struct RequestExecutor {
    client: reqwest::Client,
    no_redirect_client: reqwest::Client,
    accept_type: String,
}

impl RequestExecutor {
    /// Creates an executor over the given transport.
    ///
    /// # Panics
    ///
    /// Panics if the redirect-disabled transport cannot be created. This
    /// should only happen in extremely unusual circumstances (e.g., TLS
    /// initialization failure).
    pub(crate) fn new(client: reqwest::Client, accept_type: String) -> Self {
        let no_redirect_client = reqwest::Client::builder()
            .use_rustls_tls()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            no_redirect_client,
            accept_type,
        }
    }

    /// Returns the accept type sent with every request.
    pub(crate) fn accept_type(&self) -> &str {
        &self.accept_type
    }

    /// Performs one bodiless attempt (GET, HEAD, DELETE).
    ///
    /// No status-based failure occurs here; any completed response comes back
    /// as a [`Response`] regardless of its code.
    pub(crate) async fn execute_read(
        &self,
        method: Method,
        uri: &str,
        extra_headers: Option<&HashMap<String, String>>,
        follow_redirects: bool,
    ) -> Result<Response, HttpError> {
        let client = if follow_redirects {
            &self.client
        } else {
            &self.no_redirect_client
        };

        let mut builder = client
            .request(method, uri)
            .header(ACCEPT, &self.accept_type);
        builder = apply_extra_headers(builder, extra_headers);

        let raw = builder.send().await?;
        drain(raw).await
    }

    /// Performs one write attempt (POST, PUT) with a body.
    ///
    /// Sets `Content-Type` and `Accept` unconditionally; `Content-Type`
    /// entries in `extra_headers` are dropped rather than applied. A
    /// transient gateway status (502–504) fails with
    /// [`RetryableStatusError`] instead of returning the response.
    pub(crate) async fn execute_write(
        &self,
        method: Method,
        uri: &str,
        body: Vec<u8>,
        content_type: &str,
        extra_headers: Option<&HashMap<String, String>>,
    ) -> Result<Response, HttpError> {
        let method_name = method.as_str().to_string();

        let mut builder = self
            .client
            .request(method, uri)
            .header(CONTENT_TYPE, content_type)
            .header(ACCEPT, &self.accept_type)
            .body(body);
        builder = apply_extra_headers(builder, extra_headers);

        let raw = builder.send().await?;
        let response = drain(raw).await?;

        if is_write_retryable(response.code()) {
            tracing::error!(
                code = response.code(),
                uri,
                "upstream returned transient status"
            );
            return Err(RetryableStatusError {
                code: response.code(),
                method: method_name,
                uri: uri.to_string(),
                message: response.body_string().into_owned(),
            }
            .into());
        }

        Ok(response)
    }

    /// Performs one url-encoded form POST attempt.
    ///
    /// The form encoding supplies its own `Content-Type`; no accept type or
    /// extra headers are injected on this path.
    pub(crate) async fn execute_form(
        &self,
        uri: &str,
        values: &HashMap<String, String>,
    ) -> Result<Response, HttpError> {
        let raw = self.client.post(uri).form(values).send().await?;
        drain(raw).await
    }
}

/// Applies caller-supplied headers, dropping any `Content-Type` entry.
///
/// The transport normalizes header names to lowercase; entries differing
/// only in ASCII case are each applied under the normalized name, in an
/// unspecified relative order.
fn apply_extra_headers(
    mut builder: reqwest::RequestBuilder,
    extra_headers: Option<&HashMap<String, String>>,
) -> reqwest::RequestBuilder {
    if let Some(extra) = extra_headers {
        for (name, value) in extra {
            if name.eq_ignore_ascii_case("content-type") {
                continue;
            }
            builder = builder.header(name, value);
        }
    }
    builder
}

/// Drains a transport response fully into memory and normalizes it.
async fn drain(raw: reqwest::Response) -> Result<Response, HttpError> {
    let code = raw.status().as_u16();
    let headers = Headers::from_header_map(raw.headers());
    let body = raw.bytes().await?;
    Ok(Response::new(code, body.to_vec(), headers))
}

// Verify the executor is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RequestExecutor>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_executor_construction_keeps_accept_type() {
        let executor = RequestExecutor::new(reqwest::Client::new(), "application/json".to_string());
        assert_eq!(executor.accept_type(), "application/json");
    }

    #[tokio::test]
    async fn test_refused_connection_is_a_transport_error() {
        let executor = RequestExecutor::new(reqwest::Client::new(), "application/json".to_string());

        // Port 1 on loopback refuses the connection immediately.
        let result = executor
            .execute_read(Method::GET, "http://127.0.0.1:1/unreachable", None, true)
            .await;

        assert!(matches!(result, Err(HttpError::Transport(_))));
    }
}
