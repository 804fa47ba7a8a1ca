//! The reqwest-backed transport client.

use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{Client, Method, Url, redirect};
use serde::Serialize;
use tracing;

use polygen_core::config::TransferConfig;

use crate::error::TransferError;

/// Outcome of a HEAD reachability probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reachability {
    /// The URL answered with a 2xx status (after redirects).
    Reachable {
        /// Final status code.
        status: u16,
        /// `Content-Type` header, if the server sent one.
        content_type: Option<String>,
    },
    /// The URL answered with a non-2xx status or could not be reached.
    Unreachable {
        /// Short reason suitable for the submitting caller.
        reason: String,
    },
}

impl Reachability {
    /// Whether the probe succeeded.
    pub fn is_reachable(&self) -> bool {
        matches!(self, Self::Reachable { .. })
    }
}

/// HTTP transport shared by the API surface and every job.
///
/// Holds one pooled `reqwest::Client`; each call sets its own timeout.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    probe_timeout: Duration,
    transfer_timeout: Duration,
}

impl HttpTransport {
    /// Build a transport from configuration.
    pub fn new(config: &TransferConfig) -> Result<Self, TransferError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .redirect(redirect::Policy::limited(config.max_redirects))
            .build()
            .map_err(TransferError::Client)?;

        Ok(Self {
            client,
            probe_timeout: Duration::from_secs(config.probe_timeout_seconds),
            transfer_timeout: Duration::from_secs(config.transfer_timeout_seconds),
        })
    }

    /// Issue a HEAD request and report whether the URL is reachable.
    pub async fn head_check(&self, url: &str) -> Reachability {
        let parsed = match parse_http_url(url) {
            Ok(u) => u,
            Err(e) => {
                return Reachability::Unreachable {
                    reason: e.to_string(),
                };
            }
        };
        let shown = redact(&parsed);

        let result = self
            .client
            .head(parsed)
            .timeout(self.probe_timeout)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                let content_type = response
                    .headers()
                    .get(CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .map(|v| v.to_string());
                tracing::debug!(url = %shown, status = response.status().as_u16(), "HEAD probe succeeded");
                Reachability::Reachable {
                    status: response.status().as_u16(),
                    content_type,
                }
            }
            Ok(response) => Reachability::Unreachable {
                reason: format!("URL not accessible: HTTP {}", response.status().as_u16()),
            },
            Err(e) => Reachability::Unreachable {
                reason: TransferError::from_reqwest(shown, e).to_string(),
            },
        }
    }

    /// Issue an OPTIONS request and return the status code.
    ///
    /// Non-2xx answers are not errors here: many pre-signed URL providers
    /// reject OPTIONS without CORS headers, so callers only log the result.
    pub async fn probe_options(&self, url: &str) -> Result<u16, TransferError> {
        let parsed = parse_http_url(url)?;
        let shown = redact(&parsed);

        let response = self
            .client
            .request(Method::OPTIONS, parsed)
            .timeout(self.probe_timeout)
            .send()
            .await
            .map_err(|e| TransferError::from_reqwest(shown, e))?;

        Ok(response.status().as_u16())
    }

    /// Download the full body of `url`.
    pub async fn get(&self, url: &str) -> Result<Bytes, TransferError> {
        let parsed = parse_http_url(url)?;
        let shown = redact(&parsed);

        let response = self
            .client
            .get(parsed)
            .timeout(self.transfer_timeout)
            .send()
            .await
            .map_err(|e| TransferError::from_reqwest(shown.clone(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransferError::Status {
                status: status.as_u16(),
                url: shown,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| TransferError::from_reqwest(shown.clone(), e))?;

        tracing::debug!(url = %shown, bytes = body.len(), "Downloaded");
        Ok(body)
    }

    /// Upload `body` to `url` with a PUT and the given content type.
    pub async fn put(
        &self,
        url: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<(), TransferError> {
        let parsed = parse_http_url(url)?;
        let shown = redact(&parsed);
        let header = HeaderValue::from_str(content_type).map_err(|e| TransferError::InvalidUrl {
            url: shown.clone(),
            reason: format!("invalid content type '{content_type}': {e}"),
        })?;
        let length = body.len();

        let response = self
            .client
            .put(parsed)
            .header(CONTENT_TYPE, header)
            .body(body)
            .timeout(self.transfer_timeout)
            .send()
            .await
            .map_err(|e| TransferError::from_reqwest(shown.clone(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransferError::Status {
                status: status.as_u16(),
                url: shown,
            });
        }

        tracing::debug!(url = %shown, bytes = length, "Uploaded");
        Ok(())
    }

    /// POST `payload` as JSON with an explicit timeout.
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        payload: &T,
        timeout: Duration,
    ) -> Result<(), TransferError> {
        let parsed = parse_http_url(url)?;
        let shown = redact(&parsed);

        let response = self
            .client
            .post(parsed)
            .json(payload)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| TransferError::from_reqwest(shown.clone(), e))?;

        response
            .error_for_status()
            .map_err(|e| TransferError::from_reqwest(shown, e))?;

        Ok(())
    }
}

/// Parse `url`, accepting only http and https.
fn parse_http_url(url: &str) -> Result<Url, TransferError> {
    let parsed = Url::parse(url).map_err(|e| TransferError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(TransferError::InvalidUrl {
            url: redact(&parsed),
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}

/// Render a URL without query string or fragment.
fn redact(url: &Url) -> String {
    let mut shown = url.clone();
    shown.set_query(None);
    shown.set_fragment(None);
    shown.to_string()
}
