//! Transport error type.

use polygen_core::error::{AppError, ErrorKind};
use thiserror::Error;

/// Errors raised by [`crate::HttpTransport`].
///
/// URLs in messages are rendered without their query string, so pre-signed
/// credentials never reach logs or callbacks.
#[derive(Debug, Error)]
pub enum TransferError {
    /// The URL could not be parsed or is not http(s).
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The offending URL as given.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The request did not complete within its timeout.
    #[error("Request to '{url}' timed out")]
    Timeout {
        /// Redacted target URL.
        url: String,
    },

    /// The remote host could not be reached.
    #[error("Could not connect to '{url}'")]
    Connect {
        /// Redacted target URL.
        url: String,
        /// Underlying client error.
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status.
    #[error("HTTP {status} from '{url}'")]
    Status {
        /// Response status code.
        status: u16,
        /// Redacted target URL.
        url: String,
    },

    /// Any other request failure (body read, encoding, redirect loop...).
    #[error("Request to '{url}' failed: {source}")]
    Request {
        /// Redacted target URL.
        url: String,
        /// Underlying client error.
        #[source]
        source: reqwest::Error,
    },

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl TransferError {
    /// Classify a `reqwest` error raised while talking to `url`.
    ///
    /// reqwest renders the request URL, query included, into its own
    /// message; that URL is dropped so only the redacted `url` is shown.
    pub(crate) fn from_reqwest(url: String, err: reqwest::Error) -> Self {
        let err = err.without_url();
        if err.is_timeout() {
            Self::Timeout { url }
        } else if err.is_connect() {
            Self::Connect { url, source: err }
        } else if let Some(status) = err.status() {
            Self::Status {
                status: status.as_u16(),
                url,
            }
        } else {
            Self::Request { url, source: err }
        }
    }

    /// HTTP status code, when the failure was a non-2xx response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<TransferError> for AppError {
    fn from(err: TransferError) -> Self {
        let kind = match &err {
            TransferError::InvalidUrl { .. } => ErrorKind::Validation,
            TransferError::Client(_) => ErrorKind::Internal,
            _ => ErrorKind::Transfer,
        };
        AppError::with_source(kind, err.to_string(), err)
    }
}
