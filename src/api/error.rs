//! Error types for the API client.
//!
//! Every failure a call can produce surfaces as one [`ApiError`], carrying a
//! readable message and, where available, the HTTP status and upstream cause.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while talking to the conversion API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed input detected before any network call.
    #[error("{message}")]
    Validation {
        /// Human-readable description of the rejected input.
        message: String,
    },

    /// No response could be obtained (DNS, connect, TLS, broken body stream).
    #[error("Could not get a response from the API endpoint: {endpoint}. {source}")]
    Transport {
        /// The endpoint that was being called.
        endpoint: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// The request did not complete within the configured timeout.
    #[error("Timed out waiting for the API endpoint: {endpoint}")]
    Timeout {
        /// The endpoint that timed out.
        endpoint: String,
    },

    /// The server answered with a status other than 200 or 202.
    #[error("({status}) {message}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// Server-provided message (response body, or the reason phrase when empty).
        message: String,
    },

    /// An asynchronous call was accepted without a job id.
    #[error("An error occurred launching the asynchronous call to {endpoint}.")]
    AsyncLaunch {
        /// The endpoint the job was submitted to.
        endpoint: String,
    },

    /// The poller exhausted its budget before the job finished.
    #[error("Asynchronous call did not finish in expected timeframe ({max_pings} pings).")]
    AsyncTimeout {
        /// The poll budget that was exhausted.
        max_pings: u32,
    },

    /// A structured response (JSON, XML, Base64 metadata) could not be decoded.
    #[error("Could not decode {what}: {message}")]
    Decode {
        /// What was being decoded (e.g. "search results").
        what: &'static str,
        /// Decoder error text.
        message: String,
    },

    /// Local file system failure (attachment read, output write).
    #[error("IO error on {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl ApiError {
    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates a transport error from a reqwest error, promoting timeouts.
    pub fn transport(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        let endpoint = endpoint.into();
        if source.is_timeout() {
            Self::Timeout { endpoint }
        } else {
            Self::Transport { endpoint, source }
        }
    }

    /// Creates a status error.
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Creates an async launch error.
    pub fn async_launch(endpoint: impl Into<String>) -> Self {
        Self::AsyncLaunch {
            endpoint: endpoint.into(),
        }
    }

    /// Creates an async timeout error.
    #[must_use]
    pub fn async_timeout(max_pings: u32) -> Self {
        Self::AsyncTimeout { max_pings }
    }

    /// Creates a decode error.
    pub fn decode(what: &'static str, message: impl ToString) -> Self {
        Self::Decode {
            what,
            message: message.to_string(),
        }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns the HTTP status code when the failure came from a server response.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true for failures detected before any network call.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

// As in the rest of the crate, there is no `From<reqwest::Error>` or
// `From<std::io::Error>`: every variant needs an endpoint or path for context.
