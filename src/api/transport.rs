//! HTTP transport: POSTs an encoded body and hands back status, headers and
//! a body stream.
//!
//! [`Transport`] is the seam between the protocol core and the network;
//! [`HttpTransport`] is the reqwest-backed implementation.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use futures_util::stream::BoxStream;
use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use tracing::{debug, instrument, warn};

use super::encoder::EncodedBody;
use super::error::ApiError;

/// Response body as a stream of chunks.
pub type BodyStream = BoxStream<'static, Result<Vec<u8>, ApiError>>;

/// Raw server answer, before status classification.
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Canonical reason phrase for the status, if any.
    pub reason: Option<&'static str>,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body, not yet read.
    pub body: BodyStream,
}

impl fmt::Debug for TransportResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

impl TransportResponse {
    /// Reads the whole body into memory.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by the body stream.
    pub async fn collect_body(self) -> Result<Vec<u8>, ApiError> {
        let mut body = Vec::new();
        let mut stream = self.body;
        while let Some(chunk) = stream.next().await {
            body.extend_from_slice(&chunk?);
        }
        Ok(body)
    }
}

/// Sends one POST request to an endpoint.
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    /// Sends `body` to `endpoint` with the given custom headers.
    ///
    /// Implementations return any HTTP status as `Ok`; only the absence of a
    /// response is an error.
    async fn send(
        &self,
        endpoint: &str,
        body: EncodedBody,
        headers: &HeaderMap,
    ) -> Result<TransportResponse, ApiError>;
}

/// Reqwest-backed transport.
///
/// Create once and reuse to benefit from connection pooling.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Builds a transport with the given timeouts and User-Agent.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when the HTTP client cannot be built
    /// (e.g. TLS backend initialization failure).
    pub fn new(
        connect_timeout: Duration,
        request_timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .gzip(true)
            .user_agent(user_agent)
            .build()
            .map_err(|e| ApiError::transport("(client initialization)", e))?;
        Ok(Self { client })
    }

    /// Wraps an existing reqwest client.
    #[must_use]
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(level = "debug", skip(self, body, headers), fields(bytes = body.bytes.len()))]
    async fn send(
        &self,
        endpoint: &str,
        body: EncodedBody,
        headers: &HeaderMap,
    ) -> Result<TransportResponse, ApiError> {
        debug!("sending request");
        let response = self
            .client
            .post(endpoint)
            .headers(headers.clone())
            .header(CONTENT_TYPE, body.content_type)
            .body(body.bytes)
            .send()
            .await
            .map_err(|e| ApiError::transport(endpoint, e))?;

        let status = response.status();
        let response_headers = response.headers().clone();
        let endpoint_owned = endpoint.to_string();
        let stream = response
            .bytes_stream()
            .map(move |chunk| {
                chunk
                    .map(|bytes| bytes.to_vec())
                    .map_err(|e| ApiError::transport(endpoint_owned.clone(), e))
            })
            .boxed();

        debug!(status = status.as_u16(), "received response");
        Ok(TransportResponse {
            status: status.as_u16(),
            reason: status.canonical_reason(),
            headers: response_headers,
            body: stream,
        })
    }
}

/// Headers the transport sets itself; user values for these are skipped.
const TRANSPORT_OWNED_HEADERS: &[&str] = &[
    "content-type",
    "content-length",
    "host",
    "connection",
    "transfer-encoding",
    "expect",
];

/// Converts custom request headers into a [`HeaderMap`].
///
/// `Accept` and `User-Agent` go through their typed header names and replace
/// the transport defaults. Headers the transport owns are skipped with a
/// warning. Control characters in names and values are percent-encoded.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] when a header name is not a valid token
/// even after encoding.
pub fn build_header_map<'a>(
    headers: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> Result<HeaderMap, ApiError> {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        let lower = name.trim().to_ascii_lowercase();
        let value = HeaderValue::from_str(&encode_header_string(value))
            .map_err(|_| ApiError::validation(format!("Invalid value for header '{name}'.")))?;
        match lower.as_str() {
            "accept" => {
                map.insert(ACCEPT, value);
            }
            "user-agent" => {
                map.insert(USER_AGENT, value);
            }
            owned if TRANSPORT_OWNED_HEADERS.contains(&owned) => {
                warn!(header = %name, "skipping header managed by the transport");
            }
            _ => {
                let header_name = HeaderName::from_bytes(encode_header_string(&lower).as_bytes())
                    .map_err(|_| ApiError::validation(format!("Invalid header name '{name}'.")))?;
                map.insert(header_name, value);
            }
        }
    }
    Ok(map)
}

/// Percent-encodes ASCII control characters (except TAB) and DEL.
#[must_use]
pub fn encode_header_string(input: &str) -> String {
    let mut encoded = String::with_capacity(input.len());
    for ch in input.chars() {
        if (ch < ' ' && ch != '\t') || ch == '\u{7f}' {
            encoded.push_str(&format!("%{:02x}", u32::from(ch)));
        } else {
            encoded.push(ch);
        }
    }
    encoded
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_header_string_control_characters() {
        assert_eq!(encode_header_string("a\r\nb"), "a%0d%0ab");
        assert_eq!(encode_header_string("tab\there"), "tab\there");
        assert_eq!(encode_header_string("del\u{7f}"), "del%7f");
        assert_eq!(encode_header_string("plain"), "plain");
    }

    #[test]
    fn test_build_header_map_accept_uses_typed_header() {
        let map = build_header_map([("Accept", "application/json")]).unwrap();
        assert_eq!(map.get(ACCEPT).unwrap(), "application/json");
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_build_header_map_skips_transport_owned() {
        let map = build_header_map([
            ("Content-Length", "10"),
            ("Host", "evil.example"),
            ("X-Custom", "1"),
        ])
        .unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("x-custom").unwrap(), "1");
    }

    #[test]
    fn test_build_header_map_value_with_newline_is_encoded() {
        let map = build_header_map([("X-Note", "line1\nline2")]).unwrap();
        assert_eq!(map.get("x-note").unwrap(), "line1%0aline2");
    }

    #[test]
    fn test_build_header_map_invalid_name_is_validation_error() {
        let error = build_header_map([("bad header", "v")]).unwrap_err();
        assert!(error.is_validation());
    }

    #[test]
    fn test_http_transport_builds() {
        let transport = HttpTransport::new(
            Duration::from_secs(5),
            Duration::from_secs(10),
            "pdfapi-test",
        );
        assert!(transport.is_ok());
    }
}
