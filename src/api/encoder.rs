//! Request body serialization.
//!
//! Turns a [`CallRequest`] into wire bytes plus the content type to declare,
//! either as `application/x-www-form-urlencoded` or `multipart/form-data`.

use std::path::Path;

use rand::Rng;
use rand::distributions::Alphanumeric;
use tracing::debug;

use super::constants::ENCODE_CHUNK_CHARS;
use super::error::ApiError;
use super::request::{BodyKind, CallRequest};

const CRLF: &str = "\r\n";
const BOUNDARY_PREFIX: &str = "------------PdfApiBoundary";
const BOUNDARY_RANDOM_LEN: usize = 24;

/// A serialized request body ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedBody {
    /// Value for the `Content-Type` header (includes the boundary for multipart).
    pub content_type: String,
    /// Body bytes.
    pub bytes: Vec<u8>,
}

/// Encodes `request` using the requested wire format.
///
/// # Errors
///
/// Returns [`ApiError::Io`] when a file attachment cannot be read.
pub async fn encode(request: &CallRequest, kind: BodyKind) -> Result<EncodedBody, ApiError> {
    match kind {
        BodyKind::UrlEncoded => Ok(encode_form(request)),
        BodyKind::Multipart => encode_multipart(request, &generate_boundary()).await,
    }
}

/// Serializes parameters as `key=value&` pairs with percent-encoded values.
#[must_use]
pub fn encode_form(request: &CallRequest) -> EncodedBody {
    let mut body = String::new();
    for (name, value) in request.parameters() {
        body.push_str(name);
        body.push('=');
        body.push_str(&encode_value(value));
        body.push('&');
    }
    debug!(bytes = body.len(), "encoded url-encoded body");
    EncodedBody {
        content_type: "application/x-www-form-urlencoded".to_string(),
        bytes: body.into_bytes(),
    }
}

/// Percent-encodes a value with RFC 3986 component rules.
///
/// Long values are encoded in chunks of [`ENCODE_CHUNK_CHARS`] characters and
/// concatenated; chunks end on character boundaries, so the output equals a
/// single-pass encoding.
#[must_use]
pub fn encode_value(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    let mut rest = value;
    while !rest.is_empty() {
        let split = rest
            .char_indices()
            .nth(ENCODE_CHUNK_CHARS)
            .map_or(rest.len(), |(index, _)| index);
        let (chunk, tail) = rest.split_at(split);
        encoded.push_str(&urlencoding::encode(chunk));
        rest = tail;
    }
    encoded
}

/// Serializes parameters and attachments as `multipart/form-data`.
///
/// # Errors
///
/// Returns [`ApiError::Io`] when a file attachment cannot be read.
pub async fn encode_multipart(
    request: &CallRequest,
    boundary: &str,
) -> Result<EncodedBody, ApiError> {
    let mut bytes = Vec::new();

    for (name, value) in request.parameters() {
        push_str(&mut bytes, &format!("--{boundary}{CRLF}"));
        push_str(
            &mut bytes,
            &format!("Content-Disposition: form-data; name=\"{name}\"{CRLF}{CRLF}"),
        );
        push_str(&mut bytes, value);
        push_str(&mut bytes, CRLF);
    }

    for (name, path) in request.files() {
        // Read in one shot; the handle is closed before the next part either way.
        let content = tokio::fs::read(path)
            .await
            .map_err(|e| ApiError::io(path, e))?;
        push_file_part(&mut bytes, boundary, name, &attachment_filename(path), &content);
    }

    for (name, content) in request.binary() {
        push_file_part(&mut bytes, boundary, name, name, content);
    }

    push_str(&mut bytes, &format!("--{boundary}--{CRLF}{CRLF}"));

    debug!(
        bytes = bytes.len(),
        attachments = request.attachment_count(),
        "encoded multipart body"
    );
    Ok(EncodedBody {
        content_type: format!("multipart/form-data; boundary={boundary}"),
        bytes,
    })
}

/// Generates a fresh multipart boundary.
#[must_use]
pub fn generate_boundary() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(BOUNDARY_RANDOM_LEN)
        .map(char::from)
        .collect();
    format!("{BOUNDARY_PREFIX}{suffix}")
}

fn push_file_part(bytes: &mut Vec<u8>, boundary: &str, name: &str, filename: &str, content: &[u8]) {
    push_str(bytes, &format!("--{boundary}{CRLF}"));
    push_str(
        bytes,
        &format!("Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"{CRLF}"),
    );
    push_str(bytes, &format!("Content-Type: application/octet-stream{CRLF}{CRLF}"));
    bytes.extend_from_slice(content);
    push_str(bytes, CRLF);
}

fn push_str(bytes: &mut Vec<u8>, text: &str) {
    bytes.extend_from_slice(text.as_bytes());
}

fn attachment_filename(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}
