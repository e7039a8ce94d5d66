//! Fail-fast input checks run before any request is sent.

use std::sync::LazyLock;

use regex::Regex;

use crate::api::ApiError;

#[allow(clippy::expect_used)]
static COLOR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^#?[0-9a-fA-F]{6}$").expect("static color regex is valid"));

/// Which error wording to use for a rejected URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlRole {
    /// A web page to convert.
    Webpage,
    /// An online PDF to read.
    OnlinePdf,
    /// A header or footer URL.
    Template,
    /// A base URL for resolving relative links.
    BaseUrl,
}

/// Ensures `url` is an http(s) URL not pointing at `localhost`.
///
/// The service fetches URLs from its own network, so local addresses can
/// never succeed.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] for other schemes or local URLs.
pub fn ensure_public_url(url: &str, role: UrlRole) -> Result<(), ApiError> {
    let lower = url.trim().to_ascii_lowercase();
    if !lower.starts_with("http://") && !lower.starts_with("https://") {
        let what = match role {
            UrlRole::Webpage => "the converted webpage",
            UrlRole::OnlinePdf => "the PDFs available online",
            UrlRole::Template => "the url",
            UrlRole::BaseUrl => "the base url",
        };
        return Err(ApiError::validation(format!(
            "The supported protocols for {what} are http:// and https://."
        )));
    }

    let is_local = url::Url::parse(url.trim())
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_ascii_lowercase))
        .is_some_and(|host| host == "localhost")
        || lower.starts_with("http://localhost");
    if is_local {
        let message = match role {
            UrlRole::OnlinePdf => {
                "Cannot convert local urls via this method. Use the file based methods instead."
            }
            _ => "Cannot convert local urls. The online API can only convert publicly available urls.",
        };
        return Err(ApiError::validation(message));
    }
    Ok(())
}

/// Ensures `color` is in `#RRGGBB` (or `RRGGBB`) form.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] otherwise.
pub fn ensure_color(color: &str) -> Result<(), ApiError> {
    if COLOR_PATTERN.is_match(color) {
        Ok(())
    } else {
        Err(ApiError::validation("Color value must be in #RRGGBB format."))
    }
}

/// Ensures the search text is not empty.
///
/// # Errors
///
/// Returns [`ApiError::Validation`] for an empty string.
pub fn ensure_search_text(text: &str) -> Result<(), ApiError> {
    if text.is_empty() {
        Err(ApiError::validation("Search text cannot be empty."))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_url_accepts_http_and_https() {
        assert!(ensure_public_url("https://example.com", UrlRole::Webpage).is_ok());
        assert!(ensure_public_url("HTTP://Example.com/page", UrlRole::Webpage).is_ok());
    }

    #[test]
    fn test_public_url_rejects_other_schemes() {
        let error = ensure_public_url("ftp://x", UrlRole::Webpage).unwrap_err();
        assert!(error.is_validation());
        assert!(error.to_string().contains("http:// and https://"));
        assert!(ensure_public_url("example.com", UrlRole::Webpage).is_err());
    }

    #[test]
    fn test_public_url_rejects_localhost() {
        let error = ensure_public_url("http://localhost/x", UrlRole::Webpage).unwrap_err();
        assert!(error.to_string().contains("local urls"));
        assert!(ensure_public_url("https://LOCALHOST:8443/x", UrlRole::Webpage).is_err());
        assert!(ensure_public_url("http://localhost.example.com/", UrlRole::Webpage).is_err());
    }

    #[test]
    fn test_public_url_online_pdf_wording() {
        let error = ensure_public_url("http://localhost/a.pdf", UrlRole::OnlinePdf).unwrap_err();
        assert!(error.to_string().contains("via this method"));
    }

    #[test]
    fn test_color_formats() {
        assert!(ensure_color("#FF00aa").is_ok());
        assert!(ensure_color("ff00aa").is_ok());
        assert!(ensure_color("#FFF").is_err());
        assert!(ensure_color("red").is_err());
        assert!(ensure_color("#GG0000").is_err());
    }

    #[test]
    fn test_search_text() {
        assert_eq!(
            ensure_search_text("").unwrap_err().to_string(),
            "Search text cannot be empty."
        );
        assert!(ensure_search_text(" ").is_ok());
    }
}
