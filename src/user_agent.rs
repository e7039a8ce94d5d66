//! Default User-Agent string for API requests.

/// Project URL for User-Agent identification.
const PROJECT_UA_URL: &str = "https://github.com/fierce/pdfapi";

/// Default User-Agent (identifies the SDK and its version).
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("pdfapi/{version} (rust-sdk; +{PROJECT_UA_URL})")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_user_agent_contains_version_and_url() {
        let ua = default_user_agent();
        assert!(ua.contains(PROJECT_UA_URL), "UA must contain project URL: {ua}");
        assert_eq!(
            Some(env!("CARGO_PKG_VERSION")),
            ua.strip_prefix("pdfapi/").and_then(|s| s.split(' ').next()),
            "UA must contain crate version"
        );
    }

    #[test]
    fn test_default_user_agent_is_valid_header_value() {
        let ua = default_user_agent();
        assert!(reqwest::header::HeaderValue::from_str(&ua).is_ok());
    }
}
