//! Client configuration: API key, endpoints, timeouts and async polling.
//!
//! Built once (defaults, environment, or explicit `with_*` calls) and shared
//! by every feature client created from it.

use std::time::Duration;

use crate::api::ApiError;
use crate::api::constants::{
    CONNECT_TIMEOUT_SECS, DEFAULT_ASYNC_ENDPOINT, DEFAULT_CONVERT_ENDPOINT, DEFAULT_MAX_PINGS,
    DEFAULT_PDF_MERGE_ENDPOINT, DEFAULT_PDF_TO_TEXT_ENDPOINT, DEFAULT_POLL_INTERVAL,
    DEFAULT_USAGE_ENDPOINT, DEFAULT_WEB_ELEMENTS_ENDPOINT, REQUEST_TIMEOUT_SECS,
};
use crate::user_agent;

/// Environment variable holding the API key.
pub const ENV_API_KEY: &str = "PDFAPI_KEY";
/// Environment variable overriding the conversion endpoint.
pub const ENV_ENDPOINT: &str = "PDFAPI_ENDPOINT";
/// Environment variable overriding the async job endpoint.
pub const ENV_ASYNC_ENDPOINT: &str = "PDFAPI_ASYNC_ENDPOINT";
/// Environment variable overriding the web elements endpoint.
pub const ENV_WEB_ELEMENTS_ENDPOINT: &str = "PDFAPI_WEB_ELEMENTS_ENDPOINT";
/// Environment variable overriding the poll interval (seconds).
pub const ENV_POLL_INTERVAL_SECS: &str = "PDFAPI_POLL_INTERVAL_SECS";
/// Environment variable overriding the poll budget.
pub const ENV_MAX_PINGS: &str = "PDFAPI_MAX_PINGS";

/// Service endpoints, each independently overridable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub convert: String,
    pub async_job: String,
    pub web_elements: String,
    pub pdf_to_text: String,
    pub pdf_merge: String,
    pub usage: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            convert: DEFAULT_CONVERT_ENDPOINT.to_string(),
            async_job: DEFAULT_ASYNC_ENDPOINT.to_string(),
            web_elements: DEFAULT_WEB_ELEMENTS_ENDPOINT.to_string(),
            pdf_to_text: DEFAULT_PDF_TO_TEXT_ENDPOINT.to_string(),
            pdf_merge: DEFAULT_PDF_MERGE_ENDPOINT.to_string(),
            usage: DEFAULT_USAGE_ENDPOINT.to_string(),
        }
    }
}

impl Endpoints {
    /// Points every endpoint at `base` (e.g. a mock server), keeping the
    /// default path of each.
    #[must_use]
    pub fn with_base_url(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            convert: format!("{base}/api2/convert/"),
            async_job: format!("{base}/api2/asyncjob/"),
            web_elements: format!("{base}/api2/webelements/"),
            pdf_to_text: format!("{base}/api2/pdftotext/"),
            pdf_merge: format!("{base}/api2/pdfmerge/"),
            usage: format!("{base}/api2/usage/"),
        }
    }
}

/// Configuration shared by all clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API key sent as the `key` parameter.
    pub api_key: String,
    /// Endpoints.
    pub endpoints: Endpoints,
    /// TCP connect timeout.
    pub connect_timeout: Duration,
    /// Whole-request timeout.
    pub request_timeout: Duration,
    /// Pause between async job polls.
    pub poll_interval: Duration,
    /// Maximum async job polls.
    pub max_pings: u32,
    /// User-Agent header value.
    pub user_agent: String,
}

impl ClientConfig {
    /// Creates a configuration with defaults for everything but the key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoints: Endpoints::default(),
            connect_timeout: Duration::from_secs(CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_pings: DEFAULT_MAX_PINGS,
            user_agent: user_agent::default_user_agent(),
        }
    }

    /// Loads configuration from `PDFAPI_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] when the key is missing or a numeric
    /// variable does not parse.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`from_env`](Self::from_env).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let get = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let api_key = get(ENV_API_KEY)
            .ok_or_else(|| ApiError::validation(format!("{ENV_API_KEY} is not set.")))?;
        let mut config = Self::new(api_key);

        if let Some(endpoint) = get(ENV_ENDPOINT) {
            config.endpoints.convert = endpoint;
        }
        if let Some(endpoint) = get(ENV_ASYNC_ENDPOINT) {
            config.endpoints.async_job = endpoint;
        }
        if let Some(endpoint) = get(ENV_WEB_ELEMENTS_ENDPOINT) {
            config.endpoints.web_elements = endpoint;
        }
        if let Some(secs) = get(ENV_POLL_INTERVAL_SECS) {
            let secs: u64 = secs.parse().map_err(|_| {
                ApiError::validation(format!("{ENV_POLL_INTERVAL_SECS} must be a whole number of seconds."))
            })?;
            config.poll_interval = Duration::from_secs(secs);
        }
        if let Some(pings) = get(ENV_MAX_PINGS) {
            config.max_pings = pings
                .parse::<u32>()
                .ok()
                .filter(|&pings| pings > 0)
                .ok_or_else(|| {
                    ApiError::validation(format!("{ENV_MAX_PINGS} must be a positive integer."))
                })?;
        }
        Ok(config)
    }

    /// Replaces all endpoints.
    #[must_use]
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Sets the pause between async job polls.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Sets the async poll budget.
    #[must_use]
    pub fn with_max_pings(mut self, max_pings: u32) -> Self {
        self.max_pings = max_pings;
        self
    }

    /// Sets connect and request timeouts.
    #[must_use]
    pub fn with_timeouts(mut self, connect: Duration, request: Duration) -> Self {
        self.connect_timeout = connect;
        self.request_timeout = request;
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_new_uses_defaults() {
        let config = ClientConfig::new("key");
        assert_eq!(config.endpoints.convert, DEFAULT_CONVERT_ENDPOINT);
        assert_eq!(config.poll_interval, Duration::from_secs(3));
        assert_eq!(config.max_pings, 1000);
        assert_eq!(config.request_timeout, Duration::from_secs(6000));
    }

    #[test]
    fn test_from_lookup_requires_key() {
        let error = ClientConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(error.to_string().contains(ENV_API_KEY));
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_API_KEY, "abc"),
            (ENV_ENDPOINT, "http://localhost:9000/convert/"),
            (ENV_POLL_INTERVAL_SECS, "1"),
            (ENV_MAX_PINGS, "5"),
        ]))
        .unwrap();
        assert_eq!(config.api_key, "abc");
        assert_eq!(config.endpoints.convert, "http://localhost:9000/convert/");
        assert_eq!(config.endpoints.async_job, DEFAULT_ASYNC_ENDPOINT);
        assert_eq!(config.poll_interval, Duration::from_secs(1));
        assert_eq!(config.max_pings, 5);
    }

    #[test]
    fn test_from_lookup_rejects_bad_number() {
        let error =
            ClientConfig::from_lookup(lookup(&[(ENV_API_KEY, "abc"), (ENV_MAX_PINGS, "lots")]))
                .unwrap_err();
        assert!(error.is_validation());
    }

    #[test]
    fn test_from_lookup_rejects_zero_max_pings() {
        let error = ClientConfig::from_lookup(lookup(&[(ENV_API_KEY, "abc"), (ENV_MAX_PINGS, "0")]))
            .unwrap_err();
        assert!(error.is_validation());
        assert_eq!(error.to_string(), format!("{ENV_MAX_PINGS} must be a positive integer."));
    }

    #[test]
    fn test_endpoints_with_base_url() {
        let endpoints = Endpoints::with_base_url("http://127.0.0.1:8080/");
        assert_eq!(endpoints.convert, "http://127.0.0.1:8080/api2/convert/");
        assert_eq!(endpoints.usage, "http://127.0.0.1:8080/api2/usage/");
    }
}
