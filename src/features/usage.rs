//! Account usage client.

use quick_xml::de::from_str;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::api::constants::params;
use crate::api::{
    ApiClient, ApiError, BodyKind, CallRequest, UsageInformation, UsageMonthlyDetails,
};

/// Reports conversions used and available for the API key.
#[derive(Debug, Clone)]
pub struct UsageClient {
    api: ApiClient,
}

impl UsageClient {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Fetches the current usage, with the monthly history when `history` is set.
    ///
    /// # Errors
    ///
    /// Returns any call error, or [`ApiError::Decode`] on a malformed document.
    #[instrument(skip(self))]
    pub async fn usage(&self, history: bool) -> Result<UsageInformation, ApiError> {
        let mut request = CallRequest::with_api_key(&self.api.config().api_key);
        request.set_header("Accept", "text/xml");
        if history {
            request.set_bool(params::GET_HISTORY, true);
        }
        let result = self
            .api
            .call(&self.api.config().endpoints.usage, &request, BodyKind::UrlEncoded)
            .await?;
        let xml = String::from_utf8(result.into_bytes()).map_err(|e| ApiError::decode("usage", e))?;
        let usage = parse_usage(&xml)?;
        info!(used = usage.used, available = usage.available, "usage retrieved");
        Ok(usage)
    }
}

#[derive(Debug, Deserialize)]
struct UsageResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    subscription_type: String,
    #[serde(default)]
    limit: i64,
    #[serde(default)]
    used: i64,
    #[serde(default)]
    available: i64,
    #[serde(default)]
    history: Option<UsageHistoryList>,
}

#[derive(Debug, Deserialize)]
struct UsageHistoryList {
    #[serde(rename = "UsageHistory", default)]
    months: Vec<UsageMonthlyDetails>,
}

/// Parses the `UsageResponse` XML document.
fn parse_usage(xml: &str) -> Result<UsageInformation, ApiError> {
    let response: UsageResponse = from_str(xml).map_err(|e| ApiError::decode("usage", e))?;
    Ok(UsageInformation {
        status: response.status,
        subscription_type: response.subscription_type,
        limit: response.limit,
        used: response.used,
        available: response.available,
        history: response.history.map(|h| h.months).unwrap_or_default(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const WITH_HISTORY: &str = r#"<UsageResponse xmlns="http://schemas.datacontract.org/2004/07/SelectPdf" xmlns:i="http://www.w3.org/2001/XMLSchema-instance">
  <available>950</available>
  <history>
    <UsageHistory><conversions>30</conversions><credits>30</credits><month>5</month><year>2024</year></UsageHistory>
    <UsageHistory><conversions>20</conversions><credits>25</credits><month>6</month><year>2024</year></UsageHistory>
  </history>
  <limit>1000</limit>
  <status>Active</status>
  <subscription_type>Pro</subscription_type>
  <used>50</used>
</UsageResponse>"#;

    #[test]
    fn test_parse_usage_with_history() {
        let usage = parse_usage(WITH_HISTORY).unwrap();
        assert_eq!(usage.status, "Active");
        assert_eq!(usage.subscription_type, "Pro");
        assert_eq!((usage.limit, usage.used, usage.available), (1000, 50, 950));
        assert_eq!(usage.history.len(), 2);
        assert_eq!(usage.history[1].month, 6);
        assert_eq!(usage.history[1].credits, 25);
    }

    #[test]
    fn test_parse_usage_without_history() {
        let xml = "<UsageResponse><available>1</available><limit>2</limit><status>Active</status><subscription_type>Free</subscription_type><used>1</used></UsageResponse>";
        let usage = parse_usage(xml).unwrap();
        assert!(usage.history.is_empty());
        assert_eq!(usage.available, 1);
    }

    #[test]
    fn test_parse_usage_rejects_garbage() {
        let error = parse_usage("<UsageResponse><limit>many</limit></UsageResponse>").unwrap_err();
        assert!(matches!(error, ApiError::Decode { what: "usage", .. }), "got {error:?}");
    }
}
