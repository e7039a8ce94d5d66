//! Web elements lookup for a finished conversion.

use tracing::instrument;

use crate::api::{ApiClient, ApiError, WebElement};

/// Retrieves the PDF locations of the elements matched by
/// `pdf_web_elements_selectors` during an earlier conversion.
#[derive(Debug, Clone)]
pub struct WebElementsClient {
    api: ApiClient,
}

impl WebElementsClient {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Fetches the elements recorded for `job_id`.
    ///
    /// # Errors
    ///
    /// Returns any call error, or [`ApiError::Decode`] on a malformed payload.
    #[instrument(skip(self))]
    pub async fn fetch(&self, job_id: &str) -> Result<Vec<WebElement>, ApiError> {
        self.api
            .fetch_web_elements(&self.api.config().api_key, job_id)
            .await
    }
}
