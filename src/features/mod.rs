//! Per-feature clients composed on [`ApiClient`](crate::api::ApiClient).
//!
//! Each client owns one [`CallRequest`](crate::api::CallRequest) for its
//! lifetime. Option setters write into it and return `&mut Self` for
//! chaining; operations borrow it for one encode-and-send cycle.
//!
//! - [`HtmlToPdfClient`] - convert URLs or HTML strings to PDF
//! - [`PdfToTextClient`] - extract or search text in PDFs
//! - [`PdfMergeClient`] - merge local and online PDFs
//! - [`UsageClient`] - account usage
//! - [`WebElementsClient`] - web element locations of a finished conversion
//!
//! # Example
//!
//! ```no_run
//! use pdfapi_core::ClientConfig;
//! use pdfapi_core::api::ApiClient;
//! use pdfapi_core::features::{HtmlToPdfClient, PageSize};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let api = ApiClient::new(ClientConfig::from_env()?)?;
//! let mut client = HtmlToPdfClient::new(api);
//! client.set_page_size(PageSize::Letter).set_margins(10);
//! let result = client
//!     .convert_url_to_file("https://example.com", "example.pdf".as_ref())
//!     .await?;
//! println!("{} pages", result.page_count);
//! # Ok(())
//! # }
//! ```

mod html_to_pdf;
mod options;
mod pdf_merge;
mod pdf_to_text;
mod usage;
mod web_elements;

use std::path::Path;

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::debug;

pub use html_to_pdf::HtmlToPdfClient;
pub use options::{
    NumericOption, OutputFormat, PageLayout, PageMode, PageNumbersAlignment, PageOrientation,
    PageSize, RenderingEngine, SecureProtocol, StartupMode, TextLayout,
};
pub use pdf_merge::PdfMergeClient;
pub use pdf_to_text::{ExtractedText, PdfToTextClient, SearchOptions};
pub use usage::UsageClient;
pub use web_elements::WebElementsClient;

use crate::api::{ApiError, CallResult};

/// Writes an in-memory result to a new file, removing it on failure.
///
/// The returned result no longer carries the body.
pub(crate) async fn save_to_file(mut result: CallResult, path: &Path) -> Result<CallResult, ApiError> {
    let bytes = result.body.take().unwrap_or_default();
    if let Err(error) = tokio::fs::write(path, &bytes).await {
        debug!(path = %path.display(), "cleaning up partial file after error");
        let _ = tokio::fs::remove_file(path).await;
        return Err(ApiError::io(path, error));
    }
    Ok(result)
}

/// Copies an in-memory result into `writer` and flushes it.
pub(crate) async fn save_to_writer<W>(mut result: CallResult, writer: &mut W) -> Result<CallResult, ApiError>
where
    W: AsyncWrite + Unpin + Send,
{
    let bytes = result.body.take().unwrap_or_default();
    writer
        .write_all(&bytes)
        .await
        .map_err(|e| ApiError::io("(response sink)", e))?;
    writer
        .flush()
        .await
        .map_err(|e| ApiError::io("(response sink)", e))?;
    Ok(result)
}
