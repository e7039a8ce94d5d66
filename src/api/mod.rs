//! Request/response protocol core for the conversion API.
//!
//! A call flows through these pieces:
//!
//! 1. [`CallRequest`] accumulates parameters, attachments and headers.
//! 2. [`encoder`] serializes it as url-encoded or multipart bytes.
//! 3. [`Transport`] POSTs the bytes ([`HttpTransport`] on reqwest).
//! 4. [`ApiClient`] classifies the status (200 result, 202 accepted, other
//!    error) and [`metadata`] pulls page count, job id and web elements out
//!    of the response headers.
//! 5. For long-running work, [`AsyncJobPoller`] polls the job endpoint until
//!    the result is ready.
//!
//! All failures surface as [`ApiError`].
//!
//! # Example
//!
//! ```no_run
//! use pdfapi_core::ClientConfig;
//! use pdfapi_core::api::{ApiClient, BodyKind, CallRequest};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::new("your-api-key");
//! let client = ApiClient::new(config)?;
//!
//! let mut request = CallRequest::with_api_key(&client.config().api_key);
//! request.set("url", "https://example.com");
//! let endpoint = client.config().endpoints.convert.clone();
//! let result = client.call(&endpoint, &request, BodyKind::UrlEncoded).await?;
//! println!("{} pages, {} bytes", result.page_count, result.bytes().len());
//! # Ok(())
//! # }
//! ```

mod client;
pub mod constants;
pub mod encoder;
mod error;
pub mod metadata;
mod model;
mod poller;
mod request;
mod transport;

pub use client::ApiClient;
pub use encoder::EncodedBody;
pub use error::ApiError;
pub use metadata::ResponseMetadata;
pub use model::{
    CallResult, PdfRectangle, TextPosition, UsageInformation, UsageMonthlyDetails, WebElement,
    WebElementPdfRectangle,
};
pub use poller::{AsyncJobPoller, PollState};
pub use request::{BodyKind, CallRequest};
pub use transport::{
    BodyStream, HttpTransport, Transport, TransportResponse, build_header_map,
    encode_header_string,
};
