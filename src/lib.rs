//! pdfapi Core Library
//!
//! Client SDK for a hosted document-conversion API: render URLs and HTML to
//! PDF, merge PDFs, extract or search text in PDFs, and report account usage.
//!
//! # Architecture
//!
//! - [`api`] - Protocol core: request store, body encoder, transport,
//!   response metadata, async job polling and the error type
//! - [`features`] - Per-feature clients composed on [`api::ApiClient`]
//! - [`validation`] - Fail-fast input checks run before any request
//! - [`config`] - API key, endpoints, timeouts and polling settings

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod config;
pub mod features;
pub mod validation;

mod user_agent;

// Re-export commonly used types
pub use api::{ApiClient, ApiError, CallResult, TextPosition, UsageInformation, WebElement};
pub use config::{ClientConfig, Endpoints};
pub use features::{
    HtmlToPdfClient, PdfMergeClient, PdfToTextClient, UsageClient, WebElementsClient,
};
