//! PDF to text extraction and text search client.

use std::path::Path;

use tokio::io::AsyncWrite;
use tracing::{info, instrument};

use super::options::{NumericOption, OutputFormat, TextLayout};
use super::{save_to_file, save_to_writer};
use crate::api::constants::params;
use crate::api::{ApiClient, ApiError, BodyKind, CallRequest, CallResult, TextPosition};
use crate::validation::{UrlRole, ensure_public_url, ensure_search_text};

/// Form field carrying the uploaded PDF.
const INPUT_PDF_FIELD: &str = "inputPdf";
const ACTION_CONVERT: &str = "Convert";
const ACTION_SEARCH: &str = "Search";

/// Text extracted from a PDF.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedText {
    /// Extracted text (or HTML, depending on the output format).
    pub text: String,
    /// Pages in the processed document.
    pub page_count: u32,
}

/// Search options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    pub case_sensitive: bool,
    pub whole_words_only: bool,
}

/// Where the PDF comes from.
enum Source<'a> {
    File(&'a Path),
    Url(&'a str),
}

/// Extracts text from PDFs and searches inside them.
///
/// Every call is sent as `multipart/form-data`; local files are uploaded,
/// online PDFs are fetched by the service.
#[derive(Debug, Clone)]
pub struct PdfToTextClient {
    api: ApiClient,
    request: CallRequest,
}

impl PdfToTextClient {
    /// Creates a client using the API key from `api`'s configuration.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        let request = CallRequest::with_api_key(&api.config().api_key);
        Self { api, request }
    }

    /// Returns the underlying request store.
    #[must_use]
    pub fn request(&self) -> &CallRequest {
        &self.request
    }

    /// Extracts the text of a local PDF.
    ///
    /// # Errors
    ///
    /// Returns any call error, or [`ApiError::Decode`] when the text is not UTF-8.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub async fn text_from_file(&mut self, path: &Path) -> Result<ExtractedText, ApiError> {
        self.prepare_convert(Source::File(path))?;
        let result = self.call().await?;
        into_text(result)
    }

    /// Extracts the text of an online PDF.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for non-http(s) or local URLs, any
    /// call error, or [`ApiError::Decode`] when the text is not UTF-8.
    #[instrument(skip(self))]
    pub async fn text_from_url(&mut self, url: &str) -> Result<ExtractedText, ApiError> {
        self.prepare_convert(Source::Url(url))?;
        let result = self.call().await?;
        into_text(result)
    }

    /// Extracts the text of a local PDF through an asynchronous job.
    ///
    /// # Errors
    ///
    /// Same as [`text_from_file`](Self::text_from_file), plus
    /// [`ApiError::AsyncLaunch`] and [`ApiError::AsyncTimeout`].
    #[instrument(skip(self), fields(path = %path.display()))]
    pub async fn text_from_file_async(&mut self, path: &Path) -> Result<ExtractedText, ApiError> {
        self.prepare_convert(Source::File(path))?;
        let result = self.run_async().await?;
        into_text(result)
    }

    /// Extracts the text of an online PDF through an asynchronous job.
    ///
    /// # Errors
    ///
    /// Same as [`text_from_url`](Self::text_from_url), plus
    /// [`ApiError::AsyncLaunch`] and [`ApiError::AsyncTimeout`].
    #[instrument(skip(self))]
    pub async fn text_from_url_async(&mut self, url: &str) -> Result<ExtractedText, ApiError> {
        self.prepare_convert(Source::Url(url))?;
        let result = self.run_async().await?;
        into_text(result)
    }

    /// Extracts the text of a local PDF into a new file.
    ///
    /// # Errors
    ///
    /// Returns any call or IO error; a partial output file is removed.
    #[instrument(skip(self), fields(path = %path.display(), output = %output.display()))]
    pub async fn text_from_file_to_file(
        &mut self,
        path: &Path,
        output: &Path,
    ) -> Result<CallResult, ApiError> {
        self.prepare_convert(Source::File(path))?;
        self.call_to_file(output).await
    }

    /// Extracts the text of an online PDF into a new file.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for bad URLs, or any call or IO error.
    #[instrument(skip(self), fields(output = %output.display()))]
    pub async fn text_from_url_to_file(
        &mut self,
        url: &str,
        output: &Path,
    ) -> Result<CallResult, ApiError> {
        self.prepare_convert(Source::Url(url))?;
        self.call_to_file(output).await
    }

    /// Extracts the text of a local PDF asynchronously into a new file.
    ///
    /// # Errors
    ///
    /// Same as [`text_from_file_async`](Self::text_from_file_async), plus IO failures.
    pub async fn text_from_file_to_file_async(
        &mut self,
        path: &Path,
        output: &Path,
    ) -> Result<CallResult, ApiError> {
        self.prepare_convert(Source::File(path))?;
        let result = self.run_async().await?;
        save_to_file(result, output).await
    }

    /// Extracts the text of an online PDF asynchronously into a new file.
    ///
    /// # Errors
    ///
    /// Same as [`text_from_url_async`](Self::text_from_url_async), plus IO failures.
    pub async fn text_from_url_to_file_async(
        &mut self,
        url: &str,
        output: &Path,
    ) -> Result<CallResult, ApiError> {
        self.prepare_convert(Source::Url(url))?;
        let result = self.run_async().await?;
        save_to_file(result, output).await
    }

    /// Extracts the text of a local PDF into `writer`.
    ///
    /// # Errors
    ///
    /// Returns any call error, or a write failure on `writer`.
    #[instrument(skip(self, writer), fields(path = %path.display()))]
    pub async fn text_from_file_to_writer<W>(
        &mut self,
        path: &Path,
        writer: &mut W,
    ) -> Result<CallResult, ApiError>
    where
        W: AsyncWrite + Unpin + Send,
    {
        self.prepare_convert(Source::File(path))?;
        self.call_to_writer(writer).await
    }

    /// Extracts the text of an online PDF into `writer`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for bad URLs, any call error, or a
    /// write failure on `writer`.
    #[instrument(skip(self, writer))]
    pub async fn text_from_url_to_writer<W>(
        &mut self,
        url: &str,
        writer: &mut W,
    ) -> Result<CallResult, ApiError>
    where
        W: AsyncWrite + Unpin + Send,
    {
        self.prepare_convert(Source::Url(url))?;
        self.call_to_writer(writer).await
    }

    /// Extracts the text of a local PDF asynchronously into `writer`.
    ///
    /// # Errors
    ///
    /// Same as [`text_from_file_async`](Self::text_from_file_async), plus
    /// write failures.
    pub async fn text_from_file_to_writer_async<W>(
        &mut self,
        path: &Path,
        writer: &mut W,
    ) -> Result<CallResult, ApiError>
    where
        W: AsyncWrite + Unpin + Send,
    {
        self.prepare_convert(Source::File(path))?;
        let result = self.run_async().await?;
        save_to_writer(result, writer).await
    }

    /// Extracts the text of an online PDF asynchronously into `writer`.
    ///
    /// # Errors
    ///
    /// Same as [`text_from_url_async`](Self::text_from_url_async), plus
    /// write failures.
    pub async fn text_from_url_to_writer_async<W>(
        &mut self,
        url: &str,
        writer: &mut W,
    ) -> Result<CallResult, ApiError>
    where
        W: AsyncWrite + Unpin + Send,
    {
        self.prepare_convert(Source::Url(url))?;
        let result = self.run_async().await?;
        save_to_writer(result, writer).await
    }

    /// Searches a local PDF for `text`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for empty `text`, any call error, or
    /// [`ApiError::Decode`] when the result is not a JSON list of positions.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub async fn search_file(
        &mut self,
        path: &Path,
        text: &str,
        options: SearchOptions,
    ) -> Result<Vec<TextPosition>, ApiError> {
        self.prepare_search(Source::File(path), text, options)?;
        let result = self.call().await?;
        parse_positions(&result)
    }

    /// Searches an online PDF for `text`.
    ///
    /// # Errors
    ///
    /// Same as [`search_file`](Self::search_file), plus URL validation.
    #[instrument(skip(self))]
    pub async fn search_url(
        &mut self,
        url: &str,
        text: &str,
        options: SearchOptions,
    ) -> Result<Vec<TextPosition>, ApiError> {
        self.prepare_search(Source::Url(url), text, options)?;
        let result = self.call().await?;
        parse_positions(&result)
    }

    /// Searches a local PDF through an asynchronous job.
    ///
    /// # Errors
    ///
    /// Same as [`search_file`](Self::search_file), plus
    /// [`ApiError::AsyncLaunch`] and [`ApiError::AsyncTimeout`].
    #[instrument(skip(self), fields(path = %path.display()))]
    pub async fn search_file_async(
        &mut self,
        path: &Path,
        text: &str,
        options: SearchOptions,
    ) -> Result<Vec<TextPosition>, ApiError> {
        self.prepare_search(Source::File(path), text, options)?;
        let result = self.run_async().await?;
        parse_positions(&result)
    }

    /// Searches an online PDF through an asynchronous job.
    ///
    /// # Errors
    ///
    /// Same as [`search_url`](Self::search_url), plus
    /// [`ApiError::AsyncLaunch`] and [`ApiError::AsyncTimeout`].
    #[instrument(skip(self))]
    pub async fn search_url_async(
        &mut self,
        url: &str,
        text: &str,
        options: SearchOptions,
    ) -> Result<Vec<TextPosition>, ApiError> {
        self.prepare_search(Source::Url(url), text, options)?;
        let result = self.run_async().await?;
        parse_positions(&result)
    }

    // ==================== Options ====================

    /// First page to process (1-based). Default 1.
    pub fn set_start_page(&mut self, page: u32) -> &mut Self {
        self.request.set_int("start_page", i64::from(page));
        self
    }

    /// Last page to process; 0 means the last page of the document.
    pub fn set_end_page(&mut self, page: u32) -> &mut Self {
        self.request.set_int("end_page", i64::from(page));
        self
    }

    /// Password needed to open an encrypted PDF.
    pub fn set_user_password(&mut self, password: &str) -> &mut Self {
        self.request.set("user_password", password);
        self
    }

    pub fn set_text_layout(&mut self, layout: TextLayout) -> &mut Self {
        self.request.set_int("text_layout", layout.value());
        self
    }

    pub fn set_output_format(&mut self, format: OutputFormat) -> &mut Self {
        self.request.set_int("output_format", format.value());
        self
    }

    /// Server-side processing timeout in seconds.
    pub fn set_timeout(&mut self, seconds: u32) -> &mut Self {
        self.request.set_int("timeout", i64::from(seconds));
        self
    }

    /// Sets a parameter not covered by a dedicated setter.
    pub fn set_custom_parameter(&mut self, name: &str, value: &str) -> &mut Self {
        self.request.set(name, value);
        self
    }

    // ==================== Internals ====================

    fn prepare_convert(&mut self, source: Source<'_>) -> Result<(), ApiError> {
        self.set_source(source)?;
        self.request.set(params::ACTION, ACTION_CONVERT);
        self.request.remove_header("Accept");
        Ok(())
    }

    fn prepare_search(
        &mut self,
        source: Source<'_>,
        text: &str,
        options: SearchOptions,
    ) -> Result<(), ApiError> {
        ensure_search_text(text)?;
        self.set_source(source)?;
        self.request
            .set(params::ACTION, ACTION_SEARCH)
            .set(params::SEARCH_TEXT, text)
            .set_bool(params::CASE_SENSITIVE, options.case_sensitive)
            .set_bool(params::WHOLE_WORDS_ONLY, options.whole_words_only)
            .set_header("Accept", "application/json");
        Ok(())
    }

    /// Validates and installs the input; the store is untouched on error.
    fn set_source(&mut self, source: Source<'_>) -> Result<(), ApiError> {
        match source {
            Source::File(path) => {
                self.request.clear_attachments();
                self.request
                    .attach_file(INPUT_PDF_FIELD, path)
                    .set(params::URL, "");
            }
            Source::Url(url) => {
                ensure_public_url(url, UrlRole::OnlinePdf)?;
                self.request.clear_attachments();
                self.request.set(params::URL, url);
            }
        }
        Ok(())
    }

    async fn call(&mut self) -> Result<CallResult, ApiError> {
        self.request.set_bool(params::ASYNC, false);
        self.api
            .call(&self.api.config().endpoints.pdf_to_text, &self.request, BodyKind::Multipart)
            .await
    }

    async fn call_to_file(&mut self, output: &Path) -> Result<CallResult, ApiError> {
        self.request.set_bool(params::ASYNC, false);
        self.api
            .call_to_file(
                &self.api.config().endpoints.pdf_to_text,
                &self.request,
                BodyKind::Multipart,
                output,
            )
            .await
    }

    async fn call_to_writer<W>(&mut self, writer: &mut W) -> Result<CallResult, ApiError>
    where
        W: AsyncWrite + Unpin + Send,
    {
        self.request.set_bool(params::ASYNC, false);
        self.api
            .call_to_writer(
                &self.api.config().endpoints.pdf_to_text,
                &self.request,
                BodyKind::Multipart,
                writer,
            )
            .await
    }

    async fn run_async(&mut self) -> Result<CallResult, ApiError> {
        let endpoint = self.api.config().endpoints.pdf_to_text.clone();
        self.api
            .run_async(&endpoint, &mut self.request, BodyKind::Multipart)
            .await
    }
}

fn into_text(result: CallResult) -> Result<ExtractedText, ApiError> {
    let page_count = result.page_count;
    let text = String::from_utf8(result.into_bytes()).map_err(|e| ApiError::decode("text", e))?;
    Ok(ExtractedText { text, page_count })
}

fn parse_positions(result: &CallResult) -> Result<Vec<TextPosition>, ApiError> {
    let positions: Option<Vec<TextPosition>> =
        serde_json::from_slice(result.bytes()).map_err(|e| ApiError::decode("search results", e))?;
    let positions = positions.unwrap_or_default();
    info!(matches = positions.len(), "search complete");
    Ok(positions)
}
