//! PDF merge client.

use std::path::{Path, PathBuf};

use tokio::io::AsyncWrite;
use tracing::{debug, instrument};

use super::options::{NumericOption, PageLayout, PageMode};
use super::{save_to_file, save_to_writer};
use crate::api::constants::params;
use crate::api::{ApiClient, ApiError, BodyKind, CallRequest, CallResult};

/// Merges local and online PDFs into one document.
///
/// Inputs are merged in the order they were added. The input list is
/// cleared after every save attempt, successful or not, so the client can be
/// reused for the next merge; document options are kept.
#[derive(Debug, Clone)]
pub struct PdfMergeClient {
    api: ApiClient,
    request: CallRequest,
    inputs: usize,
}

impl PdfMergeClient {
    /// Creates a client using the API key from `api`'s configuration.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        let request = CallRequest::with_api_key(&api.config().api_key);
        Self {
            api,
            request,
            inputs: 0,
        }
    }

    /// Returns the underlying request store.
    #[must_use]
    pub fn request(&self) -> &CallRequest {
        &self.request
    }

    /// Number of inputs queued for the next save.
    #[must_use]
    pub fn input_count(&self) -> usize {
        self.inputs
    }

    /// Queues a local PDF.
    pub fn add_file(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.add_local(path.into(), None)
    }

    /// Queues a password-protected local PDF.
    pub fn add_file_with_password(
        &mut self,
        path: impl Into<PathBuf>,
        password: &str,
    ) -> &mut Self {
        self.add_local(path.into(), Some(password))
    }

    /// Queues an online PDF, fetched by the service.
    pub fn add_url_file(&mut self, url: &str) -> &mut Self {
        self.add_remote(url, None)
    }

    /// Queues a password-protected online PDF.
    pub fn add_url_file_with_password(&mut self, url: &str, password: &str) -> &mut Self {
        self.add_remote(url, Some(password))
    }

    /// Merges the queued inputs and returns the PDF in memory.
    ///
    /// # Errors
    ///
    /// Returns any call error, including IO errors reading local inputs.
    #[instrument(skip(self), fields(inputs = self.inputs))]
    pub async fn save(&mut self) -> Result<CallResult, ApiError> {
        self.prepare_sync();
        let outcome = self
            .api
            .call(&self.api.config().endpoints.pdf_merge, &self.request, BodyKind::Multipart)
            .await;
        self.reset_inputs();
        outcome
    }

    /// Merges the queued inputs into a new file.
    ///
    /// # Errors
    ///
    /// Returns any call or IO error; a partial output file is removed.
    #[instrument(skip(self), fields(inputs = self.inputs, path = %path.display()))]
    pub async fn save_to_file(&mut self, path: &Path) -> Result<CallResult, ApiError> {
        self.prepare_sync();
        let outcome = self
            .api
            .call_to_file(
                &self.api.config().endpoints.pdf_merge,
                &self.request,
                BodyKind::Multipart,
                path,
            )
            .await;
        self.reset_inputs();
        outcome
    }

    /// Merges the queued inputs and streams the PDF into `writer`.
    ///
    /// # Errors
    ///
    /// Returns any call error, including IO errors reading local inputs or
    /// writing to `writer`.
    #[instrument(skip(self, writer), fields(inputs = self.inputs))]
    pub async fn save_to_writer<W>(&mut self, writer: &mut W) -> Result<CallResult, ApiError>
    where
        W: AsyncWrite + Unpin + Send,
    {
        self.prepare_sync();
        let outcome = self
            .api
            .call_to_writer(
                &self.api.config().endpoints.pdf_merge,
                &self.request,
                BodyKind::Multipart,
                writer,
            )
            .await;
        self.reset_inputs();
        outcome
    }

    /// Merges the queued inputs through an asynchronous job.
    ///
    /// # Errors
    ///
    /// Same as [`save`](Self::save), plus [`ApiError::AsyncLaunch`] and
    /// [`ApiError::AsyncTimeout`].
    #[instrument(skip(self), fields(inputs = self.inputs))]
    pub async fn save_async(&mut self) -> Result<CallResult, ApiError> {
        self.set_files_no();
        let endpoint = self.api.config().endpoints.pdf_merge.clone();
        let outcome = self
            .api
            .run_async(&endpoint, &mut self.request, BodyKind::Multipart)
            .await;
        self.reset_inputs();
        outcome
    }

    /// Merges the queued inputs asynchronously into a new file.
    ///
    /// # Errors
    ///
    /// Same as [`save_async`](Self::save_async), plus IO failures.
    pub async fn save_to_file_async(&mut self, path: &Path) -> Result<CallResult, ApiError> {
        let result = self.save_async().await?;
        save_to_file(result, path).await
    }

    /// Merges the queued inputs asynchronously into `writer`.
    ///
    /// # Errors
    ///
    /// Same as [`save_async`](Self::save_async), plus write failures.
    pub async fn save_to_writer_async<W>(&mut self, writer: &mut W) -> Result<CallResult, ApiError>
    where
        W: AsyncWrite + Unpin + Send,
    {
        let result = self.save_async().await?;
        save_to_writer(result, writer).await
    }

    // ==================== Options ====================

    pub fn set_doc_title(&mut self, title: &str) -> &mut Self {
        self.request.set("doc_title", title);
        self
    }

    pub fn set_doc_subject(&mut self, subject: &str) -> &mut Self {
        self.request.set("doc_subject", subject);
        self
    }

    pub fn set_doc_keywords(&mut self, keywords: &str) -> &mut Self {
        self.request.set("doc_keywords", keywords);
        self
    }

    pub fn set_doc_author(&mut self, author: &str) -> &mut Self {
        self.request.set("doc_author", author);
        self
    }

    pub fn set_doc_add_creation_date(&mut self, enabled: bool) -> &mut Self {
        self.request.set_bool("doc_add_creation_date", enabled);
        self
    }

    pub fn set_viewer_page_layout(&mut self, layout: PageLayout) -> &mut Self {
        self.request.set_int("viewer_page_layout", layout.value());
        self
    }

    pub fn set_viewer_page_mode(&mut self, mode: PageMode) -> &mut Self {
        self.request.set_int("viewer_page_mode", mode.value());
        self
    }

    pub fn set_viewer_center_window(&mut self, enabled: bool) -> &mut Self {
        self.request.set_bool("viewer_center_window", enabled);
        self
    }

    pub fn set_viewer_display_doc_title(&mut self, enabled: bool) -> &mut Self {
        self.request.set_bool("viewer_display_doc_title", enabled);
        self
    }

    pub fn set_viewer_fit_window(&mut self, enabled: bool) -> &mut Self {
        self.request.set_bool("viewer_fit_window", enabled);
        self
    }

    pub fn set_viewer_hide_menu_bar(&mut self, enabled: bool) -> &mut Self {
        self.request.set_bool("viewer_hide_menu_bar", enabled);
        self
    }

    pub fn set_viewer_hide_toolbar(&mut self, enabled: bool) -> &mut Self {
        self.request.set_bool("viewer_hide_toolbar", enabled);
        self
    }

    pub fn set_viewer_hide_window_ui(&mut self, enabled: bool) -> &mut Self {
        self.request.set_bool("viewer_hide_window_ui", enabled);
        self
    }

    /// Password required to open the merged PDF.
    pub fn set_user_password(&mut self, password: &str) -> &mut Self {
        self.request.set("user_password", password);
        self
    }

    /// Password required to change permissions of the merged PDF.
    pub fn set_owner_password(&mut self, password: &str) -> &mut Self {
        self.request.set("owner_password", password);
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

    fn add_local(&mut self, path: PathBuf, password: Option<&str>) -> &mut Self {
        self.inputs += 1;
        let index = self.inputs;
        self.request.attach_file(format!("file_{index}"), path);
        self.request.remove(&format!("url_{index}"));
        self.set_password(index, password);
        self
    }

    fn add_remote(&mut self, url: &str, password: Option<&str>) -> &mut Self {
        self.inputs += 1;
        let index = self.inputs;
        self.request.set(format!("url_{index}"), url);
        self.set_password(index, password);
        self
    }

    fn set_password(&mut self, index: usize, password: Option<&str>) {
        let name = format!("password_{index}");
        match password {
            Some(password) => {
                self.request.set(name, password);
            }
            None => {
                self.request.remove(&name);
            }
        }
    }

    fn prepare_sync(&mut self) {
        self.request.set_bool(params::ASYNC, false);
        self.set_files_no();
    }

    fn set_files_no(&mut self) {
        self.request.set(params::FILES_NO, self.inputs.to_string());
    }

    /// Drops the queued inputs and their per-input parameters.
    fn reset_inputs(&mut self) {
        for index in 1..=self.inputs {
            self.request.remove(&format!("url_{index}"));
            self.request.remove(&format!("password_{index}"));
        }
        self.request.clear_attachments();
        self.inputs = 0;
        debug!("merge inputs cleared");
    }
}
