//! Generic API client: encode, send, classify, extract metadata.
//!
//! Every feature client goes through [`ApiClient`]; it owns no per-call
//! state, so each call returns its own [`CallResult`].

use std::path::Path;
use std::sync::Arc;

use futures_util::StreamExt;
use reqwest::header::HeaderMap;
use tokio::fs::File;
use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument, warn};

use super::constants::params;
use super::encoder;
use super::error::ApiError;
use super::metadata::{ResponseMetadata, parse_web_elements_json};
use super::model::{CallResult, WebElement};
use super::poller::AsyncJobPoller;
use super::request::{BodyKind, CallRequest};
use super::transport::{HttpTransport, Transport, TransportResponse, build_header_map};
use crate::config::ClientConfig;

/// Shared protocol core.
///
/// Cheap to clone; clones share the transport and its connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    config: Arc<ClientConfig>,
}

/// A classified server answer: 200 or 202 with its metadata.
struct Accepted {
    response: TransportResponse,
    metadata: ResponseMetadata,
}

impl ApiClient {
    /// Creates a client with the reqwest transport.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] when the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let transport = HttpTransport::new(
            config.connect_timeout,
            config.request_timeout,
            &config.user_agent,
        )?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Creates a client over a custom transport.
    #[must_use]
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            config: Arc::new(config),
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns a poller configured from the client settings.
    #[must_use]
    pub fn poller(&self) -> AsyncJobPoller {
        AsyncJobPoller::new(self.config.poll_interval, self.config.max_pings)
    }

    /// Sends `request` and reads the whole response body into memory.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on encoding, transport or status failure.
    #[instrument(skip(self, request), fields(endpoint = %endpoint))]
    pub async fn call(
        &self,
        endpoint: &str,
        request: &CallRequest,
        kind: BodyKind,
    ) -> Result<CallResult, ApiError> {
        let Accepted { response, metadata } = self.exchange(endpoint, request, kind).await?;
        let status = response.status;
        let body = if status == 200 {
            Some(response.collect_body().await?)
        } else {
            None
        };
        info!(
            status,
            bytes = body.as_ref().map_or(0, Vec::len),
            pages = metadata.page_count,
            "call complete"
        );
        Ok(into_result(status, body, metadata))
    }

    /// Sends `request` and streams a 200 body into `writer`.
    ///
    /// The writer is flushed before returning; the result carries no body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on encoding, transport, status or write failure.
    #[instrument(skip(self, request, writer), fields(endpoint = %endpoint))]
    pub async fn call_to_writer<W>(
        &self,
        endpoint: &str,
        request: &CallRequest,
        kind: BodyKind,
        writer: &mut W,
    ) -> Result<CallResult, ApiError>
    where
        W: AsyncWrite + Unpin + Send,
    {
        let Accepted { response, metadata } = self.exchange(endpoint, request, kind).await?;
        let status = response.status;
        if status == 200 {
            let written = copy_body(response, writer).await?;
            info!(status, bytes = written, pages = metadata.page_count, "call complete");
        }
        Ok(into_result(status, None, metadata))
    }

    /// Sends `request` and writes a 200 body to a newly created file.
    ///
    /// On any failure the partially written file is removed.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on encoding, transport, status or IO failure.
    #[instrument(skip(self, request), fields(endpoint = %endpoint, path = %path.display()))]
    pub async fn call_to_file(
        &self,
        endpoint: &str,
        request: &CallRequest,
        kind: BodyKind,
        path: &Path,
    ) -> Result<CallResult, ApiError> {
        let file = File::create(path)
            .await
            .map_err(|e| ApiError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        let outcome = self.call_to_writer(endpoint, request, kind, &mut writer).await;
        drop(writer);

        if outcome.is_err() {
            debug!(path = %path.display(), "cleaning up partial file after error");
            let _ = tokio::fs::remove_file(path).await;
        }
        outcome
    }

    /// Submits `request` as an asynchronous job and returns its job id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::AsyncLaunch`] when the server does not hand back
    /// a job id, or any error from [`call`](Self::call).
    #[instrument(skip(self, request), fields(endpoint = %endpoint))]
    pub async fn start_async_job(
        &self,
        endpoint: &str,
        request: &mut CallRequest,
        kind: BodyKind,
    ) -> Result<String, ApiError> {
        request.set_bool(params::ASYNC, true);
        let result = self.call(endpoint, request, kind).await?;
        result.job_id.ok_or_else(|| ApiError::async_launch(endpoint))
    }

    /// Polls the job status endpoint once.
    ///
    /// Returns `Ok(None)` while the job is still running.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the poll itself fails.
    #[instrument(skip(self, api_key))]
    pub async fn poll_job(
        &self,
        api_key: &str,
        job_id: &str,
    ) -> Result<Option<CallResult>, ApiError> {
        let mut request = CallRequest::with_api_key(api_key);
        request.set(params::JOB_ID, job_id);
        let result = self
            .call(&self.config.endpoints.async_job, &request, BodyKind::UrlEncoded)
            .await?;
        if result.job_id.is_some() {
            debug!("job still running");
            return Ok(None);
        }
        Ok(Some(result))
    }

    /// Submits `request` asynchronously and polls until the result is ready.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::AsyncLaunch`], [`ApiError::AsyncTimeout`], or the
    /// first error raised by the submission or a poll.
    pub async fn run_async(
        &self,
        endpoint: &str,
        request: &mut CallRequest,
        kind: BodyKind,
    ) -> Result<CallResult, ApiError> {
        let api_key = request.api_key().to_string();
        let key = api_key.as_str();
        self.poller()
            .run(self.start_async_job(endpoint, request, kind), move |job_id| async move {
                self.poll_job(key, &job_id).await
            })
            .await
    }

    /// Looks up the web elements recorded for a finished conversion.
    ///
    /// Elements are the only artifact of this call, so a malformed payload
    /// is an error rather than an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] on a malformed payload, or any call error.
    #[instrument(skip(self, api_key))]
    pub async fn fetch_web_elements(
        &self,
        api_key: &str,
        job_id: &str,
    ) -> Result<Vec<WebElement>, ApiError> {
        let mut request = CallRequest::with_api_key(api_key);
        request
            .set(params::JOB_ID, job_id)
            .set_header("Accept", "application/json");
        let result = self
            .call(&self.config.endpoints.web_elements, &request, BodyKind::UrlEncoded)
            .await?;
        let json = String::from_utf8(result.into_bytes())
            .map_err(|e| ApiError::decode("web elements", e))?;
        parse_web_elements_json(&json)
    }

    /// Encodes and sends `request`, mapping every non-200/202 status to an error.
    async fn exchange(
        &self,
        endpoint: &str,
        request: &CallRequest,
        kind: BodyKind,
    ) -> Result<Accepted, ApiError> {
        let headers: HeaderMap = build_header_map(request.headers())?;
        let body = encoder::encode(request, kind).await?;
        debug!(content_type = %body.content_type, bytes = body.bytes.len(), "sending request");

        let response = self.transport.send(endpoint, body, &headers).await?;
        match response.status {
            200 | 202 => {
                let metadata = ResponseMetadata::from_headers(&response.headers);
                if response.status == 202 && metadata.job_id.is_none() {
                    return Err(ApiError::async_launch(endpoint));
                }
                Ok(Accepted { response, metadata })
            }
            _ => Err(status_error(response).await),
        }
    }
}

/// Builds the status error, preferring the server's message over the reason phrase.
async fn status_error(response: TransportResponse) -> ApiError {
    let status = response.status;
    let reason = response.reason;
    let message = match response.collect_body().await {
        Ok(body) => String::from_utf8_lossy(&body).trim().to_string(),
        Err(error) => {
            warn!(error = %error, status, "could not read error response body");
            String::new()
        }
    };
    let message = if message.is_empty() {
        reason.unwrap_or("Unknown error").to_string()
    } else {
        message
    };
    warn!(status, message = %message, "API returned an error status");
    ApiError::status(status, message)
}

async fn copy_body<W>(response: TransportResponse, writer: &mut W) -> Result<u64, ApiError>
where
    W: AsyncWrite + Unpin + Send,
{
    let mut stream = response.body;
    let mut written: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        writer
            .write_all(&chunk)
            .await
            .map_err(|e| ApiError::io("(response sink)", e))?;
        written += chunk.len() as u64;
    }
    writer
        .flush()
        .await
        .map_err(|e| ApiError::io("(response sink)", e))?;
    Ok(written)
}

fn into_result(status: u16, body: Option<Vec<u8>>, metadata: ResponseMetadata) -> CallResult {
    CallResult {
        status,
        body,
        page_count: metadata.page_count,
        job_id: metadata.job_id,
        web_elements: metadata.web_elements,
    }
}
