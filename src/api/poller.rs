//! Asynchronous job polling.
//!
//! Long-running operations are submitted with `async=True`; the server
//! answers 202 with a job id, and the client then polls the job status
//! endpoint until the result is ready or the poll budget runs out.
//!
//! ```text
//! Submitted --job id--> Polling --result--> Done
//!                          |
//!                          +--budget exhausted--> TimedOut (fatal)
//! ```
//!
//! The first poll is issued as soon as the job is accepted; the configured
//! interval separates consecutive polls. A poll that fails stops the loop
//! and propagates its error unchanged.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use super::constants::{DEFAULT_MAX_PINGS, DEFAULT_POLL_INTERVAL};
use super::error::ApiError;
use super::model::CallResult;

/// Poller state.
#[derive(Debug, Clone, PartialEq)]
pub enum PollState {
    /// Waiting for the job to finish.
    Polling {
        /// Job being polled.
        job_id: String,
        /// Polls issued so far.
        pings: u32,
    },
    /// Final result retrieved.
    Done(CallResult),
    /// Poll budget exhausted.
    TimedOut {
        /// Job that did not finish.
        job_id: String,
    },
}

/// Drives the submit-then-poll protocol shared by every long-running call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AsyncJobPoller {
    interval: Duration,
    max_pings: u32,
}

impl Default for AsyncJobPoller {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_pings: DEFAULT_MAX_PINGS,
        }
    }
}

impl AsyncJobPoller {
    /// Creates a poller with the given pause between polls and poll budget.
    #[must_use]
    pub fn new(interval: Duration, max_pings: u32) -> Self {
        Self {
            interval,
            max_pings,
        }
    }

    /// Pause between consecutive polls.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Maximum number of polls before giving up.
    #[must_use]
    pub fn max_pings(&self) -> u32 {
        self.max_pings
    }

    /// Awaits `submit` for a job id, then calls `poll` until it yields a result.
    ///
    /// `poll` returns `Ok(None)` while the job is still running.
    ///
    /// # Errors
    ///
    /// - Any error from `submit` or `poll`, unchanged.
    /// - [`ApiError::AsyncTimeout`] after `max_pings` polls without a result.
    #[instrument(level = "debug", skip(self, submit, poll), fields(max_pings = self.max_pings))]
    pub async fn run<S, P, PFut>(&self, submit: S, mut poll: P) -> Result<CallResult, ApiError>
    where
        S: Future<Output = Result<String, ApiError>>,
        P: FnMut(String) -> PFut,
        PFut: Future<Output = Result<Option<CallResult>, ApiError>>,
    {
        debug!("submitting async job");
        let job_id = submit.await?;
        let mut state = PollState::Polling { job_id, pings: 0 };

        loop {
            state = match state {
                PollState::Polling { job_id, pings } if pings >= self.max_pings => {
                    PollState::TimedOut { job_id }
                }
                PollState::Polling { job_id, pings } => {
                    if pings > 0 {
                        tokio::time::sleep(self.interval).await;
                    }
                    let pings = pings + 1;
                    debug!(job_id = %job_id, ping = pings, "polling async job");
                    match poll(job_id.clone()).await? {
                        Some(result) => {
                            info!(job_id = %job_id, pings, pages = result.page_count, "async job finished");
                            PollState::Done(result)
                        }
                        None => PollState::Polling { job_id, pings },
                    }
                }
                PollState::Done(result) => return Ok(result),
                PollState::TimedOut { job_id } => {
                    warn!(job_id = %job_id, max_pings = self.max_pings, "async job did not finish");
                    return Err(ApiError::async_timeout(self.max_pings));
                }
            };
        }
    }
}
