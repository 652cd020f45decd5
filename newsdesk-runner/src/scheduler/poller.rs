//! Run poller
//!
//! Polls a run until it reaches a terminal status, answering tool calls
//! along the way. Transient fetch and submit errors are retried with
//! exponential backoff, each with its own attempt counter; fatal ones stop
//! the loop. Every request made during the wait is bounded by one budget,
//! and the wait can be aborted through a cancellation token.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use newsdesk_client::{AssistantApi, ClientError};
use newsdesk_core::domain::run::{Run, RunStatus};
use newsdesk_core::dto::run::ToolOutput;
use thiserror::Error;
use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::service::ToolDispatcher;

/// How a run is polled
#[derive(Debug, Clone)]
pub struct PollPolicy {
    /// Sleep between status fetches
    pub interval: Duration,

    /// Budget for the whole wait
    pub max_wait: Duration,

    /// Consecutive transient failures tolerated before giving up
    pub max_retries: u32,

    /// First retry delay after a transient failure
    pub initial_backoff: Duration,

    /// Upper bound of the retry delay
    pub max_backoff: Duration,

    /// How long to wait for the remote cancellation of an abandoned run
    pub cancel_timeout: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            max_wait: Duration::from_secs(600),
            max_retries: 3,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(30),
            cancel_timeout: Duration::from_secs(5),
        }
    }
}

/// Answer of a completed run
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub run_id: String,
    /// First text block of the newest message in the thread
    pub text: String,
    /// Completion time minus creation time, as reported by the service
    pub elapsed: chrono::TimeDelta,
}

impl Completion {
    /// Elapsed time as `HH:MM:SS`
    pub fn elapsed_display(&self) -> String {
        format_elapsed(self.elapsed)
    }
}

/// How a poll loop ended
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// The run completed and produced an answer
    Completed(Completion),

    /// The service reports the run as failed, cancelled, expired or incomplete
    Failed {
        status: RunStatus,
        reason: Option<String>,
    },

    /// The wait budget ran out before the run finished
    TimedOut { waited: Duration },

    /// The caller cancelled the wait
    Cancelled,
}

impl RunOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, RunOutcome::Completed(_))
    }

    /// The answer text, if the run completed
    pub fn text(&self) -> Option<&str> {
        match self {
            RunOutcome::Completed(completion) => Some(&completion.text),
            _ => None,
        }
    }
}

/// Errors that stop the poll loop
#[derive(Debug, Error)]
pub enum PollError {
    /// A non-retryable error from the assistant service
    #[error("Assistant service error: {0}")]
    Api(#[source] ClientError),

    /// Transient errors persisted past the retry limit
    #[error("Assistant service unavailable after {attempts} attempt(s): {source}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        source: ClientError,
    },

    /// Tool outputs could not be submitted
    #[error("Failed to submit tool outputs: {0}")]
    Submit(#[source] ClientError),

    /// The run completed but the newest message carries no text
    #[error("Run {run_id} completed without a text response")]
    EmptyResponse { run_id: String },
}

/// Renders a duration as zero-padded `HH:MM:SS`
///
/// Hours are not wrapped at 24; negative durations render as `00:00:00`.
pub fn format_elapsed(elapsed: chrono::TimeDelta) -> String {
    let secs = elapsed.num_seconds().max(0);
    format!(
        "{:02}:{:02}:{:02}",
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60
    )
}

/// Drives runs to a terminal status
pub struct RunPoller {
    api: Arc<dyn AssistantApi>,
    dispatcher: Arc<ToolDispatcher>,
    policy: PollPolicy,
}

/// Retry bookkeeping for transient failures
struct Backoff {
    failures: u32,
    delay: Duration,
}

/// Why a wait stopped before the run reached a terminal status
#[derive(Debug, Clone, Copy)]
enum Interrupt {
    Deadline,
    Cancelled,
}

/// Outputs resolved for one set of tool calls, kept until accepted
struct PendingOutputs {
    call_ids: Vec<String>,
    outputs: Vec<ToolOutput>,
}

impl RunPoller {
    /// Creates a new run poller
    pub fn new(
        api: Arc<dyn AssistantApi>,
        dispatcher: Arc<ToolDispatcher>,
        policy: PollPolicy,
    ) -> Self {
        Self {
            api,
            dispatcher,
            policy,
        }
    }

    pub fn policy(&self) -> &PollPolicy {
        &self.policy
    }

    /// Polls a run until it completes, fails, times out or is cancelled
    ///
    /// Every request and tool execution is bounded by the wait budget. A run
    /// abandoned on timeout or cancellation is cancelled remotely so the
    /// thread accepts new messages again.
    ///
    /// # Arguments
    /// * `thread_id` - The thread the run belongs to
    /// * `run_id` - The run to wait for
    /// * `cancel` - Aborts the wait with [`RunOutcome::Cancelled`]
    pub async fn wait(
        &self,
        thread_id: &str,
        run_id: &str,
        cancel: &CancellationToken,
    ) -> Result<RunOutcome, PollError> {
        info!(
            "Waiting for run {} (interval: {:?}, budget: {:?})",
            run_id, self.policy.interval, self.policy.max_wait
        );

        let outcome = self.poll(thread_id, run_id, cancel).await?;

        if matches!(
            outcome,
            RunOutcome::TimedOut { .. } | RunOutcome::Cancelled
        ) {
            self.cancel_remote(thread_id, run_id).await;
        }

        Ok(outcome)
    }

    async fn poll(
        &self,
        thread_id: &str,
        run_id: &str,
        cancel: &CancellationToken,
    ) -> Result<RunOutcome, PollError> {
        let started = Instant::now();
        let deadline = started + self.policy.max_wait;

        let mut fetch_backoff = self.reset_backoff();
        let mut submit_backoff = self.reset_backoff();
        let mut answered: HashSet<String> = HashSet::new();
        let mut pending: Option<PendingOutputs> = None;

        loop {
            if Instant::now() >= deadline {
                return Ok(self.interrupted(Interrupt::Deadline, started, run_id));
            }

            let fetched = match self
                .bounded(self.api.retrieve_run(thread_id, run_id), deadline, cancel)
                .await
            {
                Ok(fetched) => fetched,
                Err(interrupt) => return Ok(self.interrupted(interrupt, started, run_id)),
            };

            let run = match fetched {
                Ok(run) => {
                    fetch_backoff = self.reset_backoff();
                    run
                }
                Err(e) if e.is_transient() => {
                    self.record_failure(&mut fetch_backoff, "fetching status of", run_id, e)?;
                    if let Err(interrupt) = self.pause(fetch_backoff.delay, deadline, cancel).await
                    {
                        return Ok(self.interrupted(interrupt, started, run_id));
                    }
                    fetch_backoff.delay = (fetch_backoff.delay * 2).min(self.policy.max_backoff);
                    continue;
                }
                Err(e) => {
                    error!("Exception while waiting for run {}: {}", run_id, e);
                    return Err(PollError::Api(e));
                }
            };

            debug!("Run {} is {}", run_id, run.status);

            if run.is_completed() {
                return match self.bounded(self.complete(&run), deadline, cancel).await {
                    Ok(completion) => completion.map(RunOutcome::Completed),
                    Err(interrupt) => Ok(self.interrupted(interrupt, started, run_id)),
                };
            }

            match run.status {
                RunStatus::RequiresAction => {
                    let calls = run.pending_tool_calls();
                    if calls.iter().all(|call| answered.contains(&call.id)) {
                        debug!("Outputs for run {} already submitted", run_id);
                    } else {
                        let call_ids: Vec<String> =
                            calls.iter().map(|call| call.id.clone()).collect();

                        // Outputs of a rejected submission are resent, not recomputed
                        let cached = pending
                            .as_ref()
                            .filter(|p| p.call_ids == call_ids)
                            .map(|p| p.outputs.clone());

                        let outputs = match cached {
                            Some(outputs) => outputs,
                            None => {
                                let outputs = match self
                                    .bounded(self.dispatcher.resolve(calls), deadline, cancel)
                                    .await
                                {
                                    Ok(outputs) => outputs,
                                    Err(interrupt) => {
                                        return Ok(self.interrupted(interrupt, started, run_id));
                                    }
                                };
                                pending = Some(PendingOutputs {
                                    call_ids: call_ids.clone(),
                                    outputs: outputs.clone(),
                                });
                                outputs
                            }
                        };

                        let submitted = match self
                            .bounded(
                                self.dispatcher
                                    .submit(self.api.as_ref(), thread_id, run_id, outputs),
                                deadline,
                                cancel,
                            )
                            .await
                        {
                            Ok(submitted) => submitted,
                            Err(interrupt) => {
                                return Ok(self.interrupted(interrupt, started, run_id));
                            }
                        };

                        match submitted {
                            Ok(_) => {
                                answered.extend(call_ids);
                                pending = None;
                                submit_backoff = self.reset_backoff();
                            }
                            Err(e) if e.is_transient() => {
                                self.record_failure(
                                    &mut submit_backoff,
                                    "submitting tool outputs for",
                                    run_id,
                                    e,
                                )?;
                                if let Err(interrupt) =
                                    self.pause(submit_backoff.delay, deadline, cancel).await
                                {
                                    return Ok(self.interrupted(interrupt, started, run_id));
                                }
                                submit_backoff.delay =
                                    (submit_backoff.delay * 2).min(self.policy.max_backoff);
                                continue;
                            }
                            Err(e) => {
                                error!("Failed to submit tool outputs for run {}: {}", run_id, e);
                                return Err(PollError::Submit(e));
                            }
                        }
                    }
                }
                status if status.is_terminal() => {
                    let reason = run
                        .last_error
                        .as_ref()
                        .map(|e| format!("{}: {}", e.code, e.message));
                    warn!(
                        "Run {} ended with status {}{}",
                        run_id,
                        status,
                        reason
                            .as_deref()
                            .map(|r| format!(" ({})", r))
                            .unwrap_or_default()
                    );
                    return Ok(RunOutcome::Failed { status, reason });
                }
                _ => {}
            }

            if let Err(interrupt) = self.pause(self.policy.interval, deadline, cancel).await {
                return Ok(self.interrupted(interrupt, started, run_id));
            }
        }
    }

    /// Reads the answer of a completed run
    async fn complete(&self, run: &Run) -> Result<Completion, PollError> {
        let elapsed = run.elapsed().unwrap_or_else(chrono::TimeDelta::zero);
        info!("Run {} completed in {}", run.id, format_elapsed(elapsed));

        let messages = self
            .api
            .list_messages(&run.thread_id, 1)
            .await
            .map_err(PollError::Api)?;

        let text = messages
            .first()
            .and_then(|message| message.first_text())
            .ok_or_else(|| PollError::EmptyResponse {
                run_id: run.id.clone(),
            })?;

        Ok(Completion {
            run_id: run.id.clone(),
            text: text.to_string(),
            elapsed,
        })
    }

    /// Runs `work` unless the deadline passes or the wait is cancelled first
    async fn bounded<F: Future>(
        &self,
        work: F,
        deadline: Instant,
        cancel: &CancellationToken,
    ) -> Result<F::Output, Interrupt> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(Interrupt::Cancelled),
            _ = time::sleep_until(deadline) => Err(Interrupt::Deadline),
            output = work => Ok(output),
        }
    }

    /// Sleeps for `duration`, cut short by the deadline or cancellation
    async fn pause(
        &self,
        duration: Duration,
        deadline: Instant,
        cancel: &CancellationToken,
    ) -> Result<(), Interrupt> {
        self.bounded(time::sleep(duration), deadline, cancel).await
    }

    fn interrupted(&self, interrupt: Interrupt, started: Instant, run_id: &str) -> RunOutcome {
        match interrupt {
            Interrupt::Deadline => {
                let waited = started.elapsed();
                warn!("Gave up on run {} after {:?}", run_id, waited);
                RunOutcome::TimedOut { waited }
            }
            Interrupt::Cancelled => {
                info!("Stopped waiting for run {}: cancelled", run_id);
                RunOutcome::Cancelled
            }
        }
    }

    /// Best-effort remote cancellation of an abandoned run
    async fn cancel_remote(&self, thread_id: &str, run_id: &str) {
        match time::timeout(
            self.policy.cancel_timeout,
            self.api.cancel_run(thread_id, run_id),
        )
        .await
        {
            Ok(Ok(run)) => info!("Requested cancellation of run {} ({})", run_id, run.status),
            Ok(Err(e)) => warn!("Failed to cancel run {}: {}", run_id, e),
            Err(_) => warn!("Cancelling run {} timed out", run_id),
        }
    }

    fn reset_backoff(&self) -> Backoff {
        Backoff {
            failures: 0,
            delay: self.policy.initial_backoff,
        }
    }

    /// Counts a transient failure, failing once the retry limit is passed
    fn record_failure(
        &self,
        backoff: &mut Backoff,
        action: &str,
        run_id: &str,
        e: ClientError,
    ) -> Result<(), PollError> {
        backoff.failures += 1;

        if backoff.failures > self.policy.max_retries {
            error!(
                "Gave up {} run {} after {} attempt(s): {}",
                action, run_id, backoff.failures, e
            );
            return Err(PollError::RetriesExhausted {
                attempts: backoff.failures,
                source: e,
            });
        }

        warn!(
            "Transient error {} run {} (attempt {}/{}): {}",
            action, run_id, backoff.failures, self.policy.max_retries, e
        );
        Ok(())
    }
}
