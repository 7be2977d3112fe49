//! Submission status polling.
//!
//! A [`PollMachine`] decides, after every read, whether to schedule another
//! read or stop. [`Poller::watch`] drives one machine per submission on a
//! tokio task: read, publish the snapshot, sleep, repeat. Reads are strictly
//! sequential, so at most one request per submission is ever in flight.
//! Cancellation bypasses the machine: [`PollHandle`] writes the stopped
//! snapshot itself so it takes effect before `cancel` returns.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use common::config::PollConfig;
use common::retry::{RetryDecision, RetryPolicy};
use common::{Submission, SubmissionId, SubmissionStatus};

use crate::api::SubmissionApi;
use crate::error::ApiError;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// Shown when a read fails without a backend message.
pub const LOAD_FAILED_MESSAGE: &str = "Could not load submission details.";

/// Source of delays between reads. Swap in a fake to control time in tests.
#[async_trait]
pub trait Timer: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Real wall-clock timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioTimer;

#[async_trait]
impl Timer for TokioTimer {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// A final status was observed.
    Finished,
    /// The consumer lost interest. Only [`PollHandle::cancel`] sets this.
    Cancelled,
    /// A read failed and no retry remains. Carries the user-facing message.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollPhase {
    Polling,
    Stopped(StopReason),
}

impl PollPhase {
    pub fn is_stopped(&self) -> bool {
        matches!(self, Self::Stopped(_))
    }
}

/// What the driver must do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollAction {
    /// Sleep, then issue exactly one more read.
    ReadAfter(Duration),
    Stop(StopReason),
}

/// Pure two-phase state machine behind the poll loop.
#[derive(Debug, Clone)]
pub struct PollMachine {
    phase: PollPhase,
    interval: Duration,
    retry: RetryPolicy,
    consecutive_failures: u8,
}

impl PollMachine {
    pub fn new(interval: Duration, retry: RetryPolicy) -> Self {
        Self {
            phase: PollPhase::Polling,
            interval,
            retry,
            consecutive_failures: 0,
        }
    }

    pub fn phase(&self) -> &PollPhase {
        &self.phase
    }

    /// A read returned `status`.
    pub fn on_status(&mut self, status: &SubmissionStatus) -> PollAction {
        if let PollPhase::Stopped(reason) = &self.phase {
            return PollAction::Stop(reason.clone());
        }
        self.consecutive_failures = 0;

        if status.is_final() {
            self.stop(StopReason::Finished)
        } else {
            PollAction::ReadAfter(self.interval)
        }
    }

    /// A read failed with `error`.
    pub fn on_error(&mut self, error: &ApiError) -> PollAction {
        if let PollPhase::Stopped(reason) = &self.phase {
            return PollAction::Stop(reason.clone());
        }
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);

        match self.retry.decide(self.consecutive_failures) {
            RetryDecision::Retry { delay, .. } if error.is_transient() => {
                PollAction::ReadAfter(delay)
            }
            _ => self.stop(StopReason::Failed(
                error.user_message_or(LOAD_FAILED_MESSAGE),
            )),
        }
    }

    fn stop(&mut self, reason: StopReason) -> PollAction {
        self.phase = PollPhase::Stopped(reason.clone());
        PollAction::Stop(reason)
    }
}

/// Latest view of a polled submission. Latest response wins.
#[derive(Debug, Clone, PartialEq)]
pub struct PollSnapshot {
    pub submission: Option<Submission>,
    /// Set once polling stopped because of a failed read.
    pub error: Option<String>,
    pub phase: PollPhase,
    /// Completed reads, successful or not.
    pub reads: u32,
}

impl PollSnapshot {
    fn initial() -> Self {
        Self {
            submission: None,
            error: None,
            phase: PollPhase::Polling,
            reads: 0,
        }
    }

    /// True while nothing has been loaded yet and no error is shown.
    pub fn is_loading(&self) -> bool {
        self.submission.is_none() && self.error.is_none()
    }
}

/// Spawns status pollers sharing one API client and timer.
#[derive(Clone)]
pub struct Poller {
    api: Arc<dyn SubmissionApi>,
    timer: Arc<dyn Timer>,
    interval: Duration,
    retry: RetryPolicy,
}

impl Poller {
    pub fn new(api: Arc<dyn SubmissionApi>) -> Self {
        Self {
            api,
            timer: Arc::new(TokioTimer),
            interval: DEFAULT_POLL_INTERVAL,
            retry: RetryPolicy::NONE,
        }
    }

    pub fn from_config(api: Arc<dyn SubmissionApi>, config: &PollConfig) -> Self {
        Self::new(api)
            .with_interval(config.interval())
            .with_retry(config.retry_policy())
    }

    pub fn with_timer(mut self, timer: Arc<dyn Timer>) -> Self {
        self.timer = timer;
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Start polling `id`. The first read is issued immediately.
    ///
    /// Must be called from within a tokio runtime.
    pub fn watch(&self, id: SubmissionId) -> PollHandle {
        let state = Arc::new(watch::channel(PollSnapshot::initial()).0);
        let receiver = state.subscribe();
        let token = CancellationToken::new();

        let task = tokio::spawn(run(
            id.clone(),
            Arc::clone(&self.api),
            Arc::clone(&self.timer),
            PollMachine::new(self.interval, self.retry),
            Arc::clone(&state),
            token.clone(),
        ));

        PollHandle {
            id,
            state,
            receiver,
            token,
            task: Some(task),
        }
    }
}

/// Consumer side of one poll loop. Dropping it cancels polling.
pub struct PollHandle {
    id: SubmissionId,
    state: Arc<watch::Sender<PollSnapshot>>,
    receiver: watch::Receiver<PollSnapshot>,
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl PollHandle {
    pub fn id(&self) -> &SubmissionId {
        &self.id
    }

    pub fn snapshot(&self) -> PollSnapshot {
        self.receiver.borrow().clone()
    }

    /// A receiver that observes every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<PollSnapshot> {
        self.state.subscribe()
    }

    /// Stop polling. Once this returns, the snapshot never changes again,
    /// even if a read completes concurrently.
    pub fn cancel(&self) {
        self.token.cancel();
        self.state.send_if_modified(|snapshot| {
            if snapshot.phase.is_stopped() {
                return false;
            }
            snapshot.phase = PollPhase::Stopped(StopReason::Cancelled);
            true
        });
    }

    pub fn is_stopped(&self) -> bool {
        self.receiver.borrow().phase.is_stopped()
    }

    /// Wait for the loop to stop and return the final snapshot.
    pub async fn wait(&mut self) -> PollSnapshot {
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!(submission_id = %self.id, error = %e, "Poll task ended abnormally");
                self.cancel();
            }
        }
        self.snapshot()
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Apply `update` unless polling already stopped. Returns whether it applied.
fn publish(state: &watch::Sender<PollSnapshot>, update: impl FnOnce(&mut PollSnapshot)) -> bool {
    state.send_if_modified(|snapshot| {
        if snapshot.phase.is_stopped() {
            return false;
        }
        update(snapshot);
        true
    })
}

async fn run(
    id: SubmissionId,
    api: Arc<dyn SubmissionApi>,
    timer: Arc<dyn Timer>,
    mut machine: PollMachine,
    state: Arc<watch::Sender<PollSnapshot>>,
    token: CancellationToken,
) {
    loop {
        let result = tokio::select! {
            biased;
            _ = token.cancelled() => break,
            result = api.get_submission(&id) => result,
        };

        let action = match result {
            Ok(record) => {
                let submission = Submission::from(record);
                let action = machine.on_status(submission.status());
                debug!(submission_id = %id, status = %submission.status(), "Poll read");

                let phase = machine.phase().clone();
                let applied = publish(&state, |snapshot| {
                    snapshot.submission = Some(submission);
                    snapshot.error = None;
                    snapshot.phase = phase;
                    snapshot.reads += 1;
                });
                if !applied {
                    break;
                }
                action
            }
            Err(e) => {
                let action = machine.on_error(&e);
                let phase = machine.phase().clone();
                let message = match &action {
                    PollAction::Stop(StopReason::Failed(msg)) => Some(msg.clone()),
                    _ => None,
                };

                match &action {
                    PollAction::ReadAfter(delay) => warn!(
                        submission_id = %id,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Poll read failed, retrying"
                    ),
                    _ => warn!(submission_id = %id, error = %e, "Poll read failed"),
                }

                let applied = publish(&state, |snapshot| {
                    if message.is_some() {
                        snapshot.error = message;
                    }
                    snapshot.phase = phase;
                    snapshot.reads += 1;
                });
                if !applied {
                    break;
                }
                action
            }
        };

        match action {
            PollAction::Stop(reason) => {
                info!(submission_id = %id, reason = ?reason, "Polling stopped");
                return;
            }
            PollAction::ReadAfter(delay) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    _ = timer.sleep(delay) => {}
                }
            }
        }
    }

    debug!(submission_id = %id, "Polling cancelled");
}
