use std::future::Future;

use anyhow::bail;
use tracing::info;

use client::poller::{PollPhase, PollSnapshot, Poller, StopReason};
use common::{SubmissionId, SubmissionStatus};

use crate::output;

/// Print each status change until the poller stops or `interrupt` resolves,
/// then print the final snapshot.
///
/// Fails with the user-facing message when polling stopped on a failed read.
pub async fn follow<F>(
    poller: &Poller,
    id: SubmissionId,
    interrupt: F,
) -> anyhow::Result<PollSnapshot>
where
    F: Future<Output = ()>,
{
    let mut handle = poller.watch(id);
    let mut updates = handle.subscribe();
    let mut last_status: Option<SubmissionStatus> = None;
    tokio::pin!(interrupt);

    loop {
        let stopped = {
            let snapshot = updates.borrow_and_update();
            if let Some(submission) = &snapshot.submission {
                if last_status.as_ref() != Some(submission.status()) {
                    output::print_progress(submission);
                    last_status = Some(submission.status().clone());
                }
            }
            snapshot.phase.is_stopped()
        };
        if stopped {
            break;
        }

        tokio::select! {
            _ = &mut interrupt => {
                info!(submission_id = %handle.id(), "Interrupted, stopping");
                handle.cancel();
                break;
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
            }
        }
    }

    let snapshot = handle.wait().await;
    println!();
    output::print_snapshot(&snapshot);

    if let PollPhase::Stopped(StopReason::Failed(message)) = &snapshot.phase {
        bail!(message.clone());
    }
    Ok(snapshot)
}
