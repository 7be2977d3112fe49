use tracing::{info, warn};

use common::SubmissionId;

use crate::api::{NewSubmission, SubmissionApi};
use crate::error::{ApiError, Result};

/// Alert text when creation fails without a backend message.
pub const SUBMIT_FAILED_MESSAGE: &str = "Could not submit solution.";

/// Send one solve request and return the allocated id.
///
/// The problem id must be non-empty; code is passed through untouched and
/// the backend decides whether it is acceptable. Failures are not retried:
/// the caller re-invokes explicitly.
pub async fn submit<A>(api: &A, request: &NewSubmission) -> Result<SubmissionId>
where
    A: SubmissionApi + ?Sized,
{
    if request.problem_id.trim().is_empty() {
        return Err(ApiError::InvalidRequest("problem id must not be empty".into()));
    }

    match api.create_submission(request).await {
        Ok(id) => {
            info!(
                submission_id = %id,
                problem_id = %request.problem_id,
                language = %request.language,
                contest_id = ?request.contest_id,
                "Submission created"
            );
            Ok(id)
        }
        Err(e) => {
            warn!(
                problem_id = %request.problem_id,
                error = %e,
                "Submission failed"
            );
            Err(e)
        }
    }
}
