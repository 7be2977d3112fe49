use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use common::submission::SubmissionRecord;
use common::{Contest, ContestDetail, Problem, ScoreboardEntry, SubmissionId};

use crate::error::Result;

/// Body of `POST /submissions`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubmission {
    pub problem_id: String,
    pub code: String,
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contest_id: Option<String>,
}

impl NewSubmission {
    pub fn new(
        problem_id: impl Into<String>,
        code: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            problem_id: problem_id.into(),
            code: code.into(),
            language: language.into(),
            contest_id: None,
        }
    }

    pub fn in_contest(mut self, contest_id: impl Into<String>) -> Self {
        self.contest_id = Some(contest_id.into());
        self
    }
}

/// `{success, submissionId}` returned on creation.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub success: bool,
    pub submission_id: SubmissionId,
}

/// `{success, data}` wrapper used by every read endpoint.
#[derive(Clone, Debug, Deserialize)]
pub struct DataEnvelope<T> {
    pub success: bool,
    pub data: T,
}

/// `{success: false, error}` body returned on failure.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorEnvelope {
    pub fn into_message(self) -> Option<String> {
        self.error.or(self.message)
    }
}

/// Submission endpoints of the platform API.
#[async_trait]
pub trait SubmissionApi: Send + Sync {
    /// Create a submission. Exactly one request, never retried.
    async fn create_submission(&self, request: &NewSubmission) -> Result<SubmissionId>;

    /// Read one submission. Idempotent.
    async fn get_submission(&self, id: &SubmissionId) -> Result<SubmissionRecord>;

    /// All submissions the caller made for a problem.
    async fn list_submissions(&self, problem_id: &str) -> Result<Vec<SubmissionRecord>>;
}

/// Problem catalogue endpoints.
#[async_trait]
pub trait ProblemApi: Send + Sync {
    async fn list_problems(&self) -> Result<Vec<Problem>>;

    async fn get_problem(&self, id: &str) -> Result<Problem>;
}

/// Contest endpoints of the platform API.
#[async_trait]
pub trait ContestApi: Send + Sync {
    /// Newest start time first.
    async fn list_contests(&self) -> Result<Vec<Contest>>;

    async fn get_contest(&self, id: &str) -> Result<ContestDetail>;

    /// Register the caller. Returns the backend's confirmation text.
    async fn register_for_contest(&self, id: &str) -> Result<String>;

    /// Rows in rank order as returned by the backend.
    async fn get_scoreboard(&self, id: &str) -> Result<Vec<ScoreboardEntry>>;
}
