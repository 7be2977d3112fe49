use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::SubmissionStatus;
use crate::de::null_as_default;

/// Opaque submission identifier allocated by the backend.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionId(String);

impl SubmissionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SubmissionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Problem reference embedded in a submission.
///
/// Decodes to an empty reference when the backend sends `null`, which happens
/// once the problem has been deleted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemRef {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
}

/// Submission as it travels over the wire.
///
/// Resource usage fields are optional and only meaningful once the status is
/// final; use [`Submission`] to get a view that enforces this.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    #[serde(rename = "_id")]
    pub id: SubmissionId,
    pub status: SubmissionStatus,
    pub language: String,
    #[serde(default)]
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_used: Option<f64>,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "problemId", default, deserialize_with = "null_as_default")]
    pub problem: ProblemRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contest_id: Option<String>,
}

/// Identity fields shared by every submission snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmissionHead {
    pub id: SubmissionId,
    pub problem: ProblemRef,
    pub contest_id: Option<String>,
    pub language: String,
    pub code: String,
    pub status: SubmissionStatus,
    pub created_at: DateTime<Utc>,
}

/// Resource usage reported by the judge after a final verdict.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct JudgeOutcome {
    /// Milliseconds.
    pub execution_time_ms: Option<f64>,
    pub memory_used: Option<f64>,
}

/// Client-side snapshot of a submission.
#[derive(Clone, Debug, PartialEq)]
pub enum Submission {
    /// Still waiting on the judge.
    InProgress(SubmissionHead),
    /// Final verdict reached.
    Judged {
        head: SubmissionHead,
        outcome: JudgeOutcome,
    },
}

impl Submission {
    pub fn head(&self) -> &SubmissionHead {
        match self {
            Self::InProgress(head) | Self::Judged { head, .. } => head,
        }
    }

    pub fn id(&self) -> &SubmissionId {
        &self.head().id
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.head().status
    }

    pub fn is_final(&self) -> bool {
        matches!(self, Self::Judged { .. })
    }

    /// Resource usage, available only once judged.
    pub fn outcome(&self) -> Option<&JudgeOutcome> {
        match self {
            Self::InProgress(_) => None,
            Self::Judged { outcome, .. } => Some(outcome),
        }
    }
}

impl From<SubmissionRecord> for Submission {
    fn from(record: SubmissionRecord) -> Self {
        let outcome = JudgeOutcome {
            execution_time_ms: record.execution_time,
            memory_used: record.memory_used,
        };
        let head = SubmissionHead {
            id: record.id,
            problem: record.problem,
            contest_id: record.contest_id,
            language: record.language,
            code: record.code,
            status: record.status,
            created_at: record.created_at,
        };

        if head.status.is_final() {
            Self::Judged { head, outcome }
        } else {
            Self::InProgress(head)
        }
    }
}
