pub mod config;
pub mod contest;
pub mod de;
pub mod presentation;
pub mod problem;
pub mod retry;
pub mod scoreboard;
pub mod submission;
pub mod submission_status;

pub use contest::{Contest, ContestDetail, ContestFilter, ContestStatus};
pub use presentation::{StatusStyle, StatusTone, status_style};
pub use problem::{Difficulty, Problem};
pub use scoreboard::{ProblemStat, ScoreboardEntry};
pub use submission::{JudgeOutcome, ProblemRef, Submission, SubmissionHead, SubmissionId};
pub use submission_status::SubmissionStatus;
