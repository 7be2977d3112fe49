use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ProblemRef;
use crate::de::null_as_default;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContestCreator {
    #[serde(default)]
    pub name: String,
}

/// Contest summary as listed by `GET /contests`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contest {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Empty when the creator account no longer exists.
    #[serde(default, deserialize_with = "null_as_default")]
    pub creator: ContestCreator,
}

impl Contest {
    pub fn status_at(&self, now: DateTime<Utc>) -> ContestStatus {
        ContestStatus::classify(self.start_time, self.end_time, now)
    }
}

/// A problem slot inside a contest, e.g. alias `"A"`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContestProblem {
    #[serde(rename = "problemId", default, deserialize_with = "null_as_default")]
    pub problem: ProblemRef,
    pub alias: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContestDetail {
    #[serde(flatten)]
    pub contest: Contest,
    #[serde(default)]
    pub problems: Vec<ContestProblem>,
    /// User ids of registered participants.
    #[serde(default)]
    pub participants: Vec<String>,
}

/// Where a contest sits on the timeline relative to a given instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContestStatus {
    Upcoming,
    Running,
    Finished,
}

impl ContestStatus {
    /// Both boundaries count as running.
    pub fn classify(start: DateTime<Utc>, end: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        if now < start {
            Self::Upcoming
        } else if now > end {
            Self::Finished
        } else {
            Self::Running
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upcoming => "Upcoming",
            Self::Running => "Running",
            Self::Finished => "Finished",
        }
    }
}

impl fmt::Display for ContestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ContestFilter {
    #[default]
    All,
    Only(ContestStatus),
}

impl ContestFilter {
    pub fn matches(&self, contest: &Contest, now: DateTime<Utc>) -> bool {
        match self {
            Self::All => true,
            Self::Only(status) => contest.status_at(now) == *status,
        }
    }

    pub fn apply<'a>(&self, contests: &'a [Contest], now: DateTime<Utc>) -> Vec<&'a Contest> {
        contests.iter().filter(|c| self.matches(c, now)).collect()
    }
}

/// Order contests with the most recent start first.
pub fn sort_newest_first(contests: &mut [Contest]) {
    contests.sort_by(|a, b| b.start_time.cmp(&a.start_time));
}
