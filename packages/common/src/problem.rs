use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
    /// A label this client does not know.
    #[serde(other)]
    Other,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Problem from the public catalogue (`GET /problems`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Seconds.
    #[serde(default)]
    pub time_limit: f64,
    /// Megabytes.
    #[serde(default)]
    pub memory_limit: f64,
    #[serde(default)]
    pub description: String,
}

/// Keep only problems of one difficulty, or all of them.
pub fn filter_by_difficulty(problems: &[Problem], difficulty: Option<Difficulty>) -> Vec<&Problem> {
    problems
        .iter()
        .filter(|p| difficulty.is_none_or(|d| p.difficulty == d))
        .collect()
}
