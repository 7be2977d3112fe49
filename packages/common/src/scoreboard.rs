use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One contestant's result on one problem.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemStat {
    #[serde(default)]
    pub attempts: u32,
    #[serde(default)]
    pub solved: bool,
    /// Minutes from contest start to the accepted submission.
    #[serde(default)]
    pub solved_time: Option<f64>,
}

/// A scoreboard row. The backend returns rows already ranked.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreboardEntry {
    pub user_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub problems_solved: u32,
    #[serde(default)]
    pub total_penalty: f64,
    /// Keyed by problem id.
    #[serde(default)]
    pub problem_stats: BTreeMap<String, ProblemStat>,
}

impl ScoreboardEntry {
    pub fn stat(&self, problem_id: &str) -> Option<&ProblemStat> {
        self.problem_stats.get(problem_id)
    }
}
