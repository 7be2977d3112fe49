use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Status of a submission during the judging lifecycle.
///
/// The backend judge owns this value; clients only observe it. Labels the
/// client does not recognise are kept verbatim in [`SubmissionStatus::Unknown`]
/// so a newer backend never breaks deserialization.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SubmissionStatus {
    /// Waiting to be picked up by the judge.
    #[default]
    Pending,
    /// Currently being compiled or run.
    Judging,
    /// All test cases passed.
    Accepted,
    /// Output did not match expected output.
    WrongAnswer,
    /// Exceeded time limit.
    TimeLimitExceeded,
    /// Failed to compile.
    CompilationError,
    /// Program crashed or exited with non-zero code.
    RuntimeError,
    /// A label outside the known set.
    Unknown(String),
}

impl SubmissionStatus {
    /// Returns true if this is a final verdict (judging is complete).
    ///
    /// Only `Pending` and `Judging` keep a poller alive; unrecognised labels
    /// are treated as final.
    pub fn is_final(&self) -> bool {
        !matches!(self, Self::Pending | Self::Judging)
    }

    /// All known status values.
    pub const ALL: &'static [SubmissionStatus] = &[
        Self::Pending,
        Self::Judging,
        Self::Accepted,
        Self::WrongAnswer,
        Self::TimeLimitExceeded,
        Self::CompilationError,
        Self::RuntimeError,
    ];

    /// All final verdict statuses.
    pub const FINAL: &'static [SubmissionStatus] = &[
        Self::Accepted,
        Self::WrongAnswer,
        Self::TimeLimitExceeded,
        Self::CompilationError,
        Self::RuntimeError,
    ];

    /// Returns the wire label, e.g. `"Wrong Answer"`.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "Pending",
            Self::Judging => "Judging",
            Self::Accepted => "Accepted",
            Self::WrongAnswer => "Wrong Answer",
            Self::TimeLimitExceeded => "Time Limit Exceeded",
            Self::CompilationError => "Compilation Error",
            Self::RuntimeError => "Runtime Error",
            Self::Unknown(raw) => raw,
        }
    }

    /// Map a wire label to a status, never failing.
    pub fn from_label(label: &str) -> Self {
        label
            .parse()
            .unwrap_or_else(|_| Self::Unknown(label.to_string()))
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SubmissionStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SubmissionStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::from_label(&label))
    }
}

/// Error when parsing an invalid status string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStatusError {
    invalid: String,
}

impl fmt::Display for ParseStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid status '{}'. Valid values: {}",
            self.invalid,
            SubmissionStatus::ALL
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl std::error::Error for ParseStatusError {}

impl FromStr for SubmissionStatus {
    type Err = ParseStatusError;

    /// Strict parse: only the seven known labels are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Judging" => Ok(Self::Judging),
            "Accepted" => Ok(Self::Accepted),
            "Wrong Answer" => Ok(Self::WrongAnswer),
            "Time Limit Exceeded" => Ok(Self::TimeLimitExceeded),
            "Compilation Error" => Ok(Self::CompilationError),
            "Runtime Error" => Ok(Self::RuntimeError),
            _ => Err(ParseStatusError {
                invalid: s.to_string(),
            }),
        }
    }
}
