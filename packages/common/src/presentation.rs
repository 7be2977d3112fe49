use crate::SubmissionStatus;

/// Broad visual category of a status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatusTone {
    Success,
    Failure,
    Neutral,
}

impl StatusTone {
    pub fn of(status: &SubmissionStatus) -> Self {
        match status {
            SubmissionStatus::Accepted => Self::Success,
            SubmissionStatus::WrongAnswer
            | SubmissionStatus::TimeLimitExceeded
            | SubmissionStatus::RuntimeError
            | SubmissionStatus::CompilationError => Self::Failure,
            SubmissionStatus::Pending
            | SubmissionStatus::Judging
            | SubmissionStatus::Unknown(_) => Self::Neutral,
        }
    }

    pub fn style(self) -> StatusStyle {
        match self {
            Self::Success => StatusStyle::new("#10B981", WHITE),
            Self::Failure => StatusStyle::new("#EF4444", WHITE),
            Self::Neutral => StatusStyle::DEFAULT,
        }
    }
}

const WHITE: &str = "#FFFFFF";

/// Background/foreground color pair for a status badge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StatusStyle {
    pub background: &'static str,
    pub foreground: &'static str,
}

impl StatusStyle {
    /// Gray badge used for in-progress and unrecognised statuses.
    pub const DEFAULT: StatusStyle = StatusStyle::new("#6B7280", WHITE);

    const fn new(background: &'static str, foreground: &'static str) -> Self {
        Self {
            background,
            foreground,
        }
    }
}

impl Default for StatusStyle {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Display colors for a status. Total over every value, including `Unknown`.
pub fn status_style(status: &SubmissionStatus) -> StatusStyle {
    StatusTone::of(status).style()
}

/// Display colors for a raw wire label.
pub fn style_for_label(label: &str) -> StatusStyle {
    status_style(&SubmissionStatus::from_label(label))
}
