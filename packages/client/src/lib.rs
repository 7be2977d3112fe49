pub mod api;
pub mod error;
pub mod http;
pub mod poller;
pub mod submit;

pub use api::{ContestApi, NewSubmission, ProblemApi, SubmissionApi};
pub use error::{ApiError, Result};
pub use http::HttpClient;
pub use poller::{PollHandle, PollPhase, PollSnapshot, Poller, StopReason, Timer, TokioTimer};
pub use submit::submit;
