use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use common::config::ApiConfig;
use common::contest::sort_newest_first;
use common::submission::SubmissionRecord;
use common::{Contest, ContestDetail, Problem, ScoreboardEntry, SubmissionId};

use crate::api::{
    ContestApi, DataEnvelope, ErrorEnvelope, NewSubmission, ProblemApi, SubmissionApi,
    SubmitResponse,
};
use crate::error::{ApiError, Result};

/// reqwest-backed implementation of the platform API.
///
/// Base address, bearer token and timeout are fixed at construction; share
/// one instance (it is cheap to clone) instead of building a client per call.
#[derive(Clone, Debug)]
pub struct HttpClient {
    http: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = Url::parse(config.base_url.trim_end_matches('/'))
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| {
                ApiError::InvalidRequest(format!("Invalid API base URL '{}'", config.base_url))
            })?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            http,
            base_url,
            token: config.token.clone().filter(|t| !t.is_empty()),
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Base URL extended by `segments`, each percent-encoded as one path segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Never fails: `new` rejects cannot-be-a-base URLs.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let url = self.endpoint(segments);
        debug!(%method, %url, "API request");

        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let envelope: ErrorEnvelope = serde_json::from_slice(&body).unwrap_or_default();
            return Err(ApiError::Backend {
                status: status.as_u16(),
                message: envelope.into_message(),
            });
        }

        let value: Value = serde_json::from_slice(&body)?;
        if value.get("success") == Some(&Value::Bool(false)) {
            let envelope: ErrorEnvelope = serde_json::from_value(value).unwrap_or_default();
            return Err(ApiError::Backend {
                status: status.as_u16(),
                message: envelope.into_message(),
            });
        }

        Ok(serde_json::from_value(value)?)
    }

    async fn get_data<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let envelope: DataEnvelope<T> = self.send(self.request(Method::GET, segments)).await?;
        Ok(envelope.data)
    }
}

#[async_trait]
impl SubmissionApi for HttpClient {
    async fn create_submission(&self, request: &NewSubmission) -> Result<SubmissionId> {
        let builder = self.request(Method::POST, &["submissions"]).json(request);
        let response: SubmitResponse = self.send(builder).await?;
        Ok(response.submission_id)
    }

    async fn get_submission(&self, id: &SubmissionId) -> Result<SubmissionRecord> {
        self.get_data(&["submissions", id.as_str()]).await
    }

    async fn list_submissions(&self, problem_id: &str) -> Result<Vec<SubmissionRecord>> {
        let builder = self
            .request(Method::GET, &["submissions"])
            .query(&[("problemId", problem_id)]);
        let envelope: DataEnvelope<Vec<SubmissionRecord>> = self.send(builder).await?;
        Ok(envelope.data)
    }
}

#[async_trait]
impl ProblemApi for HttpClient {
    async fn list_problems(&self) -> Result<Vec<Problem>> {
        self.get_data(&["problems"]).await
    }

    async fn get_problem(&self, id: &str) -> Result<Problem> {
        self.get_data(&["problems", id]).await
    }
}

#[async_trait]
impl ContestApi for HttpClient {
    async fn list_contests(&self) -> Result<Vec<Contest>> {
        let mut contests: Vec<Contest> = self.get_data(&["contests"]).await?;
        sort_newest_first(&mut contests);
        Ok(contests)
    }

    async fn get_contest(&self, id: &str) -> Result<ContestDetail> {
        self.get_data(&["contests", id]).await
    }

    async fn register_for_contest(&self, id: &str) -> Result<String> {
        let builder = self.request(Method::POST, &["contests", id, "register"]);
        let envelope: DataEnvelope<String> = self.send(builder).await?;
        Ok(envelope.data)
    }

    async fn get_scoreboard(&self, id: &str) -> Result<Vec<ScoreboardEntry>> {
        self.get_data(&["contests", id, "scoreboard"]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> Result<HttpClient> {
        HttpClient::new(&ApiConfig {
            base_url: base_url.into(),
            token: Some(String::new()),
            timeout_secs: 5,
        })
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = client("http://example.test/api/v1/").unwrap();
        assert_eq!(client.base_url(), "http://example.test/api/v1");
        assert!(client.token.is_none());
    }

    #[test]
    fn test_ids_are_encoded_as_one_segment() {
        let c = client("http://example.test/api/v1").unwrap();
        let url = c.endpoint(&["submissions", "a/b?c#d"]);
        assert_eq!(url.as_str(), "http://example.test/api/v1/submissions/a%2Fb%3Fc%23d");
        assert_eq!(url.query(), None);

        let root = client("http://example.test").unwrap();
        assert_eq!(root.endpoint(&["contests"]).as_str(), "http://example.test/contests");
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        for base_url in ["not a url", "mailto:judge@example.test"] {
            assert!(matches!(client(base_url), Err(ApiError::InvalidRequest(_))));
        }
    }
}
