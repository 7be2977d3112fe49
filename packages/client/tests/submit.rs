mod support;

use client::submit::SUBMIT_FAILED_MESSAGE;
use client::{ApiError, NewSubmission, submit};
use common::SubmissionId;

use support::ScriptedApi;

#[tokio::test]
async fn sends_exactly_one_request() {
    let api = ScriptedApi::new(vec![]).with_submit_result(Ok(SubmissionId::new("s1")));
    let request = NewSubmission::new("p1", "print(1)", "python").in_contest("c1");

    let id = submit(&api, &request).await.unwrap();

    assert_eq!(id, SubmissionId::new("s1"));
    assert_eq!(api.created.lock().unwrap().as_slice(), &[request]);
    assert_eq!(api.reads(), 0);
}

#[tokio::test]
async fn empty_code_is_passed_through() {
    let api = ScriptedApi::new(vec![]);
    let request = NewSubmission::new("p1", "", "cpp");

    assert!(submit(&api, &request).await.is_ok());
    assert_eq!(api.created.lock().unwrap()[0].code, "");
}

#[tokio::test]
async fn empty_problem_id_is_rejected_locally() {
    let api = ScriptedApi::new(vec![]);
    let err = submit(&api, &NewSubmission::new("  ", "x", "cpp"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::InvalidRequest(_)));
    assert_eq!(api.creations(), 0);
}

#[tokio::test]
async fn failure_is_not_retried() {
    let api = ScriptedApi::new(vec![]).with_submit_result(Err(ApiError::Backend {
        status: 503,
        message: None,
    }));

    let err = submit(&api, &NewSubmission::new("p1", "x", "cpp"))
        .await
        .unwrap_err();

    assert_eq!(api.creations(), 1);
    assert_eq!(err.user_message_or(SUBMIT_FAILED_MESSAGE), SUBMIT_FAILED_MESSAGE);
}

#[tokio::test]
async fn repeated_taps_create_repeated_submissions() {
    let api = ScriptedApi::new(vec![]);
    let request = NewSubmission::new("p1", "print(1)", "python");

    submit(&api, &request).await.unwrap();
    submit(&api, &request).await.unwrap();

    assert_eq!(api.creations(), 2);
}
