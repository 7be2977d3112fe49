#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Notify, Semaphore};

use client::api::{NewSubmission, SubmissionApi};
use client::error::{ApiError, Result};
use client::poller::Timer;
use common::submission::{ProblemRef, SubmissionRecord};
use common::{SubmissionId, SubmissionStatus};

pub fn record(id: &str, status: SubmissionStatus, execution_time: Option<u64>) -> SubmissionRecord {
    SubmissionRecord {
        id: SubmissionId::new(id),
        status,
        language: "python".into(),
        code: "print(1)".into(),
        execution_time: execution_time.map(|ms| ms as f64),
        memory_used: execution_time.map(|_| 1024.0),
        created_at: "2025-03-01T10:00:00Z".parse().unwrap(),
        problem: ProblemRef {
            id: "p1".into(),
            title: "A + B".into(),
        },
        contest_id: None,
    }
}

/// A `reqwest::Error` from a request that could never be sent.
pub fn transport_error() -> ApiError {
    let err = reqwest::Client::new()
        .get("not a url")
        .build()
        .expect_err("invalid url must fail");
    ApiError::Transport(err)
}

/// Backend fake that replays a fixed script of read results.
pub struct ScriptedApi {
    submit_result: Mutex<Option<Result<SubmissionId>>>,
    reads: Mutex<VecDeque<Result<SubmissionRecord>>>,
    read_delay: Duration,
    pub created: Mutex<Vec<NewSubmission>>,
    pub read_count: AtomicUsize,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
    pub read_started: Notify,
}

impl ScriptedApi {
    pub fn new(reads: Vec<Result<SubmissionRecord>>) -> Self {
        Self {
            submit_result: Mutex::new(None),
            reads: Mutex::new(reads.into()),
            read_delay: Duration::ZERO,
            created: Mutex::new(Vec::new()),
            read_count: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            read_started: Notify::new(),
        }
    }

    pub fn with_submit_result(self, result: Result<SubmissionId>) -> Self {
        *self.submit_result.lock().unwrap() = Some(result);
        self
    }

    pub fn with_read_delay(mut self, delay: Duration) -> Self {
        self.read_delay = delay;
        self
    }

    pub fn reads(&self) -> usize {
        self.read_count.load(Ordering::SeqCst)
    }

    pub fn creations(&self) -> usize {
        self.created.lock().unwrap().len()
    }
}

#[async_trait]
impl SubmissionApi for ScriptedApi {
    async fn create_submission(&self, request: &NewSubmission) -> Result<SubmissionId> {
        self.created.lock().unwrap().push(request.clone());
        self.submit_result
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Ok(SubmissionId::new("s1")))
    }

    async fn get_submission(&self, _id: &SubmissionId) -> Result<SubmissionRecord> {
        self.read_count.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.read_started.notify_one();

        if !self.read_delay.is_zero() {
            tokio::time::sleep(self.read_delay).await;
        }

        let next = self.reads.lock().unwrap().pop_front();
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        next.unwrap_or_else(|| {
            Err(ApiError::Backend {
                status: 500,
                message: Some("script exhausted".into()),
            })
        })
    }

    async fn list_submissions(&self, _problem_id: &str) -> Result<Vec<SubmissionRecord>> {
        Ok(Vec::new())
    }
}

/// Timer whose sleeps only finish when the test releases them.
pub struct GatedTimer {
    gate: Semaphore,
    pub requested: Mutex<Vec<Duration>>,
    pub sleep_started: Notify,
}

impl GatedTimer {
    pub fn new() -> Self {
        Self {
            gate: Semaphore::new(0),
            requested: Mutex::new(Vec::new()),
            sleep_started: Notify::new(),
        }
    }

    /// Let `n` sleeps (current or future) complete.
    pub fn release(&self, n: usize) {
        self.gate.add_permits(n);
    }

    pub fn requested(&self) -> Vec<Duration> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl Timer for GatedTimer {
    async fn sleep(&self, duration: Duration) {
        self.requested.lock().unwrap().push(duration);
        self.sleep_started.notify_one();
        if let Ok(permit) = self.gate.acquire().await {
            permit.forget();
        }
    }
}
