use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{CaseStatus, Language, SubmissionStatus};

/// Role of the caller attempting to submit. Only Student may submit; the
/// other variants exist so the use-case can reject everyone else with a
/// meaningful message rather than assuming a boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Professor,
    Admin,
}

/// Lifecycle status of a Challenge. Only Published challenges accept
/// submissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeStatus {
    Draft,
    Published,
    Archived,
}

/// A challenge (problem), consumed read-only by the core. Owned by the
/// out-of-scope persistent store.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Challenge {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub difficulty: String,
    pub tags: Vec<String>,
    pub time_limit_ms: i32,
    pub memory_limit_mb: i32,
    pub language: String,
    pub status: String,
}

impl Challenge {
    pub fn is_published(&self) -> bool {
        self.status == "published"
    }
}

/// One (stdin, expected stdout, order) triple belonging to a Challenge.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TestCase {
    pub id: Uuid,
    pub challenge_id: Uuid,
    pub input_data: Option<String>,
    pub expected_output: String,
    pub is_hidden: bool,
    pub order_index: i32,
}

/// One attempt by a user at a challenge in one language. Owned by the store;
/// created QUEUED and transitions monotonically to exactly one terminal
/// state.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Submission {
    pub id: Uuid,
    pub user_id: Uuid,
    pub challenge_id: Uuid,
    pub language: String,
    pub source_code: String,
    pub status: String,
    pub score: i32,
    pub total_time_ms: i32,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Submission {
    pub fn status(&self) -> Option<SubmissionStatus> {
        self.status.parse().ok()
    }
}

/// A single test case snapshotted into a Job payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobTestCase {
    pub id: Uuid,
    pub input: Option<String>,
    pub expected_output: String,
    pub is_hidden: bool,
    pub order_index: i32,
}

impl From<&TestCase> for JobTestCase {
    fn from(tc: &TestCase) -> Self {
        JobTestCase {
            id: tc.id,
            input: tc.input_data.clone(),
            expected_output: tc.expected_output.clone(),
            is_hidden: tc.is_hidden,
            order_index: tc.order_index,
        }
    }
}

/// The queue-side payload capturing everything needed to execute a
/// submission without re-reading the store. Self-contained: workers never
/// query the store for test data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub submission_id: Uuid,
    pub challenge_id: Uuid,
    pub user_id: Uuid,
    pub language: Language,
    pub code: String,
    pub test_cases: Vec<JobTestCase>,
    pub enqueued_at: DateTime<Utc>,
    pub time_limit_ms: i32,
    pub memory_limit_mb: i32,
}

/// Per-case execution outcome, in the same order the test cases were given.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCaseResult {
    pub case_id: Uuid,
    pub status: CaseStatus,
    pub time_ms: i32,
    pub memory_mb: i32,
    pub output: String,
    pub expected_output: String,
    pub error_message: Option<String>,
}

/// The aggregate verdict a Language executor hands back to the worker, and
/// the worker persists to the store and caches on the queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateResult {
    pub submission_id: Uuid,
    pub status: SubmissionStatus,
    pub score: i32,
    pub total_time_ms: i32,
    pub language: Language,
    pub error_message: Option<String>,
    pub cases: Vec<TestCaseResult>,
}

/// Request body accepted by the (out-of-scope) HTTP intake layer; kept here
/// because the submission use-case's signature takes these same fields.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitRequest {
    pub challenge_id: Uuid,
    pub language: Language,
    pub code: String,
}
