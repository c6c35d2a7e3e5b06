//! Submission use-case (C5): the only entry point allowed to create a job.
//! Everything here runs above the queue/store seams and propagates with
//! `anyhow::Result`.

use anyhow::{bail, Context, Result};
use chrono::Utc;
use shared::{AggregateResult, Job, JobTestCase, Language, Role, Submission};
use std::sync::Arc;
use uuid::Uuid;

use crate::job_queue::JobQueue;
use crate::store::SubmissionStore;

pub const MAX_SOURCE_CODE_CHARS: usize = 10_000;

/// Validates and records a new submission, then enqueues its job. If
/// enqueueing fails after the row has been inserted, the row is deleted so
/// the "job exists only while enqueued" invariant never breaks.
pub async fn submit(
    store: &dyn SubmissionStore,
    queue: &dyn JobQueue,
    user_id: Uuid,
    role: Role,
    challenge_id: Uuid,
    language: Language,
    code: String,
) -> Result<Uuid> {
    if role != Role::Student {
        bail!("only students may submit solutions");
    }
    if code.trim().is_empty() {
        bail!("source code must not be empty");
    }
    if code.chars().count() > MAX_SOURCE_CODE_CHARS {
        bail!("source code exceeds {} characters", MAX_SOURCE_CODE_CHARS);
    }

    let challenge = store.get_challenge(challenge_id).await.context("loading challenge")?;
    if !challenge.is_published() {
        bail!("challenge {} is not published", challenge_id);
    }

    let test_cases = store.get_test_cases(challenge_id).await.context("loading test cases")?;
    if test_cases.is_empty() {
        bail!("challenge {} has no test cases", challenge_id);
    }

    let now = Utc::now();
    let submission_id = Uuid::new_v4();
    let submission = Submission {
        id: submission_id,
        user_id,
        challenge_id,
        language: language.as_str().to_string(),
        source_code: code.clone(),
        status: "QUEUED".to_string(),
        score: 0,
        total_time_ms: 0,
        submitted_at: now,
        updated_at: now,
    };
    store.insert_submission(&submission).await.context("inserting submission")?;

    let job = Job {
        submission_id,
        challenge_id,
        user_id,
        language,
        code,
        test_cases: test_cases.iter().map(JobTestCase::from).collect(),
        enqueued_at: now,
        time_limit_ms: challenge.time_limit_ms,
        memory_limit_mb: challenge.memory_limit_mb,
    };

    if let Err(err) = queue.enqueue(&job).await {
        if let Err(cleanup_err) = store.delete_submission(submission_id).await {
            tracing::error!(%submission_id, %cleanup_err, "failed to roll back submission row after enqueue failure");
        }
        return Err(err).context("enqueueing job");
    }

    Ok(submission_id)
}

/// Persists a finished job's aggregate result. Separated from the worker
/// loop so the use case can be invoked directly (e.g. by tests or an
/// out-of-process reconciler) without going through a queue at all.
pub async fn complete(store: &dyn SubmissionStore, result: &AggregateResult) -> Result<()> {
    store.complete_submission(result).await.context("persisting aggregate result")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job_queue::InMemoryJobQueue;
    use crate::store::InMemorySubmissionStore;
    use shared::{Challenge, TestCase};

    fn published_challenge() -> Challenge {
        Challenge {
            id: Uuid::new_v4(),
            title: "Add Two Numbers".to_string(),
            description: "Read two integers, print their sum.".to_string(),
            difficulty: "easy".to_string(),
            tags: vec!["math".to_string()],
            time_limit_ms: 1000,
            memory_limit_mb: 256,
            language: "python".to_string(),
            status: "published".to_string(),
        }
    }

    fn one_test_case(challenge_id: Uuid) -> TestCase {
        TestCase {
            id: Uuid::new_v4(),
            challenge_id,
            input_data: Some("1 2".to_string()),
            expected_output: "3".to_string(),
            is_hidden: false,
            order_index: 0,
        }
    }

    #[tokio::test]
    async fn submitting_as_a_student_to_a_published_challenge_enqueues_a_job() {
        let store = InMemorySubmissionStore::new();
        let queue = InMemoryJobQueue::new();
        let challenge = published_challenge();
        let case = one_test_case(challenge.id);
        store.seed_challenge(challenge.clone(), vec![case]);

        let submission_id = submit(
            &store,
            &queue,
            Uuid::new_v4(),
            Role::Student,
            challenge.id,
            Language::Python,
            "print(3)".to_string(),
        )
        .await
        .unwrap();

        assert_eq!(queue.length(Language::Python).await.unwrap(), 1);
        assert!(store.get_submission(submission_id).await.is_ok());
    }

    #[tokio::test]
    async fn non_student_role_is_rejected() {
        let store = InMemorySubmissionStore::new();
        let queue = InMemoryJobQueue::new();
        let challenge = published_challenge();
        store.seed_challenge(challenge.clone(), vec![one_test_case(challenge.id)]);

        let result = submit(&store, &queue, Uuid::new_v4(), Role::Professor, challenge.id, Language::Python, "x".to_string()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn unpublished_challenge_is_rejected() {
        let store = InMemorySubmissionStore::new();
        let queue = InMemoryJobQueue::new();
        let mut challenge = published_challenge();
        challenge.status = "draft".to_string();
        store.seed_challenge(challenge.clone(), vec![one_test_case(challenge.id)]);

        let result = submit(&store, &queue, Uuid::new_v4(), Role::Student, challenge.id, Language::Python, "x".to_string()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn challenge_with_zero_test_cases_is_rejected() {
        let store = InMemorySubmissionStore::new();
        let queue = InMemoryJobQueue::new();
        let challenge = published_challenge();
        store.seed_challenge(challenge.clone(), vec![]);

        let result = submit(&store, &queue, Uuid::new_v4(), Role::Student, challenge.id, Language::Python, "x".to_string()).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn oversized_source_code_is_rejected_before_touching_the_store() {
        let store = InMemorySubmissionStore::new();
        let queue = InMemoryJobQueue::new();
        let challenge = published_challenge();
        store.seed_challenge(challenge.clone(), vec![one_test_case(challenge.id)]);
        let huge_code = "a".repeat(MAX_SOURCE_CODE_CHARS + 1);

        let result = submit(&store, &queue, Uuid::new_v4(), Role::Student, challenge.id, Language::Python, huge_code).await;
        assert!(result.is_err());
        assert_eq!(queue.length(Language::Python).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn empty_source_code_is_rejected_before_touching_the_store() {
        let store = InMemorySubmissionStore::new();
        let queue = InMemoryJobQueue::new();
        let challenge = published_challenge();
        store.seed_challenge(challenge.clone(), vec![one_test_case(challenge.id)]);

        let result = submit(&store, &queue, Uuid::new_v4(), Role::Student, challenge.id, Language::Python, "   \n\t".to_string()).await;
        assert!(result.is_err());
        assert_eq!(queue.length(Language::Python).await.unwrap(), 0);
    }
}
