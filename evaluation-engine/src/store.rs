//! Persistence seam for submissions, challenges, and test cases. Every
//! method is a single round trip; nothing here holds a transaction open
//! across a suspension point in the worker loop.

use async_trait::async_trait;
use shared::{AggregateResult, Challenge, Submission, SubmissionStatus, TestCase};
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

use crate::error::StoreError;

#[async_trait]
pub trait SubmissionStore: Send + Sync {
    async fn insert_submission(&self, submission: &Submission) -> Result<(), StoreError>;
    async fn delete_submission(&self, id: Uuid) -> Result<(), StoreError>;
    async fn get_submission(&self, id: Uuid) -> Result<Submission, StoreError>;
    async fn update_submission_status(&self, id: Uuid, status: SubmissionStatus) -> Result<(), StoreError>;
    async fn complete_submission(&self, result: &AggregateResult) -> Result<(), StoreError>;
    async fn get_challenge(&self, id: Uuid) -> Result<Challenge, StoreError>;
    async fn get_test_cases(&self, challenge_id: Uuid) -> Result<Vec<TestCase>, StoreError>;
}

#[derive(Clone)]
pub struct PostgresSubmissionStore {
    pool: PgPool,
}

impl PostgresSubmissionStore {
    pub async fn new(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPool::connect(database_url).await.map_err(StoreError::Database)?;
        Ok(PostgresSubmissionStore { pool })
    }
}

#[async_trait]
impl SubmissionStore for PostgresSubmissionStore {
    async fn insert_submission(&self, submission: &Submission) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO submissions
                (id, user_id, challenge_id, language, source_code, status, score, total_time_ms, submitted_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(submission.id)
        .bind(submission.user_id)
        .bind(submission.challenge_id)
        .bind(&submission.language)
        .bind(&submission.source_code)
        .bind(&submission.status)
        .bind(submission.score)
        .bind(submission.total_time_ms)
        .bind(submission.submitted_at)
        .bind(submission.updated_at)
        .execute(&self.pool)
        .await
        .map_err(StoreError::Database)?;
        Ok(())
    }

    async fn delete_submission(&self, id: Uuid) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM submissions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(StoreError::Database)?;
        Ok(())
    }

    async fn get_submission(&self, id: Uuid) -> Result<Submission, StoreError> {
        sqlx::query_as::<_, Submission>("SELECT * FROM submissions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::Database)?
            .ok_or(StoreError::SubmissionNotFound(id))
    }

    async fn update_submission_status(&self, id: Uuid, status: SubmissionStatus) -> Result<(), StoreError> {
        sqlx::query("UPDATE submissions SET status = $1, updated_at = now() WHERE id = $2")
            .bind(status.as_str())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(StoreError::Database)?;
        Ok(())
    }

    async fn complete_submission(&self, result: &AggregateResult) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            UPDATE submissions
            SET status = $1, score = $2, total_time_ms = $3, updated_at = now()
            WHERE id = $4
            "#,
        )
        .bind(result.status.as_str())
        .bind(result.score)
        .bind(result.total_time_ms)
        .bind(result.submission_id)
        .execute(&self.pool)
        .await
        .map_err(StoreError::Database)?;
        Ok(())
    }

    async fn get_challenge(&self, id: Uuid) -> Result<Challenge, StoreError> {
        sqlx::query_as::<_, Challenge>("SELECT * FROM challenges WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::Database)?
            .ok_or(StoreError::ChallengeNotFound(id))
    }

    async fn get_test_cases(&self, challenge_id: Uuid) -> Result<Vec<TestCase>, StoreError> {
        sqlx::query_as::<_, TestCase>("SELECT * FROM test_cases WHERE challenge_id = $1 ORDER BY order_index")
            .bind(challenge_id)
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::Database)
    }
}

/// In-memory fake for unit tests.
#[derive(Default)]
pub struct InMemorySubmissionStore {
    submissions: Mutex<HashMap<Uuid, Submission>>,
    challenges: Mutex<HashMap<Uuid, Challenge>>,
    test_cases: Mutex<HashMap<Uuid, Vec<TestCase>>>,
}

impl InMemorySubmissionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_challenge(&self, challenge: Challenge, cases: Vec<TestCase>) {
        let id = challenge.id;
        self.challenges.lock().unwrap().insert(id, challenge);
        self.test_cases.lock().unwrap().insert(id, cases);
    }
}

#[async_trait]
impl SubmissionStore for InMemorySubmissionStore {
    async fn insert_submission(&self, submission: &Submission) -> Result<(), StoreError> {
        self.submissions.lock().unwrap().insert(submission.id, submission.clone());
        Ok(())
    }

    async fn delete_submission(&self, id: Uuid) -> Result<(), StoreError> {
        self.submissions.lock().unwrap().remove(&id);
        Ok(())
    }

    async fn get_submission(&self, id: Uuid) -> Result<Submission, StoreError> {
        self.submissions.lock().unwrap().get(&id).cloned().ok_or(StoreError::SubmissionNotFound(id))
    }

    async fn update_submission_status(&self, id: Uuid, status: SubmissionStatus) -> Result<(), StoreError> {
        let mut submissions = self.submissions.lock().unwrap();
        let submission = submissions.get_mut(&id).ok_or(StoreError::SubmissionNotFound(id))?;
        submission.status = status.as_str().to_string();
        Ok(())
    }

    async fn complete_submission(&self, result: &AggregateResult) -> Result<(), StoreError> {
        let mut submissions = self.submissions.lock().unwrap();
        let submission = submissions
            .get_mut(&result.submission_id)
            .ok_or(StoreError::SubmissionNotFound(result.submission_id))?;
        submission.status = result.status.as_str().to_string();
        submission.score = result.score;
        submission.total_time_ms = result.total_time_ms;
        Ok(())
    }

    async fn get_challenge(&self, id: Uuid) -> Result<Challenge, StoreError> {
        self.challenges.lock().unwrap().get(&id).cloned().ok_or(StoreError::ChallengeNotFound(id))
    }

    async fn get_test_cases(&self, challenge_id: Uuid) -> Result<Vec<TestCase>, StoreError> {
        Ok(self.test_cases.lock().unwrap().get(&challenge_id).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_submission() -> Submission {
        Submission {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            challenge_id: Uuid::new_v4(),
            language: "python".to_string(),
            source_code: "print(1)".to_string(),
            status: "QUEUED".to_string(),
            score: 0,
            total_time_ms: 0,
            submitted_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn insert_then_get_round_trips() {
        let store = InMemorySubmissionStore::new();
        let submission = sample_submission();
        store.insert_submission(&submission).await.unwrap();
        let fetched = store.get_submission(submission.id).await.unwrap();
        assert_eq!(fetched.id, submission.id);
    }

    #[tokio::test]
    async fn delete_makes_the_submission_unfetchable() {
        let store = InMemorySubmissionStore::new();
        let submission = sample_submission();
        store.insert_submission(&submission).await.unwrap();
        store.delete_submission(submission.id).await.unwrap();
        assert!(store.get_submission(submission.id).await.is_err());
    }

    #[tokio::test]
    async fn get_missing_submission_returns_not_found() {
        let store = InMemorySubmissionStore::new();
        let err = store.get_submission(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, StoreError::SubmissionNotFound(_)));
    }

    #[tokio::test]
    async fn update_status_mutates_in_place() {
        let store = InMemorySubmissionStore::new();
        let submission = sample_submission();
        store.insert_submission(&submission).await.unwrap();
        store.update_submission_status(submission.id, SubmissionStatus::Running).await.unwrap();
        assert_eq!(store.get_submission(submission.id).await.unwrap().status, "RUNNING");
    }
}
