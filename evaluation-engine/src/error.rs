//! Typed errors at the seams a caller is expected to branch on. Everything
//! above these seams (use-case, worker loop, binaries) propagates with
//! `anyhow::Result` and `.context(...)`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueueError {
    #[error("queue connection error: {0}")]
    Connection(#[source] redis::RedisError),
    #[error("failed to (de)serialize queue payload: {0}")]
    Serialization(#[source] serde_json::Error),
    #[error("no value found for key {0}")]
    NotFound(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
    #[error("submission {0} not found")]
    SubmissionNotFound(uuid::Uuid),
    #[error("challenge {0} not found")]
    ChallengeNotFound(uuid::Uuid),
}
