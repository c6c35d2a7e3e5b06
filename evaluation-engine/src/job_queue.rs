//! Queue service (C3): language-partitioned FIFO job queues plus
//! per-submission status/result caching with TTL. Backed by Redis.

use async_trait::async_trait;
use redis::AsyncCommands;
use shared::{Job, Language};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use crate::error::QueueError;

fn queue_key(language: Language) -> String {
    format!("submission_queue:{language}")
}

fn status_key(submission_id: &uuid::Uuid) -> String {
    format!("submission_status:{submission_id}")
}

fn result_key(submission_id: &uuid::Uuid) -> String {
    format!("submission_result:{submission_id}")
}

#[async_trait]
pub trait JobQueue: Send + Sync {
    async fn enqueue(&self, job: &Job) -> Result<(), QueueError>;
    async fn dequeue(&self, language: Language, timeout_secs: u64) -> Result<Option<Job>, QueueError>;
    async fn set_status(&self, submission_id: uuid::Uuid, status: &str) -> Result<(), QueueError>;
    async fn get_status(&self, submission_id: uuid::Uuid) -> Result<Option<String>, QueueError>;
    async fn set_result(&self, submission_id: uuid::Uuid, result: &str) -> Result<(), QueueError>;
    async fn get_result(&self, submission_id: uuid::Uuid) -> Result<Option<String>, QueueError>;
    async fn length(&self, language: Language) -> Result<u64, QueueError>;
    async fn peek(&self, language: Language, start: isize, end: isize) -> Result<Vec<Job>, QueueError>;
    async fn health_check(&self) -> Result<bool, QueueError>;
}

/// Production implementation. Each op opens a short-lived multiplexed
/// connection rather than holding one across suspension points, per the
/// shared-resource policy.
pub struct RedisJobQueue {
    client: redis::Client,
    status_ttl_seconds: u64,
}

impl RedisJobQueue {
    pub fn new(redis_url: &str, status_ttl_seconds: u64) -> Result<Self, QueueError> {
        let client = redis::Client::open(redis_url).map_err(QueueError::Connection)?;
        Ok(RedisJobQueue { client, status_ttl_seconds })
    }

    async fn connection(&self) -> Result<redis::aio::MultiplexedConnection, QueueError> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(QueueError::Connection)
    }
}

#[async_trait]
impl JobQueue for RedisJobQueue {
    async fn enqueue(&self, job: &Job) -> Result<(), QueueError> {
        let payload = serde_json::to_string(job).map_err(QueueError::Serialization)?;
        let mut conn = self.connection().await?;
        let _: () = conn
            .lpush(queue_key(job.language), payload)
            .await
            .map_err(QueueError::Connection)?;
        self.set_status(job.submission_id, "QUEUED").await
    }

    async fn dequeue(&self, language: Language, timeout_secs: u64) -> Result<Option<Job>, QueueError> {
        let mut conn = self.connection().await?;
        let response: Option<(String, String)> = conn
            .brpop(queue_key(language), timeout_secs as f64)
            .await
            .map_err(QueueError::Connection)?;
        match response {
            Some((_, payload)) => {
                let job = serde_json::from_str(&payload).map_err(QueueError::Serialization)?;
                Ok(Some(job))
            }
            None => Ok(None),
        }
    }

    async fn set_status(&self, submission_id: uuid::Uuid, status: &str) -> Result<(), QueueError> {
        let mut conn = self.connection().await?;
        let _: () = conn
            .set_ex(status_key(&submission_id), status, self.status_ttl_seconds)
            .await
            .map_err(QueueError::Connection)?;
        Ok(())
    }

    async fn get_status(&self, submission_id: uuid::Uuid) -> Result<Option<String>, QueueError> {
        let mut conn = self.connection().await?;
        conn.get(status_key(&submission_id)).await.map_err(QueueError::Connection)
    }

    async fn set_result(&self, submission_id: uuid::Uuid, result: &str) -> Result<(), QueueError> {
        let mut conn = self.connection().await?;
        let _: () = conn
            .set_ex(result_key(&submission_id), result, self.status_ttl_seconds)
            .await
            .map_err(QueueError::Connection)?;
        Ok(())
    }

    async fn get_result(&self, submission_id: uuid::Uuid) -> Result<Option<String>, QueueError> {
        let mut conn = self.connection().await?;
        conn.get(result_key(&submission_id)).await.map_err(QueueError::Connection)
    }

    async fn length(&self, language: Language) -> Result<u64, QueueError> {
        let mut conn = self.connection().await?;
        conn.llen(queue_key(language)).await.map_err(QueueError::Connection)
    }

    async fn peek(&self, language: Language, start: isize, end: isize) -> Result<Vec<Job>, QueueError> {
        let mut conn = self.connection().await?;
        let raw: Vec<String> = conn
            .lrange(queue_key(language), start, end)
            .await
            .map_err(QueueError::Connection)?;
        let mut jobs = Vec::with_capacity(raw.len());
        for entry in raw {
            match serde_json::from_str(&entry) {
                Ok(job) => jobs.push(job),
                Err(err) => tracing::warn!(%err, "skipping malformed queue entry while peeking"),
            }
        }
        Ok(jobs)
    }

    async fn health_check(&self) -> Result<bool, QueueError> {
        let mut conn = self.connection().await?;
        let pong: String = redis::cmd("PING").query_async(&mut conn).await.map_err(QueueError::Connection)?;
        Ok(pong == "PONG")
    }
}

/// In-memory fake used by unit tests (and available for local development
/// without a Redis instance). Preserves FIFO ordering per language but does
/// not model TTL expiry.
#[derive(Default)]
pub struct InMemoryJobQueue {
    queues: Mutex<HashMap<Language, VecDeque<Job>>>,
    statuses: Mutex<HashMap<uuid::Uuid, String>>,
    results: Mutex<HashMap<uuid::Uuid, String>>,
}

impl InMemoryJobQueue {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JobQueue for InMemoryJobQueue {
    async fn enqueue(&self, job: &Job) -> Result<(), QueueError> {
        self.queues.lock().unwrap().entry(job.language).or_default().push_back(job.clone());
        self.statuses.lock().unwrap().insert(job.submission_id, "QUEUED".to_string());
        Ok(())
    }

    async fn dequeue(&self, language: Language, _timeout_secs: u64) -> Result<Option<Job>, QueueError> {
        Ok(self.queues.lock().unwrap().entry(language).or_default().pop_front())
    }

    async fn set_status(&self, submission_id: uuid::Uuid, status: &str) -> Result<(), QueueError> {
        self.statuses.lock().unwrap().insert(submission_id, status.to_string());
        Ok(())
    }

    async fn get_status(&self, submission_id: uuid::Uuid) -> Result<Option<String>, QueueError> {
        Ok(self.statuses.lock().unwrap().get(&submission_id).cloned())
    }

    async fn set_result(&self, submission_id: uuid::Uuid, result: &str) -> Result<(), QueueError> {
        self.results.lock().unwrap().insert(submission_id, result.to_string());
        Ok(())
    }

    async fn get_result(&self, submission_id: uuid::Uuid) -> Result<Option<String>, QueueError> {
        Ok(self.results.lock().unwrap().get(&submission_id).cloned())
    }

    async fn length(&self, language: Language) -> Result<u64, QueueError> {
        Ok(self.queues.lock().unwrap().entry(language).or_default().len() as u64)
    }

    async fn peek(&self, language: Language, start: isize, end: isize) -> Result<Vec<Job>, QueueError> {
        let queues = self.queues.lock().unwrap();
        let queue = queues.get(&language).cloned().unwrap_or_default();
        let len = queue.len() as isize;
        let normalize = |i: isize| -> usize {
            let i = if i < 0 { (len + i).max(0) } else { i.min(len) };
            i as usize
        };
        let (start, end) = (normalize(start), normalize(end).min(queue.len().saturating_sub(1)));
        if queue.is_empty() || start > end {
            return Ok(Vec::new());
        }
        Ok(queue.iter().skip(start).take(end - start + 1).cloned().collect())
    }

    async fn health_check(&self) -> Result<bool, QueueError> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_job(submission_id: uuid::Uuid, language: Language) -> Job {
        Job {
            submission_id,
            challenge_id: uuid::Uuid::new_v4(),
            user_id: uuid::Uuid::new_v4(),
            language,
            code: "print(1)".to_string(),
            test_cases: vec![],
            enqueued_at: Utc::now(),
            time_limit_ms: 1000,
            memory_limit_mb: 256,
        }
    }

    #[tokio::test]
    async fn enqueue_sets_status_to_queued() {
        let queue = InMemoryJobQueue::new();
        let job = sample_job(uuid::Uuid::new_v4(), Language::Python);
        queue.enqueue(&job).await.unwrap();
        assert_eq!(queue.get_status(job.submission_id).await.unwrap().as_deref(), Some("QUEUED"));
    }

    #[tokio::test]
    async fn dequeue_preserves_fifo_order_per_language() {
        let queue = InMemoryJobQueue::new();
        let j1 = sample_job(uuid::Uuid::new_v4(), Language::Python);
        let j2 = sample_job(uuid::Uuid::new_v4(), Language::Python);
        let j3 = sample_job(uuid::Uuid::new_v4(), Language::Python);
        queue.enqueue(&j1).await.unwrap();
        queue.enqueue(&j2).await.unwrap();
        queue.enqueue(&j3).await.unwrap();

        assert_eq!(queue.dequeue(Language::Python, 0).await.unwrap().unwrap().submission_id, j1.submission_id);
        assert_eq!(queue.dequeue(Language::Python, 0).await.unwrap().unwrap().submission_id, j2.submission_id);
        assert_eq!(queue.dequeue(Language::Python, 0).await.unwrap().unwrap().submission_id, j3.submission_id);
    }

    #[tokio::test]
    async fn languages_do_not_share_a_queue() {
        let queue = InMemoryJobQueue::new();
        queue.enqueue(&sample_job(uuid::Uuid::new_v4(), Language::Python)).await.unwrap();
        assert_eq!(queue.length(Language::Java).await.unwrap(), 0);
        assert_eq!(queue.length(Language::Python).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn peek_does_not_consume() {
        let queue = InMemoryJobQueue::new();
        let job = sample_job(uuid::Uuid::new_v4(), Language::Cpp);
        queue.enqueue(&job).await.unwrap();
        let peeked = queue.peek(Language::Cpp, 0, -1).await.unwrap();
        assert_eq!(peeked.len(), 1);
        assert_eq!(queue.length(Language::Cpp).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn set_and_get_result_round_trips() {
        let queue = InMemoryJobQueue::new();
        let id = uuid::Uuid::new_v4();
        queue.set_result(id, "{\"status\":\"ACCEPTED\"}").await.unwrap();
        assert_eq!(queue.get_result(id).await.unwrap().as_deref(), Some("{\"status\":\"ACCEPTED\"}"));
    }
}
