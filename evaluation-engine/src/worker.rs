//! Worker loop (C4): one process serves exactly one language, repeatedly
//! dequeuing a job, running it through the executor, and persisting the
//! result. Failure at any step is handled best-effort; the loop never
//! panics a job failure into a crashed process.

use isolate_integration::SandboxRunner;
use shared::{Language, SubmissionStatus};
use std::sync::Arc;
use tokio::sync::watch;

use crate::config::Config;
use crate::executor;
use crate::job_queue::JobQueue;
use crate::store::SubmissionStore;

pub struct Worker {
    language: Language,
    queue: Arc<dyn JobQueue>,
    store: Arc<dyn SubmissionStore>,
    runner: Arc<dyn SandboxRunner>,
    config: Arc<Config>,
}

impl Worker {
    pub fn new(
        language: Language,
        queue: Arc<dyn JobQueue>,
        store: Arc<dyn SubmissionStore>,
        runner: Arc<dyn SandboxRunner>,
        config: Arc<Config>,
    ) -> Self {
        Worker { language, queue, store, runner, config }
    }

    /// Runs until `shutdown` reports `true`. A job already in flight when
    /// shutdown is requested always finishes before this returns.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        tracing::info!(language = %self.language, "worker loop starting");
        loop {
            if *shutdown.borrow() {
                break;
            }
            tokio::select! {
                biased;
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
                dequeued = self.queue.dequeue(self.language, self.config.dequeue_poll_seconds) => {
                    match dequeued {
                        Ok(Some(job)) => self.process_job(job).await,
                        Ok(None) => {}
                        Err(err) => {
                            tracing::error!(%err, "dequeue failed, backing off");
                            tokio::time::sleep(std::time::Duration::from_secs(1)).await;
                        }
                    }
                }
            }
        }
        tracing::info!(language = %self.language, "worker loop stopped");
    }

    async fn process_job(&self, job: shared::Job) {
        let submission_id = job.submission_id;
        tracing::info!(%submission_id, language = %self.language, "processing job");

        match self.store.get_submission(submission_id).await {
            Ok(_) => {}
            Err(crate::error::StoreError::SubmissionNotFound(_)) => {
                tracing::warn!(%submission_id, "submission not found, dropping job");
                return;
            }
            Err(err) => {
                tracing::error!(%submission_id, %err, "failed to fetch submission, dropping job");
                return;
            }
        }

        if job.language != self.language {
            tracing::error!(
                %submission_id,
                expected = %self.language,
                got = %job.language,
                "routing bug: job dequeued on the wrong language queue"
            );
            self.mark_runtime_error(submission_id).await;
            return;
        }

        if let Err(err) = self.store.update_submission_status(submission_id, SubmissionStatus::Running).await {
            tracing::warn!(%submission_id, %err, "failed to persist RUNNING status");
        }
        if let Err(err) = self.queue.set_status(submission_id, SubmissionStatus::Running.as_str()).await {
            tracing::warn!(%submission_id, %err, "failed to cache RUNNING status");
        }

        let work_dir = match tempfile::tempdir() {
            Ok(dir) => dir,
            Err(err) => {
                tracing::error!(%submission_id, %err, "failed to create scratch directory");
                self.mark_runtime_error(submission_id).await;
                return;
            }
        };

        match executor::evaluate(&job, self.runner.as_ref(), work_dir.path()).await {
            Ok(result) => {
                if let Err(err) = self.store.complete_submission(&result).await {
                    tracing::error!(%submission_id, %err, "failed to persist result");
                }
                match serde_json::to_string(&result) {
                    Ok(payload) => {
                        if let Err(err) = self.queue.set_result(submission_id, &payload).await {
                            tracing::warn!(%submission_id, %err, "failed to cache result");
                        }
                    }
                    Err(err) => tracing::error!(%submission_id, %err, "failed to serialize result"),
                }
                if let Err(err) = self.queue.set_status(submission_id, result.status.as_str()).await {
                    tracing::warn!(%submission_id, %err, "failed to cache final status");
                }
                tracing::info!(%submission_id, status = result.status.as_str(), score = result.score, "job complete");
            }
            Err(err) => {
                tracing::error!(%submission_id, %err, "job execution failed");
                self.mark_runtime_error(submission_id).await;
            }
        }
    }

    async fn mark_runtime_error(&self, submission_id: uuid::Uuid) {
        if let Err(err) = self.store.update_submission_status(submission_id, SubmissionStatus::RuntimeError).await {
            tracing::warn!(%submission_id, %err, "failed to persist best-effort RUNTIME_ERROR status");
        }
        if let Err(err) = self.queue.set_status(submission_id, SubmissionStatus::RuntimeError.as_str()).await {
            tracing::warn!(%submission_id, %err, "failed to cache best-effort RUNTIME_ERROR status");
        }
    }
}

/// Installs a SIGINT/SIGTERM handler that flips the shared shutdown flag.
/// Runs as its own task; the watch channel wakes any worker loop blocked on
/// a dequeue.
pub fn install_shutdown_signal() -> watch::Receiver<bool> {
    let (tx, rx) = watch::channel(false);
    tokio::spawn(async move {
        let ctrl_c = tokio::signal::ctrl_c();
        #[cfg(unix)]
        {
            let mut terminate = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                .expect("failed to install SIGTERM handler");
            tokio::select! {
                _ = ctrl_c => tracing::info!("received SIGINT"),
                _ = terminate.recv() => tracing::info!("received SIGTERM"),
            }
        }
        #[cfg(not(unix))]
        {
            let _ = ctrl_c.await;
            tracing::info!("received ctrl-c");
        }
        let _ = tx.send(true);
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job_queue::InMemoryJobQueue;
    use crate::store::InMemorySubmissionStore;
    use chrono::Utc;
    use isolate_integration::{FakeRunner, SandboxOutcome};
    use shared::{Job, JobTestCase, Submission};

    fn config() -> Arc<Config> {
        Arc::new(Config {
            worker_language: None,
            database_url: String::new(),
            redis_host: "localhost".to_string(),
            redis_port: 6379,
            sandbox_network: "none".to_string(),
            status_ttl_seconds: 3600,
            dequeue_poll_seconds: 0,
            isolate_bin: "isolate".to_string(),
            sandbox_backend: crate::config::SandboxBackend::Native,
            work_dir: "/tmp/judicia-test".to_string(),
        })
    }

    fn sample_job(language: Language) -> Job {
        Job {
            submission_id: uuid::Uuid::new_v4(),
            challenge_id: uuid::Uuid::new_v4(),
            user_id: uuid::Uuid::new_v4(),
            language,
            code: "import os".to_string(),
            test_cases: vec![JobTestCase {
                id: uuid::Uuid::new_v4(),
                input: None,
                expected_output: "1".to_string(),
                is_hidden: false,
                order_index: 0,
            }],
            enqueued_at: Utc::now(),
            time_limit_ms: 1000,
            memory_limit_mb: 256,
        }
    }

    #[tokio::test]
    async fn processing_a_job_with_a_forbidden_import_never_invokes_the_sandbox() {
        let queue = Arc::new(InMemoryJobQueue::new());
        let store = Arc::new(InMemorySubmissionStore::new());
        let runner = Arc::new(FakeRunner::new(vec![SandboxOutcome {
            stdout: "1".to_string(),
            stderr: String::new(),
            exit_code: 0,
            elapsed_ms: 5,
            memory_kb: 128,
        }]));
        let job = sample_job(Language::Python);
        let submission = Submission {
            id: job.submission_id,
            user_id: job.user_id,
            challenge_id: job.challenge_id,
            language: "python".to_string(),
            source_code: job.code.clone(),
            status: "QUEUED".to_string(),
            score: 0,
            total_time_ms: 0,
            submitted_at: Utc::now(),
            updated_at: Utc::now(),
        };
        store.insert_submission(&submission).await.unwrap();

        let worker = Worker::new(Language::Python, queue.clone(), store.clone(), runner.clone(), config());
        worker.process_job(job.clone()).await;

        assert_eq!(runner.call_count(), 0);
        let updated = store.get_submission(job.submission_id).await.unwrap();
        assert_eq!(updated.status, "COMPILATION_ERROR");
    }

    #[tokio::test]
    async fn successful_job_persists_accepted_status_and_full_score() {
        let queue = Arc::new(InMemoryJobQueue::new());
        let store = Arc::new(InMemorySubmissionStore::new());
        let runner = Arc::new(FakeRunner::new(vec![SandboxOutcome {
            stdout: "1".to_string(),
            stderr: String::new(),
            exit_code: 0,
            elapsed_ms: 5,
            memory_kb: 128,
        }]));
        let mut job = sample_job(Language::Python);
        job.code = "print(1)".to_string();
        let submission = Submission {
            id: job.submission_id,
            user_id: job.user_id,
            challenge_id: job.challenge_id,
            language: "python".to_string(),
            source_code: job.code.clone(),
            status: "QUEUED".to_string(),
            score: 0,
            total_time_ms: 0,
            submitted_at: Utc::now(),
            updated_at: Utc::now(),
        };
        store.insert_submission(&submission).await.unwrap();

        let worker = Worker::new(Language::Python, queue.clone(), store.clone(), runner.clone(), config());
        worker.process_job(job.clone()).await;

        let updated = store.get_submission(job.submission_id).await.unwrap();
        assert_eq!(updated.status, "ACCEPTED");
        assert_eq!(updated.score, 100);
        assert_eq!(queue.get_status(job.submission_id).await.unwrap().as_deref(), Some("ACCEPTED"));
    }

    #[tokio::test]
    async fn a_job_for_a_missing_submission_is_dropped_without_running_it() {
        let queue = Arc::new(InMemoryJobQueue::new());
        let store = Arc::new(InMemorySubmissionStore::new());
        let runner = Arc::new(FakeRunner::new(vec![]));
        let job = sample_job(Language::Python);
        // Deliberately never inserted into the store.

        let worker = Worker::new(Language::Python, queue.clone(), store.clone(), runner.clone(), config());
        worker.process_job(job.clone()).await;

        assert_eq!(runner.call_count(), 0);
        assert!(store.get_submission(job.submission_id).await.is_err());
    }

    #[tokio::test]
    async fn a_job_for_the_wrong_language_is_marked_runtime_error_without_running_it() {
        let queue = Arc::new(InMemoryJobQueue::new());
        let store = Arc::new(InMemorySubmissionStore::new());
        let runner = Arc::new(FakeRunner::new(vec![]));
        let job = sample_job(Language::Cpp);
        let submission = Submission {
            id: job.submission_id,
            user_id: job.user_id,
            challenge_id: job.challenge_id,
            language: "cpp".to_string(),
            source_code: job.code.clone(),
            status: "QUEUED".to_string(),
            score: 0,
            total_time_ms: 0,
            submitted_at: Utc::now(),
            updated_at: Utc::now(),
        };
        store.insert_submission(&submission).await.unwrap();

        // Worker serves Python but was handed a C++ job (routing bug).
        let worker = Worker::new(Language::Python, queue.clone(), store.clone(), runner.clone(), config());
        worker.process_job(job.clone()).await;

        assert_eq!(runner.call_count(), 0);
        let updated = store.get_submission(job.submission_id).await.unwrap();
        assert_eq!(updated.status, "RUNTIME_ERROR");
    }
}
