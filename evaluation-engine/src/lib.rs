pub mod config;
pub mod error;
pub mod executor;
pub mod job_queue;
pub mod legacy_queue;
pub mod manager;
pub mod store;
pub mod submission;
pub mod worker;

pub use config::Config;
pub use error::{QueueError, StoreError};
pub use job_queue::{InMemoryJobQueue, JobQueue, RedisJobQueue};
pub use manager::WorkerManager;
pub use store::{InMemorySubmissionStore, PostgresSubmissionStore, SubmissionStore};
pub use worker::Worker;
