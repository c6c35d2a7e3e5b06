use std::sync::Arc;

use anyhow::{bail, Context, Result};
use evaluation_engine::config::{Config, SandboxBackend};
use evaluation_engine::job_queue::RedisJobQueue;
use evaluation_engine::store::PostgresSubmissionStore;
use evaluation_engine::worker::{install_shutdown_signal, Worker};
use isolate_integration::{IsolateRunner, NativeRunner, SandboxRunner};
use shared::Language;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "judger_worker=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let language: Language = config
        .worker_language
        .as_deref()
        .context("WORKER_LANGUAGE is required to start a judger-worker process")?
        .parse()
        .context("parsing WORKER_LANGUAGE")?;

    let queue = Arc::new(RedisJobQueue::new(&config.redis_url(), config.status_ttl_seconds)?);
    let store = Arc::new(PostgresSubmissionStore::new(&config.database_url).await?);
    let runner: Arc<dyn SandboxRunner> = match config.sandbox_backend {
        SandboxBackend::Isolate => Arc::new(IsolateRunner::new()),
        SandboxBackend::Native => {
            tracing::warn!("SANDBOX_BACKEND=native: submissions run unsandboxed, development use only");
            Arc::new(NativeRunner)
        }
    };

    if config.sandbox_backend == SandboxBackend::Isolate && which_isolate(&config.isolate_bin).is_none() {
        bail!("ISOLATE_BIN '{}' not found on PATH; set SANDBOX_BACKEND=native for local development", config.isolate_bin);
    }

    let shutdown = install_shutdown_signal();
    let worker = Worker::new(language, queue, store, runner, Arc::new(config));
    worker.run(shutdown).await;
    Ok(())
}

fn which_isolate(bin: &str) -> Option<std::path::PathBuf> {
    std::env::var_os("PATH").and_then(|paths| {
        std::env::split_paths(&paths).map(|dir| dir.join(bin)).find(|candidate| candidate.is_file())
    })
}
