use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use evaluation_engine::manager::WorkerManager;
use evaluation_engine::worker::install_shutdown_signal;
use shared::Language;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Spawns and supervises one `judger-worker` child process per language,
/// mirroring the original `worker_manager.py --languages ...` shape.
#[derive(Parser)]
struct Args {
    /// Languages to run workers for. Defaults to all four supported
    /// languages; pass "all" explicitly for the same effect.
    #[arg(long, value_delimiter = ' ', num_args = 0..)]
    languages: Vec<String>,

    /// Path to the judger-worker binary. Defaults to the sibling binary
    /// next to this manager process.
    #[arg(long)]
    worker_binary: Option<PathBuf>,
}

fn parse_languages(raw: &[String]) -> Result<Vec<Language>> {
    if raw.is_empty() || raw.iter().any(|l| l.eq_ignore_ascii_case("all")) {
        return Ok(Language::ALL.to_vec());
    }
    raw.iter().map(|l| l.parse().map_err(anyhow::Error::from)).collect()
}

fn default_worker_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap_or_else(|_| PathBuf::from("judger-manager"));
    path.set_file_name(if cfg!(windows) { "judger-worker.exe" } else { "judger-worker" });
    path
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "judger_manager=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let languages = parse_languages(&args.languages)?;
    let worker_binary = args.worker_binary.unwrap_or_else(default_worker_binary);

    tracing::info!(?languages, worker_binary = %worker_binary.display(), "starting judger-manager");

    let shutdown = install_shutdown_signal();
    let mut manager = WorkerManager::new(languages, worker_binary);
    manager.run(shutdown).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_languages_defaults_to_all_four() {
        let langs = parse_languages(&[]).unwrap();
        assert_eq!(langs.len(), 4);
    }

    #[test]
    fn literal_all_expands_to_all_four() {
        let langs = parse_languages(&["all".to_string()]).unwrap();
        assert_eq!(langs.len(), 4);
    }

    #[test]
    fn explicit_subset_is_honored() {
        let langs = parse_languages(&["python".to_string(), "cpp".to_string()]).unwrap();
        assert_eq!(langs, vec![Language::Python, Language::Cpp]);
    }

    #[test]
    fn unknown_language_is_rejected() {
        assert!(parse_languages(&["cobol".to_string()]).is_err());
    }
}
