//! Worker manager (C6): spawns one `judger-worker` OS process per language,
//! watches liveness, and restarts anything that dies on its own. Does not
//! restart a child this process deliberately stopped during shutdown.

use anyhow::{Context, Result};
use shared::Language;
use std::collections::HashMap;
use std::time::Duration;
use tokio::process::{Child, Command};

const LIVENESS_POLL: Duration = Duration::from_secs(5);

pub struct WorkerManager {
    languages: Vec<Language>,
    worker_binary: std::path::PathBuf,
    children: HashMap<Language, Child>,
    shutting_down: bool,
}

impl WorkerManager {
    pub fn new(languages: Vec<Language>, worker_binary: std::path::PathBuf) -> Self {
        WorkerManager { languages, worker_binary, children: HashMap::new(), shutting_down: false }
    }

    fn spawn_one(&self, language: Language) -> Result<Child> {
        Command::new(&self.worker_binary)
            .env("WORKER_LANGUAGE", language.as_str())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("spawning judger-worker for {language}"))
    }

    /// Spawns one child per configured language, then supervises them until
    /// `shutdown` fires. Each dead-but-not-stopped child is replaced in
    /// place; a graceful shutdown signals every child and waits for them to
    /// exit rather than killing them outright.
    pub async fn run(&mut self, mut shutdown: tokio::sync::watch::Receiver<bool>) -> Result<()> {
        for &language in &self.languages.clone() {
            let child = self.spawn_one(language)?;
            tracing::info!(%language, pid = child.id(), "spawned worker");
            self.children.insert(language, child);
        }

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
                _ = tokio::time::sleep(LIVENESS_POLL) => {
                    self.reap_and_restart_dead_children().await;
                }
            }
        }

        self.shutdown().await;
        Ok(())
    }

    async fn reap_and_restart_dead_children(&mut self) {
        let dead: Vec<Language> = self
            .languages
            .iter()
            .copied()
            .filter(|language| {
                self.children
                    .get_mut(language)
                    .map(|child| matches!(child.try_wait(), Ok(Some(_))))
                    .unwrap_or(true)
            })
            .collect();

        for language in dead {
            tracing::warn!(%language, "worker process died, restarting");
            match self.spawn_one(language) {
                Ok(child) => {
                    self.children.insert(language, child);
                }
                Err(err) => tracing::error!(%language, %err, "failed to respawn worker"),
            }
        }
    }

    async fn shutdown(&mut self) {
        self.shutting_down = true;
        tracing::info!("worker manager shutting down, signalling children");
        for (language, child) in self.children.iter_mut() {
            let _ = language;
            #[cfg(unix)]
            if let Some(pid) = child.id() {
                unsafe {
                    libc::kill(pid as libc::pid_t, libc::SIGTERM);
                }
            }
        }

        for (language, child) in self.children.iter_mut() {
            let grace = tokio::time::timeout(Duration::from_secs(10), child.wait()).await;
            if grace.is_err() {
                tracing::warn!(%language, "worker did not exit within grace period, killing");
                let _ = child.kill().await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manager_tracks_exactly_the_configured_languages() {
        let manager = WorkerManager::new(vec![Language::Python, Language::Cpp], "/bin/true".into());
        assert_eq!(manager.languages.len(), 2);
        assert!(manager.children.is_empty());
    }
}
