//! The sandbox runner seam (C1): runs a single program under resource caps
//! and returns its stdout/stderr/exit status/elapsed time. Callers supply a
//! working directory already populated with the source file (or compiled
//! artifact) and, for interpreted languages, nothing else to stage.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use shared::Language;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::sandbox::{EnvRule, IsolateSandbox, ResourceLimits};

/// Additional wall-clock slack given to every sandbox invocation beyond the
/// caller's requested wall-time limit, per the sandbox runner contract.
pub const TIMEOUT_SLACK_MS: u64 = 1000;

/// Highest box id this process will allocate before wrapping around. Kept
/// small and offset by the process id so that several worker processes on
/// one host are unlikely to collide; isolate itself does not arbitrate box
/// ids across processes.
const MAX_BOXES: u32 = 256;

#[derive(Debug, Error)]
pub enum SandboxError {
    #[error("failed to spawn sandboxed process: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("failed to initialize sandbox: {0}")]
    Init(#[source] anyhow::Error),
    #[error("failed to parse isolate metadata file: {0}")]
    MetaParse(#[source] anyhow::Error),
    #[error("failed to write staged files: {0}")]
    Io(#[source] std::io::Error),
}

/// One invocation request against the sandbox runner.
#[derive(Debug, Clone)]
pub struct SandboxRequest {
    pub language: Language,
    pub program: String,
    pub args: Vec<String>,
    pub stdin: String,
    pub wall_time_ms: u64,
    pub memory_mb: u32,
    /// Directory already containing the source file or compiled artifact
    /// this invocation needs.
    pub work_dir: PathBuf,
}

/// Result of one sandboxed invocation.
#[derive(Debug, Clone)]
pub struct SandboxOutcome {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub elapsed_ms: u64,
    pub memory_kb: u32,
}

impl SandboxOutcome {
    fn timeout(wall_time_ms: u64) -> Self {
        SandboxOutcome {
            stdout: String::new(),
            stderr: "timeout".to_string(),
            exit_code: 124,
            elapsed_ms: wall_time_ms,
            memory_kb: 0,
        }
    }
}

#[async_trait]
pub trait SandboxRunner: Send + Sync {
    async fn run(&self, request: &SandboxRequest) -> Result<SandboxOutcome, SandboxError>;
}

/// Strips diagnostic lines the execution harness itself writes to stderr
/// (directory banners, pull-progress lines) so they cannot poison error
/// classification downstream in the executor.
pub fn filter_harness_noise(stderr: &str) -> String {
    const NOISE_PREFIXES: &[&str] = &[
        "Files in",
        "---Running command---",
        "total",
        "drwx",
        "Unable to find image",
        "latest:",
        "Pulling",
        "Digest:",
        "Status:",
    ];
    stderr
        .lines()
        .filter(|line| !NOISE_PREFIXES.iter().any(|prefix| line.starts_with(prefix)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Production backend: one ephemeral `isolate` box per invocation.
pub struct IsolateRunner {
    next_box_id: AtomicU32,
}

impl IsolateRunner {
    pub fn new() -> Self {
        let start = std::process::id() % MAX_BOXES;
        IsolateRunner {
            next_box_id: AtomicU32::new(start),
        }
    }

    fn allocate_box_id(&self) -> u32 {
        self.next_box_id.fetch_add(1, Ordering::SeqCst) % MAX_BOXES
    }
}

impl Default for IsolateRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SandboxRunner for IsolateRunner {
    async fn run(&self, request: &SandboxRequest) -> Result<SandboxOutcome, SandboxError> {
        let box_id = self.allocate_box_id();
        let wall_time_s = (request.wall_time_ms as f64) / 1000.0;
        let meta_path = std::env::temp_dir().join(format!("isolate-meta-{box_id}-{}.txt", uuid::Uuid::new_v4()));

        let limits = ResourceLimits::new()
            .with_time_limit(wall_time_s)
            .with_wall_time_limit(wall_time_s + (TIMEOUT_SLACK_MS as f64) / 1000.0)
            .with_memory_limit(request.memory_mb * 1024)
            .with_cg_memory_limit(request.memory_mb * 1024)
            .with_process_limit(1);

        let sandbox = IsolateSandbox::new(box_id)
            .with_meta_file(meta_path.clone())
            .with_stdin("input.txt")
            .with_env_rule(EnvRule::Inherit("PATH".to_string()));

        let box_path = sandbox.init(&limits).await.map_err(SandboxError::Init)?;

        stage_work_dir(&request.work_dir, &box_path).await?;
        tokio::fs::write(box_path.join("input.txt"), &request.stdin)
            .await
            .map_err(SandboxError::Io)?;

        let deadline = Duration::from_millis(request.wall_time_ms + TIMEOUT_SLACK_MS);
        let args = request.args.clone();
        let run_future = sandbox.run(&request.program, args.iter().map(|s| s.as_str()), &limits);

        let outcome = match tokio::time::timeout(deadline, run_future).await {
            Ok(Ok(result)) => {
                // `sandbox.run` already tolerates a malformed meta file by
                // falling back to empty fields; re-parse it here so a
                // genuinely corrupt or unreadable meta file surfaces as a
                // typed error instead of silently turning into exit_code=1.
                if let Err(err) = sandbox.parse_metadata(&meta_path).await {
                    let _ = sandbox.cleanup().await;
                    let _ = tokio::fs::remove_file(&meta_path).await;
                    return Err(SandboxError::MetaParse(err));
                }
                SandboxOutcome {
                    stdout: result.stdout,
                    stderr: filter_harness_noise(&result.stderr),
                    exit_code: result.exit_code.unwrap_or(if result.killed { 124 } else { 1 }),
                    elapsed_ms: (result.wall_time_used * 1000.0) as u64,
                    memory_kb: result.cg_memory_used.unwrap_or(result.memory_used),
                }
            }
            Ok(Err(err)) => {
                let _ = sandbox.cleanup().await;
                return Err(SandboxError::Init(err));
            }
            Err(_elapsed) => SandboxOutcome::timeout(request.wall_time_ms),
        };

        let _ = sandbox.cleanup().await;
        let _ = tokio::fs::remove_file(&meta_path).await;

        Ok(outcome)
    }
}

async fn stage_work_dir(work_dir: &Path, box_path: &Path) -> Result<(), SandboxError> {
    let mut entries = tokio::fs::read_dir(work_dir).await.map_err(SandboxError::Io)?;
    while let Some(entry) = entries.next_entry().await.map_err(SandboxError::Io)? {
        if entry.file_type().await.map_err(SandboxError::Io)?.is_file() {
            let dest = box_path.join(entry.file_name());
            tokio::fs::copy(entry.path(), &dest).await.map_err(SandboxError::Io)?;
        }
    }
    Ok(())
}

/// Development-only backend with no resource isolation. Still enforces the
/// wall-clock timeout and stderr filtering so executor logic behaves
/// identically; used when no `isolate` binary is configured.
pub struct NativeRunner;

#[async_trait]
impl SandboxRunner for NativeRunner {
    async fn run(&self, request: &SandboxRequest) -> Result<SandboxOutcome, SandboxError> {
        tracing::warn!(
            language = %request.language,
            "running submission with the native sandbox backend: no resource isolation is applied"
        );

        let started = Instant::now();
        let mut child = Command::new(&request.program)
            .args(&request.args)
            .current_dir(&request.work_dir)
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped())
            .spawn()
            .map_err(SandboxError::Spawn)?;

        if let Some(mut stdin) = child.stdin.take() {
            let _ = stdin.write_all(request.stdin.as_bytes()).await;
        }

        let deadline = Duration::from_millis(request.wall_time_ms + TIMEOUT_SLACK_MS);
        match tokio::time::timeout(deadline, child.wait_with_output()).await {
            Ok(Ok(output)) => Ok(SandboxOutcome {
                stdout: String::from_utf8_lossy(&output.stdout).to_string(),
                stderr: filter_harness_noise(&String::from_utf8_lossy(&output.stderr)),
                exit_code: output.status.code().unwrap_or(1),
                elapsed_ms: started.elapsed().as_millis() as u64,
                memory_kb: 0,
            }),
            Ok(Err(err)) => Err(SandboxError::Spawn(err)),
            Err(_elapsed) => Ok(SandboxOutcome::timeout(request.wall_time_ms)),
        }
    }
}

/// Scripted backend used by executor/worker unit tests. Records every
/// request it receives so tests can assert on invocation count (e.g. zero
/// sandbox invocations for a deny-listed submission).
pub struct FakeRunner {
    script: Mutex<Vec<SandboxOutcome>>,
    calls: Mutex<Vec<SandboxRequest>>,
}

impl FakeRunner {
    pub fn new(script: Vec<SandboxOutcome>) -> Self {
        FakeRunner {
            script: Mutex::new(script),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl SandboxRunner for FakeRunner {
    async fn run(&self, request: &SandboxRequest) -> Result<SandboxOutcome, SandboxError> {
        self.calls.lock().unwrap().push(request.clone());
        let mut script = self.script.lock().unwrap();
        if script.is_empty() {
            Ok(SandboxOutcome {
                stdout: String::new(),
                stderr: String::new(),
                exit_code: 0,
                elapsed_ms: 0,
                memory_kb: 0,
            })
        } else {
            Ok(script.remove(0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_strips_harness_banner_lines() {
        let stderr = "Files in /workspace:\n---Running command---\ntraceback: boom\n";
        assert_eq!(filter_harness_noise(stderr), "traceback: boom");
    }

    #[test]
    fn filter_is_a_no_op_on_clean_stderr() {
        assert_eq!(filter_harness_noise("Traceback (most recent call last):\n"), "Traceback (most recent call last):");
    }

    #[tokio::test]
    async fn fake_runner_records_every_call() {
        let fake = FakeRunner::new(vec![]);
        let request = SandboxRequest {
            language: Language::Python,
            program: "python3".to_string(),
            args: vec!["solution.py".to_string()],
            stdin: String::new(),
            wall_time_ms: 1000,
            memory_mb: 256,
            work_dir: PathBuf::from("/tmp"),
        };
        fake.run(&request).await.unwrap();
        fake.run(&request).await.unwrap();
        assert_eq!(fake.call_count(), 2);
    }

    #[tokio::test]
    async fn native_runner_reports_timeout_as_exit_124() {
        let runner = NativeRunner;
        let request = SandboxRequest {
            language: Language::Python,
            program: "sleep".to_string(),
            args: vec!["2".to_string()],
            stdin: String::new(),
            wall_time_ms: 50,
            memory_mb: 64,
            work_dir: std::env::temp_dir(),
        };
        let outcome = runner.run(&request).await.unwrap();
        assert_eq!(outcome.exit_code, 124);
        assert_eq!(outcome.stderr, "timeout");
    }

    #[tokio::test]
    async fn native_runner_captures_stdout_of_a_quick_command() {
        let runner = NativeRunner;
        let request = SandboxRequest {
            language: Language::Python,
            program: "echo".to_string(),
            args: vec!["hello".to_string()],
            stdin: String::new(),
            wall_time_ms: 2000,
            memory_mb: 64,
            work_dir: std::env::temp_dir(),
        };
        let outcome = runner.run(&request).await.unwrap();
        assert_eq!(outcome.exit_code, 0);
        assert_eq!(outcome.stdout.trim(), "hello");
    }
}
