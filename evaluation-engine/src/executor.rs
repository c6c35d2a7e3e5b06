//! Language executor (C2): turns a [`Job`] into an [`AggregateResult`] by
//! driving a [`SandboxRunner`] through an optional compile step and a
//! per-case run loop.

use isolate_integration::{commands_for, find_forbidden_token, SandboxRequest, SandboxRunner, COMPILE_TIME_BUDGET_MS};
use shared::{AggregateResult, CaseStatus, Job, JobTestCase, Language, SubmissionStatus, TestCaseResult};
use std::path::{Path, PathBuf};

/// Outcome of the (optional) compile phase. The artifact, once produced, is
/// reused across every test case rather than recompiled per case.
#[derive(Debug, Clone)]
pub enum CompileOutcome {
    /// Nothing to compile (interpreted language), or compilation succeeded.
    /// `artifact` is the working directory the run command should execute in.
    Success { artifact: PathBuf },
    Failed { message: String },
}

/// Strips the synthetic noise a shell or VM sometimes appends and
/// normalizes line endings before two outputs are compared for equality.
pub fn normalize_output(raw: &str) -> String {
    let unified = raw.replace("\r\n", "\n").replace('\r', "\n");
    let trimmed_lines: Vec<&str> = unified.lines().collect();
    let last_non_empty = trimmed_lines.iter().rposition(|line| !line.trim().is_empty());
    match last_non_empty {
        Some(idx) => trimmed_lines[..=idx].join("\n").trim().to_string(),
        None => String::new(),
    }
}

/// Retained only for per-case run-phase classification, not the compile
/// step, which now reports success/failure structurally. Matching on
/// toolchain names in stderr is fragile; a program that legitimately prints
/// the string "error:" to stderr would be misclassified.
fn looks_like_compiler_failure(stderr: &str) -> bool {
    ["g++", "javac", "error:"].iter().any(|needle| stderr.contains(needle))
}

async fn write_source(work_dir: &Path, filename: &str, code: &str) -> std::io::Result<()> {
    tokio::fs::create_dir_all(work_dir).await?;
    tokio::fs::write(work_dir.join(filename), code).await
}

/// Runs the compile command (if any) for `language` against the source
/// already written into `work_dir`.
pub async fn compile(
    runner: &dyn SandboxRunner,
    language: Language,
    work_dir: &Path,
    memory_mb: u32,
) -> anyhow::Result<CompileOutcome> {
    let commands = commands_for(language);
    let Some((program, args)) = commands.compile else {
        return Ok(CompileOutcome::Success { artifact: work_dir.to_path_buf() });
    };

    let request = SandboxRequest {
        language,
        program: program.to_string(),
        args: args.iter().map(|a| a.to_string()).collect(),
        stdin: String::new(),
        wall_time_ms: COMPILE_TIME_BUDGET_MS,
        memory_mb,
        work_dir: work_dir.to_path_buf(),
    };
    let outcome = runner.run(&request).await?;
    if outcome.exit_code == 0 {
        Ok(CompileOutcome::Success { artifact: work_dir.to_path_buf() })
    } else {
        let mut message = outcome.stderr;
        if message.trim().is_empty() {
            message = outcome.stdout;
        }
        message.truncate(4000);
        Ok(CompileOutcome::Failed { message })
    }
}

fn classify_case(
    outcome: &isolate_integration::SandboxOutcome,
    expected: &str,
    time_limit_ms: u64,
) -> (CaseStatus, Option<String>) {
    if outcome.exit_code == 124 || outcome.elapsed_ms > time_limit_ms {
        return (CaseStatus::TimeLimitExceeded, Some("time limit exceeded".to_string()));
    }
    if looks_like_compiler_failure(&outcome.stderr) {
        return (CaseStatus::CompilationError, Some(outcome.stderr.clone()));
    }
    if outcome.exit_code != 0 {
        return (CaseStatus::RuntimeError, Some(outcome.stderr.clone()));
    }
    if normalize_output(&outcome.stdout) == normalize_output(expected) {
        (CaseStatus::Accepted, None)
    } else {
        (CaseStatus::WrongAnswer, None)
    }
}

fn aggregate_status(cases: &[TestCaseResult]) -> SubmissionStatus {
    if cases.iter().any(|c| c.status == CaseStatus::CompilationError) {
        return SubmissionStatus::CompilationError;
    }
    if cases.iter().any(|c| c.status == CaseStatus::RuntimeError) {
        return SubmissionStatus::RuntimeError;
    }
    if cases.iter().any(|c| c.status == CaseStatus::TimeLimitExceeded) {
        return SubmissionStatus::TimeLimitExceeded;
    }
    if !cases.is_empty() && cases.iter().all(|c| c.status == CaseStatus::Accepted) {
        return SubmissionStatus::Accepted;
    }
    SubmissionStatus::WrongAnswer
}

fn score_for(cases: &[TestCaseResult]) -> i32 {
    if cases.is_empty() {
        return 0;
    }
    let accepted = cases.iter().filter(|c| c.status == CaseStatus::Accepted).count();
    ((100.0 * accepted as f64 / cases.len() as f64).round()) as i32
}

fn sorted_cases(job: &Job) -> Vec<JobTestCase> {
    let mut cases = job.test_cases.clone();
    cases.sort_by_key(|c| c.order_index);
    cases
}

/// Defense-in-depth byte cap, independent of and in addition to the
/// use-case layer's character cap in `submission.rs`. A hand-crafted or
/// re-enqueued Job could in principle bypass `submit()`, so the worker
/// boundary enforces its own limit rather than trusting the queue payload.
pub const MAX_SOURCE_BYTES: usize = 1_000_000;

/// Evaluates a full job: deny-list check, optional compile, per-case run,
/// aggregation. Never returns `Err` for a judged-but-bad submission — a
/// rejected/failed program still produces an `AggregateResult`; `Err` is
/// reserved for infrastructure failure (sandbox spawn failure, io error).
pub async fn evaluate(
    job: &Job,
    runner: &dyn SandboxRunner,
    work_dir: &Path,
) -> anyhow::Result<AggregateResult> {
    if job.code.len() > MAX_SOURCE_BYTES {
        let case = TestCaseResult {
            case_id: uuid::Uuid::nil(),
            status: CaseStatus::CompilationError,
            time_ms: 0,
            memory_mb: 0,
            output: String::new(),
            expected_output: String::new(),
            error_message: Some(format!("source exceeds {MAX_SOURCE_BYTES} bytes")),
        };
        return Ok(AggregateResult {
            submission_id: job.submission_id,
            status: SubmissionStatus::CompilationError,
            score: 0,
            total_time_ms: 0,
            language: job.language,
            error_message: Some(format!("source exceeds {MAX_SOURCE_BYTES} bytes")),
            cases: vec![case],
        });
    }

    if let Some(token) = find_forbidden_token(job.language, &job.code) {
        let case = TestCaseResult {
            case_id: uuid::Uuid::nil(),
            status: CaseStatus::CompilationError,
            time_ms: 0,
            memory_mb: 0,
            output: String::new(),
            expected_output: String::new(),
            error_message: Some(format!("use of forbidden module or header: {token}")),
        };
        return Ok(AggregateResult {
            submission_id: job.submission_id,
            status: SubmissionStatus::CompilationError,
            score: 0,
            total_time_ms: 0,
            language: job.language,
            error_message: Some(format!("use of forbidden module or header: {token}")),
            cases: vec![case],
        });
    }

    let commands = commands_for(job.language);
    write_source(work_dir, commands.source_filename, &job.code).await?;

    let artifact = if job.language.is_compiled() {
        match compile(runner, job.language, work_dir, job.memory_limit_mb as u32).await? {
            CompileOutcome::Success { artifact } => artifact,
            CompileOutcome::Failed { message } => {
                let case = TestCaseResult {
                    case_id: uuid::Uuid::nil(),
                    status: CaseStatus::CompilationError,
                    time_ms: 0,
                    memory_mb: 0,
                    output: String::new(),
                    expected_output: String::new(),
                    error_message: Some(message.clone()),
                };
                return Ok(AggregateResult {
                    submission_id: job.submission_id,
                    status: SubmissionStatus::CompilationError,
                    score: 0,
                    total_time_ms: 0,
                    language: job.language,
                    error_message: Some(message),
                    cases: vec![case],
                });
            }
        }
    } else {
        work_dir.to_path_buf()
    };

    let (program, args) = commands.run;
    let mut cases = Vec::with_capacity(job.test_cases.len());
    let mut total_time_ms: i32 = 0;

    for case in sorted_cases(job) {
        let request = SandboxRequest {
            language: job.language,
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            stdin: case.input.clone().unwrap_or_default(),
            wall_time_ms: job.time_limit_ms as u64,
            memory_mb: job.memory_limit_mb as u32,
            work_dir: artifact.clone(),
        };
        let outcome = runner.run(&request).await?;
        let (status, error_message) = classify_case(&outcome, &case.expected_output, job.time_limit_ms as u64);
        total_time_ms += outcome.elapsed_ms as i32;
        cases.push(TestCaseResult {
            case_id: case.id,
            status,
            time_ms: outcome.elapsed_ms as i32,
            memory_mb: (outcome.memory_kb / 1024) as i32,
            output: outcome.stdout,
            expected_output: case.expected_output,
            error_message,
        });
    }

    let status = aggregate_status(&cases);
    let score = score_for(&cases);
    Ok(AggregateResult {
        submission_id: job.submission_id,
        status,
        score,
        total_time_ms,
        language: job.language,
        error_message: None,
        cases,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use isolate_integration::SandboxOutcome;

    #[test]
    fn normalize_trims_trailing_blank_lines() {
        assert_eq!(normalize_output("10\n\n\n"), "10");
    }

    #[test]
    fn normalize_unifies_crlf_to_lf() {
        assert_eq!(normalize_output("a\r\nb\r\n"), "a\nb");
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = normalize_output("10\n\n\n");
        let twice = normalize_output(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_stdout_can_be_accepted_when_expected_is_empty() {
        let outcome = SandboxOutcome { stdout: String::new(), stderr: String::new(), exit_code: 0, elapsed_ms: 5, memory_kb: 256 };
        let (status, _) = classify_case(&outcome, "", 1000);
        assert_eq!(status, CaseStatus::Accepted);
    }

    #[test]
    fn timeout_exit_code_is_classified_as_time_limit_exceeded_not_runtime_error() {
        let outcome = SandboxOutcome { stdout: String::new(), stderr: "timeout".to_string(), exit_code: 124, elapsed_ms: 2000, memory_kb: 256 };
        let (status, _) = classify_case(&outcome, "42", 1000);
        assert_eq!(status, CaseStatus::TimeLimitExceeded);
    }

    #[test]
    fn elapsed_time_past_the_limit_is_time_limit_exceeded_even_with_a_clean_exit() {
        // The sandbox's own --wall-time carries 1000ms of slack over the
        // job's time_limit_ms, so a program sleeping time_limit+500ms exits
        // 0 well inside that window and must still be reclassified here.
        let outcome = SandboxOutcome { stdout: "42".to_string(), stderr: String::new(), exit_code: 0, elapsed_ms: 1500, memory_kb: 256 };
        let (status, _) = classify_case(&outcome, "42", 1000);
        assert_eq!(status, CaseStatus::TimeLimitExceeded);
    }

    #[test]
    fn nonzero_exit_without_compiler_markers_is_runtime_error() {
        let outcome = SandboxOutcome { stdout: String::new(), stderr: "segmentation fault".to_string(), exit_code: 139, elapsed_ms: 10, memory_kb: 256 };
        let (status, _) = classify_case(&outcome, "42", 1000);
        assert_eq!(status, CaseStatus::RuntimeError);
    }

    #[test]
    fn aggregate_precedence_favors_compilation_error_over_everything_else() {
        let cases = vec![
            TestCaseResult { case_id: uuid::Uuid::nil(), status: CaseStatus::Accepted, time_ms: 1, memory_mb: 1, output: String::new(), expected_output: String::new(), error_message: None },
            TestCaseResult { case_id: uuid::Uuid::nil(), status: CaseStatus::CompilationError, time_ms: 0, memory_mb: 0, output: String::new(), expected_output: String::new(), error_message: None },
        ];
        assert_eq!(aggregate_status(&cases), SubmissionStatus::CompilationError);
    }

    #[test]
    fn aggregate_precedence_favors_runtime_error_over_time_limit_exceeded() {
        let cases = vec![
            TestCaseResult { case_id: uuid::Uuid::nil(), status: CaseStatus::TimeLimitExceeded, time_ms: 1, memory_mb: 1, output: String::new(), expected_output: String::new(), error_message: None },
            TestCaseResult { case_id: uuid::Uuid::nil(), status: CaseStatus::RuntimeError, time_ms: 0, memory_mb: 0, output: String::new(), expected_output: String::new(), error_message: None },
        ];
        assert_eq!(aggregate_status(&cases), SubmissionStatus::RuntimeError);
    }

    #[test]
    fn all_accepted_cases_yield_accepted_status_and_full_score() {
        let cases = vec![
            TestCaseResult { case_id: uuid::Uuid::nil(), status: CaseStatus::Accepted, time_ms: 1, memory_mb: 1, output: String::new(), expected_output: String::new(), error_message: None },
            TestCaseResult { case_id: uuid::Uuid::nil(), status: CaseStatus::Accepted, time_ms: 1, memory_mb: 1, output: String::new(), expected_output: String::new(), error_message: None },
        ];
        assert_eq!(aggregate_status(&cases), SubmissionStatus::Accepted);
        assert_eq!(score_for(&cases), 100);
    }

    #[test]
    fn partial_acceptance_rounds_to_nearest_percent() {
        let cases = vec![
            TestCaseResult { case_id: uuid::Uuid::nil(), status: CaseStatus::Accepted, time_ms: 1, memory_mb: 1, output: String::new(), expected_output: String::new(), error_message: None },
            TestCaseResult { case_id: uuid::Uuid::nil(), status: CaseStatus::WrongAnswer, time_ms: 1, memory_mb: 1, output: String::new(), expected_output: String::new(), error_message: None },
        ];
        assert_eq!(aggregate_status(&cases), SubmissionStatus::WrongAnswer);
        assert_eq!(score_for(&cases), 50);
    }

    #[test]
    fn zero_cases_score_zero_rather_than_dividing_by_zero() {
        assert_eq!(score_for(&[]), 0);
    }

    #[tokio::test]
    async fn oversized_source_is_rejected_before_any_sandbox_invocation() {
        use isolate_integration::FakeRunner;

        let runner = FakeRunner::new(vec![]);
        let job = Job {
            submission_id: uuid::Uuid::new_v4(),
            challenge_id: uuid::Uuid::new_v4(),
            user_id: uuid::Uuid::new_v4(),
            language: Language::Python,
            code: "a".repeat(MAX_SOURCE_BYTES + 1),
            test_cases: vec![],
            enqueued_at: chrono::Utc::now(),
            time_limit_ms: 1000,
            memory_limit_mb: 256,
        };
        let dir = tempfile::tempdir().unwrap();
        let result = evaluate(&job, &runner, dir.path()).await.unwrap();
        assert_eq!(result.status, SubmissionStatus::CompilationError);
        assert_eq!(runner.call_count(), 0);
    }
}
