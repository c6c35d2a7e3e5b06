//! Pre-migration model set used by `core-kernel`'s CRUD/auth/contest surface.
//!
//! `core-kernel` (HTTP intake, identity, contests, problem/course CRUD) is the
//! out-of-scope external-collaborator layer named in spec.md §1; it predates
//! the Challenge/Submission/Job redesign in [`crate::models`] and still
//! expects the platform's original row and DTO shapes. Kept verbatim here
//! (module-scoped, not re-exported at the crate root) so it keeps compiling
//! against the exact types it always used, alongside the new spec-canonical
//! `models`/`types` the evaluation pipeline uses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub hashed_password: String,
    pub roles: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Problem {
    pub id: Uuid,
    pub title: String,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub statement: String,
    pub difficulty: String,
    pub time_limit_ms: i32,
    pub memory_limit_kb: i32,
    pub question_type_id: Uuid,
    pub metadata: serde_json::Value,
    pub points: i32,
    pub contest_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct QuestionTypeModel {
    pub id: Uuid,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Language {
    pub id: Uuid,
    pub name: String,
    pub version: String,
    pub compile_command: Option<String>,
    pub run_command: String,
    pub file_extension: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Submission {
    pub id: Uuid,
    pub user_id: Uuid,
    pub problem_id: Uuid,
    pub language_id: Uuid,
    pub source_code: String,
    pub submitted_at: DateTime<Utc>,
    pub status: String,
    pub verdict: Option<String>,
    pub execution_time_ms: Option<i32>,
    pub execution_memory_kb: Option<i32>,
    pub contest_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TestCase {
    pub id: Uuid,
    pub problem_id: Uuid,
    pub input_data: String,
    pub output_data: String,
    pub is_sample: bool,
    pub order_index: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SubmissionResult {
    pub id: Uuid,
    pub submission_id: Uuid,
    pub test_case_id: Uuid,
    pub verdict: String,
    pub execution_time_ms: Option<i32>,
    pub execution_memory_kb: Option<i32>,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Contest {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration: i32,
    pub created_by: Uuid,
    pub participant_count: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ContestAdmin {
    pub id: Uuid,
    pub contest_id: Uuid,
    pub user_id: Uuid,
    pub assigned_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AdminRegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub admin_type: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: UserProfile,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub roles: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SubmissionRequest {
    pub problem_id: Uuid,
    pub language_id: Uuid,
    pub source_code: String,
}

#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub submission_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct CreateContestRequest {
    pub title: String,
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub duration: i32,
}

#[derive(Debug, Deserialize)]
pub struct CreateProblemRequest {
    pub title: String,
    pub statement: String,
    pub difficulty: String,
    pub time_limit_ms: i32,
    pub memory_limit_kb: i32,
    pub question_type_id: Uuid,
    pub metadata: serde_json::Value,
    pub points: i32,
    pub contest_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct AssignContestAdminRequest {
    pub contest_id: Uuid,
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct AssignContestAdminResponse {
    pub contest_admin_id: Uuid,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ContestAdminListResponse {
    pub contest_admins: Vec<ContestAdminWithUser>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ContestAdminWithUser {
    pub id: Uuid,
    pub contest_id: Uuid,
    pub user_id: Uuid,
    pub assigned_at: DateTime<Utc>,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum JudgeStatus {
    Queued,
    Compiling,
    Running,
    Finished,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Verdict {
    Accepted,
    WrongAnswer,
    TimeLimitExceeded,
    MemoryLimitExceeded,
    RuntimeError,
    CompilationError,
    PresentationError,
    SystemError,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum QuestionType {
    IoiStandard,
    OutputOnly,
    Interactive,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JudgingJob {
    pub submission_id: Uuid,
    pub user_id: Uuid,
    pub problem_id: Uuid,
    pub language_id: Uuid,
    pub source_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCaseResult {
    pub test_case_id: Uuid,
    pub verdict: Verdict,
    pub execution_time_ms: Option<i32>,
    pub execution_memory_kb: Option<i32>,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum WebSocketMessage {
    #[serde(rename = "status_update")]
    StatusUpdate { status: JudgeStatus },
    #[serde(rename = "test_case_finished")]
    TestCaseFinished {
        test_case: i32,
        verdict: Verdict,
    },
    #[serde(rename = "final_result")]
    FinalResult {
        verdict: Verdict,
        failed_case: Option<i32>,
        execution_time_ms: Option<i32>,
        execution_memory_kb: Option<i32>,
    },
}

/// Route descriptor a plugin registers with the kernel's HTTP dispatcher.
///
/// Not part of the teacher's original `shared` crate — `plugin_router.rs`
/// and `kernel.rs` reference this type without it ever having been defined
/// in the source this workspace was built from. Reconstructed here from its
/// construction sites (`kernel.rs`) and field usage (`plugin_router.rs`) so
/// `core-kernel` keeps compiling; out of scope for this spec either way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginHttpRoute {
    pub id: Uuid,
    pub plugin_id: Uuid,
    pub path: String,
    pub method: String,
    pub handler_function: String,
    pub required_permission: Option<String>,
    pub rate_limit_override: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PluginPermission {
    pub id: Uuid,
    pub plugin_id: Uuid,
    pub capability: String,
    pub database_access_level: String,
    pub rate_limit_requests_per_second: Option<i32>,
    pub rate_limit_db_queries_per_minute: Option<i32>,
    pub rate_limit_events_per_minute: Option<i32>,
    pub granted_at: DateTime<Utc>,
    pub granted_by: Uuid,
}
