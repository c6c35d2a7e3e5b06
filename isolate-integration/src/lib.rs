pub mod commands;
pub mod runner;
pub mod sandbox;

pub use commands::{commands_for, find_forbidden_token, LanguageCommands, COMPILE_TIME_BUDGET_MS};
pub use runner::{FakeRunner, IsolateRunner, NativeRunner, SandboxError, SandboxOutcome, SandboxRequest, SandboxRunner};
pub use sandbox::{DirectoryRule, EnvRule, ExecutionResult, IsolateSandbox, ResourceLimits, SpecialOptions};
