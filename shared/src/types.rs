use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language a submission is written in. The queue is partitioned by this value
/// (one FIFO queue per variant) and it selects the sandbox image/compile/run
/// commands an executor uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    Java,
    Nodejs,
    Cpp,
}

impl Language {
    pub const ALL: [Language; 4] = [Language::Python, Language::Java, Language::Nodejs, Language::Cpp];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::Java => "java",
            Language::Nodejs => "nodejs",
            Language::Cpp => "cpp",
        }
    }

    pub fn is_compiled(&self) -> bool {
        matches!(self, Language::Java | Language::Cpp)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "python" => Ok(Language::Python),
            "java" => Ok(Language::Java),
            "nodejs" | "node" | "javascript" => Ok(Language::Nodejs),
            "cpp" | "c++" => Ok(Language::Cpp),
            other => Err(UnknownLanguage(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown language: {0}")]
pub struct UnknownLanguage(pub String);

/// The closed set of statuses a Submission may hold. QUEUED and RUNNING are
/// transient; the remaining five are terminal. Open Question 2 (see design
/// notes) keeps this domain at exactly these five terminal variants — memory
/// overruns are folded into RuntimeError rather than given their own status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionStatus {
    Queued,
    Running,
    Accepted,
    WrongAnswer,
    TimeLimitExceeded,
    RuntimeError,
    CompilationError,
}

impl SubmissionStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SubmissionStatus::Queued | SubmissionStatus::Running)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Queued => "QUEUED",
            SubmissionStatus::Running => "RUNNING",
            SubmissionStatus::Accepted => "ACCEPTED",
            SubmissionStatus::WrongAnswer => "WRONG_ANSWER",
            SubmissionStatus::TimeLimitExceeded => "TIME_LIMIT_EXCEEDED",
            SubmissionStatus::RuntimeError => "RUNTIME_ERROR",
            SubmissionStatus::CompilationError => "COMPILATION_ERROR",
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubmissionStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "QUEUED" => Ok(SubmissionStatus::Queued),
            "RUNNING" => Ok(SubmissionStatus::Running),
            "ACCEPTED" => Ok(SubmissionStatus::Accepted),
            "WRONG_ANSWER" => Ok(SubmissionStatus::WrongAnswer),
            "TIME_LIMIT_EXCEEDED" => Ok(SubmissionStatus::TimeLimitExceeded),
            "RUNTIME_ERROR" => Ok(SubmissionStatus::RuntimeError),
            "COMPILATION_ERROR" => Ok(SubmissionStatus::CompilationError),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown submission status: {0}")]
pub struct UnknownStatus(pub String);

/// Per-case status. Shares the terminal domain with SubmissionStatus, minus
/// QUEUED/RUNNING which never apply to a single case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CaseStatus {
    Accepted,
    WrongAnswer,
    TimeLimitExceeded,
    RuntimeError,
    CompilationError,
}

impl CaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseStatus::Accepted => "ACCEPTED",
            CaseStatus::WrongAnswer => "WRONG_ANSWER",
            CaseStatus::TimeLimitExceeded => "TIME_LIMIT_EXCEEDED",
            CaseStatus::RuntimeError => "RUNTIME_ERROR",
            CaseStatus::CompilationError => "COMPILATION_ERROR",
        }
    }
}

impl From<CaseStatus> for SubmissionStatus {
    fn from(c: CaseStatus) -> Self {
        match c {
            CaseStatus::Accepted => SubmissionStatus::Accepted,
            CaseStatus::WrongAnswer => SubmissionStatus::WrongAnswer,
            CaseStatus::TimeLimitExceeded => SubmissionStatus::TimeLimitExceeded,
            CaseStatus::RuntimeError => SubmissionStatus::RuntimeError,
            CaseStatus::CompilationError => SubmissionStatus::CompilationError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_round_trips_through_its_string_form() {
        for lang in Language::ALL {
            assert_eq!(lang.as_str().parse::<Language>().unwrap(), lang);
        }
    }

    #[test]
    fn language_accepts_common_aliases() {
        assert_eq!("node".parse::<Language>().unwrap(), Language::Nodejs);
        assert_eq!("c++".parse::<Language>().unwrap(), Language::Cpp);
    }

    #[test]
    fn status_round_trips_through_its_canonical_string() {
        let all = [
            SubmissionStatus::Queued,
            SubmissionStatus::Running,
            SubmissionStatus::Accepted,
            SubmissionStatus::WrongAnswer,
            SubmissionStatus::TimeLimitExceeded,
            SubmissionStatus::RuntimeError,
            SubmissionStatus::CompilationError,
        ];
        for status in all {
            assert_eq!(status.as_str().parse::<SubmissionStatus>().unwrap(), status);
        }
    }

    #[test]
    fn only_queued_and_running_are_non_terminal() {
        assert!(!SubmissionStatus::Queued.is_terminal());
        assert!(!SubmissionStatus::Running.is_terminal());
        assert!(SubmissionStatus::Accepted.is_terminal());
        assert!(SubmissionStatus::CompilationError.is_terminal());
    }
}
