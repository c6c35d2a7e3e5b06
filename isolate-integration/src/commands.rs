//! Per-language filename, image, compile-command, and run-command table.
//!
//! One entry per supported language; adding a language is a table edit here,
//! not a change scattered across the executor.

use shared::Language;

/// Static description of how to build, invoke, and sandbox one language.
pub struct LanguageCommands {
    pub image: &'static str,
    pub source_filename: &'static str,
    pub compile: Option<(&'static str, &'static [&'static str])>,
    pub run: (&'static str, &'static [&'static str]),
    pub deny_list: &'static [&'static str],
}

pub fn commands_for(language: Language) -> LanguageCommands {
    match language {
        Language::Python => LanguageCommands {
            image: "python:3.11-slim",
            source_filename: "solution.py",
            compile: None,
            run: ("python3", &["solution.py"]),
            deny_list: &["os", "sys", "subprocess", "socket", "shutil"],
        },
        Language::Java => LanguageCommands {
            image: "eclipse-temurin:17-jdk",
            source_filename: "Solution.java",
            compile: Some(("javac", &["Solution.java"])),
            run: ("java", &["Solution"]),
            deny_list: &[],
        },
        Language::Nodejs => LanguageCommands {
            image: "node:18-slim",
            source_filename: "solution.js",
            compile: None,
            run: ("node", &["solution.js"]),
            deny_list: &[],
        },
        Language::Cpp => LanguageCommands {
            image: "gcc:latest",
            source_filename: "solution.cpp",
            compile: Some(("g++", &["-o", "solution", "-std=c++17", "-O2", "solution.cpp"])),
            run: ("./solution", &[]),
            deny_list: &["<cstdlib>", "<filesystem>", "<fstream>", "<unistd.h>"],
        },
    }
}

/// Fixed wall-time budget for the compile step, independent of the
/// challenge's per-case time limit.
pub const COMPILE_TIME_BUDGET_MS: u64 = 15_000;

/// Checks a submission's source against its language's deny-list. Returns
/// the first forbidden token found, if any.
pub fn find_forbidden_token(language: Language, source: &str) -> Option<&'static str> {
    let commands = commands_for(language);
    match language {
        Language::Python => commands.deny_list.iter().find(|name| {
            source.contains(&format!("import {name}")) || source.contains(&format!("from {name}"))
        }),
        _ => commands.deny_list.iter().find(|token| source.contains(*token)),
    }
    .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn python_deny_list_matches_plain_import() {
        assert_eq!(find_forbidden_token(Language::Python, "import os\nprint(1)"), Some("os"));
    }

    #[test]
    fn python_deny_list_matches_from_import() {
        assert_eq!(
            find_forbidden_token(Language::Python, "from subprocess import run"),
            Some("subprocess")
        );
    }

    #[test]
    fn python_deny_list_ignores_clean_source() {
        assert_eq!(find_forbidden_token(Language::Python, "print(int(input())*2)"), None);
    }

    #[test]
    fn cpp_deny_list_matches_forbidden_include() {
        assert_eq!(
            find_forbidden_token(Language::Cpp, "#include <unistd.h>\nint main(){}"),
            Some("<unistd.h>")
        );
    }

    #[test]
    fn cpp_deny_list_ignores_clean_source() {
        assert_eq!(
            find_forbidden_token(Language::Cpp, "#include <iostream>\nint main(){}"),
            None
        );
    }

    #[test]
    fn java_and_nodejs_have_no_deny_list_entries_yet() {
        assert!(commands_for(Language::Java).deny_list.is_empty());
        assert!(commands_for(Language::Nodejs).deny_list.is_empty());
    }
}
