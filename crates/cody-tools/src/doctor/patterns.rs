//! Known toolchain issues

use super::category::{FailureCategory, Operation};

/// A substring that identifies a known failure mode
#[derive(Debug, Clone)]
pub struct KnownIssue {
    /// Operation the issue applies to (`None` = any operation)
    pub operation: Option<Operation>,
    /// Lowercase substring to look for in the diagnostic text
    pub pattern: &'static str,
    /// Category assigned on match
    pub category: FailureCategory,
}

const fn issue(
    operation: Option<Operation>,
    pattern: &'static str,
    category: FailureCategory,
) -> KnownIssue {
    KnownIssue {
        operation,
        pattern,
        category,
    }
}

/// Initialize the known-issue table.
///
/// Order matters: operation-specific entries are listed before the
/// operation-agnostic ones and the first match wins.
pub fn init_known_issues() -> Vec<KnownIssue> {
    use FailureCategory::*;
    use Operation::*;

    vec![
        // git clone
        issue(Some(Clone), "fatal: not a git repository", NotInitialized),
        issue(Some(Clone), "could not resolve host", NetworkIssue),
        // pull request checkout
        issue(Some(SwitchPr), "invalid refspec", InvalidReference),
        issue(Some(SwitchPr), "couldn't find remote ref", InvalidReference),
        issue(Some(SwitchPr), "pathspec", UncommittedChanges),
        issue(Some(SwitchPr), "would be overwritten by checkout", UncommittedChanges),
        // twister
        issue(Some(Test), "no tests found", NoTestsFound),
        issue(Some(Test), "build error", BuildError),
        // west build
        issue(Some(Compile), "invalid board", InvalidReference),
        issue(Some(Compile), "build error", BuildError),
        issue(Some(Compile), "ninja: build stopped", BuildError),
        // any operation
        issue(None, "not a west workspace", NotInitialized),
        issue(None, "could not resolve host", NetworkIssue),
        issue(None, "unable to access", NetworkIssue),
        issue(None, "network is unreachable", NetworkIssue),
        issue(None, "command not found", MissingPrerequisite),
    ]
}
