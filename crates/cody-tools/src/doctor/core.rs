//! Toolchain Doctor - core implementation

use super::category::{FailureCategory, Operation};
use super::patterns::{init_known_issues, KnownIssue};
use crate::error::Error;
use tracing::{debug, instrument};

/// Result of classifying one failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnosis {
    /// Operation the failure came from
    pub operation: Operation,
    /// Assigned category
    pub category: FailureCategory,
    /// Known-issue pattern that matched, if any
    pub matched: Option<&'static str>,
}

/// Classifies captured toolchain diagnostics into [`FailureCategory`] values
#[derive(Debug, Clone)]
pub struct ToolchainDoctor {
    issues: Vec<KnownIssue>,
}

impl Default for ToolchainDoctor {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolchainDoctor {
    /// Create a doctor with the built-in issue table
    #[must_use]
    pub fn new() -> Self {
        Self {
            issues: init_known_issues(),
        }
    }

    /// Classify diagnostic text produced by `operation`
    #[instrument(skip(self, diagnostic))]
    pub fn diagnose(&self, operation: Operation, diagnostic: &str) -> Diagnosis {
        let lower = diagnostic.to_lowercase();

        let hit = self
            .issues
            .iter()
            .filter(|i| i.operation == Some(operation))
            .chain(self.issues.iter().filter(|i| i.operation.is_none()))
            .find(|i| lower.contains(i.pattern));

        let diagnosis = match hit {
            Some(issue) => Diagnosis {
                operation,
                category: issue.category,
                matched: Some(issue.pattern),
            },
            None => Diagnosis {
                operation,
                category: FailureCategory::Generic,
                matched: None,
            },
        };

        debug!(
            operation = %operation,
            category = ?diagnosis.category,
            matched = ?diagnosis.matched,
            "Diagnosed toolchain failure"
        );
        diagnosis
    }

    /// Convert a raw process error into a classified [`Error::Toolchain`]
    #[must_use]
    pub fn classify_error(&self, operation: Operation, error: Error) -> Error {
        match error {
            Error::NotFound(program) => Error::Toolchain {
                operation,
                category: FailureCategory::MissingPrerequisite,
                detail: format!("`{program}` is not installed or not on PATH"),
            },
            already @ Error::Toolchain { .. } => already,
            other => {
                let detail = other.diagnostic();
                let category = self.diagnose(operation, &detail).category;
                Error::Toolchain {
                    operation,
                    category,
                    detail,
                }
            }
        }
    }
}
