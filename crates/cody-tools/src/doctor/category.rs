//! Failure categories and toolchain operations

use serde::{Deserialize, Serialize};
use std::fmt;

/// Toolchain operation a failure was observed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Environment check / dependency installation
    Setup,
    /// `git clone`
    Clone,
    /// Fetch and check out a pull request
    SwitchPr,
    /// `west build`
    Compile,
    /// `west twister`
    Test,
}

impl Operation {
    /// Short name used in logs and messages
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Setup => "setup",
            Self::Clone => "clone",
            Self::SwitchPr => "pr",
            Self::Compile => "compile",
            Self::Test => "test",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Categories of toolchain failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureCategory {
    /// Remote host unreachable or DNS failure
    NetworkIssue,
    /// Operation needs an initialized repository/workspace first
    NotInitialized,
    /// Pull request or ref does not exist
    InvalidReference,
    /// Local changes block the checkout
    UncommittedChanges,
    /// Required executable is not installed
    MissingPrerequisite,
    /// Test runner found nothing to run
    NoTestsFound,
    /// Firmware build failed
    BuildError,
    /// Anything else
    Generic,
}

impl FailureCategory {
    /// Get display name
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::NetworkIssue => "Network Issue",
            Self::NotInitialized => "Not Initialized",
            Self::InvalidReference => "Invalid Reference",
            Self::UncommittedChanges => "Uncommitted Changes",
            Self::MissingPrerequisite => "Missing Prerequisite",
            Self::NoTestsFound => "No Tests Found",
            Self::BuildError => "Build Error",
            Self::Generic => "Generic Error",
        }
    }
}

impl fmt::Display for FailureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
