//! Toolchain Doctor - classifies toolchain failures
//!
//! Raw diagnostic text captured from git/west/pip is matched against a table
//! of known issues and mapped to one of a small set of named
//! [`FailureCategory`] values. Callers turn the category into a user-facing
//! message.

mod category;
mod core;
mod patterns;


pub use category::{FailureCategory, Operation};
pub use core::{Diagnosis, ToolchainDoctor};
pub use patterns::KnownIssue;
