//! Cody Tools - External process plumbing
//!
//! This crate provides the process-level collaborators of the cody router:
//! - Process: run an external command and capture stdout/stderr/exit code
//! - Doctor: classify captured diagnostics into named failure categories
//! - Toolchain: the Zephyr/west firmware toolchain wrapper (init, clone, PR, build, test)

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod doctor;
pub mod error;
pub mod process;
pub mod toolchain;

pub use doctor::{Diagnosis, FailureCategory, Operation, ToolchainDoctor};
pub use error::{Error, Result};
pub use process::{CommandRunner, ProcessCommand, ProcessOutput, ScriptedRunner, SystemRunner};
pub use toolchain::{failure_category, EnvironmentReport, ZephyrToolchain, DEFAULT_BOARD};
