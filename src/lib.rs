//! Cody - natural-language command router
//!
//! Library half of the `cody` binaries: configuration loading and the CLI
//! session that wires the classifier, agents and router together.

#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
