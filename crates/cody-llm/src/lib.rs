//! Cody LLM - Chat-completion client
//!
//! This crate provides the remote chat backend used by the cody router:
//! - DeepSeek: OpenAI-compatible `/chat/completions` client with bearer auth
//! - Message: conversation message types
//! - Util: API key masking and error sanitizing

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod deepseek;
pub mod error;
pub mod message;
pub mod util;

pub use deepseek::{DeepSeekClient, DeepSeekConfig, DEEPSEEK_API_BASE, DEFAULT_MODEL};
pub use error::{Error, Result};
pub use message::{Message, MessageRole};
