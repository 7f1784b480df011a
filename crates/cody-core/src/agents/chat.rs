//! Chat agent backed by the DeepSeek API

use super::{Agent, CHAT_AGENT};
use crate::error::AgentError;
use crate::i18n::{fill, Texts};
use async_trait::async_trait;
use cody_llm::DeepSeekClient;
use tracing::{instrument, warn};

/// Forwards `chat PROMPT...` to the chat completion endpoint
pub struct ChatAgent {
    client: DeepSeekClient,
    texts: &'static Texts,
}

impl ChatAgent {
    /// Wrap a configured client
    pub fn new(client: DeepSeekClient, texts: &'static Texts) -> Self {
        Self { client, texts }
    }
}

#[async_trait]
impl Agent for ChatAgent {
    fn name(&self) -> &str {
        CHAT_AGENT
    }

    #[instrument(skip(self, tokens), fields(agent = CHAT_AGENT))]
    async fn handle(&mut self, tokens: &[String]) -> Result<String, AgentError> {
        match tokens.split_first() {
            Some((command, rest)) if command == "chat" => {
                let prompt = rest.join(" ");
                self.client.chat(&prompt).await.map_err(|e| {
                    warn!(error = %e, "Chat request failed");
                    AgentError::Api(fill(
                        self.texts.api_request_failed,
                        &[("error", e.to_string().as_str())],
                    ))
                })
            }
            _ => Err(AgentError::UnknownCommand(
                self.texts.chat_unknown_command.to_string(),
            )),
        }
    }
}
