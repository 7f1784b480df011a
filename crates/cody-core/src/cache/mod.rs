//! Redis-backed JSON cache
//!
//! Values are stored as JSON text under plain keys. Write and read failures
//! are logged and reported as `false` / `None` rather than propagated; only
//! the initial connection check is fatal.

#[cfg(test)]
mod tests;

use crate::agents::Agent;
use crate::error::{AgentError, CacheError};
use async_trait::async_trait;
use cody_llm::DeepSeekClient;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

/// Name of the cache agent
pub const CACHE_AGENT: &str = "redis";

/// Prompt used by [`process_request`]; `{query}` is replaced with the input
pub const PROCESS_PROMPT: &str = "Generate a response based on the following user input:\n{query}\n";

/// Where the cache lives
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Host name
    pub host: String,
    /// Port
    pub port: u16,
    /// Database index
    pub db: i64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 6379,
            db: 0,
        }
    }
}

impl CacheConfig {
    /// Connection URL
    pub fn url(&self) -> String {
        format!("redis://{}:{}/{}", self.host, self.port, self.db)
    }
}

/// JSON key-value store over Redis
pub struct RedisCache {
    client: redis::Client,
}

impl RedisCache {
    /// Create a client without connecting
    ///
    /// # Errors
    ///
    /// Returns error if the URL is invalid
    pub fn new(config: &CacheConfig) -> Result<Self, CacheError> {
        let client =
            redis::Client::open(config.url()).map_err(|e| CacheError::Connection(e.to_string()))?;
        Ok(Self { client })
    }

    /// Create a client and verify the server answers `PING`
    ///
    /// # Errors
    ///
    /// Returns error if the server is unreachable
    pub async fn connect(config: &CacheConfig) -> Result<Self, CacheError> {
        let cache = Self::new(config)?;
        cache.ping().await?;
        info!(url = %config.url(), "Connected to Redis");
        Ok(cache)
    }

    async fn connection(&self) -> Result<redis::aio::MultiplexedConnection, CacheError> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| CacheError::Connection(e.to_string()))
    }

    /// Round-trip a `PING`
    pub async fn ping(&self) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;
        redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .map_err(|e| CacheError::Connection(e.to_string()))?;
        Ok(())
    }

    /// Serialize `value` to JSON and `SET` it; `false` on any failure
    #[instrument(skip(self, value))]
    pub async fn store<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        match self.try_store(key, value).await {
            Ok(()) => true,
            Err(e) => {
                warn!(key = %key, error = %e, "Data storage error");
                false
            }
        }
    }

    /// `GET` and decode JSON; `None` when absent or undecodable
    #[instrument(skip(self))]
    pub async fn retrieve<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.try_retrieve(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!(key = %key, error = %e, "Data retrieval error");
                None
            }
        }
    }

    async fn try_store<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let json =
            serde_json::to_string(value).map_err(|e| CacheError::Serialization(e.to_string()))?;
        let mut conn = self.connection().await?;
        redis::cmd("SET")
            .arg(key)
            .arg(&json)
            .query_async::<()>(&mut conn)
            .await
            .map_err(|e| CacheError::Command(format!("SET failed: {e}")))?;
        debug!(key = %key, bytes = json.len(), "Stored value");
        Ok(())
    }

    async fn try_retrieve<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        let mut conn = self.connection().await?;
        let data: Option<String> = redis::cmd("GET")
            .arg(key)
            .query_async(&mut conn)
            .await
            .map_err(|e| CacheError::Command(format!("GET failed: {e}")))?;

        match data {
            Some(json) => serde_json::from_str(&json)
                .map(Some)
                .map_err(|e| CacheError::Serialization(e.to_string())),
            None => Ok(None),
        }
    }
}

/// Result of [`process_request`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessedRequest {
    /// Always `processed`
    pub status: &'static str,
    /// The input record as given
    pub input: Value,
    /// Model output
    pub result: String,
}

/// Render the processing prompt for a query
pub fn render_prompt(query: &str) -> String {
    PROCESS_PROMPT.replace("{query}", query)
}

/// Run the record's `query` field through the chat model
///
/// # Errors
///
/// Returns error if the record has no string `query` or the model call fails
pub async fn process_request(
    client: &DeepSeekClient,
    input: Value,
) -> Result<ProcessedRequest, CacheError> {
    let query = input
        .get("query")
        .and_then(Value::as_str)
        .ok_or_else(|| CacheError::InvalidInput("record has no 'query' string".to_string()))?;
    let result = client.chat(&render_prompt(query)).await?;
    Ok(ProcessedRequest {
        status: "processed",
        input,
        result,
    })
}

/// Cache exposed through the agent interface: `set KEY JSON`, `get KEY`
pub struct CacheAgent {
    cache: RedisCache,
}

impl CacheAgent {
    /// Wrap a connected cache
    pub fn new(cache: RedisCache) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl Agent for CacheAgent {
    fn name(&self) -> &str {
        CACHE_AGENT
    }

    async fn handle(&mut self, tokens: &[String]) -> Result<String, AgentError> {
        match tokens {
            [command, key, value @ ..] if command == "set" && !value.is_empty() => {
                let raw = value.join(" ");
                let parsed: Value = serde_json::from_str(&raw)
                    .map_err(|e| AgentError::InvalidCommand(format!("value is not valid JSON: {e}")))?;
                if self.cache.store(key, &parsed).await {
                    Ok("OK".to_string())
                } else {
                    Err(AgentError::Backend(format!("could not store '{key}'")))
                }
            }
            [command, key] if command == "get" => {
                let value: Option<Value> = self.cache.retrieve(key).await;
                Ok(value.map(|v| v.to_string()).unwrap_or_else(|| "(nil)".to_string()))
            }
            _ => Err(AgentError::UnknownCommand(
                "Unknown command. Available commands: set, get".to_string(),
            )),
        }
    }

    async fn is_available(&self) -> bool {
        self.cache.ping().await.is_ok()
    }
}
