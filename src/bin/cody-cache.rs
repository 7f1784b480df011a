//! Cody cache demo
//!
//! Connects to Redis, stores a sample session record, reads it back and
//! runs it through the chat model.

#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use cody_core::{process_request, Agent, CacheAgent, RedisCache};
use cody_llm::DeepSeekClient;
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const SESSION_KEY: &str = "user:1001:session";

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cody=info,cody_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = cody::config::load_config()?;
    let cache = RedisCache::connect(&config.cache)
        .await
        .context("Redis connection failed")?;
    println!("Connected to Redis at {}", config.cache.url());

    let record = json!({
        "user_id": 1001,
        "query": "weather lookup",
        "timestamp": "2024-03-15 10:00:00",
    });

    let mut agent = CacheAgent::new(cache);
    agent
        .handle(&["set".to_string(), SESSION_KEY.to_string(), record.to_string()])
        .await?;
    let retrieved = agent
        .handle(&["get".to_string(), SESSION_KEY.to_string()])
        .await?;
    println!("Retrieved: {retrieved}");

    let client = DeepSeekClient::from_env().context("Chat backend is not configured")?;
    let processed = process_request(&client, record).await?;
    println!("\nProcessed: {}", serde_json::to_string_pretty(&processed)?);

    Ok(())
}
