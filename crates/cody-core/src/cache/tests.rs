use super::*;
use cody_llm::DeepSeekConfig;
use serde_json::json;

#[test]
fn test_cache_url() {
    assert_eq!(CacheConfig::default().url(), "redis://localhost:6379/0");
    let config = CacheConfig {
        host: "cache.internal".to_string(),
        port: 6380,
        db: 2,
    };
    assert_eq!(config.url(), "redis://cache.internal:6380/2");
}

#[test]
fn test_render_prompt() {
    let prompt = render_prompt("what is a devicetree overlay?");
    assert!(prompt.ends_with("what is a devicetree overlay?\n"));
    assert!(!prompt.contains("{query}"));
}

#[test]
fn test_open_client_without_connecting() {
    assert!(RedisCache::new(&CacheConfig::default()).is_ok());
}

#[tokio::test]
async fn test_cache_agent_rejects_bad_commands() {
    let mut agent = CacheAgent::new(RedisCache::new(&CacheConfig::default()).unwrap());
    assert_eq!(agent.name(), "redis");

    let err = agent.handle(&["flush".to_string()]).await.unwrap_err();
    assert!(matches!(err, AgentError::UnknownCommand(_)));

    let set = vec!["set".to_string(), "k".to_string(), "{not json".to_string()];
    let err = agent.handle(&set).await.unwrap_err();
    assert!(matches!(err, AgentError::InvalidCommand(_)));
}

#[tokio::test]
async fn test_connect_refused() {
    let config = CacheConfig {
        host: "127.0.0.1".to_string(),
        port: 1,
        db: 0,
    };
    let err = RedisCache::connect(&config).await.err().unwrap();
    assert!(matches!(err, CacheError::Connection(_)));
}

#[tokio::test]
async fn test_process_request_requires_query() {
    let client = DeepSeekClient::new(DeepSeekConfig::new("sk-test")).unwrap();
    let err = process_request(&client, json!({"user": 1001})).await.unwrap_err();
    assert!(matches!(err, CacheError::InvalidInput(_)));
}

#[tokio::test]
async fn test_process_request_surfaces_llm_errors() {
    let config = DeepSeekConfig::new("sk-test").with_base_url("http://127.0.0.1:1");
    let client = DeepSeekClient::new(config).unwrap();
    let err = process_request(&client, json!({"query": "hi"})).await.unwrap_err();
    assert!(matches!(err, CacheError::Llm(_)));
}

#[cfg(feature = "redis-tests")]
mod redis_tests {
    use super::*;

    fn cache_config() -> CacheConfig {
        let host = std::env::var("REDIS_HOST").unwrap_or_else(|_| "localhost".to_string());
        CacheConfig {
            host,
            ..CacheConfig::default()
        }
    }

    #[tokio::test]
    async fn test_store_and_retrieve() {
        let cache = RedisCache::connect(&cache_config()).await.unwrap();
        let record = json!({"user": 1001, "session": "abc"});

        assert!(cache.store("cody:test:session", &record).await);
        let loaded: Option<Value> = cache.retrieve("cody:test:session").await;
        assert_eq!(loaded, Some(record));
    }

    #[tokio::test]
    async fn test_retrieve_missing_key() {
        let cache = RedisCache::connect(&cache_config()).await.unwrap();
        let loaded: Option<Value> = cache.retrieve("cody:test:missing-key").await;
        assert_eq!(loaded, None);
    }

    #[tokio::test]
    async fn test_undecodable_value_is_absent() {
        let cache = RedisCache::connect(&cache_config()).await.unwrap();
        assert!(cache.store("cody:test:text", "plain").await);
        let loaded: Option<Vec<u32>> = cache.retrieve("cody:test:text").await;
        assert_eq!(loaded, None);
    }

    #[tokio::test]
    async fn test_cache_agent_commands() {
        let cache = RedisCache::connect(&cache_config()).await.unwrap();
        let mut agent = CacheAgent::new(cache);
        assert!(agent.is_available().await);

        let set = vec!["set".to_string(), "cody:test:agent".to_string(), r#"{"a":1}"#.to_string()];
        assert_eq!(agent.handle(&set).await.unwrap(), "OK");

        let get = vec!["get".to_string(), "cody:test:agent".to_string()];
        assert_eq!(agent.handle(&get).await.unwrap(), r#"{"a":1}"#);
    }
}
