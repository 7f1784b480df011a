use super::*;
use std::time::Duration;

#[test]
fn test_config_builder() {
    let config = DeepSeekConfig::new("test-key")
        .with_model("deepseek-coder")
        .with_base_url("http://localhost:8080/v1/")
        .with_timeout(Duration::from_secs(90));

    assert_eq!(config.api_key, "test-key");
    assert_eq!(config.model, "deepseek-coder");
    assert_eq!(config.base_url, "http://localhost:8080/v1");
    assert_eq!(config.timeout, Duration::from_secs(90));
}

#[test]
fn test_config_debug_masks_key() {
    let config = DeepSeekConfig::new("sk-1234567890abcdefghijklmnop");
    let debug_str = format!("{:?}", config);
    assert!(!debug_str.contains("1234567890abcdefghijkl"));
    assert!(debug_str.contains("sk-1...mnop"));
}

#[test]
fn test_sanitize_api_error() {
    let sanitized = sanitize_api_error("Invalid API key: sk-1234567890");
    assert!(!sanitized.contains("sk-"));
    assert!(sanitized.contains("DEEPSEEK_API_KEY"));

    let sanitized = sanitize_api_error("Rate limit exceeded");
    assert!(sanitized.contains("rate limit"));

    let long = "x".repeat(1000);
    assert!(sanitize_api_error(&long).ends_with("...(truncated)"));
}

#[test]
fn test_request_body_shape() {
    let messages = [Message::user("hello there")];
    let body = serde_json::to_value(ChatRequest {
        model: "deepseek-chat",
        messages: &messages,
    })
    .unwrap();

    assert_eq!(
        body,
        serde_json::json!({
            "model": "deepseek-chat",
            "messages": [{"role": "user", "content": "hello there"}]
        })
    );
}

#[test]
fn test_parse_completion() {
    let body = r#"{"id":"x","model":"deepseek-chat","choices":[{"index":0,"message":{"role":"assistant","content":"Hi!"},"finish_reason":"stop"}]}"#;
    assert_eq!(parse_completion(body).unwrap(), "Hi!");
}

#[test]
fn test_parse_completion_without_choices() {
    let err = parse_completion(r#"{"choices":[]}"#).unwrap_err();
    assert!(matches!(err, Error::InvalidResponse(_)));

    let err = parse_completion("not json").unwrap_err();
    assert!(matches!(err, Error::InvalidResponse(_)));
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let client = DeepSeekClient::new(
        DeepSeekConfig::new("sk-test-key-000000")
            .with_base_url("http://127.0.0.1:1")
            .with_timeout(Duration::from_secs(5)),
    )
    .unwrap();

    let err = client.chat("hello").await.unwrap_err();
    assert!(matches!(err, Error::Network(_)));
}
