use super::*;
use crate::classifier::{ClassifierConfig, IntentClassifier};
use crate::registry::default_registry;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Records every call and answers `<agent>:<tokens joined by |>`
struct EchoAgent {
    name: String,
    available: bool,
    fail_with: Option<fn() -> AgentError>,
    log: Arc<Mutex<Vec<(String, Vec<String>)>>>,
}

#[async_trait]
impl Agent for EchoAgent {
    fn name(&self) -> &str {
        &self.name
    }

    async fn handle(&mut self, tokens: &[String]) -> Result<String, AgentError> {
        self.log
            .lock()
            .unwrap()
            .push((self.name.clone(), tokens.to_vec()));
        if let Some(make_error) = self.fail_with {
            return Err(make_error());
        }
        Ok(format!("{}:{}", self.name, tokens.join("|")))
    }

    async fn is_available(&self) -> bool {
        self.available
    }
}

#[derive(Clone, Default)]
struct TestFactory {
    primary_available: bool,
    chat_error: Option<fn() -> AgentError>,
    created: Arc<Mutex<Vec<String>>>,
    log: Arc<Mutex<Vec<(String, Vec<String>)>>>,
}

impl AgentFactory for TestFactory {
    fn create(&self, name: &str) -> Result<Box<dyn Agent>, AgentError> {
        if !["cody", "zephyr", "deepseek"].contains(&name) {
            return Err(AgentError::UnknownAgent(name.to_string()));
        }
        self.created.lock().unwrap().push(name.to_string());
        Ok(Box::new(EchoAgent {
            name: name.to_string(),
            available: name != "cody" || self.primary_available,
            fail_with: if name == "deepseek" { self.chat_error } else { None },
            log: Arc::clone(&self.log),
        }))
    }
}

fn router(factory: TestFactory) -> Router<TestFactory> {
    let classifier = IntentClassifier::new(default_registry().unwrap(), ClassifierConfig::default());
    Router::new(classifier, factory, FailoverPolicy::default())
}

fn strs(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_matched_query_dispatches_tokens() {
    let factory = TestFactory::default();
    let mut router = router(factory.clone());

    let dispatch = router.process_query("PR 42").await.unwrap();
    assert_eq!(
        dispatch,
        Dispatch {
            agent: "zephyr".to_string(),
            response: "zephyr:pr|42".to_string(),
            failed_over: false,
        }
    );
    // matched queries never probe the primary
    assert_eq!(*factory.created.lock().unwrap(), vec!["zephyr".to_string()]);
}

#[tokio::test]
async fn test_primary_receives_raw_query() {
    let factory = TestFactory {
        primary_available: true,
        ..TestFactory::default()
    };
    let mut router = router(factory.clone());

    let dispatch = router.process_query("hello there").await.unwrap();
    assert_eq!(dispatch.agent, "cody");
    assert_eq!(dispatch.response, "cody:hello there");
    assert!(!dispatch.failed_over);
}

#[tokio::test]
async fn test_primary_follows_classifier_config() {
    let factory = TestFactory::default();
    let config = ClassifierConfig {
        primary_agent: "zephyr".to_string(),
        ..ClassifierConfig::default()
    };
    let classifier = IntentClassifier::new(default_registry().unwrap(), config);
    let mut router = Router::new(classifier, factory.clone(), FailoverPolicy::default());

    let dispatch = router.process_query("hello there").await.unwrap();
    assert_eq!(dispatch.agent, "zephyr");
    assert_eq!(dispatch.response, "zephyr:hello there");
    assert!(!dispatch.failed_over);
}

#[tokio::test]
async fn test_failover_to_chat() {
    let factory = TestFactory::default();
    let mut router = router(factory.clone());

    let dispatch = router.process_query("hello there").await.unwrap();
    assert_eq!(dispatch.agent, "deepseek");
    assert_eq!(dispatch.response, "deepseek:chat|hello there");
    assert!(dispatch.failed_over);

    // the primary was probed but never asked to handle anything
    let log = factory.log.lock().unwrap();
    assert_eq!(*log, vec![("deepseek".to_string(), strs(&["chat", "hello there"]))]);
}

#[tokio::test]
async fn test_failover_is_one_level() {
    let factory = TestFactory {
        chat_error: Some(|| AgentError::Api("API request failed: connection refused".to_string())),
        ..TestFactory::default()
    };
    let mut router = router(factory.clone());

    let err = router.process_query("hello there").await.unwrap_err();
    assert_eq!(err.agent(), Some("deepseek"));
    assert_eq!(err.to_string(), "API request failed: connection refused");
    assert!(!err.is_fatal());
    assert_eq!(
        err.user_message(&crate::i18n::TEXTS_EN),
        "[!] deepseek Agent Error: API request failed: connection refused"
    );
    assert_eq!(factory.log.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_configuration_error_is_fatal() {
    let factory = TestFactory {
        chat_error: Some(|| AgentError::Configuration("DEEPSEEK_API_KEY is not set".to_string())),
        ..TestFactory::default()
    };
    let mut router = router(factory);

    let err = router.process_query("智能问答：你好").await.unwrap_err();
    assert!(err.is_fatal());
}

#[tokio::test]
async fn test_agents_are_created_once() {
    let factory = TestFactory::default();
    let mut router = router(factory.clone());

    router.process_query("PR 1").await.unwrap();
    router.process_query("PR 2").await.unwrap();
    router.process_query("run tests").await.unwrap();

    assert_eq!(*factory.created.lock().unwrap(), vec!["zephyr".to_string()]);
    assert_eq!(router.active_agents(), vec!["zephyr"]);
}

#[tokio::test]
async fn test_classification_error_is_not_dispatched() {
    let factory = TestFactory::default();
    let mut router = router(factory.clone());

    let err = router.process_query("clone the repository").await.unwrap_err();
    assert!(matches!(err, RouterError::Classification(ClassifyError::MissingParameter { .. })));
    assert_eq!(err.agent(), None);
    assert_eq!(
        err.user_message(&crate::i18n::TEXTS_EN),
        "[!] Could not route query: 'clone' command for agent 'zephyr' is missing the repository URL"
    );
    assert!(factory.created.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_dispatch_tokens_bypasses_classifier() {
    let factory = TestFactory::default();
    let mut router = router(factory);

    let dispatch = router
        .dispatch_tokens("zephyr", &strs(&["compile", "-b", "qemu_x86"]))
        .await
        .unwrap();
    assert_eq!(dispatch.response, "zephyr:compile|-b|qemu_x86");
}

#[tokio::test]
async fn test_unknown_agent() {
    let factory = TestFactory::default();
    let mut router = router(factory);

    let err = router.dispatch_tokens("nobody", &[]).await.unwrap_err();
    assert!(matches!(
        err,
        RouterError::Agent { source: AgentError::UnknownAgent(_), .. }
    ));
}
