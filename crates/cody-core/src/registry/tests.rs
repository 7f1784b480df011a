use super::*;
use crate::error::RegistryError;

fn no_params(_: &str) -> Result<Vec<String>, MissingField> {
    Ok(vec!["noop".to_string()])
}

#[test]
fn test_default_registry_order() {
    let registry = default_registry().unwrap();
    let names: Vec<&str> = registry.specs().iter().map(|s| s.name()).collect();
    assert_eq!(names, vec!["zephyr", "deepseek"]);
}

#[test]
fn test_default_registry_fallback() {
    let registry = default_registry().unwrap();
    assert_eq!(registry.get("zephyr").unwrap().fallback_command(), None);
    assert_eq!(
        registry.get("deepseek").unwrap().fallback_command(),
        Some(CommandType::Chat)
    );
}

#[test]
fn test_patterns_are_case_insensitive() {
    let registry = default_registry().unwrap();
    let spec = registry.get("zephyr").unwrap();
    assert_eq!(spec.match_query("COMPILE it"), Some(CommandType::Compile));
    assert_eq!(spec.match_query("Run The Tests"), Some(CommandType::Test));
}

#[test]
fn test_first_rule_wins_inside_agent() {
    let registry = default_registry().unwrap();
    let spec = registry.get("zephyr").unwrap();
    // matches both clone and compile; clone is declared first
    assert_eq!(
        spec.match_query("clone https://x/y.git then compile"),
        Some(CommandType::Clone)
    );
}

#[test]
fn test_pr_rule_needs_standalone_token() {
    let registry = default_registry().unwrap();
    let spec = registry.get("zephyr").unwrap();
    assert_eq!(spec.match_query("PR 42"), Some(CommandType::Pr));
    assert_eq!(spec.match_query("切换PR 42"), Some(CommandType::Pr));
    assert_eq!(spec.match_query("express approval"), None);
}

#[test]
fn test_chinese_alternatives() {
    let registry = default_registry().unwrap();
    let zephyr = registry.get("zephyr").unwrap();
    assert_eq!(zephyr.match_query("编译 板型: qemu_x86"), Some(CommandType::Compile));
    assert_eq!(zephyr.match_query("环境初始化"), Some(CommandType::Init));

    let deepseek = registry.get("deepseek").unwrap();
    assert_eq!(deepseek.match_query("智能问答：什么是RTOS"), Some(CommandType::Chat));
}

#[test]
fn test_duplicate_agent_rejected() {
    let mut registry = PatternRegistry::new();
    let spec = || {
        AgentSpec::builder("a")
            .rule(CommandType::Init, &["x"])
            .extractor(CommandType::Init, no_params)
            .build()
            .unwrap()
    };
    registry.register(spec()).unwrap();
    let err = registry.register(spec()).unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateAgent(name) if name == "a"));
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_invalid_pattern_fails_at_build() {
    let err = AgentSpec::builder("a")
        .rule(CommandType::Init, &["ok", "(unclosed"])
        .extractor(CommandType::Init, no_params)
        .build()
        .unwrap_err();
    assert!(matches!(err, RegistryError::InvalidPattern { command: CommandType::Init, .. }));
}

#[test]
fn test_rule_without_extractor_rejected() {
    let err = AgentSpec::builder("a")
        .rule(CommandType::Compile, &["compile"])
        .build()
        .unwrap_err();
    assert!(matches!(err, RegistryError::MissingExtractor { command: CommandType::Compile, .. }));
}

#[test]
fn test_fallback_without_extractor_rejected() {
    let err = AgentSpec::builder("a").fallback(CommandType::Chat).build().unwrap_err();
    assert!(matches!(err, RegistryError::MissingExtractor { command: CommandType::Chat, .. }));
}

#[test]
fn test_empty_rule_rejected() {
    let err = AgentSpec::builder("a")
        .rule(CommandType::Test, &[])
        .extractor(CommandType::Test, no_params)
        .build()
        .unwrap_err();
    assert!(matches!(err, RegistryError::EmptyRule { .. }));
}

#[test]
fn test_command_type_parse() {
    assert_eq!("Compile".parse::<CommandType>(), Ok(CommandType::Compile));
    assert!("deploy".parse::<CommandType>().is_err());
    assert_eq!(CommandType::Pr.to_string(), "pr");
}

#[test]
fn test_extractors() {
    assert_eq!(extract_init("init environment").unwrap(), vec!["init"]);
    assert_eq!(
        extract_init("set path: /opt/zephyr").unwrap(),
        vec!["init", "--path", "/opt/zephyr"]
    );
    assert_eq!(
        extract_clone("clone https://github.com/zephyrproject-rtos/zephyr.git.").unwrap(),
        vec!["clone", "https://github.com/zephyrproject-rtos/zephyr.git"]
    );
    assert_eq!(extract_clone("clone the repo"), Err(MissingField("repository URL")));
    assert_eq!(extract_pr("PR 42").unwrap(), vec!["pr", "42"]);
    assert_eq!(extract_pr("check out pull request #1234").unwrap(), vec!["pr", "1234"]);
    assert_eq!(extract_pr("切换PR 7").unwrap(), vec!["pr", "7"]);
    assert_eq!(extract_pr("switch to #99").unwrap(), vec!["pr", "99"]);
    assert_eq!(extract_pr("switch PR"), Err(MissingField("PR number")));
    assert_eq!(
        extract_compile("compile board: nrf52840dk_nrf52840").unwrap(),
        vec!["compile", "-b", "nrf52840dk_nrf52840"]
    );
    assert_eq!(
        extract_compile("compile -b qemu_x86").unwrap(),
        vec!["compile", "-b", "qemu_x86"]
    );
    assert_eq!(extract_compile("compile it"), Err(MissingField("board")));
    assert_eq!(extract_test("run tests").unwrap(), vec!["test"]);
    assert_eq!(
        extract_test("run tests args: -p native_posix -T tests/kernel").unwrap(),
        vec!["test", "-p native_posix -T tests/kernel"]
    );
}

#[test]
fn test_chat_extractor_strips_prefix() {
    assert_eq!(
        extract_chat("智能问答：什么是设备树").unwrap(),
        vec!["chat", "什么是设备树"]
    );
    assert_eq!(extract_chat("hello there").unwrap(), vec!["chat", "hello there"]);
    assert_eq!(extract_chat("知识查询").unwrap(), vec!["chat", "知识查询"]);
}
