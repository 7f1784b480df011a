//! Built-in agent specs
//!
//! Rule order inside a spec matters: the first matching rule wins, so the
//! narrower command-types come first.

use super::extractors::{
    extract_chat, extract_clone, extract_compile, extract_init, extract_pr, extract_test,
};
use super::{AgentSpec, CommandType, PatternRegistry};
use crate::agents::{CHAT_AGENT, TOOLCHAIN_AGENT};
use crate::error::RegistryError;

fn toolchain_spec() -> Result<AgentSpec, RegistryError> {
    AgentSpec::builder(TOOLCHAIN_AGENT)
        .rule(
            CommandType::Init,
            &[
                r"init(?:iali[sz]e)?\s+(?:the\s+)?(?:env|environment|workspace)",
                r"set\s*up\s+(?:the\s+)?(?:env|environment|toolchain)",
                r"set\s+(?:the\s+)?(?:project\s+)?path",
                r"环境初始化",
                r"初始化环境",
                r"设置路径",
            ],
        )
        .rule(
            CommandType::Clone,
            &[
                r"clone",
                r"download\s+(?:the\s+)?(?:code|source|repo)",
                r"克隆",
                r"下载代码",
            ],
        )
        .rule(
            CommandType::Pr,
            &[
                r"(?:^|[^a-z])pr(?:$|[^a-z])",
                r"pull\s+request",
                r"merge\s+request",
                r"切换\s*PR",
                r"合并请求",
            ],
        )
        .rule(
            CommandType::Compile,
            &[
                r"compile",
                r"build\s+(?:the\s+)?firmware",
                r"编译",
                r"构建固件",
            ],
        )
        .rule(
            CommandType::Test,
            &[
                r"run\s+(?:the\s+)?tests?",
                r"execute\s+(?:the\s+)?(?:test\s+)?cases?",
                r"twister",
                r"运行测试",
                r"执行用例",
            ],
        )
        .extractor(CommandType::Init, extract_init)
        .extractor(CommandType::Clone, extract_clone)
        .extractor(CommandType::Pr, extract_pr)
        .extractor(CommandType::Compile, extract_compile)
        .extractor(CommandType::Test, extract_test)
        .build()
}

fn chat_spec() -> Result<AgentSpec, RegistryError> {
    AgentSpec::builder(CHAT_AGENT)
        .rule(
            CommandType::Chat,
            &[
                r"智能问答|知识查询|API调用",
                r"使用\s*DeepSeek",
                r"(?:use|ask)\s+deepseek",
                r"调用.*模型",
                r"knowledge\s+query",
            ],
        )
        .extractor(CommandType::Chat, extract_chat)
        .fallback(CommandType::Chat)
        .build()
}

/// Registry with the toolchain agent first, then the chat agent
pub fn default_registry() -> Result<PatternRegistry, RegistryError> {
    let mut registry = PatternRegistry::new();
    registry.register(toolchain_spec()?)?;
    registry.register(chat_spec()?)?;
    Ok(registry)
}
