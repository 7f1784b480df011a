//! Localized user-facing text
//!
//! Every message an adapter or the CLI shows to a person comes from a
//! [`Texts`] table. Templates use `{name}` placeholders filled by [`fill`].

use cody_tools::FailureCategory;
use serde::Deserialize;
use std::env;

/// Supported languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English
    #[default]
    English,
    /// Simplified Chinese
    Chinese,
}

impl Language {
    /// Parse a language code such as `en`, `zh`, `zh_CN.UTF-8`
    pub fn from_code(code: &str) -> Option<Self> {
        let lower = code.trim().to_lowercase();
        if lower.starts_with("zh") || lower == "chinese" || lower == "cn" {
            Some(Self::Chinese)
        } else if lower.starts_with("en") || lower == "english" {
            Some(Self::English)
        } else {
            None
        }
    }
}

/// Detect language from the locale environment
pub fn detect_language() -> Language {
    for var in ["LC_ALL", "LC_MESSAGES", "LANG"] {
        if let Ok(value) = env::var(var) {
            if value.is_empty() {
                continue;
            }
            return Language::from_code(&value).unwrap_or_default();
        }
    }
    Language::English
}

/// Localized messages
#[derive(Debug)]
pub struct Texts {
    // CLI
    /// Prompt for a single query
    pub prompt_query: &'static str,
    /// Prompt for each interactive line
    pub prompt_interactive: &'static str,
    /// Interactive mode banner
    pub interactive_banner: &'static str,
    /// Agent error line, `{agent}` and `{error}`
    pub agent_error: &'static str,
    /// Shown when the query prompt receives nothing
    pub empty_query: &'static str,
    /// Query could not be classified, `{error}`
    pub query_error: &'static str,

    // Toolchain agent
    /// Environment already complete
    pub env_ready: &'static str,
    /// Dependencies were installed, `{missing}`
    pub dependencies_installed: &'static str,
    /// Clone success, `{path}`
    pub repo_cloned: &'static str,
    /// PR checkout success, `{number}`
    pub pr_switched: &'static str,
    /// Build success, `{board}`
    pub build_complete: &'static str,
    /// Test run finished with no output
    pub tests_complete: &'static str,
    /// Clone requested without URL
    pub missing_url: &'static str,
    /// PR token is not a number, `{number}`
    pub invalid_pr: &'static str,
    /// Unknown toolchain command
    pub toolchain_unknown_command: &'static str,

    // Failure categories (`{detail}` where present)
    /// Network issue
    pub failure_network: &'static str,
    /// Workspace not initialized
    pub failure_not_initialized: &'static str,
    /// Invalid PR number or board
    pub failure_invalid_reference: &'static str,
    /// Local changes block checkout
    pub failure_uncommitted: &'static str,
    /// Missing tool, `{detail}`
    pub failure_missing_prerequisite: &'static str,
    /// Test run found nothing
    pub failure_no_tests: &'static str,
    /// Build error
    pub failure_build: &'static str,
    /// Anything else, `{detail}`
    pub failure_generic: &'static str,

    // Chat agent
    /// Unknown chat command
    pub chat_unknown_command: &'static str,
    /// Chat request failed, `{error}`
    pub api_request_failed: &'static str,
    /// API key missing from environment
    pub missing_api_key: &'static str,

    // Primary backend
    /// Backend command failed, `{error}`
    pub command_failed: &'static str,
}

impl Texts {
    /// User-facing message for a classified toolchain failure
    pub fn failure_message(&self, category: FailureCategory, detail: &str) -> String {
        let template = match category {
            FailureCategory::NetworkIssue => self.failure_network,
            FailureCategory::NotInitialized => self.failure_not_initialized,
            FailureCategory::InvalidReference => self.failure_invalid_reference,
            FailureCategory::UncommittedChanges => self.failure_uncommitted,
            FailureCategory::MissingPrerequisite => self.failure_missing_prerequisite,
            FailureCategory::NoTestsFound => self.failure_no_tests,
            FailureCategory::BuildError => self.failure_build,
            FailureCategory::Generic => self.failure_generic,
        };
        fill(template, &[("detail", detail)])
    }
}

/// English messages
pub const TEXTS_EN: Texts = Texts {
    prompt_query: "Enter your query: ",
    prompt_interactive: "cody> ",
    interactive_banner: "Interactive mode (type 'exit' or 'quit' to leave)",
    agent_error: "[!] {agent} Agent Error: {error}",
    empty_query: "No query given.",
    query_error: "[!] Could not route query: {error}",

    env_ready: "Environment is ready.",
    dependencies_installed: "Dependencies installed (previously missing: {missing}).",
    repo_cloned: "Repository cloned to {path}",
    pr_switched: "Switched to PR #{number}",
    build_complete: "Build complete for board {board}",
    tests_complete: "Tests finished.",
    missing_url: "A repository URL is required to clone.",
    invalid_pr: "Invalid PR number: {number}",
    toolchain_unknown_command: "Unknown command. Available commands: init, clone, pr, compile, test",

    failure_network: "Network issue: could not reach the remote host. Check your connection and proxy settings.",
    failure_not_initialized: "The workspace is not initialized. Run init first.",
    failure_invalid_reference: "Invalid reference: the pull request or board does not exist.",
    failure_uncommitted: "Local changes block the checkout. Commit or stash them first.",
    failure_missing_prerequisite: "Missing prerequisite: {detail}",
    failure_no_tests: "No tests found.",
    failure_build: "Build failed. See the compiler output above.",
    failure_generic: "Toolchain command failed: {detail}",

    chat_unknown_command: "Unknown command. Available commands: chat",
    api_request_failed: "API request failed: {error}",
    missing_api_key: "DEEPSEEK_API_KEY is not set in the environment",

    command_failed: "Command failed: {error}",
};

/// Chinese messages
pub const TEXTS_ZH: Texts = Texts {
    prompt_query: "请输入查询内容：",
    prompt_interactive: "cody> ",
    interactive_banner: "交互模式（输入 exit 或 quit 退出）",
    agent_error: "[!] {agent} Agent Error: {error}",
    empty_query: "未输入查询内容。",
    query_error: "[!] 无法处理查询：{error}",

    env_ready: "环境已就绪。",
    dependencies_installed: "依赖已安装（之前缺失：{missing}）。",
    repo_cloned: "仓库已克隆到 {path}",
    pr_switched: "已切换到 PR #{number}",
    build_complete: "板型 {board} 编译完成",
    tests_complete: "测试已完成。",
    missing_url: "克隆需要提供仓库地址。",
    invalid_pr: "无效的 PR 编号：{number}",
    toolchain_unknown_command: "未知命令，可用命令: init, clone, pr, compile, test",

    failure_network: "网络问题：无法连接远程主机，请检查网络和代理设置。",
    failure_not_initialized: "工作区未初始化，请先执行 init。",
    failure_invalid_reference: "无效的引用：PR 或板型不存在。",
    failure_uncommitted: "本地修改阻止了切换，请先提交或暂存。",
    failure_missing_prerequisite: "缺少必要工具：{detail}",
    failure_no_tests: "未找到测试用例。",
    failure_build: "编译失败，请查看上方编译输出。",
    failure_generic: "工具链命令执行失败：{detail}",

    chat_unknown_command: "未知命令，可用命令: chat",
    api_request_failed: "API请求失败: {error}",
    missing_api_key: "DEEPSEEK_API_KEY未在环境变量中设置",

    command_failed: "命令执行失败: {error}",
};

/// Get texts for a language
pub fn get_texts(lang: Language) -> &'static Texts {
    match lang {
        Language::English => &TEXTS_EN,
        Language::Chinese => &TEXTS_ZH,
    }
}

/// Substitute `{key}` placeholders
pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (key, value) in values {
        out = out.replace(&format!("{{{key}}}", key = key), value);
    }
    out
}
