//! Parameter extractors
//!
//! Pure functions from query text to command tokens. A missing optional
//! parameter yields the bare command; a missing required one yields
//! [`MissingField`] naming the field.

use super::MissingField;
use regex::Regex;
use std::sync::LazyLock;

static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(https?://\S+)").expect("URL_REGEX is a compile-time constant"));

static PATH_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:path|路径)\s*[：:=]\s*(\S+)").expect("PATH_REGEX is a compile-time constant")
});

static PR_NUMBER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|[^a-z])(?:pr|pull request|merge request|编号)\s*[：:]?\s*#?\s*(\d+)")
        .expect("PR_NUMBER_REGEX is a compile-time constant")
});

static HASH_NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#(\d+)").expect("HASH_NUMBER_REGEX is a compile-time constant"));

static BOARD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:(?:board|板型)\s*[：:=]\s*|(?:^|\s)(?:-b|--board)\s+)([\w/@.-]+)")
        .expect("BOARD_REGEX is a compile-time constant")
});

static TEST_ARGS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:args|arguments|参数)\s*[：:=]\s*(.+)$")
        .expect("TEST_ARGS_REGEX is a compile-time constant")
});

static CHAT_PREFIX_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:智能问答|知识查询|ask deepseek|use deepseek(?: to)?)\s*[：:,]?\s*")
        .expect("CHAT_PREFIX_REGEX is a compile-time constant")
});

fn tokens(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

/// `init` with an optional `--path`
pub fn extract_init(query: &str) -> Result<Vec<String>, MissingField> {
    match PATH_REGEX.captures(query).and_then(|c| c.get(1)) {
        Some(path) => Ok(tokens(&["init", "--path", path.as_str()])),
        None => Ok(tokens(&["init"])),
    }
}

/// `clone URL`; the URL is required
pub fn extract_clone(query: &str) -> Result<Vec<String>, MissingField> {
    let url = URL_REGEX
        .captures(query)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim_end_matches(['.', ',', ';', ')', '。', '，']))
        .ok_or(MissingField("repository URL"))?;
    Ok(tokens(&["clone", url]))
}

/// `pr N`; the number is required
pub fn extract_pr(query: &str) -> Result<Vec<String>, MissingField> {
    let number = PR_NUMBER_REGEX
        .captures(query)
        .or_else(|| HASH_NUMBER_REGEX.captures(query))
        .and_then(|c| c.get(1))
        .ok_or(MissingField("PR number"))?;
    Ok(tokens(&["pr", number.as_str()]))
}

/// `compile -b BOARD`; the board is required
pub fn extract_compile(query: &str) -> Result<Vec<String>, MissingField> {
    let board = BOARD_REGEX
        .captures(query)
        .and_then(|c| c.get(1))
        .ok_or(MissingField("board"))?;
    Ok(tokens(&["compile", "-b", board.as_str()]))
}

/// `test` with optional runner arguments
pub fn extract_test(query: &str) -> Result<Vec<String>, MissingField> {
    match TEST_ARGS_REGEX.captures(query).and_then(|c| c.get(1)) {
        Some(args) => Ok(tokens(&["test", args.as_str().trim()])),
        None => Ok(tokens(&["test"])),
    }
}

/// `chat PROMPT`; an invocation prefix is stripped, otherwise the whole query is the prompt
pub fn extract_chat(query: &str) -> Result<Vec<String>, MissingField> {
    let stripped = CHAT_PREFIX_REGEX.replace(query, "");
    let prompt = match stripped.trim() {
        "" => query.trim(),
        rest => rest,
    };
    Ok(tokens(&["chat", prompt]))
}
