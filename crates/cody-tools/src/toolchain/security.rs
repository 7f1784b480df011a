//! Argument validation for toolchain commands

/// Characters that never belong in a URL or board name handed to a subprocess
const DANGEROUS_CHARS: [char; 12] = [
    '`', '$', '|', ';', '&', '>', '<', '\n', '\r', '\0', '\'', '"',
];

/// Validate a repository URL before handing it to `git clone`
pub fn is_valid_clone_url(url: &str) -> bool {
    let safe_protocols = ["https://", "http://", "git://", "ssh://", "git@"];
    if !safe_protocols.iter().any(|p| url.starts_with(p)) {
        return false;
    }

    !url.chars().any(|c| DANGEROUS_CHARS.contains(&c) || c.is_whitespace())
}

/// Validate a board identifier (`nrf52840dk_nrf52840`, `qemu_x86`, `native_posix/native/64`)
pub fn is_valid_board_name(board: &str) -> bool {
    !board.is_empty()
        && board.len() <= 128
        && !board.starts_with('-')
        && board
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '/' | '@' | '.'))
}
