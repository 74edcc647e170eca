//! Common utilities

use xxhash_rust::xxh3::xxh3_64;

/// Count whitespace-separated tokens.
///
/// This is the budget unit for output documents. It is a rough stand-in for
/// prose word count and deliberately ignores punctuation and code structure.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Compute the XXH3 hash of bytes as 16 hex digits
pub fn hash_bytes(data: &[u8]) -> String {
    format!("{:016x}", xxh3_64(data))
}

/// Check if a command runs, probing it with `--version`
pub fn command_exists(cmd: &str) -> bool {
    std::process::Command::new(cmd)
        .arg("--version")
        .stdin(std::process::Stdio::null())
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}
