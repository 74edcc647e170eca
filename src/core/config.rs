//! Digest configuration
//!
//! Built from command-line flags; defaults reproduce the classic behavior
//! (500,000-word documents in the current directory).

use std::path::PathBuf;
use std::time::Duration;

/// Default word budget per output document
pub const DEFAULT_MAX_WORDS: usize = 500_000;

/// Default limit for the clone step, in seconds
pub const DEFAULT_CLONE_TIMEOUT_SECS: u64 = 600;

/// Extensions collected by default (compared case-insensitively)
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    "py", "c", "cpp", "ipynb", "java", "js", "rb", "go", "cs", "php", "html", "css", "swift", "kt",
    "m", "mm", "ts", "rs", "scala", "pl", "sh", "bat", "ps1", "lua", "erl", "ex", "dart", "r", "jl",
    "md",
];

/// Configuration for one digest run
#[derive(Debug, Clone)]
pub struct DigestConfig {
    /// Word budget per output document
    pub max_words: usize,

    /// Directory the documents are written into
    pub output_dir: PathBuf,

    /// Parent for the scratch clone (system temp dir when None)
    pub scratch_parent: Option<PathBuf>,

    /// Upper bound for the clone step
    pub clone_timeout: Duration,

    /// Allow-listed extensions, lowercase, without dots
    pub extensions: Vec<String>,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            max_words: DEFAULT_MAX_WORDS,
            output_dir: PathBuf::from("."),
            scratch_parent: None,
            clone_timeout: Duration::from_secs(DEFAULT_CLONE_TIMEOUT_SECS),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

impl DigestConfig {
    /// Whether a file extension (without dot, any case) is allow-listed
    pub fn allows_extension(&self, extension: &str) -> bool {
        let lower = extension.to_lowercase();
        self.extensions.iter().any(|e| *e == lower)
    }

    /// Replace the allow-list with a user-supplied set
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = extensions
            .into_iter()
            .filter_map(|e| normalize_extension(e.as_ref()))
            .collect();
        self
    }
}

/// Lowercase an extension and strip a leading dot; empty input yields None
fn normalize_extension(raw: &str) -> Option<String> {
    let ext = raw.trim().trim_start_matches('.').to_lowercase();
    if ext.is_empty() {
        None
    } else {
        Some(ext)
    }
}
