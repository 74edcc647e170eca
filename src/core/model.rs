//! Pipeline data model
//!
//! Every stage of the digest pipeline hands one of these types to the next:
//! collection produces [`SourceFile`]s, rendering turns them into
//! [`Fragment`]s, and chunking groups fragments into [`OutputDocument`]s.

use serde::{Deserialize, Serialize};

/// A collected file, read from the scratch clone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path relative to the repository root, using '/' as separator
    pub relative_path: String,

    /// Extension without the dot, as spelled on disk
    pub extension: String,

    /// Decoded text content
    pub content: String,
}

impl SourceFile {
    pub fn new(
        relative_path: impl Into<String>,
        extension: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            relative_path: relative_path.into(),
            extension: extension.into(),
            content: content.into(),
        }
    }
}

/// A rendered Markdown fragment for one source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub relative_path: String,
    pub text: String,
    /// Whitespace-token count of `text`
    pub words: usize,
}

/// One aggregate document, ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDocument {
    /// 1-based position in flush order
    pub sequence: usize,
    pub text: String,
    pub words: usize,
    /// Number of fragments concatenated into `text`
    pub fragments: usize,
}

impl OutputDocument {
    pub fn new(sequence: usize) -> Self {
        Self {
            sequence,
            text: String::new(),
            words: 0,
            fragments: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fragments == 0
    }

    /// Append a fragment, keeping the running word count
    pub fn push(&mut self, fragment: &Fragment) {
        self.text.push_str(&fragment.text);
        self.words += fragment.words;
        self.fragments += 1;
    }
}

/// Record of a document written to disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WrittenDocument {
    pub path: String,
    pub sequence: usize,
    pub words: usize,
    pub fragments: usize,
    pub bytes: u64,
    /// XXH3 of the document text
    pub hash: String,
}

/// Summary of a completed digest run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigestReport {
    pub repository: String,
    pub repo_name: String,
    pub files_collected: usize,
    pub max_words: usize,
    pub documents: Vec<WrittenDocument>,
    /// RFC 3339 timestamp
    pub generated_at: String,
}

impl DigestReport {
    pub fn total_words(&self) -> usize {
        self.documents.iter().map(|d| d.words).sum()
    }
}
