//! ATX heading extraction
//!
//! Recognizes `#` through `######` headings outside fenced code blocks:
//!
//! ```text
//! # Title
//!   ## Section ##
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// ATX heading line: up to three spaces, 1-6 hashes, then text and an
/// optional closing hash run
static HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^ {0,3}(#{1,6})(?:[ \t]+(.*?))??(?:[ \t]+#+)?[ \t]*$")
        .expect("Invalid HEADING_RE regex")
});

/// Opening or closing fence of a fenced code block
static FENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ {0,3}(`{3,}|~{3,})").expect("Invalid FENCE_RE regex"));

/// A heading found in a markdown document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Number of leading '#' characters
    pub level: u8,
    pub text: String,
}

impl Heading {
    pub fn new(level: u8, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}

/// Extract all ATX headings in document order
pub fn extract_headings(content: &str) -> Vec<Heading> {
    let mut headings = Vec::new();
    // Active fence: marker character and run length
    let mut fence: Option<(char, usize)> = None;

    for line in content.lines() {
        if let Some(caps) = FENCE_RE.captures(line) {
            let marker = &caps[1];
            let ch = marker.chars().next().unwrap_or('`');
            match fence {
                None => {
                    fence = Some((ch, marker.len()));
                    continue;
                }
                Some((open_ch, open_len)) => {
                    // Closing fences carry no info string
                    let rest = line.trim_start()[marker.len()..].trim();
                    if ch == open_ch && marker.len() >= open_len && rest.is_empty() {
                        fence = None;
                    }
                    continue;
                }
            }
        }

        if fence.is_some() {
            continue;
        }

        if let Some(caps) = HEADING_RE.captures(line) {
            let level = caps[1].len() as u8;
            let text = caps.get(2).map(|m| m.as_str().trim()).unwrap_or("");
            headings.push(Heading::new(level, text));
        }
    }

    headings
}

/// First level-1 heading, if any
pub fn top_level_heading(headings: &[Heading]) -> Option<&Heading> {
    headings.iter().find(|h| h.level == 1)
}
