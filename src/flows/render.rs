//! Fragment rendering
//!
//! Turns a collected file into a Markdown fragment: a path heading followed
//! by a fenced block tagged with the file extension.
//!
//! Content is embedded verbatim. A file that itself contains a fence line
//! closes the block early in the rendered output; the raw bytes are kept
//! unchanged for downstream consumers.

use crate::core::model::{Fragment, SourceFile};
use crate::core::util::count_words;

const FENCE: &str = "```";

/// Render the Markdown text for one file
pub fn render_text(file: &SourceFile) -> String {
    let mut out = String::with_capacity(
        file.relative_path.len() + file.extension.len() + file.content.len() + 16,
    );
    out.push_str("# ");
    out.push_str(&file.relative_path);
    out.push_str("\n\n");
    out.push_str(FENCE);
    out.push_str(&file.extension);
    out.push('\n');
    out.push_str(&file.content);
    out.push('\n');
    out.push_str(FENCE);
    out.push_str("\n\n");
    out
}

/// Render a file into a fragment with its word count, releasing its content
pub fn render_fragment(file: SourceFile) -> Fragment {
    let text = render_text(&file);
    let words = count_words(&text);
    Fragment {
        relative_path: file.relative_path,
        text,
        words,
    }
}

/// Render files in order
pub fn render_all(files: Vec<SourceFile>) -> Vec<Fragment> {
    files.into_iter().map(render_fragment).collect()
}
