//! Path normalization utilities
//!
//! Ensures all paths are normalized to use '/' as separator and are relative to root.

use std::path::Path;

/// Name of the version-control metadata directory pruned during walks
pub const VCS_DIR: &str = ".git";

/// Suffix stripped from the last segment of a repository location
const VCS_SUFFIX: &str = ".git";

/// Normalize a path to use '/' as separator (for cross-platform consistency)
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Make a path relative to the root directory
pub fn make_relative(path: &Path, root: &Path) -> Option<String> {
    path.strip_prefix(root).ok().map(normalize_path)
}

/// Check if a path names the version-control metadata directory
pub fn is_vcs_dir(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name == VCS_DIR)
        .unwrap_or(false)
}

/// Derive a short repository name from a clone location.
///
/// `https://github.com/acme/widget.git` and `git@github.com:acme/widget`
/// both become `widget`.
pub fn repo_name_from_location(location: &str) -> String {
    let trimmed = location.trim_end_matches(['/', '\\']);
    let last = trimmed.rsplit(['/', '\\']).next().unwrap_or(trimmed);
    // scp-like locations without a slash: host:widget.git
    let last = last.rsplit(':').next().unwrap_or(last);
    let name = last.strip_suffix(VCS_SUFFIX).unwrap_or(last);

    if name.is_empty() {
        "repository".to_string()
    } else {
        name.to_string()
    }
}

/// File name of the n-th output document for a repository
pub fn document_file_name(repo_name: &str, sequence: usize) -> String {
    format!("super_{}_{}.md", repo_name, sequence)
}
