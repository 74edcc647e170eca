//! File collection backend
//!
//! Walks a checkout with walkdir, pruning `.git` at every level, and reads
//! every allow-listed file into a [`SourceFile`].

use anyhow::{Context, Result};
use std::cmp::Ordering;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

use crate::core::config::DigestConfig;
use crate::core::file_reader::read_text_lossy;
use crate::core::model::SourceFile;
use crate::core::paths::{is_vcs_dir, make_relative};

/// Files before directories, then by name.
///
/// With depth-first traversal this yields each directory's files before any
/// of its subdirectories are entered.
fn walk_order(a: &DirEntry, b: &DirEntry) -> Ordering {
    let a_dir = a.file_type().is_dir();
    let b_dir = b.file_type().is_dir();
    a_dir
        .cmp(&b_dir)
        .then_with(|| a.file_name().cmp(b.file_name()))
}

/// Extension of a path without the dot, as spelled on disk
fn file_extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

/// Collect all allow-listed files under `root`, in traversal order
pub fn collect_files(root: &Path, config: &DigestConfig) -> Result<Vec<SourceFile>> {
    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by(walk_order)
        .into_iter()
        // Prune during traversal so nested metadata dirs are never entered
        .filter_entry(|entry| !(entry.file_type().is_dir() && is_vcs_dir(entry.path())));

    let mut files = Vec::new();

    for entry in walker {
        let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
        let path = entry.path();

        // Regular files only; symlinks may point outside the checkout
        if !entry.file_type().is_file() {
            if entry.path_is_symlink() {
                tracing::debug!(path = %path.display(), "Skipping symlink");
            }
            continue;
        }

        let extension = match file_extension(path) {
            Some(ext) if config.allows_extension(ext) => ext.to_string(),
            _ => continue,
        };

        let relative = match make_relative(path, root) {
            Some(r) => r,
            None => continue,
        };

        let decoded = read_text_lossy(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if decoded.is_lossy() {
            tracing::debug!(
                path = %relative,
                dropped_bytes = decoded.dropped_bytes,
                "Dropped undecodable bytes"
            );
        }

        tracing::debug!(path = %relative, bytes = decoded.content.len(), "Collected file");
        files.push(SourceFile::new(relative, extension, decoded.content));
    }

    tracing::info!(root = %root.display(), count = files.len(), "Collected files");
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_file(path: &Path, content: &[u8]) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn paths(files: &[SourceFile]) -> Vec<&str> {
        files.iter().map(|f| f.relative_path.as_str()).collect()
    }

    #[test]
    fn test_collect_empty_dir() {
        let temp = tempdir().unwrap();
        let files = collect_files(temp.path(), &DigestConfig::default()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_collect_filters_by_extension() {
        let temp = tempdir().unwrap();
        write_file(&temp.path().join("main.py"), b"print(1)");
        write_file(&temp.path().join("notes.txt"), b"skip me");
        write_file(&temp.path().join("Cargo.toml"), b"[package]");
        write_file(&temp.path().join("Makefile"), b"all:");
        write_file(&temp.path().join(".bashrc"), b"export X=1");

        let files = collect_files(temp.path(), &DigestConfig::default()).unwrap();
        assert_eq!(paths(&files), vec!["main.py"]);
        assert_eq!(files[0].extension, "py");
        assert_eq!(files[0].content, "print(1)");
    }

    #[test]
    fn test_collect_extension_case_insensitive_keeps_spelling() {
        let temp = tempdir().unwrap();
        write_file(&temp.path().join("README.MD"), b"# Title");

        let files = collect_files(temp.path(), &DigestConfig::default()).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].extension, "MD");
    }

    #[test]
    fn test_collect_skips_nested_vcs_dirs() {
        let temp = tempdir().unwrap();
        write_file(&temp.path().join(".git/hooks/pre-commit.sh"), b"#!/bin/sh");
        write_file(&temp.path().join("vendor/lib/.git/info.md"), b"meta");
        write_file(&temp.path().join("vendor/lib/lib.rs"), b"pub fn f() {}");
        write_file(&temp.path().join(".github/workflows/ci.sh"), b"echo ci");

        let files = collect_files(temp.path(), &DigestConfig::default()).unwrap();
        assert_eq!(paths(&files), vec![".github/workflows/ci.sh", "vendor/lib/lib.rs"]);
    }

    #[test]
    fn test_collect_order_files_before_subdirs() {
        let temp = tempdir().unwrap();
        write_file(&temp.path().join("b.rs"), b"b");
        write_file(&temp.path().join("a/z.rs"), b"z");
        write_file(&temp.path().join("a/inner/y.rs"), b"y");
        write_file(&temp.path().join("a/c.rs"), b"c");
        write_file(&temp.path().join("c.rs"), b"c");

        let files = collect_files(temp.path(), &DigestConfig::default()).unwrap();
        assert_eq!(
            paths(&files),
            vec!["b.rs", "c.rs", "a/c.rs", "a/z.rs", "a/inner/y.rs"]
        );
    }

    #[test]
    fn test_collect_relative_paths() {
        let temp = tempdir().unwrap();
        write_file(&temp.path().join("src/deep/mod.rs"), b"mod x;");

        let files = collect_files(temp.path(), &DigestConfig::default()).unwrap();
        assert_eq!(files[0].relative_path, "src/deep/mod.rs");
        assert!(!files[0].relative_path.starts_with('/'));
    }

    #[test]
    fn test_collect_drops_invalid_bytes() {
        let temp = tempdir().unwrap();
        write_file(&temp.path().join("broken.js"), b"let a\xff = 1;");

        let files = collect_files(temp.path(), &DigestConfig::default()).unwrap();
        assert_eq!(files[0].content, "let a = 1;");
    }

    #[test]
    fn test_collect_custom_extensions() {
        let temp = tempdir().unwrap();
        write_file(&temp.path().join("Cargo.toml"), b"[package]");
        write_file(&temp.path().join("main.rs"), b"fn main() {}");

        let config = DigestConfig::default().with_extensions(["toml"]);
        let files = collect_files(temp.path(), &config).unwrap();
        assert_eq!(paths(&files), vec!["Cargo.toml"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_collect_skips_symlinks() {
        let temp = tempdir().unwrap();
        let outside = tempdir().unwrap();
        write_file(&outside.path().join("ext.rs"), b"outside");
        write_file(&temp.path().join("real.rs"), b"real");
        std::os::unix::fs::symlink(temp.path().join("real.rs"), temp.path().join("link.rs"))
            .unwrap();
        std::os::unix::fs::symlink(outside.path(), temp.path().join("linked_dir")).unwrap();
        std::os::unix::fs::symlink(temp.path().join("gone.rs"), temp.path().join("dangling.rs"))
            .unwrap();

        let files = collect_files(temp.path(), &DigestConfig::default()).unwrap();
        assert_eq!(paths(&files), vec!["real.rs"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_collect_never_reads_outside_root() {
        let clone = tempdir().unwrap();
        let home = tempdir().unwrap();
        write_file(&home.path().join("credentials"), b"AWS_SECRET=hunter2");
        write_file(&clone.path().join("main.py"), b"print(1)");
        std::os::unix::fs::symlink(
            home.path().join("credentials"),
            clone.path().join("leak.md"),
        )
        .unwrap();

        let files = collect_files(clone.path(), &DigestConfig::default()).unwrap();
        assert_eq!(paths(&files), vec!["main.py"]);
        assert!(files.iter().all(|f| !f.content.contains("AWS_SECRET")));
    }
}
