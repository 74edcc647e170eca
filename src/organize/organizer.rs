//! Directory-by-heading organizer
//!
//! Copies every markdown file under a source tree into
//! `<target>/<Top_Level_Heading>/`, named after its first `#` heading.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::core::file_reader::read_text_lossy;
use crate::core::paths::{make_relative, normalize_path};
use crate::organize::headings::{extract_headings, top_level_heading};

/// A single copy made by the organizer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizedFile {
    /// Source path relative to the source root
    pub source: String,
    /// Heading that named the directory
    pub heading: String,
    /// Directory the file was copied into
    pub directory: String,
}

/// Outcome of an organize run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrganizeReport {
    pub organized: Vec<OrganizedFile>,
    /// Markdown files without a level-1 heading
    pub skipped: Vec<String>,
}

/// Directory name for a heading: spaces and path separators become '_'
pub fn heading_dir_name(heading: &str) -> String {
    heading
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' => '_',
            other => other,
        })
        .collect()
}

/// Usable as a single path component under the target
fn is_safe_dir_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".."
}

/// Organize all `.md` files under `source` into `target`
pub fn organize_markdown_files(
    source: &Path,
    target: &Path,
    announce: bool,
) -> Result<OrganizeReport> {
    fs::create_dir_all(target)
        .with_context(|| format!("Failed to create target directory {}", target.display()))?;

    let mut report = OrganizeReport::default();

    let mut entries = WalkDir::new(source).sort_by_file_name().into_iter();
    // Never descend into our own output when target sits under source
    let target_abs = target.canonicalize().ok();

    while let Some(entry) = entries.next() {
        let entry = entry.with_context(|| format!("Failed to walk {}", source.display()))?;
        let path = entry.path();

        if entry.file_type().is_dir() {
            let is_target = match (&target_abs, path.canonicalize()) {
                (Some(t), Ok(p)) => *t == p,
                _ => false,
            };
            if entry.depth() > 0 && is_target {
                entries.skip_current_dir();
            }
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if !name.ends_with(".md") || !path.is_file() {
            continue;
        }

        let relative = make_relative(path, source).unwrap_or_else(|| normalize_path(path));
        let decoded =
            read_text_lossy(path).with_context(|| format!("Failed to read {}", path.display()))?;

        let headings = extract_headings(&decoded.content);
        let heading = match top_level_heading(&headings) {
            Some(h) => h.text.clone(),
            None => {
                tracing::debug!(path = %relative, "No top-level heading; skipping");
                report.skipped.push(relative);
                continue;
            }
        };

        let dir_name = heading_dir_name(&heading);
        if !is_safe_dir_name(&dir_name) {
            tracing::debug!(path = %relative, heading = %heading, "Unusable heading; skipping");
            report.skipped.push(relative);
            continue;
        }

        let target_dir: PathBuf = target.join(&dir_name);
        fs::create_dir_all(&target_dir)
            .with_context(|| format!("Failed to create {}", target_dir.display()))?;
        fs::copy(path, target_dir.join(entry.file_name())).with_context(|| {
            format!("Failed to copy {} into {}", path.display(), target_dir.display())
        })?;

        if announce {
            println!("Organized {} into {}", name, target_dir.display());
        }
        tracing::debug!(path = %relative, directory = %target_dir.display(), "Organized file");

        report.organized.push(OrganizedFile {
            source: relative,
            heading,
            directory: target_dir.to_string_lossy().into_owned(),
        });
    }

    tracing::info!(
        organized = report.organized.len(),
        skipped = report.skipped.len(),
        "Organize finished"
    );
    Ok(report)
}

/// Run the organize command
pub fn run_organize(source: &Path, target: &Path, json: bool) -> Result<()> {
    let report = organize_markdown_files(source, target, !json)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}
