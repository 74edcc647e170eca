//! Digest flow - Repository to Markdown documents
//!
//! Fetch → collect → render → chunk, with the scratch clone released on
//! every exit path.

use anyhow::{Context, Result};
use colored::Colorize;

use crate::backends::collect::collect_files;
use crate::backends::git::{clone_shallow, is_git_available, FetchError, Scratch};
use crate::core::config::DigestConfig;
use crate::core::model::DigestReport;
use crate::core::paths::repo_name_from_location;
use crate::flows::chunk::{plan_documents, write_documents};
use crate::flows::render::render_all;

/// How a digest run ended
#[derive(Debug)]
pub enum DigestOutcome {
    /// Documents were written (possibly none)
    Completed(DigestReport),
    /// The clone failed; nothing was collected or written
    FetchFailed(FetchError),
}

/// Run the whole pipeline for one repository location
pub fn digest_repository(
    location: &str,
    config: &DigestConfig,
    announce: bool,
) -> Result<DigestOutcome> {
    if !is_git_available() {
        anyhow::bail!("git is not installed or not on PATH");
    }

    let scratch = Scratch::create(config.scratch_parent.as_deref())
        .context("Failed to create scratch directory")?;

    // Early returns and panics inside are covered by Scratch's Drop
    let outcome = digest_into(location, config, &scratch, announce);

    // Failure to remove is logged by close(); it does not change the outcome
    let _ = scratch.close();
    outcome
}

fn digest_into(
    location: &str,
    config: &DigestConfig,
    scratch: &Scratch,
    announce: bool,
) -> Result<DigestOutcome> {
    match clone_shallow(location, scratch.path(), config.clone_timeout) {
        Ok(()) => {}
        Err(e) if e.is_reported() => return Ok(DigestOutcome::FetchFailed(e)),
        Err(e) => return Err(e).context("Failed to clone repository"),
    }

    let repo_name = repo_name_from_location(location);
    let files = collect_files(scratch.path(), config)?;
    let files_collected = files.len();
    // Each stage consumes the previous one, so content is held once
    let fragments = render_all(files);
    let documents = plan_documents(fragments, config.max_words);

    tracing::info!(
        repo_name = %repo_name,
        files = files_collected,
        documents = documents.len(),
        max_words = config.max_words,
        "Planned documents"
    );

    let written = write_documents(&documents, &repo_name, &config.output_dir, announce)?;

    Ok(DigestOutcome::Completed(DigestReport {
        repository: location.to_string(),
        repo_name,
        files_collected,
        max_words: config.max_words,
        documents: written,
        generated_at: chrono::Utc::now().to_rfc3339(),
    }))
}

/// Run the digest command
pub fn run_digest(location: &str, config: &DigestConfig, json: bool) -> Result<()> {
    match digest_repository(location, config, !json)? {
        DigestOutcome::Completed(report) => {
            if report.documents.is_empty() {
                tracing::info!(repository = location, "No matching files; nothing written");
            } else {
                tracing::info!(
                    documents = report.documents.len(),
                    words = report.total_words(),
                    "Digest finished"
                );
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
        }
        DigestOutcome::FetchFailed(e) => {
            // Reported, not propagated: the process still exits 0
            eprintln!("{} {}", "Error cloning repository:".red(), e);
        }
    }

    Ok(())
}
