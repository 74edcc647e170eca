//! CLI module - Command-line interface definitions and handlers

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

use crate::core::config::{DigestConfig, DEFAULT_CLONE_TIMEOUT_SECS, DEFAULT_MAX_WORDS};

/// supermd - fold a repository's source files into word-bounded Markdown documents.
#[derive(Parser, Debug)]
#[command(name = "supermd")]
#[command(
    author,
    version,
    about,
    long_about = r##"supermd shallow-clones a repository, collects its source and documentation
files, and writes them into one or more Markdown documents named
super_<repo>_<n>.md. Each file becomes a "# <path>" heading followed by a
fenced code block; documents are split so none exceeds the word budget.

Examples:
    supermd https://github.com/acme/widget.git
    supermd --max-words 100000 --output-dir out git@github.com:acme/widget.git
    supermd organize docs/ organized/

A local repository at a path named "organize" must be written as ./organize,
since the bare word selects the organize subcommand.
"##
)]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
pub struct Cli {
    /// Repository to digest (URL or path understood by git).
    #[arg(value_name = "REPOSITORY", required = true)]
    pub repository: Option<String>,

    #[command(flatten)]
    pub digest: DigestArgs,

    /// Print a JSON report on stdout instead of progress lines.
    #[arg(
        long,
        global = true,
        long_help = "Print a machine-readable JSON report on stdout instead of the\n\
per-document progress lines."
    )]
    pub json: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (errors only on stderr).
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug diagnostics on stderr).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Options of the digest pipeline
#[derive(Args, Debug)]
pub struct DigestArgs {
    /// Word budget per output document.
    #[arg(
        long,
        value_name = "N",
        default_value_t = DEFAULT_MAX_WORDS as u64,
        value_parser = clap::value_parser!(u64).range(1..),
        long_help = "Word budget per output document. Words are whitespace-separated tokens.\n\n\
A new document starts whenever the next file would push the current one over\n\
the budget. A single file larger than the budget gets a document of its own."
    )]
    pub max_words: u64,

    /// Directory to write documents into.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Parent directory for the temporary clone.
    #[arg(
        long,
        value_name = "DIR",
        long_help = "Parent directory for the temporary clone (defaults to the system temp dir).\n\n\
The clone is always removed before supermd exits."
    )]
    pub scratch_dir: Option<PathBuf>,

    /// Give up on the clone after this many seconds.
    #[arg(
        long,
        value_name = "SECS",
        default_value_t = DEFAULT_CLONE_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub clone_timeout: u64,

    /// Replace the extension allow-list (comma-separated, e.g. 'rs,toml').
    #[arg(long = "ext", value_name = "EXTS", value_delimiter = ',')]
    pub extensions: Vec<String>,
}

impl DigestArgs {
    pub fn to_config(&self) -> DigestConfig {
        let config = DigestConfig {
            max_words: self.max_words as usize,
            output_dir: self.output_dir.clone(),
            scratch_parent: self.scratch_dir.clone(),
            clone_timeout: Duration::from_secs(self.clone_timeout),
            ..Default::default()
        };

        if self.extensions.is_empty() {
            config
        } else {
            config.with_extensions(&self.extensions)
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Copy markdown files into directories named after their top-level heading.
    #[command(
        long_about = "Walk SOURCE for *.md files and copy each one into TARGET/<Heading>/,\n\
where <Heading> is the file's first level-1 heading with spaces replaced by '_'.\n\
Files without a level-1 heading are left alone.\n\n\
This utility is independent of the digest pipeline.\n\n\
Example:\n\
  supermd organize docs/ organized/\n"
    )]
    Organize {
        /// Directory to search for markdown files.
        #[arg(value_name = "SOURCE")]
        source: PathBuf,

        /// Directory to copy organized files into.
        #[arg(value_name = "TARGET")]
        target: PathBuf,
    },
}

/// Install the stderr log subscriber
fn init_tracing(verbose: bool, quiet: bool) {
    let level = if verbose {
        Level::DEBUG
    } else if quiet {
        Level::ERROR
    } else {
        Level::WARN
    };
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .try_init();
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    init_tracing(cli.verbose, cli.quiet);
    if cli.no_color {
        colored::control::set_override(false);
    }

    match cli.command {
        Some(Commands::Organize { source, target }) => {
            crate::organize::organizer::run_organize(&source, &target, cli.json)
        }
        None => {
            let repository = cli
                .repository
                .context("A repository location is required")?;
            let config = cli.digest.to_config();
            crate::flows::digest::run_digest(&repository, &config, cli.json)
        }
    }
}
