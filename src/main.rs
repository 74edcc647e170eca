//! supermd - Fold a repository into word-bounded Markdown documents
//!
//! supermd provides:
//! - Shallow clone of any git location into a self-cleaning scratch directory
//! - Allow-listed file collection in a deterministic order
//! - Rendering into `# path` + fenced-code fragments, split by word budget
//! - An `organize` utility that files markdown by its top-level heading

use anyhow::Result;
use clap::Parser;

mod backends;
mod cli;
mod core;
mod flows;
mod organize;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::run(cli)
}
