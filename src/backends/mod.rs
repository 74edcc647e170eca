//! Backends module - External tool integrations and file operations
//!
//! Provides:
//! - git: Shallow clone into an owned scratch directory
//! - collect: Allow-listed file collection with walkdir

pub mod collect;
pub mod git;
