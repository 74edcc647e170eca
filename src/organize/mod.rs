//! Organize module - Sort markdown files by their top-level heading
//!
//! A standalone utility, independent of the digest pipeline. The heading
//! patterns are compiled on first use by this module only.

pub mod headings;
pub mod organizer;
