//! Core module - Contains the fundamental data structures and utilities
//!
//! This module provides:
//! - Pipeline data model (SourceFile, Fragment, OutputDocument, reports)
//! - Digest configuration
//! - Path normalization and naming utilities
//! - Permissive file reading
//! - Word counting and hashing

pub mod config;
pub mod file_reader;
pub mod model;
pub mod paths;
pub mod util;
