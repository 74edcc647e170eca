//! Flows module - Multi-stage operations built from the backends
//!
//! Provides:
//! - render: File to Markdown fragment
//! - chunk: Word-bounded grouping and writing of fragments
//! - digest: The full clone-to-documents pipeline

pub mod chunk;
pub mod digest;
pub mod render;
