//! Chunk writer - Word-bounded output documents
//!
//! Fragments are grouped, in order, into documents whose word count stays
//! within a budget. A fragment that alone exceeds the budget still gets a
//! document of its own; it is never split.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;

use crate::core::model::{Fragment, OutputDocument, WrittenDocument};
use crate::core::paths::document_file_name;
use crate::core::util::hash_bytes;

/// Partition fragments into documents under `max_words`.
///
/// A new document is opened before a fragment whenever the current document
/// already holds content and adding the fragment would exceed the budget.
pub fn plan_documents(fragments: Vec<Fragment>, max_words: usize) -> Vec<OutputDocument> {
    let mut documents = Vec::new();
    let mut current = OutputDocument::new(1);

    for fragment in fragments {
        if !current.is_empty() && current.words + fragment.words > max_words {
            let next = OutputDocument::new(current.sequence + 1);
            documents.push(std::mem::replace(&mut current, next));
        }
        current.push(&fragment);
    }

    if !current.is_empty() {
        documents.push(current);
    }

    documents
}

/// Write documents as `super_<repo>_<n>.md` under `output_dir`
pub fn write_documents(
    documents: &[OutputDocument],
    repo_name: &str,
    output_dir: &Path,
    announce: bool,
) -> Result<Vec<WrittenDocument>> {
    if !documents.is_empty() {
        fs::create_dir_all(output_dir).with_context(|| {
            format!("Failed to create output directory {}", output_dir.display())
        })?;
    }

    let mut written = Vec::with_capacity(documents.len());

    for doc in documents {
        let file_name = document_file_name(repo_name, doc.sequence);
        let path = output_dir.join(&file_name);
        fs::write(&path, &doc.text)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        tracing::info!(
            path = %path.display(),
            words = doc.words,
            fragments = doc.fragments,
            "Wrote document"
        );
        if announce {
            println!("Content has been saved in '{}'.", file_name.green());
        }

        written.push(WrittenDocument {
            path: path.to_string_lossy().into_owned(),
            sequence: doc.sequence,
            words: doc.words,
            fragments: doc.fragments,
            bytes: doc.text.len() as u64,
            hash: hash_bytes(doc.text.as_bytes()),
        });
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn fragment(path: &str, words: usize) -> Fragment {
        let body = vec!["w"; words].join(" ");
        Fragment {
            relative_path: path.to_string(),
            text: format!("{body}\n"),
            words,
        }
    }

    fn layout(documents: &[OutputDocument]) -> Vec<(usize, usize, usize)> {
        documents
            .iter()
            .map(|d| (d.sequence, d.fragments, d.words))
            .collect()
    }

    #[test]
    fn test_plan_no_fragments_no_documents() {
        assert!(plan_documents(Vec::new(), 10).is_empty());
    }

    #[test]
    fn test_plan_fits_in_one_document() {
        let fragments = vec![fragment("a", 3), fragment("b", 4), fragment("c", 5)];
        let docs = plan_documents(fragments.clone(), 12);
        assert_eq!(layout(&docs), vec![(1, 3, 12)]);
    }

    #[test]
    fn test_plan_scenario_two_documents() {
        // src/main.py = 10 words, README.md = 5 words, budget 12
        let fragments = vec![fragment("src/main.py", 10), fragment("README.md", 5)];
        let docs = plan_documents(fragments.clone(), 12);
        assert_eq!(layout(&docs), vec![(1, 1, 10), (2, 1, 5)]);
        assert_eq!(docs[0].text, fragments[0].text);
        assert_eq!(docs[1].text, fragments[1].text);
    }

    #[test]
    fn test_plan_oversized_single_fragment() {
        let fragments = vec![fragment("huge", 50)];
        let docs = plan_documents(fragments.clone(), 12);
        assert_eq!(layout(&docs), vec![(1, 1, 50)]);
    }

    #[test]
    fn test_plan_oversized_fragment_between_small_ones() {
        let fragments = vec![fragment("a", 2), fragment("huge", 50), fragment("b", 2)];
        let docs = plan_documents(fragments.clone(), 10);
        assert_eq!(layout(&docs), vec![(1, 1, 2), (2, 1, 50), (3, 1, 2)]);
    }

    #[test]
    fn test_plan_budget_boundary_is_inclusive() {
        let fragments = vec![fragment("a", 6), fragment("b", 6), fragment("c", 1)];
        let docs = plan_documents(fragments.clone(), 12);
        assert_eq!(layout(&docs), vec![(1, 2, 12), (2, 1, 1)]);
    }

    #[test]
    fn test_plan_preserves_order_and_every_fragment() {
        let fragments: Vec<_> = (0..20).map(|i| fragment(&format!("f{i}"), i % 7 + 1)).collect();
        let docs = plan_documents(fragments.clone(), 9);

        let joined: String = docs.iter().map(|d| d.text.as_str()).collect();
        let expected: String = fragments.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(joined, expected);
        assert_eq!(docs.iter().map(|d| d.fragments).sum::<usize>(), 20);

        for (i, doc) in docs.iter().enumerate() {
            assert_eq!(doc.sequence, i + 1);
            assert!(doc.words <= 9 || doc.fragments == 1);
        }
    }

    #[test]
    fn test_write_documents_names_and_content() {
        let temp = tempdir().unwrap();
        let fragments = vec![fragment("a", 10), fragment("b", 5)];
        let docs = plan_documents(fragments.clone(), 12);

        let written = write_documents(&docs, "widget", temp.path(), false).unwrap();
        assert_eq!(written.len(), 2);

        let first = fs::read_to_string(temp.path().join("super_widget_1.md")).unwrap();
        let second = fs::read_to_string(temp.path().join("super_widget_2.md")).unwrap();
        assert_eq!(first, fragments[0].text);
        assert_eq!(second, fragments[1].text);

        assert_eq!(written[0].sequence, 1);
        assert_eq!(written[0].words, 10);
        assert_eq!(written[1].bytes, fragments[1].text.len() as u64);
        assert_eq!(written[1].hash, hash_bytes(fragments[1].text.as_bytes()));
    }

    #[test]
    fn test_write_documents_creates_output_dir() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("nested/out");
        let docs = plan_documents(vec![fragment("a", 1)], 10);

        write_documents(&docs, "repo", &out, false).unwrap();
        assert!(out.join("super_repo_1.md").exists());
    }

    #[test]
    fn test_write_no_documents_touches_nothing() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("never");
        let written = write_documents(&[], "repo", &out, false).unwrap();
        assert!(written.is_empty());
        assert!(!out.exists());
    }
}
