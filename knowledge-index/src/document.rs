use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::IndexResult;

/// A guideline document (or document chunk) prepared for indexing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuidelineDocument {
    pub id: String,
    pub title: String,
    pub content: String,
    pub source: String,
}

/// Reads guideline files and splits them into overlapping chunks
///
/// Overlap between consecutive chunks keeps clinical context that would
/// otherwise be cut at a chunk boundary.
#[derive(Debug, Clone)]
pub struct DocumentProcessor {
    pub chunk_size: usize,
    pub overlap: usize,
}

impl DocumentProcessor {
    pub fn new() -> Self {
        Self {
            chunk_size: 1000,
            overlap: 200,
        }
    }

    /// Read all supported guideline files (`.txt`, `.md`) in a directory.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be read. Unreadable
    /// individual files are skipped with a warning.
    pub fn process_directory(&self, directory: &Path) -> IndexResult<Vec<GuidelineDocument>> {
        let mut documents = Vec::new();

        let mut entries: Vec<_> = std::fs::read_dir(directory)?
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .collect();
        entries.sort();

        for path in entries {
            let is_text = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| matches!(ext.to_ascii_lowercase().as_str(), "txt" | "md"))
                .unwrap_or(false);
            if !is_text {
                debug!(file = %path.display(), "Skipping unsupported file");
                continue;
            }

            match std::fs::read_to_string(&path) {
                Ok(content) => documents.push(document_from_file(&path, content)),
                Err(err) => {
                    warn!(file = %path.display(), error = %err, "Failed to read guideline file");
                }
            }
        }

        info!(count = documents.len(), directory = %directory.display(), "Processed guideline documents");
        Ok(documents)
    }

    /// Split a document into overlapping chunks for search indexing.
    pub fn chunk_document(&self, document: &GuidelineDocument) -> Vec<GuidelineDocument> {
        let content: Vec<char> = document.content.chars().collect();

        if content.len() <= self.chunk_size {
            return vec![GuidelineDocument {
                id: format!("{}_chunk_0", document.source),
                title: document.title.clone(),
                content: document.content.clone(),
                source: document.source.clone(),
            }];
        }

        let step = self.chunk_size.saturating_sub(self.overlap).max(1);
        let mut chunks = Vec::new();
        let mut start = 0;
        let mut chunk_idx = 0;

        while start < content.len() {
            let end = (start + self.chunk_size).min(content.len());
            chunks.push(GuidelineDocument {
                id: format!("{}_chunk_{}", document.source, chunk_idx),
                title: document.title.clone(),
                content: content[start..end].iter().collect(),
                source: document.source.clone(),
            });
            start += step;
            chunk_idx += 1;
        }

        debug!(title = %document.title, chunks = chunks.len(), "Document chunked");
        chunks
    }
}

impl Default for DocumentProcessor {
    fn default() -> Self {
        Self::new()
    }
}

fn document_from_file(path: &Path, content: String) -> GuidelineDocument {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown");
    let source = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown")
        .to_string();

    GuidelineDocument {
        id: format!("{}_doc", stem),
        title: title_case(stem),
        content,
        source,
    }
}

/// "chest_pain_protocol" -> "Chest Pain Protocol"
pub(crate) fn title_case(stem: &str) -> String {
    stem.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(content: &str) -> GuidelineDocument {
        GuidelineDocument {
            id: "test_doc".to_string(),
            title: "Test".to_string(),
            content: content.to_string(),
            source: "test.txt".to_string(),
        }
    }

    #[test]
    fn short_document_is_a_single_chunk() {
        let processor = DocumentProcessor::new();
        let chunks = processor.chunk_document(&doc("short content"));
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].id, "test.txt_chunk_0");
    }

    #[test]
    fn long_document_is_chunked_with_overlap() {
        let processor = DocumentProcessor::new();
        let chunks = processor.chunk_document(&doc(&"A".repeat(2500)));
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.content.len() <= 1000);
        }
        // Step is chunk_size - overlap = 800, so chunk 1 starts inside chunk 0.
        assert_eq!(chunks[1].id, "test.txt_chunk_1");
    }

    #[test]
    fn title_case_from_snake_case_stem() {
        assert_eq!(title_case("chest_pain_protocol"), "Chest Pain Protocol");
    }
}
