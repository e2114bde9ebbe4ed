//! Document ingestion - turn a set of document paths into one merged
//! text blob plus advisory founder hints.
//!
//! A missing path is fatal. An unreadable document or page degrades to
//! empty text and the run continues.

pub mod hints;
pub mod pdf;

use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::IngestError;

pub use hints::{guess_founder_info, FounderHint};
pub use pdf::PdfReader;

/// Delimiter between documents in the merged blob.
pub const DOC_DELIMITER: &str = "\n\n---\n\n";

/// One extracted document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedDocument {
    pub file: String,
    pub pages: usize,
    pub text: String,
}

/// The ingestion result consumed by the extraction stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSet {
    pub pages_total: usize,
    pub docs: Vec<ParsedDocument>,
    pub merged_text: String,
    pub founder_hint: FounderHint,
}

/// Reads a single document into text.
///
/// Implementations: `PdfReader` (lopdf). Tests use scripted readers.
#[async_trait]
pub trait DocumentReader: Send + Sync {
    async fn read(&self, path: &Path) -> Result<ParsedDocument, IngestError>;
}

/// Ingest a set of documents, preserving input order.
///
/// Fails with `NotFound` if any path is missing. A document the reader
/// cannot open contributes an empty text body instead of aborting.
pub async fn ingest(
    paths: &[String],
    reader: &dyn DocumentReader,
) -> Result<DocumentSet, IngestError> {
    for path in paths {
        if !Path::new(path).exists() {
            return Err(IngestError::NotFound { path: path.clone() });
        }
    }

    let mut docs = Vec::with_capacity(paths.len());
    for path in paths {
        let path_ref = Path::new(path);
        match reader.read(path_ref).await {
            Ok(doc) => docs.push(doc),
            Err(IngestError::UnreadableDocument { file, reason }) => {
                tracing::warn!(%file, %reason, "document unreadable, degrading to empty text");
                docs.push(ParsedDocument {
                    file,
                    pages: 0,
                    text: String::new(),
                });
            }
            Err(other) => return Err(other),
        }
    }

    let merged_text = docs
        .iter()
        .map(|d| d.text.as_str())
        .collect::<Vec<_>>()
        .join(DOC_DELIMITER);
    let pages_total = docs.iter().map(|d| d.pages).sum();
    let founder_hint = guess_founder_info(&merged_text);

    Ok(DocumentSet {
        pages_total,
        docs,
        merged_text,
        founder_hint,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Scripted reader keyed by file name.
    struct ScriptedReader {
        docs: HashMap<String, ParsedDocument>,
        unreadable: Vec<String>,
    }

    #[async_trait]
    impl DocumentReader for ScriptedReader {
        async fn read(&self, path: &Path) -> Result<ParsedDocument, IngestError> {
            let name = path.file_name().unwrap().to_string_lossy().into_owned();
            if self.unreadable.contains(&name) {
                return Err(IngestError::UnreadableDocument {
                    file: name,
                    reason: "scripted failure".into(),
                });
            }
            Ok(self.docs.get(&name).cloned().unwrap())
        }
    }

    fn touch(dir: &std::path::Path, name: &str) -> String {
        let path = dir.join(name);
        std::fs::write(&path, b"%PDF-stub").unwrap();
        path.to_string_lossy().into_owned()
    }

    #[tokio::test]
    async fn merges_in_input_order_with_delimiter() {
        let dir = std::env::temp_dir().join("screening-ingest-order");
        std::fs::create_dir_all(&dir).unwrap();
        let a = touch(&dir, "a.pdf");
        let b = touch(&dir, "b.pdf");

        let reader = ScriptedReader {
            docs: [
                (
                    "a.pdf".to_string(),
                    ParsedDocument {
                        file: "a.pdf".into(),
                        pages: 2,
                        text: "first deck".into(),
                    },
                ),
                (
                    "b.pdf".to_string(),
                    ParsedDocument {
                        file: "b.pdf".into(),
                        pages: 1,
                        text: "second deck".into(),
                    },
                ),
            ]
            .into_iter()
            .collect(),
            unreadable: vec![],
        };

        let set = ingest(&[a, b], &reader).await.unwrap();
        assert_eq!(set.pages_total, 3);
        assert_eq!(set.merged_text, format!("first deck{}second deck", DOC_DELIMITER));
        assert_eq!(set.docs[0].file, "a.pdf");
    }

    #[tokio::test]
    async fn missing_path_is_fatal() {
        let reader = ScriptedReader {
            docs: HashMap::new(),
            unreadable: vec![],
        };
        let err = ingest(&["/definitely/not/here.pdf".to_string()], &reader)
            .await
            .unwrap_err();
        assert!(matches!(err, IngestError::NotFound { .. }));
    }

    #[tokio::test]
    async fn unreadable_document_degrades_to_empty() {
        let dir = std::env::temp_dir().join("screening-ingest-degrade");
        std::fs::create_dir_all(&dir).unwrap();
        let good = touch(&dir, "good.pdf");
        let bad = touch(&dir, "bad.pdf");

        let reader = ScriptedReader {
            docs: [(
                "good.pdf".to_string(),
                ParsedDocument {
                    file: "good.pdf".into(),
                    pages: 1,
                    text: "Founder: Ada Hart".into(),
                },
            )]
            .into_iter()
            .collect(),
            unreadable: vec!["bad.pdf".to_string()],
        };

        let set = ingest(&[good, bad], &reader).await.unwrap();
        assert_eq!(set.docs.len(), 2);
        assert_eq!(set.docs[1].pages, 0);
        assert!(set.docs[1].text.is_empty());
        // hints still recovered from the readable part
        assert_eq!(set.founder_hint.name.as_deref(), Some("Ada Hart"));
    }
}
