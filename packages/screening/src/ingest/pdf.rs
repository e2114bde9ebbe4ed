//! PDF text extraction via lopdf.

use std::path::Path;

use async_trait::async_trait;

use crate::error::IngestError;
use crate::ingest::{DocumentReader, ParsedDocument};

/// Reads PDFs page by page. A page that fails to extract degrades to
/// empty text; a document that fails to open is surfaced as
/// `UnreadableDocument` for the ingest layer to degrade.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfReader;

impl PdfReader {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DocumentReader for PdfReader {
    async fn read(&self, path: &Path) -> Result<ParsedDocument, IngestError> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let doc = lopdf::Document::load(path).map_err(|e| IngestError::UnreadableDocument {
            file: file_name.clone(),
            reason: e.to_string(),
        })?;

        let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
        let mut texts = Vec::with_capacity(page_numbers.len());
        for page in &page_numbers {
            match doc.extract_text(&[*page]) {
                Ok(text) => texts.push(text),
                Err(e) => {
                    tracing::warn!(file = %file_name, page, error = %e, "page text extraction failed, degrading to empty");
                    texts.push(String::new());
                }
            }
        }

        Ok(ParsedDocument {
            file: file_name,
            pages: page_numbers.len(),
            text: texts.join("\n"),
        })
    }
}
