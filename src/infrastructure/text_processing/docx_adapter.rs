use std::io::{Cursor, Read};

use async_trait::async_trait;
use quick_xml::Reader;
use quick_xml::events::Event;
use zip::ZipArchive;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{Document, FormatTag};

use super::text_sanitizer::sanitize_extracted_text;

const DOCUMENT_PART: &str = "word/document.xml";

/// Extracts paragraph text from Office Open XML word-processing documents.
///
/// Paragraphs (`w:p`) are emitted in document order, one per line. Tabs and
/// line breaks inside a paragraph become whitespace.
#[derive(Default)]
pub struct DocxAdapter;

impl DocxAdapter {
    pub fn new() -> Self {
        Self
    }

    fn read_document_part(data: &[u8]) -> Result<String, FileLoaderError> {
        let mut archive = ZipArchive::new(Cursor::new(data)).map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("not a valid DOCX archive: {e}"))
        })?;

        let mut part = archive.by_name(DOCUMENT_PART).map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("missing {DOCUMENT_PART}: {e}"))
        })?;

        let mut xml = String::new();
        part.read_to_string(&mut xml).map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("failed to read {DOCUMENT_PART}: {e}"))
        })?;

        Ok(xml)
    }

    /// Paragraphs in reading order. A paragraph nested in a text box splits
    /// its enclosing paragraph: the text before the box, the box, then the
    /// rest. `mc:Fallback` repeats its `mc:Choice` sibling and is skipped.
    fn parse_paragraphs(xml: &str) -> Result<Vec<String>, FileLoaderError> {
        let mut reader = Reader::from_str(xml);
        let mut paragraphs = Vec::new();
        let mut current = String::new();
        let mut in_text_run = false;
        let mut fallback_depth = 0usize;

        loop {
            let event = reader.read_event();

            if fallback_depth > 0 {
                match event {
                    Ok(Event::Start(_)) => fallback_depth += 1,
                    Ok(Event::End(_)) => fallback_depth -= 1,
                    Ok(Event::Eof) => break,
                    Err(e) => {
                        return Err(FileLoaderError::ExtractionFailed(format!(
                            "malformed {DOCUMENT_PART} at byte {}: {e}",
                            reader.buffer_position()
                        )));
                    }
                    Ok(_) => {}
                }
                continue;
            }

            match event {
                Ok(Event::Start(e)) => match e.local_name().as_ref() {
                    b"t" => in_text_run = true,
                    b"Fallback" => fallback_depth = 1,
                    b"p" if !current.is_empty() => {
                        paragraphs.push(std::mem::take(&mut current));
                    }
                    _ => {}
                },
                Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                    b"tab" => current.push('\t'),
                    b"br" | b"cr" => current.push('\n'),
                    b"p" => paragraphs.push(std::mem::take(&mut current)),
                    _ => {}
                },
                Ok(Event::Text(text)) if in_text_run => {
                    let unescaped = text.unescape().map_err(|e| {
                        FileLoaderError::ExtractionFailed(format!("malformed text run: {e}"))
                    })?;
                    current.push_str(&unescaped);
                }
                Ok(Event::End(e)) => match e.local_name().as_ref() {
                    b"t" => in_text_run = false,
                    b"p" => paragraphs.push(std::mem::take(&mut current)),
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(FileLoaderError::ExtractionFailed(format!(
                        "malformed {DOCUMENT_PART} at byte {}: {e}",
                        reader.buffer_position()
                    )));
                }
                Ok(_) => {}
            }
        }

        Ok(paragraphs)
    }
}

#[async_trait]
impl FileLoader for DocxAdapter {
    fn supports(&self, format: &FormatTag) -> bool {
        *format == FormatTag::docx()
    }

    #[tracing::instrument(
        skip(self, data),
        fields(source_key = %document.source_key, size_bytes = document.size_bytes)
    )]
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        if !self.supports(&document.format) {
            return Err(FileLoaderError::UnsupportedFormat(document.format.to_string()));
        }

        let xml = Self::read_document_part(data)?;
        let paragraphs = Self::parse_paragraphs(&xml)?;
        let paragraph_count = paragraphs.len();

        let text = paragraphs
            .iter()
            .map(|p| sanitize_extracted_text(p))
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        tracing::info!(paragraph_count, chars = text.len(), "DOCX text extraction complete");

        Ok(text)
    }
}
