use std::sync::Arc;

use docrag::application::ports::{FileLoader, FileLoaderError};
use docrag::domain::{Document, FormatTag};
use docrag::infrastructure::text_processing::ExtractorRegistry;

use crate::support::{Utf8Loader, docx_bytes};

#[test]
fn given_default_registry_then_pdf_and_docx_are_registered() {
    let registry = ExtractorRegistry::with_default_extractors();

    let formats: Vec<&str> = registry.formats().into_iter().map(|f| f.as_str()).collect();

    assert_eq!(formats, vec!["docx", "pdf"]);
    assert!(registry.supports(&FormatTag::from_key("a/b/Report.PDF")));
    assert!(!registry.supports(&FormatTag::new("txt")));
}

#[tokio::test]
async fn given_unregistered_format_when_extracting_then_reports_unsupported_format() {
    let registry = ExtractorRegistry::with_default_extractors();
    let document = Document::new("notes.txt".to_string(), 5);

    let result = registry.extract_text(b"hello", &document).await;

    assert!(matches!(result, Err(FileLoaderError::UnsupportedFormat(ref tag)) if tag == "txt"));
}

#[tokio::test]
async fn given_docx_when_extracting_through_registry_then_dispatches_to_docx_adapter() {
    let registry = ExtractorRegistry::with_default_extractors();
    let data = docx_bytes(&["hello from word"]);
    let document = Document::new("greeting.docx".to_string(), data.len() as u64);

    let text = registry.extract_text(&data, &document).await.unwrap();

    assert_eq!(text, "hello from word");
}

#[tokio::test]
async fn given_registered_custom_format_when_extracting_then_uses_registered_adapter() {
    let registry = ExtractorRegistry::with_default_extractors()
        .register(FormatTag::new("md"), Arc::new(Utf8Loader));
    let document = Document::new("readme.md".to_string(), 7);

    let text = registry.extract_text(b"# Title", &document).await.unwrap();

    assert_eq!(text, "# Title");
    assert_eq!(registry.formats().len(), 3);
}
