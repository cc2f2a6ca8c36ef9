mod docx_adapter;
mod extractor_registry;
mod pdf_adapter;
mod text_sanitizer;
mod word_window_splitter;

pub use docx_adapter::DocxAdapter;
pub use extractor_registry::ExtractorRegistry;
pub use pdf_adapter::PdfAdapter;
pub use text_sanitizer::sanitize_extracted_text;
pub use word_window_splitter::{DEFAULT_CHUNK_SIZE, WordWindowSplitter};
