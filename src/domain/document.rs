use std::fmt;

/// A stored file about to be ingested. The raw bytes are never kept here.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub source_key: String,
    pub format: FormatTag,
    pub size_bytes: u64,
}

impl Document {
    pub fn new(source_key: String, size_bytes: u64) -> Self {
        Self {
            format: FormatTag::from_key(&source_key),
            source_key,
            size_bytes,
        }
    }
}

/// Lower-cased file extension naming a document format, e.g. `pdf`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FormatTag(String);

impl FormatTag {
    pub fn new(tag: &str) -> Self {
        Self(tag.trim().trim_start_matches('.').to_ascii_lowercase())
    }

    pub fn pdf() -> Self {
        Self::new("pdf")
    }

    pub fn docx() -> Self {
        Self::new("docx")
    }

    /// Derives the tag from the extension of the last path segment of `key`.
    /// Keys without an extension produce an empty tag.
    pub fn from_key(key: &str) -> Self {
        let filename = key.rsplit('/').next().unwrap_or(key);
        let extension = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .unwrap_or_default();
        Self::new(extension)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("<none>")
        } else {
            f.write_str(&self.0)
        }
    }
}
