//! Leaf values carried by a flat form.

/// Default media type for file parts that declare none.
pub const DEFAULT_MEDIA_TYPE: &str = "application/octet-stream";

/// A binary file payload with optional name and media type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileBlob {
    /// Original file name, if known.
    pub filename: Option<String>,
    /// Declared media type; [`DEFAULT_MEDIA_TYPE`] applies when absent.
    pub media_type: Option<String>,
    /// Raw file bytes.
    pub bytes: Vec<u8>,
}

impl FileBlob {
    /// Create a blob from raw bytes with no name or media type.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: None,
            media_type: None,
            bytes: bytes.into(),
        }
    }

    /// Set the file name.
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Set the media type.
    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    /// Media type to put on the wire.
    pub fn content_type(&self) -> &str {
        self.media_type.as_deref().unwrap_or(DEFAULT_MEDIA_TYPE)
    }

    /// Fill in the media type from the payload's magic bytes when the
    /// caller supplied none. Unrecognized content keeps the default.
    pub fn detect_media_type(mut self) -> Self {
        if self.media_type.is_none() {
            if let Some(kind) = infer::get(&self.bytes) {
                self.media_type = Some(kind.mime_type().to_string());
            }
        }
        self
    }
}

/// One leaf value in a flat form: either UTF-8 text or a binary file.
#[derive(Debug, Clone, PartialEq)]
pub enum FormValue {
    Text(String),
    File(FileBlob),
}

impl FormValue {
    /// The text content, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FormValue::Text(s) => Some(s),
            FormValue::File(_) => None,
        }
    }

    /// The file payload, if this is a file value.
    pub fn as_file(&self) -> Option<&FileBlob> {
        match self {
            FormValue::Text(_) => None,
            FormValue::File(blob) => Some(blob),
        }
    }

    /// Whether this value is a binary file.
    pub fn is_file(&self) -> bool {
        matches!(self, FormValue::File(_))
    }
}

impl From<String> for FormValue {
    fn from(s: String) -> Self {
        FormValue::Text(s)
    }
}

impl From<&str> for FormValue {
    fn from(s: &str) -> Self {
        FormValue::Text(s.to_string())
    }
}

impl From<FileBlob> for FormValue {
    fn from(blob: FileBlob) -> Self {
        FormValue::File(blob)
    }
}
