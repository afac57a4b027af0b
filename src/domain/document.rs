use std::path::Path;

/// Descriptor of an uploaded file handed to the text extractors.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub filename: String,
    pub content_type: ContentType,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    Text,
    Markdown,
    Docx,
    Pdf,
    /// Anything else; decoded as raw text on a best-effort basis.
    Unknown,
}

impl ContentType {
    pub fn from_filename(filename: &str) -> Self {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match extension.as_deref() {
            Some("txt") => Self::Text,
            Some("md") | Some("markdown") => Self::Markdown,
            Some("docx") => Self::Docx,
            Some("pdf") => Self::Pdf,
            _ => Self::Unknown,
        }
    }

    pub fn as_mime(&self) -> &'static str {
        match self {
            Self::Text => "text/plain",
            Self::Markdown => "text/markdown",
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            Self::Pdf => "application/pdf",
            Self::Unknown => "application/octet-stream",
        }
    }
}

impl Document {
    pub fn new(filename: String, size_bytes: u64) -> Self {
        let content_type = ContentType::from_filename(&filename);
        Self {
            filename,
            content_type,
            size_bytes,
        }
    }
}
