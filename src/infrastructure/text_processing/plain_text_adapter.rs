use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{ContentType, Document};

const UTF8_BOM: &str = "\u{feff}";

/// Decodes bytes as UTF-8, replacing invalid sequences.
///
/// Also serves as the fallback for unrecognised extensions, where garbled
/// output is accepted.
pub struct PlainTextAdapter;

#[async_trait]
impl FileLoader for PlainTextAdapter {
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, FileLoaderError> {
        match document.content_type {
            ContentType::Text | ContentType::Markdown | ContentType::Unknown => {}
            other => {
                return Err(FileLoaderError::UnsupportedContentType(
                    other.as_mime().to_string(),
                ));
            }
        }

        let text = String::from_utf8_lossy(data);
        Ok(text.strip_prefix(UTF8_BOM).unwrap_or(&text).to_string())
    }
}
