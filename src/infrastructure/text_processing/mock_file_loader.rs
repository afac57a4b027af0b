use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::Document;

/// Returns the bytes as text, or fails for every file when built with
/// [`MockFileLoader::failing`].
#[derive(Default)]
pub struct MockFileLoader {
    fail_with: Option<String>,
}

impl MockFileLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            fail_with: Some(reason.into()),
        }
    }
}

#[async_trait::async_trait]
impl FileLoader for MockFileLoader {
    async fn extract_text(&self, data: &[u8], _doc: &Document) -> Result<String, FileLoaderError> {
        if let Some(reason) = &self.fail_with {
            return Err(FileLoaderError::ExtractionFailed(reason.clone()));
        }
        String::from_utf8(data.to_vec())
            .map_err(|e| FileLoaderError::ExtractionFailed(e.to_string()))
    }
}
