use std::io::{Cursor, Write};
use std::sync::Arc;

use futures::future::join_all;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::application::ports::SourceFetcher;

pub const EXPORT_ARCHIVE_NAME: &str = "docuchat-source-code.zip";

/// Files bundled by the "download code" action, relative to the project root.
pub const EXPORT_PATHS: &[&str] = &[
    "Cargo.toml",
    "appsettings.toml",
    "src/main.rs",
    "src/lib.rs",
    "src/domain/mod.rs",
    "src/domain/chat_session.rs",
    "src/domain/document.rs",
    "src/domain/message.rs",
    "src/domain/message_role.rs",
    "src/domain/session_id.rs",
    "src/application/mod.rs",
    "src/application/ports/mod.rs",
    "src/application/ports/file_loader.rs",
    "src/application/ports/llm_client.rs",
    "src/application/ports/repository_error.rs",
    "src/application/ports/session_repository.rs",
    "src/application/ports/source_fetcher.rs",
    "src/application/services/mod.rs",
    "src/application/services/chat_controller.rs",
    "src/application/services/chat_service.rs",
    "src/application/services/export_service.rs",
    "src/application/services/inference_service.rs",
    "src/application/services/prompt_builder.rs",
    "src/application/services/session_store.rs",
    "src/infrastructure/mod.rs",
    "src/infrastructure/export/mod.rs",
    "src/infrastructure/export/http_source_fetcher.rs",
    "src/infrastructure/export/local_source_fetcher.rs",
    "src/infrastructure/llm/mod.rs",
    "src/infrastructure/llm/mock_llm_client.rs",
    "src/infrastructure/llm/openai_client.rs",
    "src/infrastructure/observability/mod.rs",
    "src/infrastructure/observability/init_tracing.rs",
    "src/infrastructure/observability/prompt_sanitizer.rs",
    "src/infrastructure/observability/request_id.rs",
    "src/infrastructure/observability/tracing_config.rs",
    "src/infrastructure/persistence/mod.rs",
    "src/infrastructure/persistence/in_memory_session_repository.rs",
    "src/infrastructure/persistence/json_file_session_repository.rs",
    "src/infrastructure/text_processing/mod.rs",
    "src/infrastructure/text_processing/composite_file_loader.rs",
    "src/infrastructure/text_processing/docx_adapter.rs",
    "src/infrastructure/text_processing/mock_file_loader.rs",
    "src/infrastructure/text_processing/pdf_adapter.rs",
    "src/infrastructure/text_processing/plain_text_adapter.rs",
    "src/infrastructure/text_processing/text_sanitizer.rs",
    "src/presentation/mod.rs",
    "src/presentation/router.rs",
    "src/presentation/config/mod.rs",
    "src/presentation/config/environment.rs",
    "src/presentation/config/settings.rs",
    "src/presentation/handlers/mod.rs",
    "src/presentation/handlers/chat.rs",
    "src/presentation/handlers/error.rs",
    "src/presentation/handlers/export.rs",
    "src/presentation/handlers/health.rs",
    "src/presentation/handlers/sessions.rs",
    "src/presentation/state/mod.rs",
    "src/presentation/state/app_state.rs",
];

pub struct ExportService {
    fetcher: Arc<dyn SourceFetcher>,
    paths: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ExportArchive {
    pub file_name: String,
    pub bytes: Vec<u8>,
    /// Paths that were replaced by a placeholder.
    pub missing: Vec<String>,
}

impl ExportService {
    pub fn new(fetcher: Arc<dyn SourceFetcher>) -> Self {
        Self::with_paths(fetcher, EXPORT_PATHS.iter().map(|p| p.to_string()).collect())
    }

    pub fn with_paths(fetcher: Arc<dyn SourceFetcher>, paths: Vec<String>) -> Self {
        Self { fetcher, paths }
    }

    /// Builds the archive; a file that cannot be read is stored as a one-line
    /// error comment instead of failing the export.
    #[tracing::instrument(skip(self), fields(file_count = self.paths.len()))]
    pub async fn export(&self) -> Result<ExportArchive, ExportError> {
        let fetches = self.paths.iter().map(|path| async move {
            match self.fetcher.fetch(path).await {
                Ok(content) => (path.as_str(), content, false),
                Err(e) => {
                    tracing::warn!(path = %path, error = %e, "Substituting placeholder for source file");
                    (path.as_str(), placeholder_for(path), true)
                }
            }
        });
        let files = join_all(fetches).await;

        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
        let mut missing = Vec::new();

        for (path, content, is_missing) in files {
            writer.start_file(path, options)?;
            writer.write_all(content.as_bytes())?;
            if is_missing {
                missing.push(path.to_string());
            }
        }

        let bytes = writer.finish()?.into_inner();
        tracing::info!(bytes = bytes.len(), missing = missing.len(), "Source archive built");

        Ok(ExportArchive {
            file_name: EXPORT_ARCHIVE_NAME.to_string(),
            bytes,
            missing,
        })
    }
}

pub fn placeholder_for(path: &str) -> String {
    format!("// Error: Could not load content for {path}")
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("archive: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
