use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use docuchat::application::ports::{FileLoader, LlmClient, SourceFetcher};
use docuchat::application::services::{
    ChatService, ExportService, InferenceService, SessionStore,
};
use docuchat::infrastructure::export::{HttpSourceFetcher, LocalSourceFetcher};
use docuchat::infrastructure::llm::{MockLlmClient, create_llm_client};
use docuchat::infrastructure::observability::{TracingConfig, init_tracing};
use docuchat::infrastructure::persistence::JsonFileSessionRepository;
use docuchat::infrastructure::text_processing::CompositeFileLoader;
use docuchat::presentation::config::{ExportSourceSetting, LlmProvider};
use docuchat::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment)?;

    init_tracing(&TracingConfig::from_settings(
        environment.as_str(),
        &settings.logging,
    ));

    let llm_client: Arc<dyn LlmClient> = match settings.llm.provider {
        LlmProvider::Mock => {
            tracing::warn!("Using mock LLM client");
            Arc::new(MockLlmClient::default())
        }
        _ => Arc::new(create_llm_client(&settings.llm)?),
    };

    let source_fetcher: Arc<dyn SourceFetcher> = match settings.export.source {
        ExportSourceSetting::Local => {
            Arc::new(LocalSourceFetcher::new(settings.export.source_root.clone()))
        }
        ExportSourceSetting::Http => {
            let base_url = settings
                .export
                .base_url
                .clone()
                .ok_or_else(|| anyhow::anyhow!("export.base_url is required for http export"))?;
            Arc::new(HttpSourceFetcher::new(base_url))
        }
    };

    let file_loader: Arc<dyn FileLoader> = Arc::new(CompositeFileLoader::with_default_adapters());
    let repository = Arc::new(JsonFileSessionRepository::new(
        settings.storage.history_path.clone(),
    ));

    let chat_service = Arc::new(ChatService::new(
        SessionStore::new(repository),
        file_loader,
        InferenceService::new(llm_client, settings.llm.timeout()),
    ));
    chat_service.start().await;

    let state = AppState {
        chat_service,
        export_service: Arc::new(ExportService::new(source_fetcher)),
        settings: settings.clone(),
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    tracing::info!(
        %addr,
        model = %settings.llm.chat_model,
        history = %settings.storage.history_path.display(),
        "Listening"
    );

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
