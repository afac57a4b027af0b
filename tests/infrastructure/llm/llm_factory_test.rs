use docuchat::application::ports::LlmClientError;
use docuchat::infrastructure::llm::create_llm_client;
use docuchat::presentation::config::{LlmProvider, LlmSettings};

fn settings(provider: LlmProvider) -> LlmSettings {
    LlmSettings {
        provider,
        api_key: "key".to_string(),
        base_url: None,
        azure_endpoint: None,
        azure_api_version: None,
        chat_model: "gpt-4o-mini".to_string(),
        max_tokens: 512,
        temperature: 0.1,
        timeout_seconds: 30,
    }
}

#[test]
fn given_openai_without_base_url_when_creating_client_then_succeeds() {
    assert!(create_llm_client(&settings(LlmProvider::OpenAi)).is_ok());
}

#[test]
fn given_lmstudio_without_base_url_when_creating_client_then_reports_configuration_error() {
    assert!(matches!(
        create_llm_client(&settings(LlmProvider::LmStudio)),
        Err(LlmClientError::Configuration(reason)) if reason.contains("base_url")
    ));
}

#[test]
fn given_lmstudio_with_base_url_when_creating_client_then_succeeds() {
    let mut settings = settings(LlmProvider::LmStudio);
    settings.base_url = Some("http://localhost:1234/v1".to_string());
    assert!(create_llm_client(&settings).is_ok());
}

#[test]
fn given_azure_without_endpoint_when_creating_client_then_reports_configuration_error() {
    assert!(matches!(
        create_llm_client(&settings(LlmProvider::Azure)),
        Err(LlmClientError::Configuration(reason)) if reason.contains("azure_endpoint")
    ));
}

#[test]
fn given_mock_provider_when_creating_http_client_then_reports_configuration_error() {
    assert!(matches!(
        create_llm_client(&settings(LlmProvider::Mock)),
        Err(LlmClientError::Configuration(_))
    ));
}
