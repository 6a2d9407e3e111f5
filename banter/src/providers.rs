//! Stable provider-client construction surface for facade consumers.

use std::sync::Arc;
use std::time::Duration;

use bprovider::{CredentialStore, ProviderClient, ProviderError};
use reqwest::Client;

#[derive(Debug, Clone)]
pub struct ClientBuildConfig {
    pub timeout: Duration,
}

impl ClientBuildConfig {
    pub fn new() -> Self {
        Self {
            timeout: Duration::from_secs(90),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientBuildConfig {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_http_client(config: &ClientBuildConfig) -> Result<Client, ProviderError> {
    Client::builder()
        .timeout(config.timeout)
        .build()
        .map_err(|err| ProviderError::other(err.to_string()))
}

pub fn build_cloud_client(
    credentials: Arc<CredentialStore>,
    http: Client,
) -> Result<Arc<dyn ProviderClient>, ProviderError> {
    build_openai_client(credentials, http)
}

pub fn build_local_client(http: Client) -> Result<Arc<dyn ProviderClient>, ProviderError> {
    build_ollama_client(http)
}

#[cfg(feature = "provider-openai")]
fn build_openai_client(
    credentials: Arc<CredentialStore>,
    http: Client,
) -> Result<Arc<dyn ProviderClient>, ProviderError> {
    use bprovider::adapters::openai::OpenAiClient;

    let transport = Arc::new(OpenAiClient::default_http_transport(http));
    Ok(Arc::new(OpenAiClient::new(credentials, transport)))
}

#[cfg(not(feature = "provider-openai"))]
fn build_openai_client(
    _credentials: Arc<CredentialStore>,
    _http: Client,
) -> Result<Arc<dyn ProviderClient>, ProviderError> {
    Err(ProviderError::other(
        "provider-openai feature is not enabled on banter",
    ))
}

#[cfg(feature = "provider-ollama")]
fn build_ollama_client(http: Client) -> Result<Arc<dyn ProviderClient>, ProviderError> {
    use bprovider::adapters::ollama::OllamaClient;

    let transport = Arc::new(OllamaClient::default_http_transport(http));
    Ok(Arc::new(OllamaClient::new(transport)))
}

#[cfg(not(feature = "provider-ollama"))]
fn build_ollama_client(_http: Client) -> Result<Arc<dyn ProviderClient>, ProviderError> {
    Err(ProviderError::other(
        "provider-ollama feature is not enabled on banter",
    ))
}

#[cfg(test)]
mod tests {
    use bprovider::ProviderKind;

    use super::*;

    #[test]
    fn build_config_defaults_to_a_long_timeout() {
        let config = ClientBuildConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(90));

        let shorter = config.with_timeout(Duration::from_secs(5));
        assert_eq!(shorter.timeout, Duration::from_secs(5));
    }

    #[cfg(all(feature = "provider-openai", feature = "provider-ollama"))]
    #[test]
    fn built_clients_report_their_provider_kinds() {
        let http = build_http_client(&ClientBuildConfig::default()).expect("http client");

        let cloud = build_cloud_client(Arc::new(CredentialStore::new()), http.clone())
            .expect("cloud client");
        assert_eq!(cloud.kind(), ProviderKind::OpenAi);

        let local = build_local_client(http).expect("local client");
        assert_eq!(local.kind(), ProviderKind::Ollama);
    }
}
