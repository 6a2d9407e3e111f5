//! Ollama generate-endpoint client for local inference.

use std::sync::Arc;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{
    CompletionRequest, ProviderClient, ProviderError, ProviderFuture, ProviderKind,
};

pub const OLLAMA_HOST_URL: &str = "http://localhost:11434";

pub const DEFAULT_OLLAMA_MODEL: &str = "llama3.2";

pub trait OllamaTransport: Send + Sync {
    fn generate<'a>(
        &'a self,
        request: OllamaApiRequest,
    ) -> ProviderFuture<'a, Result<OllamaApiResponse, ProviderError>>;
}

#[derive(Clone)]
pub struct OllamaClient {
    transport: Arc<dyn OllamaTransport>,
    model: String,
}

impl OllamaClient {
    pub fn new(transport: Arc<dyn OllamaTransport>) -> Self {
        Self {
            transport,
            model: DEFAULT_OLLAMA_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn default_http_transport(client: Client) -> OllamaHttpTransport {
        OllamaHttpTransport::new(client)
    }
}

impl ProviderClient for OllamaClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Ollama
    }

    fn complete<'a>(
        &'a self,
        request: CompletionRequest,
    ) -> ProviderFuture<'a, Result<String, ProviderError>> {
        Box::pin(async move {
            // Local inference takes a single prompt, no history window.
            let api_request = OllamaApiRequest {
                model: self.model.clone(),
                prompt: request.user_text,
                stream: false,
            };

            let response = self.transport.generate(api_request).await?;
            Ok(response.response)
        })
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct OllamaApiRequest {
    pub model: String,
    pub prompt: String,
    pub stream: bool,
}

#[derive(Debug, Deserialize)]
pub struct OllamaApiResponse {
    pub response: String,
}

#[derive(Debug, Clone)]
pub struct OllamaHttpTransport {
    client: Client,
    base_url: String,
}

impl OllamaHttpTransport {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: OLLAMA_HOST_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/api/generate", self.base_url.trim_end_matches('/'))
    }
}

impl OllamaTransport for OllamaHttpTransport {
    fn generate<'a>(
        &'a self,
        request: OllamaApiRequest,
    ) -> ProviderFuture<'a, Result<OllamaApiResponse, ProviderError>> {
        Box::pin(async move {
            let response = self
                .client
                .post(self.endpoint())
                .json(&request)
                .send()
                .await
                .map_err(|err| ProviderError::unavailable(err.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(ProviderError::unavailable(format!(
                    "http {status}: {}",
                    truncate(&body, 4096)
                )));
            }

            response
                .json::<OllamaApiResponse>()
                .await
                .map_err(|err| ProviderError::unavailable(err.to_string()))
        })
    }
}

fn truncate(input: &str, max: usize) -> String {
    if input.len() <= max {
        return input.to_string();
    }
    let mut output = input[..max].to_string();
    output.push_str("...");
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_request_serializes_with_streaming_disabled() {
        let request = OllamaApiRequest {
            model: DEFAULT_OLLAMA_MODEL.to_string(),
            prompt: "hi there".to_string(),
            stream: false,
        };

        let value = serde_json::to_value(&request).expect("request should serialize");
        assert_eq!(value["model"], "llama3.2");
        assert_eq!(value["prompt"], "hi there");
        assert_eq!(value["stream"], false);
    }

    #[test]
    fn response_parses_the_reply_field() {
        let parsed: OllamaApiResponse =
            serde_json::from_str(r#"{"response": "local reply", "done": true}"#).expect("parse");
        assert_eq!(parsed.response, "local reply");
    }

    #[test]
    fn truncate_caps_long_bodies() {
        let long = "x".repeat(5000);
        let capped = truncate(&long, 4096);
        assert_eq!(capped.len(), 4096 + 3);
        assert!(capped.ends_with("..."));
    }
}
