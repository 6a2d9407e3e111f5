//! OpenAI chat-completions client and reqwest-based transport.

use std::sync::Arc;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{
    CompletionRequest, CredentialStore, HISTORY_WINDOW, Message, ProviderClient, ProviderError,
    ProviderFuture, ProviderKind, SecretString,
};

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_MAX_TOKENS: u32 = 1024;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

pub trait OpenAiTransport: Send + Sync {
    fn complete<'a>(
        &'a self,
        request: OpenAiApiRequest,
        auth: SecretString,
    ) -> ProviderFuture<'a, Result<OpenAiApiResponse, ProviderError>>;
}

#[derive(Clone)]
pub struct OpenAiClient {
    credentials: Arc<CredentialStore>,
    transport: Arc<dyn OpenAiTransport>,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl OpenAiClient {
    pub fn new(credentials: Arc<CredentialStore>, transport: Arc<dyn OpenAiTransport>) -> Self {
        Self {
            credentials,
            transport,
            model: DEFAULT_OPENAI_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn default_http_transport(client: Client) -> OpenAiHttpTransport {
        OpenAiHttpTransport::new(client)
    }

    fn resolve_auth(&self) -> Result<SecretString, ProviderError> {
        self.credentials
            .with_api_key(ProviderKind::OpenAi, |s| SecretString::new(s))?
            .ok_or_else(|| ProviderError::authentication("no OpenAI API key configured"))
    }

    fn build_api_request(&self, request: CompletionRequest) -> OpenAiApiRequest {
        let mut messages = trailing_window(&request.history, HISTORY_WINDOW)
            .iter()
            .map(OpenAiApiMessage::from_message)
            .collect::<Vec<_>>();

        messages.push(OpenAiApiMessage {
            role: "user".to_string(),
            content: request.user_text,
        });

        OpenAiApiRequest {
            model: self.model.clone(),
            messages,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}

impl ProviderClient for OpenAiClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAi
    }

    fn complete<'a>(
        &'a self,
        request: CompletionRequest,
    ) -> ProviderFuture<'a, Result<String, ProviderError>> {
        Box::pin(async move {
            let auth = self.resolve_auth()?;
            let api_request = self.build_api_request(request);
            let response = self.transport.complete(api_request, auth).await?;
            extract_completion(response)
        })
    }
}

/// The most recent `window` entries, oldest first, original order preserved.
fn trailing_window(history: &[Message], window: usize) -> &[Message] {
    let start = history.len().saturating_sub(window);
    &history[start..]
}

fn extract_completion(response: OpenAiApiResponse) -> Result<String, ProviderError> {
    let choice = response.choices.into_iter().next().ok_or_else(|| {
        ProviderError::malformed("OpenAI response did not include choices")
    })?;

    choice.message.content.ok_or_else(|| {
        ProviderError::malformed("OpenAI response did not include message content")
    })
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OpenAiApiRequest {
    pub model: String,
    pub messages: Vec<OpenAiApiMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct OpenAiApiMessage {
    pub role: String,
    pub content: String,
}

impl OpenAiApiMessage {
    fn from_message(message: &Message) -> Self {
        Self {
            role: message.role.as_str().to_string(),
            content: message.content.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct OpenAiApiResponse {
    pub choices: Vec<OpenAiApiChoice>,
}

#[derive(Debug, Deserialize)]
pub struct OpenAiApiChoice {
    pub message: OpenAiApiAssistantMessage,
}

#[derive(Debug, Deserialize)]
pub struct OpenAiApiAssistantMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiApiErrorEnvelope {
    error: OpenAiApiError,
}

#[derive(Debug, Deserialize)]
struct OpenAiApiError {
    message: String,
}

fn extract_error_message(body: &str) -> Option<String> {
    let parsed = serde_json::from_str::<OpenAiApiErrorEnvelope>(body).ok()?;
    Some(parsed.error.message)
}

#[derive(Debug, Clone)]
pub struct OpenAiHttpTransport {
    client: Client,
    base_url: String,
}

impl OpenAiHttpTransport {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: OPENAI_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

impl OpenAiTransport for OpenAiHttpTransport {
    fn complete<'a>(
        &'a self,
        request: OpenAiApiRequest,
        auth: SecretString,
    ) -> ProviderFuture<'a, Result<OpenAiApiResponse, ProviderError>> {
        Box::pin(async move {
            let url = self.endpoint("chat/completions");
            let response = self
                .client
                .post(url)
                .bearer_auth(auth.expose())
                .json(&request)
                .send()
                .await
                .map_err(|err| ProviderError::unavailable(err.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = extract_error_message(&body).unwrap_or_else(|| {
                    format!("OpenAI request failed with status {status}")
                });
                return Err(ProviderError::http_status(status.as_u16(), message));
            }

            response
                .json::<OpenAiApiResponse>()
                .await
                .map_err(|err| ProviderError::malformed(err.to_string()))
        })
    }
}
