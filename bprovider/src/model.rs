//! Provider identities, conversation messages, and the completion contract.

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;
use std::time::SystemTime;

use bcommon::MessageId;

use crate::ProviderError;

pub type ProviderFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Number of trailing history messages a cloud completion request may carry.
pub const HISTORY_WINDOW: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    OpenAi,
    Ollama,
    Mock,
}

impl Display for ProviderKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let id = match self {
            Self::OpenAi => "openai",
            Self::Ollama => "ollama",
            Self::Mock => "mock",
        };

        f.write_str(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub role: Role,
    pub content: String,
    pub timestamp: SystemTime,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(uuid::Uuid::new_v4().to_string()),
            role,
            content: content.into(),
            timestamp: SystemTime::now(),
        }
    }

    /// Rebuilds a message from previously stored fields, keeping its identity.
    pub fn restored(
        id: MessageId,
        role: Role,
        content: impl Into<String>,
        timestamp: SystemTime,
    ) -> Self {
        Self {
            id,
            role,
            content: content.into(),
            timestamp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub user_text: String,
    pub history: Vec<Message>,
}

impl CompletionRequest {
    pub fn new(user_text: impl Into<String>) -> Self {
        Self {
            user_text: user_text.into(),
            history: Vec::new(),
        }
    }

    pub fn with_history(mut self, history: Vec<Message>) -> Self {
        self.history = history;
        self
    }
}

pub trait ProviderClient: Send + Sync {
    fn kind(&self) -> ProviderKind;

    fn complete<'a>(
        &'a self,
        request: CompletionRequest,
    ) -> ProviderFuture<'a, Result<String, ProviderError>>;
}
