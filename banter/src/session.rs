//! One-call session assembly: clients, store, and restored state.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

use bchat::ChatService;
use bprovider::{CredentialStore, ProviderError};
use bstore::{StoreConfig, StoreError, create_state_store};

use crate::providers::{
    ClientBuildConfig, build_cloud_client, build_http_client, build_local_client,
};

#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub store: StoreConfig,
    pub clients: ClientBuildConfig,
}

impl SessionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_store(mut self, store: StoreConfig) -> Self {
        self.store = store;
        self
    }

    pub fn with_clients(mut self, clients: ClientBuildConfig) -> Self {
        self.clients = clients;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionErrorKind {
    Provider,
    Store,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionError {
    pub kind: SessionErrorKind,
    pub message: String,
}

impl SessionError {
    pub fn new(kind: SessionErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(SessionErrorKind::Provider, message)
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::new(SessionErrorKind::Store, message)
    }
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for SessionError {}

impl From<ProviderError> for SessionError {
    fn from(value: ProviderError) -> Self {
        SessionError::provider(value.to_string())
    }
}

impl From<StoreError> for SessionError {
    fn from(value: StoreError) -> Self {
        SessionError::store(value.to_string())
    }
}

/// Builds the real cloud and local clients over one shared HTTP client,
/// opens the configured state store, and restores the persisted session.
pub async fn open_session(options: SessionOptions) -> Result<ChatService, SessionError> {
    let credentials = Arc::new(CredentialStore::new());
    let http = build_http_client(&options.clients)?;
    let cloud = build_cloud_client(Arc::clone(&credentials), http.clone())?;
    let local = build_local_client(http)?;
    let store = create_state_store(options.store)?;

    let service = ChatService::new(cloud, local, credentials, store);
    service.restore().await;
    Ok(service)
}
