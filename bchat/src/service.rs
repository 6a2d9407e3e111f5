//! Chat orchestration: send sequencing, provider fallback, and state flags.

use std::sync::{Arc, Mutex, MutexGuard};

use bprovider::{
    CompletionRequest, CredentialStore, HISTORY_WINDOW, Message, MockClient, ProviderClient,
    ProviderKind, Role,
};
use bstore::{SessionRecord, StateStore, ThemePreference};

use crate::selector::select_provider;
use crate::{ConversationLog, SessionConfig};

/// Fixed reply appended when the cloud provider path fails.
pub const APOLOGY_REPLY: &str =
    "Sorry, there was an error processing your request. Please try again.";

/// Drives a single conversation: appends user input, picks a provider,
/// awaits the completion, applies the fallback policy, and keeps the
/// persisted session record current after every mutation.
///
/// All dependencies are injected at construction; there is no global state.
/// No method ever returns an error: provider failures resolve into
/// `last_error` or a substituted message, persistence failures are logged
/// and dropped.
pub struct ChatService {
    cloud: Arc<dyn ProviderClient>,
    local: Arc<dyn ProviderClient>,
    fallback: MockClient,
    credentials: Arc<CredentialStore>,
    store: Arc<dyn StateStore>,
    state: Mutex<RuntimeState>,
}

#[derive(Debug, Default)]
struct RuntimeState {
    log: ConversationLog,
    theme: ThemePreference,
    is_loading: bool,
    last_error: Option<String>,
}

struct PreparedSend {
    request: CompletionRequest,
    choice: ProviderKind,
    record: SessionRecord,
}

impl ChatService {
    pub fn new(
        cloud: Arc<dyn ProviderClient>,
        local: Arc<dyn ProviderClient>,
        credentials: Arc<CredentialStore>,
        store: Arc<dyn StateStore>,
    ) -> Self {
        Self {
            cloud,
            local,
            fallback: MockClient::new(),
            credentials,
            store,
            state: Mutex::new(RuntimeState::default()),
        }
    }

    pub fn with_fallback_client(mut self, fallback: MockClient) -> Self {
        self.fallback = fallback;
        self
    }

    /// Runs one send to completion. Empty or whitespace-only input is a
    /// silent no-op, as is a send while another is still in flight.
    ///
    /// Provider policy: a cloud failure is surfaced through `last_error`
    /// plus a fixed apology message and is never retried; a local-inference
    /// failure is absorbed by substituting a canned mock reply with no
    /// error surfaced.
    pub async fn send_message(&self, text: &str) {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return;
        }

        let credential = self.credential_snapshot();
        let Some(prepared) = self.begin_send(trimmed, credential) else {
            return;
        };

        // The user message must survive a crash before the reply arrives.
        self.persist(prepared.record).await;

        let (reply, error) = match prepared.choice {
            ProviderKind::OpenAi => match self.cloud.complete(prepared.request).await {
                Ok(reply) => (reply, None),
                Err(error) => {
                    tracing::warn!(
                        phase = "chat",
                        event = "cloud_completion_failed",
                        provider = %ProviderKind::OpenAi,
                        error = %error
                    );
                    (APOLOGY_REPLY.to_string(), Some(error.to_string()))
                }
            },
            ProviderKind::Ollama => match self.local.complete(prepared.request).await {
                Ok(reply) => (reply, None),
                Err(error) => {
                    tracing::info!(
                        phase = "chat",
                        event = "local_fallback_engaged",
                        provider = %ProviderKind::Ollama,
                        error = %error
                    );
                    (self.fallback.canned_reply(trimmed), None)
                }
            },
            // The selector never picks the mock directly.
            ProviderKind::Mock => (self.fallback.canned_reply(trimmed), None),
        };

        let credential = self.credential_snapshot();
        let Some(record) = self.finish_send(reply, error, credential) else {
            return;
        };
        self.persist(record).await;
    }

    /// Empties the log. Refused while a send is in flight. Does not touch
    /// `last_error`.
    pub async fn clear_messages(&self) {
        let credential = self.credential_snapshot();
        let record = {
            let Some(mut state) = self.lock_state() else {
                return;
            };
            if state.is_loading {
                return;
            }
            state.log.clear();
            record_of(&state, credential)
        };
        self.persist(record).await;
    }

    /// Cosmetic stop: clears the loading flag the presentation layer reads.
    /// The in-flight provider call is not cancelled and its reply is still
    /// appended when it eventually resolves.
    pub fn stop_generation(&self) {
        if let Some(mut state) = self.lock_state() {
            state.is_loading = false;
        }
    }

    /// Stores or clears the cloud provider credential; empty input clears.
    /// Takes effect on the next send only. Persisted immediately, verbatim.
    pub async fn set_provider_credential(&self, credential: &str) {
        let trimmed = credential.trim();
        if trimmed.is_empty() {
            if let Err(error) = self.credentials.clear(ProviderKind::OpenAi) {
                tracing::warn!(phase = "chat", event = "credential_clear_failed", error = %error);
            }
        } else if let Err(error) = self.credentials.set_api_key(ProviderKind::OpenAi, trimmed) {
            tracing::warn!(phase = "chat", event = "credential_update_failed", error = %error);
        }

        let credential = self.credential_snapshot();
        let record = {
            let Some(state) = self.lock_state() else {
                return;
            };
            record_of(&state, credential)
        };
        self.persist(record).await;
    }

    /// Stores the theme preference and persists it immediately.
    pub async fn set_theme(&self, theme: ThemePreference) {
        let credential = self.credential_snapshot();
        let record = {
            let Some(mut state) = self.lock_state() else {
                return;
            };
            state.theme = theme;
            record_of(&state, credential)
        };
        self.persist(record).await;
    }

    /// Startup merge: replaces the log, theme, and credential with the
    /// persisted record. An absent or unreadable record leaves the default
    /// empty state in place; read failures are logged, never surfaced.
    pub async fn restore(&self) {
        let record = match self.store.load().await {
            Ok(Some(record)) => record,
            Ok(None) => return,
            Err(error) => {
                tracing::warn!(phase = "store", event = "restore_failed", error = %error);
                return;
            }
        };

        match record.provider_credential.as_deref() {
            Some(credential) if !credential.trim().is_empty() => {
                if let Err(error) = self.credentials.set_api_key(ProviderKind::OpenAi, credential)
                {
                    tracing::warn!(
                        phase = "chat",
                        event = "credential_restore_failed",
                        error = %error
                    );
                }
            }
            _ => {
                if let Err(error) = self.credentials.clear(ProviderKind::OpenAi) {
                    tracing::warn!(phase = "chat", event = "credential_clear_failed", error = %error);
                }
            }
        }

        let Some(mut state) = self.lock_state() else {
            return;
        };
        state.log = ConversationLog::from_messages(record.messages);
        state.theme = record.theme;
    }

    pub fn messages(&self) -> Vec<Message> {
        self.lock_state()
            .map(|state| state.log.snapshot())
            .unwrap_or_default()
    }

    pub fn is_loading(&self) -> bool {
        self.lock_state()
            .map(|state| state.is_loading)
            .unwrap_or(false)
    }

    pub fn last_error(&self) -> Option<String> {
        self.lock_state().and_then(|state| state.last_error.clone())
    }

    pub fn session_config(&self) -> SessionConfig {
        let theme = self
            .lock_state()
            .map(|state| state.theme)
            .unwrap_or_default();
        SessionConfig::new(self.credential_snapshot(), theme)
    }

    fn begin_send(&self, trimmed: &str, credential: Option<String>) -> Option<PreparedSend> {
        let mut state = self.lock_state()?;
        if state.is_loading {
            return None;
        }

        // History window is captured before the new user message lands.
        let history = state.log.trailing_window(HISTORY_WINDOW).to_vec();
        state.log.append(Message::new(Role::User, trimmed));
        state.is_loading = true;
        state.last_error = None;

        let config = SessionConfig::new(credential.clone(), state.theme);
        let choice = select_provider(&config);

        Some(PreparedSend {
            request: CompletionRequest::new(trimmed).with_history(history),
            choice,
            record: record_of(&state, credential),
        })
    }

    fn finish_send(
        &self,
        reply: String,
        error: Option<String>,
        credential: Option<String>,
    ) -> Option<SessionRecord> {
        let mut state = self.lock_state()?;
        state.log.append(Message::new(Role::Assistant, reply));
        state.is_loading = false;
        state.last_error = error;
        Some(record_of(&state, credential))
    }

    async fn persist(&self, record: SessionRecord) {
        if let Err(error) = self.store.save(record).await {
            tracing::warn!(phase = "store", event = "persist_failed", error = %error);
        }
    }

    fn credential_snapshot(&self) -> Option<String> {
        match self
            .credentials
            .with_api_key(ProviderKind::OpenAi, str::to_string)
        {
            Ok(credential) => credential,
            Err(error) => {
                tracing::warn!(phase = "chat", event = "credential_read_failed", error = %error);
                None
            }
        }
    }

    fn lock_state(&self) -> Option<MutexGuard<'_, RuntimeState>> {
        match self.state.lock() {
            Ok(guard) => Some(guard),
            Err(_) => {
                tracing::error!(phase = "chat", event = "state_lock_poisoned");
                None
            }
        }
    }
}

fn record_of(state: &RuntimeState, credential: Option<String>) -> SessionRecord {
    SessionRecord::new(state.log.snapshot(), state.theme, credential)
}
