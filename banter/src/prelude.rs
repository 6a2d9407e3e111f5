//! Common imports for most banter applications.

pub use crate::{
    ClientBuildConfig, SessionError, SessionErrorKind, SessionOptions, build_cloud_client,
    build_http_client, build_local_client, open_session,
};
pub use crate::{assistant_message, parse_theme, user_message};
pub use bchat::{APOLOGY_REPLY, ChatService, ConversationLog, SessionConfig, select_provider};
pub use bcommon::{BoxFuture, MessageId};
pub use bprovider::{
    CompletionRequest, CredentialStore, HISTORY_WINDOW, Message, MockClient, ProviderClient,
    ProviderError, ProviderErrorKind, ProviderFuture, ProviderKind, Role, SecretString,
    mock_reply_set,
};
pub use bstore::{
    FilesystemStateStore, InMemoryStateStore, SessionRecord, StateStore, StoreConfig, StoreError,
    StoreErrorKind, ThemePreference, create_default_state_store, create_state_store,
};
