//! Unified facade over the banter workspace crates.
//!
//! This crate is designed to be the single dependency for most applications.
//! It re-exports the core crates and provides convenience utilities for
//! assembling a ready-to-use chat session.
//!
//! ```no_run
//! use banter::prelude::*;
//!
//! async fn run() -> Result<(), SessionError> {
//!     let service = banter::open_session(SessionOptions::default()).await?;
//!     service.send_message("hello").await;
//!     println!("{} messages in the log", service.messages().len());
//!     Ok(())
//! }
//! ```

pub mod prelude;
pub mod providers;
pub mod session;
mod util;

pub use bchat;
pub use bcommon;
pub use bprovider;
pub use bstore;

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

pub use providers::{
    ClientBuildConfig, build_cloud_client, build_http_client, build_local_client,
};
pub use session::{SessionError, SessionErrorKind, SessionOptions, open_session};
pub use util::{assistant_message, parse_theme, user_message};
