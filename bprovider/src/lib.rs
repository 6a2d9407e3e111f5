//! Model provider clients for the banter conversational client.

pub mod adapters;
mod credentials;
mod error;
mod mock;
mod model;

pub mod prelude {
    pub use crate::{
        CompletionRequest, CredentialStore, HISTORY_WINDOW, Message, MockClient,
        ProviderClient, ProviderError, ProviderErrorKind, ProviderFuture, ProviderKind, Role,
        SecretString, mock_reply_set,
    };
    pub use bcommon::MessageId;
}

pub use credentials::{CredentialStore, SecretString};
pub use error::{ProviderError, ProviderErrorKind};
pub use mock::{MOCK_TEMPLATE_COUNT, MockClient, mock_reply_set};
pub use model::{
    CompletionRequest, HISTORY_WINDOW, Message, ProviderClient, ProviderFuture, ProviderKind,
    Role,
};
