//! Conversation orchestration and provider fallback for the banter client.

mod log;
mod selector;
mod service;
mod types;

pub mod prelude {
    pub use crate::{
        APOLOGY_REPLY, ChatService, ConversationLog, SessionConfig, select_provider,
    };
    pub use bprovider::prelude::*;
    pub use bstore::prelude::*;
}

pub use log::ConversationLog;
pub use selector::select_provider;
pub use service::{APOLOGY_REPLY, ChatService};
pub use types::SessionConfig;
