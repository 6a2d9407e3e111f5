//! Small convenience constructors for common types.

use bprovider::{Message, Role};
use bstore::ThemePreference;

pub fn user_message(content: impl Into<String>) -> Message {
    Message::new(Role::User, content)
}

pub fn assistant_message(content: impl Into<String>) -> Message {
    Message::new(Role::Assistant, content)
}

pub fn parse_theme(value: &str) -> Option<ThemePreference> {
    match value.trim().to_ascii_lowercase().as_str() {
        "light" => Some(ThemePreference::Light),
        "dark" => Some(ThemePreference::Dark),
        _ => None,
    }
}
