//! Durable session state records.

use bprovider::Message;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// The single named record the client persists: the full conversation
/// transcript plus the session configuration.
///
/// The provider credential is stored verbatim, in plain form. Anything that
/// writes this record to shared or synced storage is exposing that secret.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionRecord {
    pub messages: Vec<Message>,
    pub theme: ThemePreference,
    pub provider_credential: Option<String>,
}

impl SessionRecord {
    pub fn new(
        messages: Vec<Message>,
        theme: ThemePreference,
        provider_credential: Option<String>,
    ) -> Self {
        Self {
            messages,
            theme,
            provider_credential,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_record_is_empty_and_light() {
        let record = SessionRecord::default();
        assert!(record.messages.is_empty());
        assert_eq!(record.theme, ThemePreference::Light);
        assert_eq!(record.provider_credential, None);
    }
}
