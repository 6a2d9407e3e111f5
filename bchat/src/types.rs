//! Session configuration snapshot types.

use bstore::ThemePreference;

/// A point-in-time view of the session configuration. Taken fresh for every
/// send so configuration changes only apply to the next turn.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionConfig {
    pub provider_credential: Option<String>,
    pub theme: ThemePreference,
}

impl SessionConfig {
    pub fn new(provider_credential: Option<String>, theme: ThemePreference) -> Self {
        Self {
            provider_credential,
            theme,
        }
    }
}
