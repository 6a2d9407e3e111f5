//! In-memory credential storage shared by clients and the orchestrator.
//!
//! Credentials are held in plain form so they can be persisted verbatim by
//! the session record; `Debug` output is always redacted.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::{ProviderError, ProviderKind};

#[derive(PartialEq, Eq)]
pub struct SecretString {
    value: String,
}

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn expose(&self) -> &str {
        self.value.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl Clone for SecretString {
    fn clone(&self) -> Self {
        Self::new(self.value.clone())
    }
}

impl std::fmt::Debug for SecretString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl Drop for SecretString {
    fn drop(&mut self) {
        unsafe {
            self.value.as_mut_vec().fill(0);
        }
    }
}

#[derive(Default)]
pub struct CredentialStore {
    credentials: Mutex<HashMap<ProviderKind, SecretString>>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_api_key(
        &self,
        provider: ProviderKind,
        api_key: impl Into<String>,
    ) -> Result<(), ProviderError> {
        let api_key = SecretString::new(api_key);
        if api_key.is_empty() {
            return Err(ProviderError::authentication("api key must not be empty"));
        }

        self.credentials_mut()?.insert(provider, api_key);
        Ok(())
    }

    pub fn has_api_key(&self, provider: ProviderKind) -> Result<bool, ProviderError> {
        Ok(self.credentials_ref()?.contains_key(&provider))
    }

    pub fn with_api_key<R>(
        &self,
        provider: ProviderKind,
        f: impl FnOnce(&str) -> R,
    ) -> Result<Option<R>, ProviderError> {
        let credentials = self.credentials_ref()?;
        Ok(credentials
            .get(&provider)
            .map(|secret| f(secret.expose())))
    }

    pub fn clear(&self, provider: ProviderKind) -> Result<bool, ProviderError> {
        Ok(self.credentials_mut()?.remove(&provider).is_some())
    }

    fn credentials_ref(
        &self,
    ) -> Result<MutexGuard<'_, HashMap<ProviderKind, SecretString>>, ProviderError> {
        self.credentials
            .lock()
            .map_err(|_| ProviderError::other("credential store lock poisoned"))
    }

    fn credentials_mut(
        &self,
    ) -> Result<MutexGuard<'_, HashMap<ProviderKind, SecretString>>, ProviderError> {
        self.credentials
            .lock()
            .map_err(|_| ProviderError::other("credential store lock poisoned"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProviderErrorKind;

    #[test]
    fn secret_string_debug_is_redacted() {
        let secret = SecretString::new("sk-super-secret");
        assert_eq!(format!("{secret:?}"), "[REDACTED]");
        assert_eq!(secret.expose(), "sk-super-secret");
    }

    #[test]
    fn store_round_trips_api_keys() {
        let store = CredentialStore::new();
        assert!(!store.has_api_key(ProviderKind::OpenAi).expect("lookup"));

        store
            .set_api_key(ProviderKind::OpenAi, "sk-abc")
            .expect("set should work");
        assert!(store.has_api_key(ProviderKind::OpenAi).expect("lookup"));

        let exposed = store
            .with_api_key(ProviderKind::OpenAi, str::to_string)
            .expect("read should work");
        assert_eq!(exposed.as_deref(), Some("sk-abc"));

        assert!(store.clear(ProviderKind::OpenAi).expect("clear"));
        assert!(!store.has_api_key(ProviderKind::OpenAi).expect("lookup"));
    }

    #[test]
    fn empty_api_key_is_rejected() {
        let store = CredentialStore::new();
        let error = store
            .set_api_key(ProviderKind::OpenAi, "")
            .expect_err("empty key must fail");
        assert_eq!(error.kind, ProviderErrorKind::Authentication);
    }
}
