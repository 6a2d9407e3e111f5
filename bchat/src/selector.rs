//! Provider selection policy.

use bprovider::ProviderKind;

use crate::SessionConfig;

/// Pure, total selection over the configuration snapshot: the cloud provider
/// iff a credential with the recognizable cloud key shape is configured,
/// otherwise local inference. Re-evaluated on every send. The mock client is
/// never selected here; it is the orchestrator's terminal fallback.
pub fn select_provider(config: &SessionConfig) -> ProviderKind {
    match &config.provider_credential {
        Some(credential) if is_cloud_credential(credential) => ProviderKind::OpenAi,
        _ => ProviderKind::Ollama,
    }
}

fn is_cloud_credential(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && value.starts_with("sk-")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(credential: Option<&str>) -> SessionConfig {
        SessionConfig::new(credential.map(str::to_string), Default::default())
    }

    #[test]
    fn cloud_shaped_credential_selects_openai() {
        assert_eq!(
            select_provider(&config_with(Some("sk-abc"))),
            ProviderKind::OpenAi
        );
        assert_eq!(
            select_provider(&config_with(Some("  sk-abc  "))),
            ProviderKind::OpenAi
        );
    }

    #[test]
    fn missing_or_empty_credential_selects_ollama() {
        assert_eq!(select_provider(&config_with(None)), ProviderKind::Ollama);
        assert_eq!(
            select_provider(&config_with(Some(""))),
            ProviderKind::Ollama
        );
        assert_eq!(
            select_provider(&config_with(Some("   "))),
            ProviderKind::Ollama
        );
    }

    #[test]
    fn unrecognized_credential_shape_selects_ollama() {
        assert_eq!(
            select_provider(&config_with(Some("not-a-cloud-key"))),
            ProviderKind::Ollama
        );
    }
}
