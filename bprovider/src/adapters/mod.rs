//! Provider adapters gated by cargo feature.

#[cfg(feature = "provider-openai")]
pub mod openai;

#[cfg(feature = "provider-ollama")]
pub mod ollama;
