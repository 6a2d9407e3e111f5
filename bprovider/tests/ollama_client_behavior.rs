#![cfg(feature = "provider-ollama")]

use std::sync::{Arc, Mutex};

use bprovider::adapters::ollama::{
    OllamaApiRequest, OllamaApiResponse, OllamaClient, OllamaTransport,
};
use bprovider::{
    CompletionRequest, Message, ProviderClient, ProviderError, ProviderErrorKind,
    ProviderFuture, ProviderKind, Role,
};

#[derive(Default)]
struct FakeTransport {
    captured_request: Mutex<Option<OllamaApiRequest>>,
    fail: bool,
}

impl OllamaTransport for FakeTransport {
    fn generate<'a>(
        &'a self,
        request: OllamaApiRequest,
    ) -> ProviderFuture<'a, Result<OllamaApiResponse, ProviderError>> {
        Box::pin(async move {
            *self.captured_request.lock().expect("request lock") = Some(request);

            if self.fail {
                return Err(ProviderError::unavailable("connection refused"));
            }

            Ok(OllamaApiResponse {
                response: "local reply".to_string(),
            })
        })
    }
}

#[tokio::test]
async fn complete_sends_only_the_prompt_without_history() {
    let transport = Arc::new(FakeTransport::default());
    let client = OllamaClient::new(transport.clone());

    let request = CompletionRequest::new("just this")
        .with_history(vec![Message::new(Role::User, "ignored history")]);
    let reply = client.complete(request).await.expect("completion");
    assert_eq!(reply, "local reply");
    assert_eq!(client.kind(), ProviderKind::Ollama);

    let sent = transport
        .captured_request
        .lock()
        .expect("request lock")
        .clone()
        .expect("request should be captured");
    assert_eq!(sent.prompt, "just this");
    assert_eq!(sent.model, "llama3.2");
    assert!(!sent.stream);
}

#[tokio::test]
async fn complete_respects_model_override() {
    let transport = Arc::new(FakeTransport::default());
    let client = OllamaClient::new(transport.clone()).with_model("mistral");

    client
        .complete(CompletionRequest::new("hi"))
        .await
        .expect("completion");

    let sent = transport
        .captured_request
        .lock()
        .expect("request lock")
        .clone()
        .expect("request should be captured");
    assert_eq!(sent.model, "mistral");
}

#[tokio::test]
async fn unreachable_endpoint_surfaces_as_unavailable() {
    let transport = Arc::new(FakeTransport {
        fail: true,
        ..FakeTransport::default()
    });
    let client = OllamaClient::new(transport);

    let error = client
        .complete(CompletionRequest::new("hi"))
        .await
        .expect_err("unreachable endpoint must fail");
    assert_eq!(error.kind, ProviderErrorKind::Unavailable);
}
