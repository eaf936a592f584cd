use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pitch_cleanup::error::LlmError;
use pitch_cleanup::pitch::{CleanupPitch, OutputDocument};
use pitch_cleanup::providers::{ChatMessage, Provider, ProviderOptions, create_provider};
use pitch_cleanup::PitchError;

const REPLY: &str = r##"{"draft_markdown":"# Tea Stall\n","final_markdown":"# Tea Stall\n\n**Fresh** tea."}"##;

fn options(server: &MockServer, model: &str) -> ProviderOptions {
    ProviderOptions {
        api_key: Some("test-key".into()),
        base_url: Some(server.uri()),
        model: model.into(),
        temperature: 0.0,
    }
}

#[tokio::test]
async fn ollama_sends_schema_as_format_and_returns_content() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_partial_json(json!({
            "model": "llama3.1",
            "stream": false,
            "format": {"required": ["draft_markdown", "final_markdown"]},
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "llama3.1",
            "message": {"role": "assistant", "content": REPLY},
            "prompt_eval_count": 120,
            "eval_count": 40
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = create_provider("ollama", &options(&server, "llama3.1")).unwrap();
    let messages = [ChatMessage::system("format"), ChatMessage::user("{}")];
    let schema = OutputDocument::structured_schema();

    let response = provider.chat_structured(&messages, &schema).await.unwrap();

    assert_eq!(response.text, REPLY);
    assert_eq!(response.total_tokens(), Some(160));
    server.verify().await;
}

#[tokio::test]
async fn openai_sends_json_schema_response_format_with_bearer_auth() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "gpt-4o-mini",
            "response_format": {
                "type": "json_schema",
                "json_schema": {"name": "OutputDocument", "strict": true}
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "gpt-4o-mini",
            "choices": [{"message": {"role": "assistant", "content": REPLY}}],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = create_provider("openai", &options(&server, "gpt-4o-mini")).unwrap();

    let result = CleanupPitch::execute(provider.as_ref(), r#"{"pitch":"tea"}"#)
        .await
        .unwrap();

    assert_eq!(result.final_markdown(), "# Tea Stall\n\n**Fresh** tea.");
    assert_eq!(result.metadata()["llm_classname"], "OpenAiProvider");
    assert_eq!(result.metadata()["model_name"], "gpt-4o-mini");
    assert_eq!(result.metadata()["response_byte_count"], REPLY.len());
    server.verify().await;
}

#[tokio::test]
async fn http_errors_are_sanitized_llm_request_errors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string(
            "{\"error\":\"invalid credentials api_key=raw-secret-123\"}",
        ))
        .mount(&server)
        .await;

    let provider = create_provider("openrouter", &options(&server, "m")).unwrap();

    let err = CleanupPitch::execute(provider.as_ref(), "{}").await.unwrap_err();

    match err {
        PitchError::Llm(LlmError::Request { provider, message }) => {
            assert_eq!(provider, "OpenAiProvider");
            assert!(message.contains("401"));
            assert!(!message.contains("raw-secret-123"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn ollama_non_json_content_is_malformed_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": {"role": "assistant", "content": "Here you go: # Tea Stall"}
        })))
        .mount(&server)
        .await;

    let provider = create_provider("ollama", &options(&server, "llama3.1")).unwrap();

    let err = CleanupPitch::execute(provider.as_ref(), "{}").await.unwrap_err();

    assert!(matches!(err, PitchError::MalformedResponse { .. }));
}
