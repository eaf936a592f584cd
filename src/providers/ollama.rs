use super::http_client::{LOCAL_TIMEOUT_SECS, build_provider_client_with_timeout};
use super::response::{
    ChatMessage, MessageRole, ProviderMetadata, ProviderResponse, StructuredSchema,
};
use super::traits::Provider;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Ollama's native `/api/chat` endpoint with the `format` field carrying the
/// JSON Schema.
pub struct OllamaProvider {
    base_url: String,
    model: String,
    temperature: f64,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    stream: bool,
    format: &'a Value,
    options: Options,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct Options {
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ResponseMessage,
    prompt_eval_count: Option<u64>,
    eval_count: Option<u64>,
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

impl OllamaProvider {
    pub fn new(base_url: Option<&str>, model: &str, temperature: f64) -> Self {
        Self {
            base_url: base_url
                .unwrap_or(DEFAULT_OLLAMA_URL)
                .trim_end_matches('/')
                .to_string(),
            model: model.to_string(),
            temperature,
            client: build_provider_client_with_timeout(LOCAL_TIMEOUT_SECS),
        }
    }

    fn build_request<'a>(
        &'a self,
        messages: &'a [ChatMessage],
        schema: &'a StructuredSchema,
    ) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: messages
                .iter()
                .map(|m| Message {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            stream: false,
            format: &schema.schema,
            options: Options {
                temperature: self.temperature,
            },
        }
    }

    async fn call_api(
        &self,
        messages: &[ChatMessage],
        schema: &StructuredSchema,
    ) -> anyhow::Result<ChatResponse> {
        let request = self.build_request(messages, schema);
        let url = format!("{}/api/chat", self.base_url);

        let response = self.client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            let err = super::api_error("Ollama", response).await;
            anyhow::bail!("{err}. Is Ollama running? (ollama serve)");
        }

        response.json().await.map_err(anyhow::Error::msg)
    }
}

impl Provider for OllamaProvider {
    fn class_name(&self) -> &str {
        "OllamaProvider"
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            provider: "ollama".into(),
            model_name: self.model.clone(),
            base_url: self.base_url.clone(),
            temperature: self.temperature,
            context_window: None,
            is_chat_model: true,
            is_function_calling_model: false,
            system_role: MessageRole::System,
        }
    }

    fn chat_structured<'a>(
        &'a self,
        messages: &'a [ChatMessage],
        schema: &'a StructuredSchema,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ProviderResponse>> + Send + 'a>> {
        Box::pin(async move {
            let chat_response = self.call_api(messages, schema).await?;
            let text = chat_response.message.content;
            let mut provider_response =
                match (chat_response.prompt_eval_count, chat_response.eval_count) {
                    (Some(input_tokens), Some(output_tokens)) => {
                        ProviderResponse::with_usage(text, input_tokens, output_tokens)
                    }
                    _ => ProviderResponse::text_only(text),
                };
            if let Some(api_model) = chat_response.model {
                provider_response = provider_response.with_model(api_model);
            }
            Ok(provider_response)
        })
    }
}
