use super::http_client::build_provider_client;
use super::response::{
    ChatMessage, MessageRole, ProviderMetadata, ProviderResponse, StructuredSchema,
};
use super::traits::Provider;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;

pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com/v1";

/// Chat Completions with `response_format: json_schema`.
///
/// Any endpoint that speaks the same API (`OpenRouter`, Groq, LM Studio, ...)
/// is served by this type with a different name and base URL.
pub struct OpenAiProvider {
    name: String,
    base_url: String,
    /// Pre-computed `"Bearer <key>"` header value.
    cached_auth_header: Option<String>,
    cached_chat_url: String,
    model: String,
    temperature: f64,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f64,
    response_format: ResponseFormat<'a>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat<'a> {
    r#type: &'static str,
    json_schema: JsonSchemaFormat<'a>,
}

#[derive(Debug, Serialize)]
struct JsonSchemaFormat<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    schema: &'a Value,
    strict: bool,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u64,
    completion_tokens: u64,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
    refusal: Option<String>,
}

impl OpenAiProvider {
    pub fn new(
        name: &str,
        base_url: Option<&str>,
        api_key: Option<&str>,
        model: &str,
        temperature: f64,
    ) -> Self {
        let base_url = base_url
            .unwrap_or(DEFAULT_OPENAI_URL)
            .trim_end_matches('/')
            .to_string();
        let cached_chat_url = if base_url.ends_with("chat/completions") {
            base_url.clone()
        } else {
            format!("{base_url}/chat/completions")
        };

        Self {
            name: name.to_string(),
            base_url,
            cached_auth_header: api_key.map(|k| format!("Bearer {k}")),
            cached_chat_url,
            model: model.to_string(),
            temperature,
            client: build_provider_client(),
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
            temperature: self.temperature,
            response_format: ResponseFormat {
                r#type: "json_schema",
                json_schema: JsonSchemaFormat {
                    name: &schema.name,
                    description: schema.description.as_deref(),
                    schema: &schema.schema,
                    strict: schema.strict,
                },
            },
        }
    }

    fn extract_text(&self, chat_response: ChatResponse) -> anyhow::Result<ProviderResponse> {
        let ChatResponse {
            choices,
            usage,
            model,
        } = chat_response;

        let message = choices
            .into_iter()
            .next()
            .map(|c| c.message)
            .ok_or_else(|| anyhow::anyhow!("No response from {}", self.name))?;

        if let Some(refusal) = message.refusal {
            anyhow::bail!("{} refused the request: {refusal}", self.name);
        }

        let text = message
            .content
            .ok_or_else(|| anyhow::anyhow!("{} returned an empty message", self.name))?;

        let mut response = match usage {
            Some(u) => ProviderResponse::with_usage(text, u.prompt_tokens, u.completion_tokens),
            None => ProviderResponse::text_only(text),
        };
        if let Some(model) = model {
            response = response.with_model(model);
        }
        Ok(response)
    }
}

impl Provider for OpenAiProvider {
    fn class_name(&self) -> &str {
        "OpenAiProvider"
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            provider: self.name.clone(),
            model_name: self.model.clone(),
            base_url: self.base_url.clone(),
            temperature: self.temperature,
            context_window: None,
            is_chat_model: true,
            is_function_calling_model: true,
            system_role: MessageRole::System,
        }
    }

    fn chat_structured<'a>(
        &'a self,
        messages: &'a [ChatMessage],
        schema: &'a StructuredSchema,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ProviderResponse>> + Send + 'a>> {
        Box::pin(async move {
            let request = self.build_request(messages, schema);
            let mut builder = self.client.post(&self.cached_chat_url).json(&request);
            if let Some(auth) = &self.cached_auth_header {
                builder = builder.header("Authorization", auth);
            }

            let response = builder.send().await?;
            if !response.status().is_success() {
                return Err(super::api_error(&self.name, response).await);
            }

            let chat_response: ChatResponse = response.json().await?;
            self.extract_text(chat_response)
        })
    }
}
