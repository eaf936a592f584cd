use super::prompt::DEFAULT_SYSTEM_PROMPT;
use super::schema::{DRAFT_MARKDOWN, FINAL_MARKDOWN, OutputDocument};
use crate::error::{LlmError, PitchError, Result};
use crate::providers::{ChatMessage, Provider};
use serde_json::{Map, Value};
use std::path::Path;
use std::time::Duration;
use tokio::time::Instant;

/// Which provenance keys [`CleanupPitch::to_map`] adds next to the reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanupOutputOptions {
    pub include_metadata: bool,
    pub include_system_prompt: bool,
    pub include_user_prompt: bool,
}

impl Default for CleanupOutputOptions {
    fn default() -> Self {
        Self {
            include_metadata: true,
            include_system_prompt: true,
            include_user_prompt: true,
        }
    }
}

impl CleanupOutputOptions {
    /// Reply keys only.
    pub fn response_only() -> Self {
        Self {
            include_metadata: false,
            include_system_prompt: false,
            include_user_prompt: false,
        }
    }
}

/// A configured cleanup call. Holds the system instructions so variants and
/// test doubles don't need to touch a global.
#[derive(Debug, Clone)]
pub struct CleanupRequest {
    system_prompt: String,
}

impl Default for CleanupRequest {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.trim().to_string(),
        }
    }
}

impl CleanupRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into().trim().to_string();
        self
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Ask `provider` to reformat `user_prompt` and validate the reply.
    pub async fn execute(&self, provider: &dyn Provider, user_prompt: &str) -> Result<CleanupPitch> {
        let messages = [
            ChatMessage::system(self.system_prompt.as_str()),
            ChatMessage::user(user_prompt),
        ];
        let schema = OutputDocument::structured_schema();

        tracing::debug!("User Prompt:\n{user_prompt}");
        tracing::debug!("Starting LLM chat interaction.");

        let start = Instant::now();
        let reply = provider
            .chat_structured(&messages, &schema)
            .await
            .map_err(|e| LlmError::Request {
                provider: provider.class_name().to_string(),
                message: format!("{e:#}"),
            })?;
        let duration = ceil_secs(start.elapsed());
        let response_byte_count = reply.text.len();

        tracing::info!(
            duration,
            response_byte_count,
            "LLM chat interaction completed in {duration} seconds."
        );

        let mut metadata = provider.metadata().to_map();
        metadata.insert("llm_classname".into(), provider.class_name().into());
        metadata.insert("duration".into(), duration.into());
        metadata.insert("response_byte_count".into(), response_byte_count.into());

        let response = OutputDocument::parse_reply(&reply.text).inspect_err(|e| {
            tracing::error!("Failed to parse LLM response: {e}");
        })?;

        tracing::debug!("CleanupPitch created successfully.");
        Ok(CleanupPitch {
            system_prompt: self.system_prompt.clone(),
            user_prompt: user_prompt.to_string(),
            response,
            metadata,
        })
    }
}

/// Whole seconds, rounded up. A call that took 2.3s is recorded as 3.
pub fn ceil_secs(elapsed: Duration) -> u64 {
    let secs = elapsed.as_secs();
    if elapsed.subsec_nanos() > 0 {
        secs + 1
    } else {
        secs
    }
}

/// The outcome of one cleanup call. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanupPitch {
    system_prompt: String,
    user_prompt: String,
    response: Map<String, Value>,
    metadata: Map<String, Value>,
}

impl CleanupPitch {
    /// Run with the default system prompt.
    pub async fn execute(provider: &dyn Provider, user_prompt: &str) -> Result<Self> {
        CleanupRequest::default().execute(provider, user_prompt).await
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn user_prompt(&self) -> &str {
        &self.user_prompt
    }

    pub fn response(&self) -> &Map<String, Value> {
        &self.response
    }

    pub fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }

    pub fn draft_markdown(&self) -> &str {
        self.markdown_field(DRAFT_MARKDOWN)
    }

    pub fn final_markdown(&self) -> &str {
        self.markdown_field(FINAL_MARKDOWN)
    }

    // Both fields are checked by `OutputDocument::parse_reply` before construction.
    fn markdown_field(&self, key: &str) -> &str {
        self.response.get(key).and_then(Value::as_str).unwrap_or_default()
    }

    /// Flatten the reply and the selected provenance into one object.
    ///
    /// Provenance keys overwrite same-named keys the model may have returned.
    pub fn to_map(&self, options: CleanupOutputOptions) -> Map<String, Value> {
        let mut map = self.response.clone();
        if options.include_metadata {
            map.insert("metadata".into(), Value::Object(self.metadata.clone()));
        }
        if options.include_system_prompt {
            map.insert("system_prompt".into(), self.system_prompt.clone().into());
        }
        if options.include_user_prompt {
            map.insert("user_prompt".into(), self.user_prompt.clone().into());
        }
        map
    }

    /// Write the full record as 2-space indented JSON, replacing `path`.
    pub fn save_raw(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.to_map(CleanupOutputOptions::default()))
            .map_err(|e| PitchError::Io(e.into()))?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn save_markdown(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.final_markdown())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::{MessageRole, ProviderMetadata, ProviderResponse, StructuredSchema};
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::Mutex;

    struct ScriptedProvider {
        reply: String,
        delay: Duration,
        seen: Mutex<Vec<ChatMessage>>,
    }

    impl ScriptedProvider {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                delay: Duration::ZERO,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl Provider for ScriptedProvider {
        fn class_name(&self) -> &str {
            "ScriptedProvider"
        }

        fn metadata(&self) -> ProviderMetadata {
            ProviderMetadata {
                provider: "scripted".into(),
                model_name: "stub-1".into(),
                base_url: String::new(),
                temperature: 0.0,
                context_window: Some(4096),
                is_chat_model: true,
                is_function_calling_model: false,
                system_role: MessageRole::System,
            }
        }

        fn chat_structured<'a>(
            &'a self,
            messages: &'a [ChatMessage],
            _schema: &'a StructuredSchema,
        ) -> Pin<Box<dyn Future<Output = anyhow::Result<ProviderResponse>> + Send + 'a>> {
            Box::pin(async move {
                self.seen.lock().unwrap().extend_from_slice(messages);
                tokio::time::sleep(self.delay).await;
                Ok(ProviderResponse::text_only(self.reply.clone()))
            })
        }
    }

    struct FailingProvider;

    impl Provider for FailingProvider {
        fn class_name(&self) -> &str {
            "FailingProvider"
        }

        fn metadata(&self) -> ProviderMetadata {
            ScriptedProvider::new("").metadata()
        }

        fn chat_structured<'a>(
            &'a self,
            _messages: &'a [ChatMessage],
            _schema: &'a StructuredSchema,
        ) -> Pin<Box<dyn Future<Output = anyhow::Result<ProviderResponse>> + Send + 'a>> {
            Box::pin(async { Err::<ProviderResponse, _>(anyhow::anyhow!("connection refused")) })
        }
    }

    const REPLY: &str = r##"{"draft_markdown": "# A\n", "final_markdown": "# A\n"}"##;

    #[test]
    fn ceil_secs_rounds_up_fractions() {
        assert_eq!(ceil_secs(Duration::ZERO), 0);
        assert_eq!(ceil_secs(Duration::from_nanos(1)), 1);
        assert_eq!(ceil_secs(Duration::from_millis(2300)), 3);
        assert_eq!(ceil_secs(Duration::from_secs(2)), 2);
    }

    #[tokio::test]
    async fn execute_sends_system_then_user_message() {
        let provider = ScriptedProvider::new(REPLY);

        let result = CleanupPitch::execute(&provider, r#"{"pitch":"x"}"#).await.unwrap();

        let seen = provider.seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].role, MessageRole::System);
        assert_eq!(seen[0].content, DEFAULT_SYSTEM_PROMPT.trim());
        assert_eq!(seen[1].role, MessageRole::User);
        assert_eq!(seen[1].content, r#"{"pitch":"x"}"#);
        assert_eq!(result.system_prompt(), DEFAULT_SYSTEM_PROMPT.trim());
        assert_eq!(result.final_markdown(), "# A\n");
    }

    #[tokio::test]
    async fn custom_system_prompt_is_sent_and_recorded() {
        let provider = ScriptedProvider::new(REPLY);

        let result = CleanupRequest::new()
            .with_system_prompt("  Be brief.\n")
            .execute(&provider, "{}")
            .await
            .unwrap();

        assert_eq!(provider.seen.lock().unwrap()[0].content, "Be brief.");
        assert_eq!(result.system_prompt(), "Be brief.");
    }

    #[tokio::test(start_paused = true)]
    async fn duration_is_rounded_up() {
        let provider = ScriptedProvider {
            delay: Duration::from_millis(2300),
            ..ScriptedProvider::new(REPLY)
        };

        let result = CleanupPitch::execute(&provider, "{}").await.unwrap();

        assert_eq!(result.metadata()["duration"], 3);
        assert_eq!(
            result.response(),
            serde_json::json!({"draft_markdown": "# A\n", "final_markdown": "# A\n"})
                .as_object()
                .unwrap()
        );
    }

    #[tokio::test]
    async fn metadata_merges_provider_info_and_telemetry() {
        let reply = r#"{"draft_markdown": "é", "final_markdown": "ü"}"#;
        let provider = ScriptedProvider::new(reply);

        let result = CleanupPitch::execute(&provider, "{}").await.unwrap();
        let metadata = result.metadata();

        assert_eq!(metadata["llm_classname"], "ScriptedProvider");
        assert_eq!(metadata["model_name"], "stub-1");
        assert_eq!(metadata["context_window"], 4096);
        assert_eq!(metadata["response_byte_count"], reply.len());
        assert_ne!(reply.len(), reply.chars().count());
    }

    #[tokio::test]
    async fn non_json_reply_is_malformed() {
        let provider = ScriptedProvider::new("Here is your pitch in markdown!");

        let err = CleanupPitch::execute(&provider, "{}").await.unwrap_err();

        assert!(matches!(err, PitchError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn reply_missing_field_violates_schema() {
        let provider = ScriptedProvider::new(r##"{"draft_markdown": "# A"}"##);

        let err = CleanupPitch::execute(&provider, "{}").await.unwrap_err();

        assert!(matches!(err, PitchError::SchemaViolation(_)));
    }

    #[tokio::test]
    async fn provider_failure_is_llm_request_error() {
        let err = CleanupPitch::execute(&FailingProvider, "{}").await.unwrap_err();

        match err {
            PitchError::Llm(LlmError::Request { provider, message }) => {
                assert_eq!(provider, "FailingProvider");
                assert!(message.contains("connection refused"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn to_map_without_provenance_is_response_only() {
        let provider = ScriptedProvider::new(REPLY);
        let result = CleanupPitch::execute(&provider, "{}").await.unwrap();

        let map = result.to_map(CleanupOutputOptions::response_only());

        assert_eq!(&map, result.response());
    }

    #[tokio::test]
    async fn to_map_with_provenance_adds_three_keys() {
        let provider = ScriptedProvider::new(REPLY);
        let result = CleanupPitch::execute(&provider, "the pitch").await.unwrap();

        let map = result.to_map(CleanupOutputOptions::default());

        assert_eq!(map.len(), 5);
        assert_eq!(map["user_prompt"], "the pitch");
        assert_eq!(map["system_prompt"], DEFAULT_SYSTEM_PROMPT.trim());
        assert_eq!(map["metadata"], Value::Object(result.metadata().clone()));
    }

    #[tokio::test]
    async fn provenance_overwrites_colliding_reply_keys() {
        let provider = ScriptedProvider::new(
            r#"{"draft_markdown": "d", "final_markdown": "f", "metadata": "from model"}"#,
        );
        let result = CleanupPitch::execute(&provider, "{}").await.unwrap();

        let with = result.to_map(CleanupOutputOptions::default());
        let without = result.to_map(CleanupOutputOptions::response_only());

        assert!(with["metadata"].is_object());
        assert_eq!(without["metadata"], "from model");
    }
}
