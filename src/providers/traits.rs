use super::response::{ChatMessage, ProviderMetadata, ProviderResponse, StructuredSchema};
use std::future::Future;
use std::pin::Pin;

/// A chat model that can be asked for a reply constrained to a JSON Schema.
///
/// Implementations own their model name and sampling settings, so callers
/// only hand over the conversation and the schema.
pub trait Provider: Send + Sync {
    /// Implementation identifier (e.g. `"OllamaProvider"`).
    fn class_name(&self) -> &str;

    /// Provider/model configuration recorded as provenance.
    fn metadata(&self) -> ProviderMetadata;

    /// Send `messages` and ask for a reply body matching `schema`.
    ///
    /// The returned text is whatever the endpoint produced; it is not parsed
    /// or validated here.
    fn chat_structured<'a>(
        &'a self,
        messages: &'a [ChatMessage],
        schema: &'a StructuredSchema,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ProviderResponse>> + Send + 'a>>;
}
