pub mod factory;
pub mod http_client;
pub mod ollama;
pub mod openai;
pub mod response;
pub mod scrub;
pub mod traits;

pub use factory::{ProviderOptions, SUPPORTED_PROVIDERS, create_provider, resolve_api_key};
pub use response::{
    ChatMessage, MessageRole, ProviderMetadata, ProviderResponse, StructuredSchema,
};
pub use scrub::{api_error, sanitize_api_error, scrub_secret_patterns};
pub use traits::Provider;
