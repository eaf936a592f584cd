use super::ollama::OllamaProvider;
use super::openai::OpenAiProvider;
use super::traits::Provider;
use crate::error::LlmError;

/// Provider names accepted by [`create_provider`], with a one-line summary.
pub const SUPPORTED_PROVIDERS: [(&str, &str); 5] = [
    ("ollama", "Local Ollama server, native /api/chat with a JSON Schema format"),
    ("openai", "OpenAI Chat Completions with json_schema response format"),
    ("openrouter", "OpenRouter (OpenAI-compatible)"),
    ("groq", "Groq (OpenAI-compatible)"),
    ("lmstudio", "LM Studio local server (OpenAI-compatible)"),
];

/// Everything a provider needs besides its name.
#[derive(Debug, Clone, Default)]
pub struct ProviderOptions {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: String,
    pub temperature: f64,
}

/// Resolve API key for a provider from config and environment variables.
///
/// Resolution order:
/// 1. Explicitly provided `api_key` (trimmed, ignored if empty)
/// 2. Provider-specific environment variable (e.g. `OPENROUTER_API_KEY`)
/// 3. Generic fallback variables (`PITCH_CLEANUP_API_KEY`, `API_KEY`)
pub fn resolve_api_key(name: &str, explicit_api_key: Option<&str>) -> Option<String> {
    if let Some(key) = explicit_api_key.map(str::trim).filter(|k| !k.is_empty()) {
        return Some(key.to_string());
    }

    let provider_env: &[&str] = match name {
        "openai" => &["OPENAI_API_KEY"],
        "openrouter" => &["OPENROUTER_API_KEY"],
        "groq" => &["GROQ_API_KEY"],
        _ => &[],
    };

    provider_env
        .iter()
        .chain(["PITCH_CLEANUP_API_KEY", "API_KEY"].iter())
        .filter_map(|var| std::env::var(var).ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

pub fn create_provider(name: &str, options: &ProviderOptions) -> Result<Box<dyn Provider>, LlmError> {
    let base_url = options.base_url.as_deref();
    let model = options.model.as_str();
    let temperature = options.temperature;

    let compatible = |display: &str, default_url: &str| -> Box<dyn Provider> {
        let api_key = resolve_api_key(name, options.api_key.as_deref());
        Box::new(OpenAiProvider::new(
            display,
            Some(base_url.unwrap_or(default_url)),
            api_key.as_deref(),
            model,
            temperature,
        ))
    };

    match name {
        // Ollama is local; an api_key is accepted and ignored.
        "ollama" => Ok(Box::new(OllamaProvider::new(base_url, model, temperature))),
        "openai" => Ok(compatible("OpenAI", super::openai::DEFAULT_OPENAI_URL)),
        "openrouter" => Ok(compatible("OpenRouter", "https://openrouter.ai/api/v1")),
        "groq" => Ok(compatible("Groq", "https://api.groq.com/openai/v1")),
        "lmstudio" | "lm-studio" => Ok(compatible("LM Studio", "http://localhost:1234/v1")),
        _ => Err(LlmError::UnknownProvider(name.to_string())),
    }
}
