use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `pitch-cleanup`.
///
/// Library callers can match on these to tell a misbehaving model apart from
/// a broken transport or a bad input file; the binary keeps using
/// `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum PitchError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── LLM / Provider ──────────────────────────────────────────────────
    #[error("llm: {0}")]
    Llm(#[from] LlmError),

    // ── Model reply ─────────────────────────────────────────────────────
    #[error("invalid JSON response from LLM: {source}")]
    MalformedResponse {
        #[source]
        source: serde_json::Error,
    },

    #[error("LLM response does not match the output schema: {0}")]
    SchemaViolation(String),

    // ── Input ───────────────────────────────────────────────────────────
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── LLM / Provider errors ──────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("provider {provider} request failed: {message}")]
    Request { provider: String, message: String },

    #[error("unknown provider: {0}")]
    UnknownProvider(String),
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, PitchError>;
