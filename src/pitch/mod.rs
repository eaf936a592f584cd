//! Pitch cleanup: one schema-constrained LLM call that turns a JSON pitch
//! into draft and final Markdown, plus the record persisted for it.

pub mod cleanup;
pub mod prompt;
pub mod query;
pub mod schema;

pub use cleanup::{CleanupOutputOptions, CleanupPitch, CleanupRequest, ceil_secs};
pub use prompt::DEFAULT_SYSTEM_PROMPT;
pub use query::{format_pitch_for_query, load_pitch, parse_pitch};
pub use schema::OutputDocument;
