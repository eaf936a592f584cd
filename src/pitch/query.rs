use crate::error::{PitchError, Result};
use serde_json::{Map, Value};
use std::path::Path;

/// Keys written by earlier pipeline steps that are not part of the pitch.
const PROVENANCE_KEYS: [&str; 3] = ["metadata", "system_prompt", "user_prompt"];

/// Read a pitch document from disk. The root must be a JSON object.
pub fn load_pitch(path: &Path) -> Result<Map<String, Value>> {
    let contents = std::fs::read_to_string(path)?;
    parse_pitch(&contents)
}

pub fn parse_pitch(contents: &str) -> Result<Map<String, Value>> {
    let value: Value = serde_json::from_str(contents)
        .map_err(|e| PitchError::InvalidInput(format!("pitch is not valid JSON: {e}")))?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(PitchError::InvalidInput(
            "pitch must be a JSON object of section titles to content".into(),
        )),
    }
}

/// Render a pitch as the user prompt: provenance keys removed, compact JSON.
pub fn format_pitch_for_query(pitch: &Map<String, Value>) -> String {
    let cleaned: Map<String, Value> = pitch
        .iter()
        .filter(|(key, _)| !PROVENANCE_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    Value::Object(cleaned).to_string()
}
