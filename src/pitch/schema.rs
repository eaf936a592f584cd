use crate::error::{PitchError, Result};
use crate::providers::StructuredSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DRAFT_MARKDOWN: &str = "draft_markdown";
pub const FINAL_MARKDOWN: &str = "final_markdown";

/// The reply contract: two Markdown renditions of the pitch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputDocument {
    pub draft_markdown: String,
    pub final_markdown: String,
}

impl OutputDocument {
    /// JSON Schema sent to the endpoint for constrained decoding.
    pub fn structured_schema() -> StructuredSchema {
        StructuredSchema {
            name: "OutputDocument".into(),
            description: Some("Draft and final Markdown renditions of a project pitch.".into()),
            schema: serde_json::json!({
                "type": "object",
                "properties": {
                    DRAFT_MARKDOWN: {
                        "type": "string",
                        "description": "Markdown format."
                    },
                    FINAL_MARKDOWN: {
                        "type": "string",
                        "description": "Markdown format."
                    }
                },
                "required": [DRAFT_MARKDOWN, FINAL_MARKDOWN],
                "additionalProperties": false
            }),
            strict: true,
        }
    }

    /// Parse raw reply text into a JSON object that satisfies the contract.
    ///
    /// Keys beyond the two required fields are kept; the object is returned
    /// as-is so callers persist exactly what the model sent.
    pub fn parse_reply(raw: &str) -> Result<Map<String, Value>> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|source| PitchError::MalformedResponse { source })?;

        let Value::Object(map) = value else {
            return Err(PitchError::SchemaViolation(format!(
                "expected a JSON object, got {}",
                json_type_name(&value)
            )));
        };

        for field in [DRAFT_MARKDOWN, FINAL_MARKDOWN] {
            match map.get(field) {
                Some(Value::String(_)) => {}
                Some(other) => {
                    return Err(PitchError::SchemaViolation(format!(
                        "field `{field}` must be a string, got {}",
                        json_type_name(other)
                    )));
                }
                None => {
                    return Err(PitchError::SchemaViolation(format!(
                        "missing required field `{field}`"
                    )));
                }
            }
        }

        Ok(map)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
