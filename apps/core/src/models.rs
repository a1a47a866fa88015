//! Wire models for the stdio tool surface.
//!
//! One request per line, one response per line. The envelope is
//! deliberately minimal: an optional caller id, a method name, and a params
//! object validated before it reaches the core.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::design::intent::DesignIntent;

/// Method name for character generation.
pub const METHOD_GENERATE_CHARACTER: &str = "generate_character";
/// Method name for the strict archetype rule lookup.
pub const METHOD_GET_ARCHETYPE_RULES: &str = "get_archetype_rules";

/// An inbound request line.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolRequest {
    /// Caller-chosen correlation id, echoed back verbatim.
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

/// Error payload carried by a failed response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolError {
    pub message: String,
}

/// An outbound response line: exactly one of `result` or `error` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ToolError>,
}

impl ToolResponse {
    pub fn ok(id: Option<Value>, result: Value) -> Self {
        Self {
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn err(id: Option<Value>, message: impl Into<String>) -> Self {
        Self {
            id,
            result: None,
            error: Some(ToolError {
                message: message.into(),
            }),
        }
    }
}

/// Parameters of `generate_character`. The prompt may be empty (generation
/// is total), but it is capped to keep the surface bounded.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateCharacterParams {
    #[validate(length(max = 2000))]
    pub user_prompt: String,
    #[validate(nested)]
    #[serde(default)]
    pub design_intent: Option<DesignIntent>,
}

/// Parameters of `get_archetype_rules`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ArchetypeRulesParams {
    #[validate(length(min = 1, max = 100))]
    pub emotional_tone: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_params_accept_empty_prompt() {
        let params: GenerateCharacterParams =
            serde_json::from_value(serde_json::json!({ "user_prompt": "" })).unwrap();
        assert!(params.validate().is_ok());
        assert!(params.design_intent.is_none());
    }

    #[test]
    fn test_generate_params_reject_oversized_prompt() {
        let params: GenerateCharacterParams = serde_json::from_value(serde_json::json!({
            "user_prompt": "x".repeat(2001),
        }))
        .unwrap();
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_intent_fields_are_optional() {
        let params: GenerateCharacterParams = serde_json::from_value(serde_json::json!({
            "user_prompt": "a cloud",
            "design_intent": { "mood": "dreamy" },
        }))
        .unwrap();
        assert!(params.validate().is_ok());
        let intent = params.design_intent.unwrap();
        assert_eq!(intent.mood.as_deref(), Some("dreamy"));
        assert!(intent.weight_feeling.is_none());
    }

    #[test]
    fn test_archetype_params_reject_empty_identifier() {
        let params: ArchetypeRulesParams =
            serde_json::from_value(serde_json::json!({ "emotional_tone": "" })).unwrap();
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_response_shape() {
        let ok = ToolResponse::ok(Some(serde_json::json!(7)), serde_json::json!({"a": 1}));
        let text = serde_json::to_string(&ok).unwrap();
        assert!(text.contains("\"result\""));
        assert!(!text.contains("\"error\""));

        let err = ToolResponse::err(None, "nope");
        let text = serde_json::to_string(&err).unwrap();
        assert!(text.contains("\"error\""));
        assert!(!text.contains("\"id\""));
    }
}
