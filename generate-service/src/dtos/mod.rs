//! Request payloads for the generation API.

use serde_json::Value;
use service_core::error::AppError;

/// A parsed generation request, tagged by the `action` field.
///
/// The set of actions is closed: adding a pipeline means adding a variant
/// here and a matching arm in the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateRequest {
    Deck(DeckRequest),
    Image(ImageRequest),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckRequest {
    pub prompt: String,
    pub negative_prompt: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub prompt: Option<String>,
    pub negative_prompt: Option<String>,
}

impl GenerateRequest {
    /// Parse a raw request body.
    ///
    /// Validation is staged so each failure maps to its own client error:
    /// malformed JSON, missing `action`, unknown `action`, and a missing
    /// `prompt` for the deck pipeline.
    pub fn from_body(body: &[u8]) -> Result<Self, AppError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|_| AppError::BadRequest(anyhow::anyhow!("Invalid JSON in request body.")))?;

        let action = match value.get("action") {
            None | Some(Value::Null) => {
                return Err(AppError::BadRequest(anyhow::anyhow!(
                    "Missing action in request body."
                )));
            }
            Some(Value::String(s)) if s.is_empty() => {
                return Err(AppError::BadRequest(anyhow::anyhow!(
                    "Missing action in request body."
                )));
            }
            Some(Value::String(s)) => s.as_str(),
            Some(_) => {
                return Err(AppError::BadRequest(anyhow::anyhow!("Invalid action")));
            }
        };

        match action {
            "deck" => {
                let prompt = value
                    .get("prompt")
                    .and_then(|p| p.as_str())
                    .filter(|p| !p.is_empty())
                    .ok_or_else(|| {
                        AppError::BadRequest(anyhow::anyhow!("Missing prompt for deck action."))
                    })?;

                Ok(GenerateRequest::Deck(DeckRequest {
                    prompt: prompt.to_string(),
                    negative_prompt: string_field(&value, "negative_prompt"),
                }))
            }
            "image" => Ok(GenerateRequest::Image(ImageRequest {
                prompt: string_field(&value, "prompt"),
                negative_prompt: string_field(&value, "negative_prompt"),
            })),
            _ => Err(AppError::BadRequest(anyhow::anyhow!("Invalid action"))),
        }
    }
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}
