// Structured trade-suggestion payloads returned by the advisory model.
//
// Responses are requested with a JSON response schema and parsed strictly:
// a payload that does not match the schema is a hard `AiError::Schema`,
// never an empty list.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::ai::client::AiError;
use crate::scoring::trade::CategoryImpact;

/// How hard the model expects the counterparty negotiation to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NegotiationDifficulty {
    Easy,
    Fair,
    Hard,
}

impl NegotiationDifficulty {
    pub fn label(&self) -> &'static str {
        match self {
            NegotiationDifficulty::Easy => "Easy",
            NegotiationDifficulty::Fair => "Fair",
            NegotiationDifficulty::Hard => "Hard",
        }
    }
}

/// One proposed trade from the scouting model.
///
/// The wire format uses camelCase keys (`targetPlayerName`, ...); the serde
/// rename keeps the Rust fields snake_case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeSuggestion {
    pub target_player_name: String,
    pub asset_to_give_name: String,
    /// 0-100 fit score for how well the target complements the roster.
    pub synergy_score: u8,
    pub category_impacts: Vec<CategoryImpact>,
    pub the_pitch: String,
    pub negotiation_difficulty: NegotiationDifficulty,
}

/// Parse a model response into trade suggestions.
///
/// The payload must be a JSON array of suggestion objects. Anything else,
/// including a suggestion with an out-of-range synergy score, is rejected
/// with `AiError::Schema`.
pub fn parse_suggestions(payload: &str) -> Result<Vec<TradeSuggestion>, AiError> {
    let suggestions: Vec<TradeSuggestion> = serde_json::from_str(payload)
        .map_err(|e| AiError::Schema(format!("suggestion payload: {e}")))?;

    for s in &suggestions {
        if s.synergy_score > 100 {
            return Err(AiError::Schema(format!(
                "synergyScore {} out of range for target `{}`",
                s.synergy_score, s.target_player_name
            )));
        }
        if s.target_player_name.trim().is_empty() || s.asset_to_give_name.trim().is_empty() {
            return Err(AiError::Schema("empty player name in suggestion".into()));
        }
    }

    Ok(suggestions)
}

/// The response schema sent with trade-scout requests so the model emits
/// parseable JSON directly.
pub fn response_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "targetPlayerName": { "type": "STRING" },
                "assetToGiveName": { "type": "STRING" },
                "synergyScore": { "type": "INTEGER" },
                "categoryImpacts": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "category": { "type": "STRING" },
                            "delta": { "type": "NUMBER" },
                            "isImprovement": { "type": "BOOLEAN" }
                        },
                        "required": ["category", "delta", "isImprovement"]
                    }
                },
                "thePitch": { "type": "STRING" },
                "negotiationDifficulty": {
                    "type": "STRING",
                    "enum": ["Easy", "Fair", "Hard"]
                }
            },
            "required": [
                "targetPlayerName",
                "assetToGiveName",
                "synergyScore",
                "categoryImpacts",
                "thePitch",
                "negotiationDifficulty"
            ]
        }
    })
}
