// Advisory boundary: client, prompts, and the structured suggestion schema.

pub mod client;
pub mod prompt;
pub mod suggestion;

pub use client::{AdvisoryService, AiClient, AiError, GenerateOpts};
pub use suggestion::TradeSuggestion;
