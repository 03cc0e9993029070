// Generative Language API client for advisory calls.
//
// Each call is a single `generateContent` request-response: build the JSON
// body, POST it, and pull the text out of the first candidate. No streaming,
// no retry; failures map onto the `AiError` taxonomy and the caller decides
// what to show.

use async_trait::async_trait;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::ai::suggestion::{self, TradeSuggestion};
use crate::config::Config;
use crate::session::{wait_ready, BackoffPolicy};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum AiError {
    #[error("advisory model not configured")]
    NotConfigured,

    #[error("advisory request failed: {0}")]
    Http(String),

    #[error("advisory response contained no candidates")]
    Empty,

    #[error("advisory response failed schema validation: {0}")]
    Schema(String),
}

// ---------------------------------------------------------------------------
// Request options
// ---------------------------------------------------------------------------

/// Per-call generation options layered over the client's model defaults.
#[derive(Debug, Clone, Default)]
pub struct GenerateOpts {
    /// Thinking-token budget hint; omitted from the request when `None`.
    pub thinking_budget: Option<u32>,
    /// When set, the response is constrained to JSON matching this schema.
    pub response_schema: Option<Value>,
    /// Attach the web-search tool for news-grounded answers.
    pub web_search: bool,
}

impl GenerateOpts {
    pub fn with_thinking(budget: u32) -> Self {
        GenerateOpts {
            thinking_budget: Some(budget),
            ..Default::default()
        }
    }
}

// ---------------------------------------------------------------------------
// AdvisoryService trait
// ---------------------------------------------------------------------------

/// The pluggable advisory seam. The orchestrator only ever talks to this
/// trait, so tests can substitute a canned implementation.
#[async_trait]
pub trait AdvisoryService: Send + Sync {
    /// Generate free text for the given prompt.
    async fn generate(&self, prompt: &str, opts: GenerateOpts) -> Result<String, AiError>;

    /// Generate schema-validated trade suggestions for the given prompt.
    async fn generate_suggestions(&self, prompt: &str) -> Result<Vec<TradeSuggestion>, AiError>;
}

// ---------------------------------------------------------------------------
// GeminiClient
// ---------------------------------------------------------------------------

/// Low-level `generateContent` client.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    max_output_tokens: u32,
    thinking_budget: u32,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, max_output_tokens: u32, thinking_budget: u32) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            model,
            max_output_tokens,
            thinking_budget,
        }
    }

    fn endpoint(&self) -> String {
        format!("{GEMINI_API_BASE}/{}:generateContent", self.model)
    }

    async fn request(&self, prompt: &str, opts: &GenerateOpts) -> Result<String, AiError> {
        let body = build_request_body(
            prompt,
            self.max_output_tokens,
            opts.thinking_budget.unwrap_or(self.thinking_budget),
            opts.response_schema.as_ref(),
            opts.web_search,
        );

        debug!(model = %self.model, web_search = opts.web_search, "advisory request");

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AiError::Http(format!("network error: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "advisory request rejected");
            return Err(AiError::Http(format!("API returned status {status}")));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| AiError::Http(format!("response body: {e}")))?;

        extract_candidate_text(&payload).ok_or(AiError::Empty)
    }

    /// Check the API for reachability: a cheap GET against the model listing
    /// endpoint with the configured key. Any 2xx counts as ready.
    pub async fn check_ready(&self) -> bool {
        let result = self
            .http
            .get(GEMINI_API_BASE)
            .header("x-goog-api-key", &self.api_key)
            .send()
            .await;
        match result {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!(%e, "advisory readiness check failed");
                false
            }
        }
    }
}

#[async_trait]
impl AdvisoryService for GeminiClient {
    async fn generate(&self, prompt: &str, opts: GenerateOpts) -> Result<String, AiError> {
        self.request(prompt, &opts).await
    }

    async fn generate_suggestions(&self, prompt: &str) -> Result<Vec<TradeSuggestion>, AiError> {
        let opts = GenerateOpts {
            response_schema: Some(suggestion::response_schema()),
            ..Default::default()
        };
        let text = self.request(prompt, &opts).await?;
        suggestion::parse_suggestions(&text)
    }
}

// ---------------------------------------------------------------------------
// AiClient wrapper
// ---------------------------------------------------------------------------

/// High-level wrapper that is either an active client or disabled.
pub enum AiClient {
    /// The advisory API is configured and ready.
    Active(GeminiClient),
    /// Advisory functionality is disabled (no API key configured).
    Disabled,
}

impl AiClient {
    /// Build an `AiClient` from the application config.
    ///
    /// Returns `Active` if an API key is present in credentials, otherwise
    /// `Disabled`.
    pub fn from_config(config: &Config) -> Self {
        match &config.credentials.gemini_api_key {
            Some(key) if !key.is_empty() => AiClient::Active(GeminiClient::new(
                key.clone(),
                config.llm.model.clone(),
                config.llm.max_output_tokens,
                config.llm.thinking_budget,
            )),
            _ => AiClient::Disabled,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, AiClient::Active(_))
    }

    /// Wait for the advisory API to answer within the backoff policy.
    ///
    /// An `Active` client whose API never answers is downgraded to
    /// `Disabled`, so the dashboard starts with advisory features off
    /// instead of failing every request. `Disabled` passes through without
    /// touching the network.
    pub async fn ensure_ready(self, policy: BackoffPolicy) -> Self {
        let AiClient::Active(client) = self else {
            return AiClient::Disabled;
        };
        match wait_ready(|| client.check_ready(), policy).await {
            Ok(attempts) => {
                info!(attempts, "advisory API ready");
                AiClient::Active(client)
            }
            Err(e) => {
                warn!(%e, "advisory API unreachable, disabling advisory features");
                AiClient::Disabled
            }
        }
    }
}

#[async_trait]
impl AdvisoryService for AiClient {
    async fn generate(&self, prompt: &str, opts: GenerateOpts) -> Result<String, AiError> {
        match self {
            AiClient::Active(client) => client.generate(prompt, opts).await,
            AiClient::Disabled => Err(AiError::NotConfigured),
        }
    }

    async fn generate_suggestions(&self, prompt: &str) -> Result<Vec<TradeSuggestion>, AiError> {
        match self {
            AiClient::Active(client) => client.generate_suggestions(prompt).await,
            AiClient::Disabled => Err(AiError::NotConfigured),
        }
    }
}

// ---------------------------------------------------------------------------
// Request/response JSON helpers
// ---------------------------------------------------------------------------

/// Assemble the `generateContent` request body.
pub(crate) fn build_request_body(
    prompt: &str,
    max_output_tokens: u32,
    thinking_budget: u32,
    response_schema: Option<&Value>,
    web_search: bool,
) -> Value {
    let mut generation_config = json!({
        "maxOutputTokens": max_output_tokens,
        "thinkingConfig": { "thinkingBudget": thinking_budget }
    });

    if let Some(schema) = response_schema {
        generation_config["responseMimeType"] = json!("application/json");
        generation_config["responseSchema"] = schema.clone();
    }

    let mut body = json!({
        "contents": [{ "parts": [{ "text": prompt }] }],
        "generationConfig": generation_config
    });

    if web_search {
        body["tools"] = json!([{ "google_search": {} }]);
    }

    body
}

/// Pull the concatenated text parts out of the first candidate.
///
/// Expected shape:
/// `{ "candidates": [ { "content": { "parts": [ { "text": "..." } ] } } ] }`
pub(crate) fn extract_candidate_text(payload: &Value) -> Option<String> {
    let parts = payload
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .as_array()?;

    let mut text = String::new();
    for part in parts {
        if let Some(s) = part.get("text").and_then(Value::as_str) {
            text.push_str(s);
        }
    }

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- request body --

    #[test]
    fn plain_request_has_no_schema_or_tools() {
        let body = build_request_body("analyze my roster", 1024, 4000, None, false);

        assert_eq!(
            body["contents"][0]["parts"][0]["text"].as_str(),
            Some("analyze my roster")
        );
        assert_eq!(body["generationConfig"]["maxOutputTokens"].as_u64(), Some(1024));
        assert_eq!(
            body["generationConfig"]["thinkingConfig"]["thinkingBudget"].as_u64(),
            Some(4000)
        );
        assert!(body["generationConfig"].get("responseSchema").is_none());
        assert!(body.get("tools").is_none());
    }

    #[test]
    fn schema_request_sets_json_mime_type() {
        let schema = suggestion::response_schema();
        let body = build_request_body("scout trades", 1024, 4000, Some(&schema), false);

        assert_eq!(
            body["generationConfig"]["responseMimeType"].as_str(),
            Some("application/json")
        );
        assert_eq!(body["generationConfig"]["responseSchema"], schema);
    }

    #[test]
    fn web_search_request_attaches_the_tool() {
        let body = build_request_body("latest injury news", 1024, 4000, None, true);
        assert!(body["tools"][0].get("google_search").is_some());
    }

    // -- response parsing --

    #[test]
    fn extracts_single_part_text() {
        let payload = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Start Gafford tonight." }] }
            }]
        });
        assert_eq!(
            extract_candidate_text(&payload).as_deref(),
            Some("Start Gafford tonight.")
        );
    }

    #[test]
    fn concatenates_multiple_parts() {
        let payload = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "one " }, { "text": "two" }] }
            }]
        });
        assert_eq!(extract_candidate_text(&payload).as_deref(), Some("one two"));
    }

    #[test]
    fn no_candidates_is_none() {
        assert_eq!(extract_candidate_text(&json!({ "candidates": [] })), None);
        assert_eq!(extract_candidate_text(&json!({})), None);
    }

    #[test]
    fn candidate_with_empty_parts_is_none() {
        let payload = json!({
            "candidates": [{ "content": { "parts": [] } }]
        });
        assert_eq!(extract_candidate_text(&payload), None);
    }

    // -- disabled client --

    #[tokio::test(start_paused = true)]
    async fn disabled_client_skips_the_readiness_check() {
        // No network and no backoff delay: Disabled passes straight through.
        let client = AiClient::Disabled
            .ensure_ready(BackoffPolicy::default())
            .await;
        assert!(!client.is_active());
    }

    #[tokio::test]
    async fn disabled_client_fails_with_not_configured() {
        let client = AiClient::Disabled;
        assert!(matches!(
            client.generate("hello", GenerateOpts::default()).await,
            Err(AiError::NotConfigured)
        ));
        assert!(matches!(
            client.generate_suggestions("hello").await,
            Err(AiError::NotConfigured)
        ));
    }
}
