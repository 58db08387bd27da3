//! Advisory backend trait and the Google Gemini implementation.
//!
//! One request per positive prediction, no retries, no timeout beyond what
//! reqwest enforces. Failures come back as typed errors; folding them into
//! display text is the caller's decision.

use async_trait::async_trait;
use thiserror::Error;

// ── Error ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum AdvisoryError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error [{status}]: {message}")]
    ApiError { status: u16, message: String },
    #[error("Empty response from generative service")]
    Empty,
}

// ── Trait ─────────────────────────────────────────────────────────────────────

/// External generative text service.
///
/// Object-safe so the web state can hold `Arc<dyn AdvisoryBackend>` and
/// tests can substitute a scripted double.
#[async_trait]
pub trait AdvisoryBackend: Send + Sync {
    async fn advise(&self, prompt: &str) -> Result<String, AdvisoryError>;
    fn model_id(&self) -> &str;
}

// ── Helper ────────────────────────────────────────────────────────────────────

async fn check_response_status(resp: reqwest::Response) -> Result<serde_json::Value, AdvisoryError> {
    let status = resp.status().as_u16();
    let body: serde_json::Value = resp.json().await?;
    if status >= 400 {
        let msg = body["error"]["message"]
            .as_str()
            .or_else(|| body["message"].as_str())
            .unwrap_or("unknown API error")
            .to_string();
        return Err(AdvisoryError::ApiError {
            status,
            message: msg,
        });
    }
    Ok(body)
}

// ── Google Gemini ─────────────────────────────────────────────────────────────

pub struct GeminiBackend {
    pub model: String,
    api_key: String,
    client: reqwest::Client,
}

impl GeminiBackend {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl AdvisoryBackend for GeminiBackend {
    async fn advise(&self, prompt: &str) -> Result<String, AdvisoryError> {
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model, self.api_key
        );

        let body = serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }]
            }],
            "generationConfig": {
                "maxOutputTokens": 4096,
                "temperature": 0.1,
            }
        });

        let resp = self.client.post(&url).json(&body).send().await?;
        let json = check_response_status(resp).await?;

        let content = json["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .unwrap_or("");
        if content.is_empty() {
            return Err(AdvisoryError::Empty);
        }

        tracing::debug!(model = %self.model, chars = content.len(), "Advisory received");
        Ok(content.to_string())
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
