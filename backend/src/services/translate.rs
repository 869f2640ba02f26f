//! Translation proxy to a generative-language API
//!
//! Wraps one `generateContent` call: the text is embedded in a fixed
//! prompt asking for a bare translation into the configured language.

use crate::config::TranslateConfig;
use crate::error::ApiError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Upper bound on one upstream call
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Client for the translation upstream
#[derive(Clone)]
pub struct TranslationService {
    client: reqwest::Client,
    config: TranslateConfig,
}

impl TranslationService {
    pub fn new(config: TranslateConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client, config })
    }

    /// Whether an API key is configured
    pub fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    fn prompt(&self, text: &str) -> String {
        format!(
            "Translate this text: {} to {}, dont give me anything else apart from the translation",
            text, self.config.target_language
        )
    }

    /// Translate `text` into the configured target language
    pub async fn translate(&self, text: &str) -> Result<String, ApiError> {
        if text.trim().is_empty() {
            return Err(ApiError::Validation("Text to translate cannot be empty".to_string()));
        }
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| ApiError::Unavailable("Translation is not configured".to_string()))?;

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        );
        let prompt = self.prompt(text);
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: &prompt }],
            }],
        };

        debug!(model = %self.config.model, "Requesting translation");
        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::Upstream(format!("request failed: {}", e.without_url())))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Translation upstream returned an error");
            return Err(ApiError::Upstream(format!("upstream returned {}", status)));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Upstream(format!("unreadable response: {}", e.without_url())))?;

        parsed
            .candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .find_map(|p| p.text)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::Upstream("response carried no text".to_string()))
    }
}
