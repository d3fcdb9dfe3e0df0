use serde::Deserialize;
use tracing::{info, warn};

use super::{classify_failure, RecommendationError, RecommendationProvider};
use crate::config::RecommendationConfig;

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateContentResponse {
    fn first_text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        let trimmed = text.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

/// Gemini `generateContent` client. One attempt per call; no retry.
#[derive(Clone)]
pub struct GeminiClient {
    config: RecommendationConfig,
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: RecommendationConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self { config, client }
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model", &self.config.model)
            .field("endpoint", &self.config.endpoint)
            .finish_non_exhaustive()
    }
}

impl RecommendationProvider for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, RecommendationError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(RecommendationError::NotConfigured("GEMINI_API_KEY"))?;

        let payload = serde_json::json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }]
        });

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|err| classify_failure(err.status().map(|s| s.as_u16()), &err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "recommendation request rejected");
            return Err(classify_failure(Some(status.as_u16()), &body));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| RecommendationError::InvalidResponse(err.to_string()))?;

        let text = body.first_text().ok_or(RecommendationError::EmptyResponse)?;
        info!(model = %self.config.model, chars = text.len(), "recommendation generated");
        Ok(text)
    }
}
