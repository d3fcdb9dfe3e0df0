//! Study recommendations from an external text-generation service.

mod gemini;
mod prompt;

pub use gemini::GeminiClient;
pub use prompt::build_prompt;

use std::future::Future;

use serde::{Deserialize, Serialize};

use super::domain::{Dominant, PercentageBreakdown};

pub const QUOTA_EXCEEDED_MESSAGE: &str = "Quota API Gemini habis. Silakan tunggu beberapa menit dan coba lagi, atau hubungi administrator untuk mengecek billing API.";
pub const GENERIC_FAILURE_MESSAGE: &str = "Gagal mendapatkan rekomendasi AI";
pub const NOT_CONFIGURED_MESSAGE: &str = "Layanan rekomendasi AI belum dikonfigurasi.";

/// Input for a recommendation: the outcome label and its breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    pub dominant: Dominant,
    pub percentages: PercentageBreakdown,
}

impl RecommendationRequest {
    pub fn prompt(&self) -> String {
        build_prompt(self.dominant, &self.percentages)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub text: String,
}

/// Outbound text-generation hook.
pub trait RecommendationProvider: Send + Sync {
    fn generate(
        &self,
        prompt: &str,
    ) -> impl Future<Output = Result<String, RecommendationError>> + Send;
}

#[derive(Debug, thiserror::Error)]
pub enum RecommendationError {
    #[error("recommendation service not configured: {0} missing")]
    NotConfigured(&'static str),
    #[error("recommendation quota exhausted: {0}")]
    QuotaExceeded(String),
    #[error("recommendation request failed: {0}")]
    Request(String),
    #[error("recommendation service returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },
    #[error("recommendation service returned no text")]
    EmptyResponse,
    #[error("unexpected recommendation payload: {0}")]
    InvalidResponse(String),
}

impl RecommendationError {
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, RecommendationError::QuotaExceeded(_))
    }

    /// Message shown to the respondent; quota exhaustion gets its own wording.
    pub fn user_message(&self) -> &'static str {
        match self {
            RecommendationError::QuotaExceeded(_) => QUOTA_EXCEEDED_MESSAGE,
            RecommendationError::NotConfigured(_) => NOT_CONFIGURED_MESSAGE,
            _ => GENERIC_FAILURE_MESSAGE,
        }
    }
}

/// Maps a failed call onto the quota / generic split.
pub fn classify_failure(status: Option<u16>, message: &str) -> RecommendationError {
    let quota_hit = status == Some(429)
        || message.contains("429")
        || message.to_ascii_lowercase().contains("quota")
        || message.contains("RESOURCE_EXHAUSTED");

    if quota_hit {
        return RecommendationError::QuotaExceeded(message.to_string());
    }

    match status {
        Some(status) => RecommendationError::HttpStatus {
            status,
            body: message.to_string(),
        },
        None => RecommendationError::Request(message.to_string()),
    }
}
