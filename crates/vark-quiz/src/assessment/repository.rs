use std::future::Future;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{InferenceResult, ResultId, SavedResult, ScoreTally};

/// Flattened row written to the result store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewResult {
    pub user_name: String,
    pub score_visual: u32,
    pub score_auditory: u32,
    pub score_readwrite: u32,
    pub score_kinesthetic: u32,
    pub dominant_style: String,
}

impl NewResult {
    pub fn from_result(user_name: &str, result: &InferenceResult) -> Self {
        let scores = &result.raw_scores;
        Self {
            user_name: user_name.to_string(),
            score_visual: scores.visual,
            score_auditory: scores.auditory,
            score_readwrite: scores.read_write,
            score_kinesthetic: scores.kinesthetic,
            dominant_style: result.dominant.tag().to_string(),
        }
    }
}

/// Row as read back from the result store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredResult {
    pub id: ResultId,
    pub user_name: String,
    pub score_visual: u32,
    pub score_auditory: u32,
    #[serde(default)]
    pub score_readwrite: u32,
    pub score_kinesthetic: u32,
    pub dominant_style: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl StoredResult {
    pub fn from_new(id: ResultId, record: NewResult, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            user_name: record.user_name,
            score_visual: record.score_visual,
            score_auditory: record.score_auditory,
            score_readwrite: record.score_readwrite,
            score_kinesthetic: record.score_kinesthetic,
            dominant_style: record.dominant_style,
            created_at: Some(created_at),
        }
    }

    pub fn raw_scores(&self) -> ScoreTally {
        ScoreTally {
            visual: self.score_visual,
            auditory: self.score_auditory,
            read_write: self.score_readwrite,
            kinesthetic: self.score_kinesthetic,
        }
    }

    /// Rebuilds the shareable view from the raw counts only; the persisted
    /// `dominant_style` column is never consulted.
    pub fn to_saved_result(&self) -> SavedResult {
        SavedResult {
            id: Some(self.id),
            user_name: self.user_name.clone(),
            result: InferenceResult::from_tally(self.raw_scores()),
        }
    }
}

/// Storage abstraction for completed questionnaires.
pub trait ResultRepository: Send + Sync {
    fn insert(
        &self,
        record: NewResult,
    ) -> impl Future<Output = Result<ResultId, RepositoryError>> + Send;

    fn fetch(
        &self,
        id: ResultId,
    ) -> impl Future<Output = Result<Option<StoredResult>, RepositoryError>> + Send;
}

/// Error enumeration for result store failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
    #[error("unexpected repository response: {0}")]
    InvalidResponse(String),
}
