//! Question sources and the built-in fallback bank.

mod csv_source;
mod fallback;

pub use csv_source::CsvQuestionSource;
pub use fallback::fallback_questions;

use std::future::Future;

use serde::Serialize;

use super::domain::Question;

/// Read side of the question store.
pub trait QuestionSource: Send + Sync {
    fn fetch(&self) -> impl Future<Output = Result<Vec<Question>, QuestionSourceError>> + Send;
}

/// Failure while loading questions from a configured source.
#[derive(Debug, thiserror::Error)]
pub enum QuestionSourceError {
    #[error("question source unavailable: {0}")]
    Unavailable(String),
    #[error("failed to read question file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid question data: {0}")]
    Malformed(String),
}

impl From<csv::Error> for QuestionSourceError {
    fn from(err: csv::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

/// Where a served question set came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionBankOrigin {
    Source,
    Fallback,
}

/// Source that always serves the built-in bank.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinQuestionSource;

impl QuestionSource for BuiltinQuestionSource {
    async fn fetch(&self) -> Result<Vec<Question>, QuestionSourceError> {
        Ok(fallback_questions())
    }
}
