use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use super::domain::{LearningStyle, Question, ResultId, SavedResult};
use super::inference::compute_learning_style;
use super::questions::{fallback_questions, QuestionBankOrigin, QuestionSource};
use super::recommendation::{
    Recommendation, RecommendationError, RecommendationProvider, RecommendationRequest,
};
use super::repository::{NewResult, RepositoryError, ResultRepository};
use super::session::{validate_respondent, CompletedQuiz, SessionError};

/// Questions served to a respondent, tagged with where they came from.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionBank {
    pub origin: QuestionBankOrigin,
    pub questions: Vec<Question>,
}

/// Service composing the question source, result store, and recommendation provider.
pub struct QuizService<Q, R, P> {
    questions: Arc<Q>,
    repository: Arc<R>,
    recommender: Arc<P>,
}

impl<Q, R, P> QuizService<Q, R, P>
where
    Q: QuestionSource + 'static,
    R: ResultRepository + 'static,
    P: RecommendationProvider + 'static,
{
    pub fn new(questions: Arc<Q>, repository: Arc<R>, recommender: Arc<P>) -> Self {
        Self {
            questions,
            repository,
            recommender,
        }
    }

    /// Loads the question set, substituting the built-in bank on failure or empty data.
    pub async fn load_questions(&self) -> QuestionBank {
        match self.questions.fetch().await {
            Ok(questions) if !questions.is_empty() => QuestionBank {
                origin: QuestionBankOrigin::Source,
                questions,
            },
            Ok(_) => {
                warn!("question source returned no questions; serving built-in bank");
                Self::fallback_bank()
            }
            Err(err) => {
                warn!(error = %err, "question source unavailable; serving built-in bank");
                Self::fallback_bank()
            }
        }
    }

    fn fallback_bank() -> QuestionBank {
        QuestionBank {
            origin: QuestionBankOrigin::Fallback,
            questions: fallback_questions(),
        }
    }

    /// Scores the answers for a named respondent and stores the result when possible.
    pub async fn complete(
        &self,
        respondent: &str,
        answers: &[LearningStyle],
    ) -> Result<SavedResult, QuizServiceError> {
        let respondent = validate_respondent(respondent)?;
        let result = compute_learning_style(answers);
        let completed = CompletedQuiz {
            respondent,
            answers: answers.to_vec(),
            result,
        };
        Ok(self.record(completed).await)
    }

    /// Persists a finished session. Store failures are logged and the result is
    /// returned without an id.
    pub async fn record(&self, completed: CompletedQuiz) -> SavedResult {
        let CompletedQuiz {
            respondent, result, ..
        } = completed;

        let row = NewResult::from_result(&respondent, &result);
        let id = match self.repository.insert(row).await {
            Ok(id) => {
                info!(%id, dominant = %result.dominant, "quiz result recorded");
                Some(id)
            }
            Err(err) => {
                warn!(error = %err, "result store unavailable; result not persisted");
                None
            }
        };

        SavedResult {
            id,
            user_name: respondent,
            result,
        }
    }

    /// Looks up a shared result, rebuilding percentages from the stored counts.
    pub async fn shared_result(&self, id: ResultId) -> Result<SavedResult, QuizServiceError> {
        let stored = self
            .repository
            .fetch(id)
            .await?
            .ok_or(RepositoryError::NotFound)?;
        Ok(stored.to_saved_result())
    }

    /// Single attempt against the recommendation provider.
    pub async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Recommendation, QuizServiceError> {
        let prompt = request.prompt();
        match self.recommender.generate(&prompt).await {
            Ok(text) => Ok(Recommendation { text }),
            Err(err) => {
                warn!(error = %err, quota = err.is_quota_exceeded(), "recommendation failed");
                Err(err.into())
            }
        }
    }
}

/// Error raised by the quiz service.
#[derive(Debug, thiserror::Error)]
pub enum QuizServiceError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Recommendation(#[from] RecommendationError),
}
