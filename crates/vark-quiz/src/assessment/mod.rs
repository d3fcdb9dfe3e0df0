//! VARK questionnaire: scoring, question and result stores, session hand-off, and
//! study recommendations.

pub mod domain;
pub mod inference;
pub mod presentation;
pub mod questions;
pub mod recommendation;
pub mod remote;
pub mod repository;
pub mod router;
pub mod service;
pub mod session;

#[cfg(test)]
mod tests;

pub use domain::{
    Dominant, InferenceResult, LearningStyle, PercentageBreakdown, Question, QuestionOption,
    ResultId, SavedResult, ScoreTally, StyleMap, StyleTagError,
};
pub use inference::compute_learning_style;
pub use questions::{
    fallback_questions, BuiltinQuestionSource, CsvQuestionSource, QuestionBankOrigin,
    QuestionSource, QuestionSourceError,
};
pub use recommendation::{
    build_prompt, GeminiClient, Recommendation, RecommendationError, RecommendationProvider,
    RecommendationRequest,
};
pub use remote::RestStore;
pub use repository::{NewResult, RepositoryError, ResultRepository, StoredResult};
pub use router::quiz_router;
pub use service::{QuestionBank, QuizService, QuizServiceError};
pub use session::{CompletedQuiz, QuizSession, SessionError, SessionProgress, SessionStep};
