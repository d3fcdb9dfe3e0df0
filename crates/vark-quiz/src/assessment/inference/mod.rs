//! Tally-and-classify engine turning answers into an [`InferenceResult`].

mod policy;
mod rules;

use super::domain::{InferenceResult, LearningStyle, ScoreTally};
use super::presentation;

/// Scores a completed answer sequence.
///
/// Pure and total: the output depends only on the multiset of answers, and an empty sequence
/// yields all-zero scores with a multimodal outcome.
pub fn compute_learning_style(answers: &[LearningStyle]) -> InferenceResult {
    let tally = rules::tally_answers(answers);
    InferenceResult::from_tally(tally)
}

impl InferenceResult {
    /// Derives percentages, dominant style and description from raw counts alone.
    pub fn from_tally(raw_scores: ScoreTally) -> Self {
        let percentages = rules::percentages(&raw_scores, raw_scores.total());
        let dominant = policy::resolve_dominant(&raw_scores);

        Self {
            raw_scores,
            percentages,
            dominant,
            description: presentation::description(dominant).to_string(),
        }
    }
}
