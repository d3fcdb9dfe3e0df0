//! Explicit hand-off between the entry, question, and result steps of a quiz.

use serde::Serialize;

use super::domain::{InferenceResult, LearningStyle, Question};
use super::inference::compute_learning_style;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("respondent name is required")]
    MissingRespondent,
    #[error("no questions available")]
    NoQuestions,
    #[error("option {index} does not exist for question {question_id}")]
    OptionOutOfRange { question_id: u32, index: usize },
    #[error("all questions have already been answered")]
    AlreadyComplete,
    #[error("{remaining} question(s) still unanswered")]
    Incomplete { remaining: usize },
}

/// Trims the display name and rejects blank input.
pub fn validate_respondent(raw: &str) -> Result<String, SessionError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(SessionError::MissingRespondent);
    }
    Ok(name.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStep {
    Next,
    Complete,
}

/// Progress indicator for the question currently on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionProgress {
    pub position: usize,
    pub total: usize,
    pub percent: u8,
}

/// One respondent working through one question set.
#[derive(Debug, Clone)]
pub struct QuizSession {
    respondent: String,
    questions: Vec<Question>,
    answers: Vec<LearningStyle>,
}

impl QuizSession {
    pub fn start(respondent: &str, questions: Vec<Question>) -> Result<Self, SessionError> {
        let respondent = validate_respondent(respondent)?;
        if questions.is_empty() {
            return Err(SessionError::NoQuestions);
        }

        Ok(Self {
            respondent,
            answers: Vec::with_capacity(questions.len()),
            questions,
        })
    }

    pub fn respondent(&self) -> &str {
        &self.respondent
    }

    pub fn answers(&self) -> &[LearningStyle] {
        &self.answers
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.answers.len())
    }

    pub fn is_complete(&self) -> bool {
        self.answers.len() == self.questions.len()
    }

    pub fn progress(&self) -> SessionProgress {
        let total = self.questions.len();
        let position = (self.answers.len() + 1).min(total);
        let percent = if total == 0 {
            0
        } else {
            (position * 100 / total) as u8
        };

        SessionProgress {
            position,
            total,
            percent,
        }
    }

    /// Records the option chosen for the current question.
    pub fn answer(&mut self, option_index: usize) -> Result<SessionStep, SessionError> {
        let question = self
            .current_question()
            .ok_or(SessionError::AlreadyComplete)?;
        let style = question
            .options
            .get(option_index)
            .map(|option| option.style)
            .ok_or(SessionError::OptionOutOfRange {
                question_id: question.id,
                index: option_index,
            })?;

        self.answers.push(style);

        Ok(if self.is_complete() {
            SessionStep::Complete
        } else {
            SessionStep::Next
        })
    }

    /// Discards recorded answers but keeps the respondent and questions.
    pub fn restart(&mut self) {
        self.answers.clear();
    }

    pub fn finish(self) -> Result<CompletedQuiz, SessionError> {
        if !self.is_complete() {
            return Err(SessionError::Incomplete {
                remaining: self.questions.len() - self.answers.len(),
            });
        }

        let result = compute_learning_style(&self.answers);
        Ok(CompletedQuiz {
            respondent: self.respondent,
            answers: self.answers,
            result,
        })
    }
}

/// Payload carried from the question step to the result step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedQuiz {
    pub respondent: String,
    pub answers: Vec<LearningStyle>,
    pub result: InferenceResult,
}
