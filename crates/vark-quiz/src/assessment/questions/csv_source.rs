use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::{QuestionSource, QuestionSourceError};
use crate::assessment::domain::{LearningStyle, Question, QuestionOption};

/// Row layout: `id,text,visual,auditory,read_write,kinesthetic`.
#[derive(Debug, Deserialize)]
struct QuestionRow {
    id: u32,
    text: String,
    #[serde(default)]
    visual: String,
    #[serde(default)]
    auditory: String,
    #[serde(default)]
    read_write: String,
    #[serde(default)]
    kinesthetic: String,
}

impl QuestionRow {
    fn into_question(self) -> Result<Question, QuestionSourceError> {
        let text = self.text.trim().to_string();
        if text.is_empty() {
            return Err(QuestionSourceError::Malformed(format!(
                "question {} has no text",
                self.id
            )));
        }

        let options: Vec<QuestionOption> = [
            (LearningStyle::Visual, self.visual),
            (LearningStyle::Auditory, self.auditory),
            (LearningStyle::ReadWrite, self.read_write),
            (LearningStyle::Kinesthetic, self.kinesthetic),
        ]
        .into_iter()
        .filter_map(|(style, label)| {
            let label = label.trim();
            (!label.is_empty()).then(|| QuestionOption::new(label, style))
        })
        .collect();

        if options.is_empty() {
            return Err(QuestionSourceError::Malformed(format!(
                "question {} has no options",
                self.id
            )));
        }

        Ok(Question {
            id: self.id,
            text,
            options,
            created_at: None,
        })
    }
}

/// Question bank read from a CSV export.
#[derive(Debug, Clone)]
pub struct CsvQuestionSource {
    path: PathBuf,
}

impl CsvQuestionSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn parse<R: Read>(reader: R) -> Result<Vec<Question>, QuestionSourceError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        csv_reader
            .deserialize::<QuestionRow>()
            .map(|row| row?.into_question())
            .collect()
    }
}

impl QuestionSource for CsvQuestionSource {
    async fn fetch(&self) -> Result<Vec<Question>, QuestionSourceError> {
        let file = std::fs::File::open(&self.path)?;
        Self::parse(file)
    }
}
