use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One dimension of the VARK questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LearningStyle {
    #[serde(rename = "V")]
    Visual,
    #[serde(rename = "A")]
    Auditory,
    #[serde(rename = "R")]
    ReadWrite,
    #[serde(rename = "K")]
    Kinesthetic,
}

impl LearningStyle {
    /// Every style in tally order.
    pub const ALL: [LearningStyle; 4] = [
        LearningStyle::Visual,
        LearningStyle::Auditory,
        LearningStyle::ReadWrite,
        LearningStyle::Kinesthetic,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            LearningStyle::Visual => "V",
            LearningStyle::Auditory => "A",
            LearningStyle::ReadWrite => "R",
            LearningStyle::Kinesthetic => "K",
        }
    }
}

impl fmt::Display for LearningStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for LearningStyle {
    type Err = StyleTagError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "V" | "VISUAL" => Ok(LearningStyle::Visual),
            "A" | "AUDITORY" => Ok(LearningStyle::Auditory),
            "R" | "READ/WRITE" | "READWRITE" | "READ_WRITE" => Ok(LearningStyle::ReadWrite),
            "K" | "KINESTHETIC" => Ok(LearningStyle::Kinesthetic),
            _ => Err(StyleTagError(raw.to_string())),
        }
    }
}

/// Raised when a raw tag does not name one of the four styles.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown learning style tag '{0}' (expected one of V, A, R, K)")]
pub struct StyleTagError(pub String);

/// Exhaustive per-style storage; every style always has a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StyleMap<T> {
    #[serde(rename = "V")]
    pub visual: T,
    #[serde(rename = "A")]
    pub auditory: T,
    #[serde(rename = "R")]
    pub read_write: T,
    #[serde(rename = "K")]
    pub kinesthetic: T,
}

impl<T> StyleMap<T> {
    pub fn from_fn(mut value_for: impl FnMut(LearningStyle) -> T) -> Self {
        Self {
            visual: value_for(LearningStyle::Visual),
            auditory: value_for(LearningStyle::Auditory),
            read_write: value_for(LearningStyle::ReadWrite),
            kinesthetic: value_for(LearningStyle::Kinesthetic),
        }
    }

    pub fn get(&self, style: LearningStyle) -> &T {
        match style {
            LearningStyle::Visual => &self.visual,
            LearningStyle::Auditory => &self.auditory,
            LearningStyle::ReadWrite => &self.read_write,
            LearningStyle::Kinesthetic => &self.kinesthetic,
        }
    }

    pub fn get_mut(&mut self, style: LearningStyle) -> &mut T {
        match style {
            LearningStyle::Visual => &mut self.visual,
            LearningStyle::Auditory => &mut self.auditory,
            LearningStyle::ReadWrite => &mut self.read_write,
            LearningStyle::Kinesthetic => &mut self.kinesthetic,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (LearningStyle, &T)> + '_ {
        LearningStyle::ALL
            .into_iter()
            .map(move |style| (style, self.get(style)))
    }
}

/// Answer counts per style.
pub type ScoreTally = StyleMap<u32>;

/// Rounded share of answers per style, 0 through 100.
pub type PercentageBreakdown = StyleMap<u8>;

impl StyleMap<u32> {
    /// Widened so rows read back from a store cannot overflow the sum.
    pub fn total(&self) -> u64 {
        self.iter().map(|(_, count)| u64::from(*count)).sum()
    }
}

/// Outcome label: a single winning style or a tie between several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dominant {
    Style(LearningStyle),
    Multimodal,
}

impl Dominant {
    pub const MULTIMODAL_TAG: &'static str = "Multimodal";

    pub fn tag(self) -> &'static str {
        match self {
            Dominant::Style(style) => style.tag(),
            Dominant::Multimodal => Self::MULTIMODAL_TAG,
        }
    }

    pub fn style(self) -> Option<LearningStyle> {
        match self {
            Dominant::Style(style) => Some(style),
            Dominant::Multimodal => None,
        }
    }
}

impl fmt::Display for Dominant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Dominant {
    type Err = StyleTagError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.trim().eq_ignore_ascii_case(Self::MULTIMODAL_TAG) {
            return Ok(Dominant::Multimodal);
        }
        raw.parse().map(Dominant::Style)
    }
}

impl Serialize for Dominant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

impl<'de> Deserialize<'de> for Dominant {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A selectable answer and the style it counts towards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub label: String,
    #[serde(rename = "type")]
    pub style: LearningStyle,
}

impl QuestionOption {
    pub fn new(label: impl Into<String>, style: LearningStyle) -> Self {
        Self {
            label: label.into(),
            style,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    pub text: String,
    pub options: Vec<QuestionOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Aggregated outcome of one completed questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InferenceResult {
    pub raw_scores: ScoreTally,
    pub percentages: PercentageBreakdown,
    pub dominant: Dominant,
    pub description: String,
}

/// Identifier assigned by the result store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultId(pub u64);

impl fmt::Display for ResultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ResultId {
    type Err = std::num::ParseIntError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        raw.trim().parse().map(ResultId)
    }
}

/// Result annotated with the respondent and, when persisted, the store id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ResultId>,
    pub user_name: String,
    #[serde(flatten)]
    pub result: InferenceResult,
}

impl SavedResult {
    /// Path under which a persisted result can be viewed again.
    pub fn share_path(&self) -> Option<String> {
        self.id.map(|id| format!("/shared/{id}"))
    }
}
