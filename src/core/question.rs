//! Daily question model
//!
//! Questions come from an external source (the embedded bank or a JSON file).
//! The game core only needs the [`Target`] view of a question.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Time,
    Scale,
    HumanBody,
    Space,
    Nature,
    PopCulture,
    History,
    WildCard,
}

impl Category {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Time => "Time",
            Self::Scale => "Scale",
            Self::HumanBody => "Human Body",
            Self::Space => "Space",
            Self::Nature => "Nature",
            Self::PopCulture => "Pop Culture",
            Self::History => "History",
            Self::WildCard => "Wild Card",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// One day's question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub date: NaiveDate,
    pub question: String,
    pub answer: f64,
    pub unit: String,
    pub explanation: String,
    #[serde(default)]
    pub source: String,
    pub category: Category,
    pub difficulty: Difficulty,
    pub question_number: u32,
    /// Per-question override of the hot cutoff (log-distance)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hot_range: Option<f64>,
    /// Per-question override of the warm cutoff (log-distance)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warm_range: Option<f64>,
}

impl Question {
    /// Whether the answer can be scored at all
    #[must_use]
    pub fn has_valid_answer(&self) -> bool {
        self.answer.is_finite() && self.answer > 0.0
    }

    /// The fields the game core scores against
    #[must_use]
    pub fn target(&self) -> Target {
        Target::from(self)
    }
}

/// What the game needs to know about today's question
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub answer: f64,
    pub unit: String,
    pub hot_range: Option<f64>,
    pub warm_range: Option<f64>,
    pub question_number: u32,
}

impl Target {
    #[must_use]
    pub fn new(answer: f64, unit: impl Into<String>, question_number: u32) -> Self {
        Self {
            answer,
            unit: unit.into(),
            hot_range: None,
            warm_range: None,
            question_number,
        }
    }

    #[must_use]
    pub const fn with_ranges(mut self, hot_range: Option<f64>, warm_range: Option<f64>) -> Self {
        self.hot_range = hot_range;
        self.warm_range = warm_range;
        self
    }
}

impl From<&Question> for Target {
    fn from(question: &Question) -> Self {
        Self {
            answer: question.answer,
            unit: question.unit.clone(),
            hot_range: question.hot_range,
            warm_range: question.warm_range,
            question_number: question.question_number,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "id": "q-001",
        "date": "2026-10-18",
        "question": "How long is 1 billion seconds?",
        "answer": 31.7,
        "unit": "years",
        "explanation": "About 31.5 million seconds per year.",
        "category": "TIME",
        "difficulty": "medium",
        "questionNumber": 1,
        "hotRange": 0.06
    }"#;

    #[test]
    fn question_deserializes_camel_case() {
        let question: Question = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(question.question_number, 1);
        assert_eq!(question.category, Category::Time);
        assert_eq!(question.difficulty, Difficulty::Medium);
        assert_eq!(question.hot_range, Some(0.06));
        assert_eq!(question.warm_range, None);
        assert_eq!(question.source, "");
        assert_eq!(question.date, NaiveDate::from_ymd_opt(2026, 10, 18).unwrap());
    }

    #[test]
    fn target_copies_scoring_fields() {
        let question: Question = serde_json::from_str(SAMPLE).unwrap();
        let target = question.target();
        assert!((target.answer - 31.7).abs() < f64::EPSILON);
        assert_eq!(target.unit, "years");
        assert_eq!(target.hot_range, Some(0.06));
        assert_eq!(target.question_number, 1);
    }

    #[test]
    fn answer_validity() {
        let mut question: Question = serde_json::from_str(SAMPLE).unwrap();
        assert!(question.has_valid_answer());
        question.answer = 0.0;
        assert!(!question.has_valid_answer());
        question.answer = f64::NAN;
        assert!(!question.has_valid_answer());
    }

    #[test]
    fn category_labels() {
        assert_eq!(Category::HumanBody.to_string(), "Human Body");
        let parsed: Category = serde_json::from_str("\"POP_CULTURE\"").unwrap();
        assert_eq!(parsed, Category::PopCulture);
    }
}
