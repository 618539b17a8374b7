//! Question provider
//!
//! Supplies the day's question. Lookup is by exact date first. Later dates
//! without a dedicated question rotate through the bank and continue the
//! numbering from the first question; dates before the bank starts have none.

mod embedded;
pub mod loader;

pub use embedded::EMBEDDED_QUESTIONS;
pub use loader::QuestionError;

use crate::core::Question;
use chrono::NaiveDate;
use rustc_hash::FxHashMap;
use std::borrow::Cow;

/// Source of the question for a given day
pub trait QuestionProvider {
    fn question_for(&self, date: NaiveDate) -> Option<Cow<'_, Question>>;
}

/// Validated, date-indexed set of questions
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<Question>,
    by_date: FxHashMap<NaiveDate, usize>,
}

impl QuestionBank {
    /// Build a bank, rejecting questions that cannot be scored
    ///
    /// # Errors
    ///
    /// Returns [`QuestionError::Empty`] for an empty list and
    /// [`QuestionError::InvalidAnswer`] for a non-positive or non-finite answer.
    pub fn new(mut questions: Vec<Question>) -> Result<Self, QuestionError> {
        if questions.is_empty() {
            return Err(QuestionError::Empty);
        }
        if let Some(bad) = questions.iter().find(|q| !q.has_valid_answer()) {
            return Err(QuestionError::InvalidAnswer {
                id: bad.id.clone(),
                answer: bad.answer,
            });
        }

        questions.sort_by_key(|q| q.date);
        let mut by_date = FxHashMap::default();
        for (i, question) in questions.iter().enumerate() {
            // First question wins when two share a date
            by_date.entry(question.date).or_insert(i);
        }

        Ok(Self { questions, by_date })
    }

    /// Bank shipped with the binary
    ///
    /// # Errors
    ///
    /// Only fails if the embedded data is broken.
    pub fn embedded() -> Result<Self, QuestionError> {
        Self::new(loader::questions_from_json(EMBEDDED_QUESTIONS)?)
    }

    /// Bank loaded from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, QuestionError> {
        Self::new(loader::load_from_file(path)?)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Reuse a stored question for an uncovered date, numbered by its day
    /// offset from the first question
    fn rotated(&self, date: NaiveDate) -> Option<Question> {
        let first = self.questions.first()?;
        let offset = u32::try_from((date - first.date).num_days()).ok()?;
        let question_number = first.question_number.checked_add(offset)?;
        let index = usize::try_from(offset).ok()? % self.questions.len();

        Some(Question {
            date,
            question_number,
            ..self.questions[index].clone()
        })
    }
}

impl QuestionProvider for QuestionBank {
    fn question_for(&self, date: NaiveDate) -> Option<Cow<'_, Question>> {
        match self.by_date.get(&date) {
            Some(&i) => Some(Cow::Borrowed(&self.questions[i])),
            None => self.rotated(date).map(Cow::Owned),
        }
    }
}
