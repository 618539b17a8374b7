//! One-off guess classification
//!
//! Scores a guess against an arbitrary answer without touching saved state.

use crate::core::{Feedback, InputError, classify, log_distance, parse_input, pct_off, validate_guess};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ClassifyError {
    #[error("guess: {0}")]
    Guess(InputError),
    #[error("answer must be a positive number")]
    Answer,
}

/// Result of classifying a guess
pub struct ClassifyResult {
    pub guess: f64,
    pub answer: f64,
    pub feedback: Feedback,
    pub distance: f64,
    pub pct_off: f64,
}

/// Classify `guess` against `answer`, both in the player's input syntax
///
/// # Errors
///
/// Returns an error if the guess is not a valid guess or the answer is not a
/// positive number.
///
/// # Examples
/// ```
/// use guesstimate::commands::classify_guess;
/// use guesstimate::core::FeedbackLevel;
///
/// let result = classify_guess("90k", "100k", None, None).unwrap();
/// assert_eq!(result.feedback.level, FeedbackLevel::Hot);
/// ```
pub fn classify_guess(
    guess: &str,
    answer: &str,
    hot_range: Option<f64>,
    warm_range: Option<f64>,
) -> Result<ClassifyResult, ClassifyError> {
    let guess = validate_guess(guess).map_err(ClassifyError::Guess)?;
    let answer = parse_input(answer)
        .filter(|a| *a > 0.0)
        .ok_or(ClassifyError::Answer)?;

    Ok(ClassifyResult {
        guess,
        answer,
        feedback: classify(guess, answer, hot_range, warm_range),
        distance: log_distance(guess, answer),
        pct_off: pct_off(guess, answer),
    })
}
