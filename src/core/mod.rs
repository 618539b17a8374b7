//! Core scoring types for Guesstimate
//!
//! Pure functions and plain data: feedback classification, number parsing and
//! formatting, and the question model. Nothing here touches I/O.

mod feedback;
mod number;
mod question;

pub use feedback::{
    CLOSE_MAX, COLD_MAX, COOL_MAX, Direction, EXACT_MAX, Feedback, FeedbackLevel, HOT_MAX,
    WARM_MAX, classify, is_winning, log_distance, pct_off,
};
pub use number::{InputError, format_num, parse_input, validate_guess};
pub use question::{Category, Difficulty, Question, Target};
