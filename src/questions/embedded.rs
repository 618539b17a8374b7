//! Question bank compiled into the binary

/// JSON array of questions shipped with the game
pub const EMBEDDED_QUESTIONS: &str = include_str!("../../data/questions.json");
