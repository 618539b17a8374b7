//! Formatting utilities for terminal output

use crate::core::{COLD_MAX, format_num};
use crate::game::Guess;

/// Parse a `#RRGGBB` color
#[must_use]
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    let ratio = if max > 0.0 { (value / max).clamp(0.0, 1.0) } else { 0.0 };
    let filled = ((ratio * width as f64) as usize).min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Bar that fills as a guess approaches the answer
///
/// Anything at or beyond [`COLD_MAX`] log-distance is an empty bar.
#[must_use]
pub fn proximity_bar(distance: f64, width: usize) -> String {
    let closeness = if distance.is_finite() {
        COLD_MAX - distance.min(COLD_MAX)
    } else {
        0.0
    };
    create_progress_bar(closeness, COLD_MAX, width)
}

/// One history row: `3. 🔥 120K  So close!`
#[must_use]
pub fn guess_row(index: usize, guess: &Guess) -> String {
    if guess.timed_out {
        return format!("{}. ⏰ --  Time's up", index + 1);
    }
    let arrow = guess
        .feedback
        .direction
        .map(|d| format!(" {}", d.arrow()))
        .unwrap_or_default();
    format!(
        "{}. {} {}  {}{arrow}",
        index + 1,
        guess.feedback.emoji,
        format_num(guess.value),
        guess.feedback.label
    )
}

/// `95%` style closeness, 0% for an infinitely wrong guess
#[must_use]
pub fn percent_off_text(pct_off: f64) -> String {
    if pct_off.is_finite() {
        format!("{:.1}% off", pct_off * 100.0)
    } else {
        "way off".to_string()
    }
}
