//! Shareable result summary
//!
//! The text is rebuilt from the guess history alone, so the same history
//! always produces the same bytes:
//!
//! ```text
//! 🎯 Guesstimate #12
//!
//! ❄️ 🧊 🌡️ 🔥 ❄️ ❌ 😩
//!
//! Off by 90K beats at first 😅
//! ⏱️ Avg 4.3s per guess
//! https://guesstimate.example
//! ```

use crate::core::{FeedbackLevel, WARM_MAX, format_num};
use crate::game::Guess;

pub const TITLE: &str = "🎯 Guesstimate";
pub const TIMEOUT_MARK: &str = "⏰";
pub const LOSS_MARK: &str = "❌";

/// Loss, best real guess within warm range
pub const NEAR_MISS: &str = "😩";
/// Loss, every real guess far off
pub const WAY_OFF: &str = "💀";
/// Loss, every guess timed out
pub const ALL_TIMED_OUT: &str = "😴";

/// Off-by reactions
pub const EXACT_WIN: &str = "🤯";
pub const CLOSE_WIN: &str = "😎";
pub const LOSS: &str = "😅";

fn answered(guesses: &[Guess]) -> impl Iterator<Item = &Guess> {
    guesses.iter().filter(|g| !g.timed_out)
}

fn loss_reaction(guesses: &[Guess]) -> &'static str {
    let best = answered(guesses).map(|g| g.distance).reduce(f64::min);
    match best {
        None => ALL_TIMED_OUT,
        Some(distance) if distance <= WARM_MAX => NEAR_MISS,
        Some(_) => WAY_OFF,
    }
}

fn off_by_reaction(guesses: &[Guess], solved: bool) -> &'static str {
    if !solved {
        return LOSS;
    }
    let exact = guesses
        .iter()
        .rev()
        .find(|g| g.is_winning())
        .is_some_and(|g| g.feedback.level == FeedbackLevel::Exact);
    if exact { EXACT_WIN } else { CLOSE_WIN }
}

fn average_response_secs(guesses: &[Guess]) -> Option<f64> {
    let times: Vec<u64> = answered(guesses)
        .filter_map(|g| g.response_time)
        .filter(|&ms| ms > 0)
        .collect();
    if times.is_empty() {
        return None;
    }
    let total: u64 = times.iter().sum();
    Some(total as f64 / times.len() as f64 / 1000.0)
}

/// Build the share text for a finished (or abandoned) game
///
/// # Examples
/// ```
/// use guesstimate::core::Target;
/// use guesstimate::game::Guess;
/// use guesstimate::share::generate_share_text;
///
/// let target = Target::new(31.7, "years", 1);
/// let guesses = vec![
///     Guess::scored(1_000.0, &target, 0, None),
///     Guess::scored(30.0, &target, 0, None),
/// ];
/// let text = generate_share_text(1, &guesses, true, 31.7, "years", "https://example.com");
/// assert_eq!(
///     text,
///     "🎯 Guesstimate #1\n\n❄️ 🎯\n\nOff by 968.3 years at first 😎\nhttps://example.com"
/// );
/// ```
#[must_use]
pub fn generate_share_text(
    question_number: u32,
    guesses: &[Guess],
    solved: bool,
    answer: f64,
    unit: &str,
    url: &str,
) -> String {
    let marks: Vec<&str> = guesses
        .iter()
        .map(|g| {
            if g.timed_out {
                TIMEOUT_MARK
            } else {
                g.feedback.emoji
            }
        })
        .collect();
    let mut result = marks.join(" ");
    if !solved {
        if !result.is_empty() {
            result.push(' ');
        }
        result.push_str(LOSS_MARK);
        result.push(' ');
        result.push_str(loss_reaction(guesses));
    }

    let mut lines = vec![format!("{TITLE} #{question_number}"), String::new(), result, String::new()];

    if let Some(first) = answered(guesses).next() {
        let off = (first.value - answer).abs();
        lines.push(format!(
            "Off by {} {unit} at first {}",
            format_num(off),
            off_by_reaction(guesses, solved)
        ));
    }

    if let Some(avg) = average_response_secs(guesses) {
        lines.push(format!("⏱️ Avg {avg:.1}s per guess"));
    }

    lines.push(url.to_string());
    lines.join("\n")
}
