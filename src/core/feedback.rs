//! Guess feedback classification
//!
//! A guess is scored by its log-distance from the answer:
//! `|log10(guess / answer)|`. A distance of 1.0 means one order of magnitude
//! off, and guessing 2× too high scores the same as 2× too low.
//!
//! The distance falls into one of six ordered tiers:
//!
//! | Tier  | Max distance        | Direction shown |
//! |-------|---------------------|-----------------|
//! | exact | 0.01                | no              |
//! | close | 0.03                | no              |
//! | hot   | 0.05 (`hot_range`)  | yes             |
//! | warm  | 0.15 (`warm_range`) | yes             |
//! | cool  | 0.5                 | yes             |
//! | cold  | anything further    | yes             |

use std::fmt;

/// Upper distance bound for each tier
pub const EXACT_MAX: f64 = 0.01;
pub const CLOSE_MAX: f64 = 0.03;
pub const HOT_MAX: f64 = 0.05;
pub const WARM_MAX: f64 = 0.15;
pub const COOL_MAX: f64 = 0.5;
/// Beyond this the cold label turns into "WAY off"
pub const COLD_MAX: f64 = 1.0;

/// Qualitative feedback tier, ordered worst to best
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FeedbackLevel {
    Cold,
    Cool,
    Warm,
    Hot,
    Close,
    Exact,
}

impl FeedbackLevel {
    /// Whether this tier ends the game with a win
    #[inline]
    #[must_use]
    pub const fn is_winning(self) -> bool {
        matches!(self, Self::Exact | Self::Close)
    }

    /// Lowercase name used in logs and the CLI
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Cold => "cold",
            Self::Cool => "cool",
            Self::Warm => "warm",
            Self::Hot => "hot",
            Self::Close => "close",
            Self::Exact => "exact",
        }
    }
}

impl fmt::Display for FeedbackLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether a feedback level counts as a win
///
/// # Examples
/// ```
/// use guesstimate::core::{FeedbackLevel, is_winning};
///
/// assert!(is_winning(FeedbackLevel::Exact));
/// assert!(is_winning(FeedbackLevel::Close));
/// assert!(!is_winning(FeedbackLevel::Hot));
/// ```
#[inline]
#[must_use]
pub const fn is_winning(level: FeedbackLevel) -> bool {
    level.is_winning()
}

/// Which way the player should move their next guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Higher,
    Lower,
}

impl Direction {
    #[must_use]
    pub const fn word(self) -> &'static str {
        match self {
            Self::Higher => "higher",
            Self::Lower => "lower",
        }
    }

    /// Arrow shown next to directional feedback
    #[must_use]
    pub const fn arrow(self) -> char {
        match self {
            Self::Higher => '↑',
            Self::Lower => '↓',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.word())
    }
}

/// Result of classifying one guess
#[derive(Debug, Clone, PartialEq)]
pub struct Feedback {
    pub level: FeedbackLevel,
    pub emoji: &'static str,
    /// Hex color, presentation only
    pub color: &'static str,
    pub label: String,
    /// `None` for winning tiers
    pub direction: Option<Direction>,
}

/// Log-scale distance between a guess and the answer
///
/// Returns `f64::INFINITY` when either value is not strictly positive or the
/// ratio is not finite.
///
/// # Examples
/// ```
/// use guesstimate::core::log_distance;
///
/// assert!((log_distance(1000.0, 100.0) - 1.0).abs() < 1e-12);
/// assert!(log_distance(0.0, 100.0).is_infinite());
/// ```
#[must_use]
pub fn log_distance(guess: f64, answer: f64) -> f64 {
    if guess.is_nan() || answer.is_nan() || guess <= 0.0 || answer <= 0.0 {
        return f64::INFINITY;
    }

    let distance = (guess / answer).log10().abs();
    if distance.is_finite() {
        distance
    } else {
        f64::INFINITY
    }
}

/// Linear fraction off: `|guess - answer| / answer`
///
/// Kept for display; tiers are driven by [`log_distance`].
#[must_use]
pub fn pct_off(guess: f64, answer: f64) -> f64 {
    if answer.is_nan() || answer <= 0.0 {
        return f64::INFINITY;
    }
    let pct = (guess - answer).abs() / answer;
    if pct.is_finite() { pct } else { f64::INFINITY }
}

/// Classify a guess against the answer
///
/// `hot_range` and `warm_range` override the default hot/warm cutoffs for a
/// specific question. Bands are checked from best to worst, so an override
/// that is tighter than an earlier band only narrows its own tier.
///
/// Never panics: invalid input classifies as the worst tier.
///
/// # Examples
/// ```
/// use guesstimate::core::{classify, Direction, FeedbackLevel};
///
/// // 1 billion seconds ≈ 31.7 years; 30 is within 0.03 in log space
/// let feedback = classify(30.0, 31.7, None, None);
/// assert_eq!(feedback.level, FeedbackLevel::Close);
/// assert_eq!(feedback.direction, None);
///
/// let feedback = classify(1_000.0, 100_000.0, None, None);
/// assert_eq!(feedback.level, FeedbackLevel::Cold);
/// assert_eq!(feedback.direction, Some(Direction::Higher));
/// assert_eq!(feedback.label, "Guess WAY higher!");
/// ```
#[must_use]
pub fn classify(
    guess: f64,
    answer: f64,
    hot_range: Option<f64>,
    warm_range: Option<f64>,
) -> Feedback {
    let distance = log_distance(guess, answer);
    let direction = if guess < answer {
        Direction::Higher
    } else {
        Direction::Lower
    };
    let dir = direction.word();

    let hot_max = hot_range.filter(|r| r.is_finite()).unwrap_or(HOT_MAX);
    let warm_max = warm_range.filter(|r| r.is_finite()).unwrap_or(WARM_MAX);

    if distance <= EXACT_MAX {
        return Feedback {
            level: FeedbackLevel::Exact,
            emoji: "✅",
            color: "#10B981",
            label: "Nailed it!".to_string(),
            direction: None,
        };
    }
    if distance <= CLOSE_MAX {
        return Feedback {
            level: FeedbackLevel::Close,
            emoji: "🎯",
            color: "#10B981",
            label: "Close enough!".to_string(),
            direction: None,
        };
    }

    let (level, emoji, color, label) = if distance <= hot_max {
        (FeedbackLevel::Hot, "🔥", "#EF4444", "So close!".to_string())
    } else if distance <= warm_max {
        (
            FeedbackLevel::Warm,
            "🌡️",
            "#F59E0B",
            format!("Guess a bit {dir}"),
        )
    } else if distance <= COOL_MAX {
        (FeedbackLevel::Cool, "🧊", "#38BDF8", format!("Guess {dir}"))
    } else if distance <= COLD_MAX {
        (FeedbackLevel::Cold, "❄️", "#3B82F6", format!("Guess {dir}"))
    } else {
        (
            FeedbackLevel::Cold,
            "❄️",
            "#3B82F6",
            format!("Guess WAY {dir}!"),
        )
    };

    Feedback {
        level,
        emoji,
        color,
        label,
        direction: Some(direction),
    }
}
