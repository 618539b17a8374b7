//! Rebuilding today's session from whatever was saved
//!
//! Five cases, decided on every start:
//!
//! 1. [`HydrationCase::SameDay`]: saved date is today, resume it
//! 2. [`HydrationCase::StreakKept`]: new day, last finished game was yesterday
//! 3. [`HydrationCase::StreakBroken`]: new day, a day was skipped
//! 4. [`HydrationCase::FirstVisit`]: nothing saved
//! 5. [`HydrationCase::Corrupt`]: saved data unusable, same as 4

use super::calendar::is_yesterday;
use super::session::{GameResult, GameSession, Guess, Screen};
use super::state::GameDayState;
use super::store::Loaded;
use crate::core::Target;
use chrono::NaiveDate;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HydrationCase {
    SameDay,
    StreakKept,
    StreakBroken,
    FirstVisit,
    Corrupt,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Hydrated {
    pub session: GameSession,
    pub case: HydrationCase,
}

impl Hydrated {
    /// Every case except a same-day resume must write the fresh state at once
    #[must_use]
    pub fn needs_write(&self) -> bool {
        self.case != HydrationCase::SameDay
    }
}

/// Random anonymous visitor id, 16 hex chars
#[must_use]
pub fn new_visitor_id() -> String {
    format!("{:016x}", rand::random::<u64>())
}

/// Recompute feedback for stored raw values
///
/// Timestamps are unknown after a reload and come back as 0.
#[must_use]
pub fn rebuild_guesses(values: &[f64], timed_out: &[usize], target: &Target) -> Vec<Guess> {
    values
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            if timed_out.contains(&i) {
                Guess::timed_out(target, 0)
            } else {
                Guess::scored(value, target, 0, None)
            }
        })
        .collect()
}

/// Decide which hydration case applies and build the session for `today`
///
/// `visitor_id` is only called when no usable state exists.
pub fn hydrate(
    loaded: Loaded,
    today: NaiveDate,
    target: &Target,
    visitor_id: impl FnOnce() -> String,
) -> Hydrated {
    let saved = match loaded {
        Loaded::Found(state) => state,
        Loaded::Missing => {
            info!(%today, "no saved game, first visit");
            return first_visit(today, visitor_id(), HydrationCase::FirstVisit);
        }
        Loaded::Corrupt => {
            warn!(%today, "saved game unreadable, starting fresh");
            return first_visit(today, visitor_id(), HydrationCase::Corrupt);
        }
    };

    if saved.date == today {
        info!(%today, guesses = saved.guesses.len(), "resuming today's game");
        return Hydrated {
            session: resume(saved, target),
            case: HydrationCase::SameDay,
        };
    }

    let streak_alive = saved
        .last_played
        .is_some_and(|last| last == today || is_yesterday(last, today));
    let (streak, case) = if streak_alive {
        (saved.streak, HydrationCase::StreakKept)
    } else {
        (0, HydrationCase::StreakBroken)
    };
    info!(
        %today,
        saved_date = %saved.date,
        ?case,
        streak,
        "new day"
    );

    Hydrated {
        session: GameSession::fresh(
            saved.visitor_id,
            today,
            streak,
            saved.longest_streak,
            saved.games_played,
            saved.last_played,
        ),
        case,
    }
}

fn first_visit(today: NaiveDate, visitor_id: String, case: HydrationCase) -> Hydrated {
    Hydrated {
        session: GameSession::fresh(visitor_id, today, 0, 0, 0, None),
        case,
    }
}

fn resume(saved: GameDayState, target: &Target) -> GameSession {
    let guesses = rebuild_guesses(&saved.guesses, &saved.timed_out, target);
    let result = GameResult::from(saved.result);
    let screen = if result.is_over() {
        Screen::Reveal
    } else {
        Screen::Play
    };

    GameSession {
        visitor_id: saved.visitor_id,
        date: saved.date,
        guesses,
        result,
        screen,
        streak: saved.streak,
        longest_streak: saved.longest_streak,
        games_played: saved.games_played,
        last_played: saved.last_played,
    }
}
