//! Saved streak and history summary

use crate::game::calendar::is_yesterday;
use crate::game::{GameResult, Loaded};
use chrono::NaiveDate;

/// What the stats command reports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsReport {
    pub visitor_id: Option<String>,
    /// Streak as it will stand when today's game starts
    pub current_streak: u32,
    pub longest_streak: u32,
    pub games_played: u32,
    pub last_played: Option<NaiveDate>,
    /// Today's game, if one was started
    pub today: Option<TodaySummary>,
    pub corrupt: bool,
}

impl StatsReport {
    const fn empty(corrupt: bool) -> Self {
        Self {
            visitor_id: None,
            current_streak: 0,
            longest_streak: 0,
            games_played: 0,
            last_played: None,
            today: None,
            corrupt,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TodaySummary {
    pub result: GameResult,
    pub guesses: usize,
}

/// Summarize whatever the store held
#[must_use]
pub fn collect_stats(loaded: Loaded, today: NaiveDate) -> StatsReport {
    let state = match loaded {
        Loaded::Found(state) => state,
        Loaded::Missing => return StatsReport::empty(false),
        Loaded::Corrupt => return StatsReport::empty(true),
    };

    let alive = state
        .last_played
        .is_some_and(|last| last == today || is_yesterday(last, today));
    let today_summary = (state.date == today).then(|| TodaySummary {
        result: state.result.into(),
        guesses: state.guesses.len(),
    });

    // Today's saved streak was already settled when the game was opened
    StatsReport {
        current_streak: if alive || state.date == today {
            state.streak
        } else {
            0
        },
        longest_streak: state.longest_streak,
        games_played: state.games_played,
        last_played: state.last_played,
        today: today_summary,
        visitor_id: Some(state.visitor_id),
        corrupt: false,
    }
}
