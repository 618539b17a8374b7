//! One day's game as a pure state machine
//!
//! [`transition`] takes the current [`GameSession`] and a [`GameEvent`] and
//! returns the next session plus the side effects the caller should carry out
//! (write the state, arm the reveal timer). The session never touches storage
//! or clocks itself.

use super::state::GameDayState;
use crate::core::{Feedback, InputError, Target, classify, log_distance, pct_off, validate_guess};
use chrono::NaiveDate;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Guesses allowed per day
pub const MAX_GUESSES: usize = 5;

/// Pause between the deciding guess and the reveal screen
pub const REVEAL_DELAY: Duration = Duration::from_millis(600);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameResult {
    Playing,
    Win,
    Loss,
}

impl GameResult {
    #[inline]
    #[must_use]
    pub const fn is_over(self) -> bool {
        !matches!(self, Self::Playing)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Play,
    Reveal,
}

/// A scored guess
#[derive(Debug, Clone, PartialEq)]
pub struct Guess {
    pub value: f64,
    pub feedback: Feedback,
    /// Log-distance from the answer
    pub distance: f64,
    pub pct_off: f64,
    /// Capture time in ms since the epoch, 0 when rebuilt from storage
    pub timestamp: i64,
    pub timed_out: bool,
    /// Milliseconds the player took before submitting
    pub response_time: Option<u64>,
}

impl Guess {
    /// Score a value against the target
    #[must_use]
    pub fn scored(value: f64, target: &Target, timestamp: i64, response_time: Option<u64>) -> Self {
        Self {
            value,
            feedback: classify(value, target.answer, target.hot_range, target.warm_range),
            distance: log_distance(value, target.answer),
            pct_off: pct_off(value, target.answer),
            timestamp,
            timed_out: false,
            response_time,
        }
    }

    /// A countdown that ran out; it uses up an attempt and scores as a zero
    #[must_use]
    pub fn timed_out(target: &Target, timestamp: i64) -> Self {
        Self {
            timed_out: true,
            ..Self::scored(0.0, target, timestamp, None)
        }
    }

    #[inline]
    #[must_use]
    pub fn is_winning(&self) -> bool {
        !self.timed_out && self.feedback.level.is_winning()
    }
}

/// In-memory view of today's game
#[derive(Debug, Clone, PartialEq)]
pub struct GameSession {
    pub visitor_id: String,
    pub date: NaiveDate,
    pub guesses: Vec<Guess>,
    pub result: GameResult,
    pub screen: Screen,
    pub streak: u32,
    pub longest_streak: u32,
    pub games_played: u32,
    pub last_played: Option<NaiveDate>,
}

impl GameSession {
    /// Empty game for `date` carrying the given counters
    #[must_use]
    pub fn fresh(
        visitor_id: String,
        date: NaiveDate,
        streak: u32,
        longest_streak: u32,
        games_played: u32,
        last_played: Option<NaiveDate>,
    ) -> Self {
        Self {
            visitor_id,
            date,
            guesses: Vec::new(),
            result: GameResult::Playing,
            screen: Screen::Play,
            streak,
            longest_streak,
            games_played,
            last_played,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_game_over(&self) -> bool {
        self.result.is_over()
    }

    #[inline]
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.result == GameResult::Win
    }

    #[must_use]
    pub fn guesses_left(&self) -> usize {
        MAX_GUESSES.saturating_sub(self.guesses.len())
    }

    /// Snapshot for persistence
    #[must_use]
    pub fn to_day_state(&self) -> GameDayState {
        GameDayState {
            visitor_id: self.visitor_id.clone(),
            date: self.date,
            guesses: self.guesses.iter().map(|g| g.value).collect(),
            result: self.result.into(),
            streak: self.streak,
            longest_streak: self.longest_streak,
            games_played: self.games_played,
            last_played: self.last_played,
            timed_out: self
                .guesses
                .iter()
                .enumerate()
                .filter_map(|(i, g)| g.timed_out.then_some(i))
                .collect(),
        }
    }
}

/// Something the player (or a timer) did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// Raw text typed by the player
    Guess {
        input: String,
        timestamp: i64,
        response_time: Option<u64>,
    },
    /// The per-guess countdown ran out
    TimeExpired { timestamp: i64 },
    /// Skip straight to the reveal screen
    Reveal,
}

impl GameEvent {
    #[must_use]
    pub fn guess(input: impl Into<String>) -> Self {
        Self::Guess {
            input: input.into(),
            timestamp: 0,
            response_time: None,
        }
    }
}

/// Work for the caller after a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Write the full day state through the store
    Persist(GameDayState),
    /// Arm the reveal timer
    ScheduleReveal(Duration),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub session: GameSession,
    pub effects: Vec<Effect>,
}

impl Step {
    /// The state to write, if this step changed anything durable
    #[must_use]
    pub fn persisted(&self) -> Option<&GameDayState> {
        self.effects.iter().find_map(|effect| match effect {
            Effect::Persist(state) => Some(state),
            Effect::ScheduleReveal(_) => None,
        })
    }

    #[must_use]
    pub fn reveal_delay(&self) -> Option<Duration> {
        self.effects.iter().find_map(|effect| match effect {
            Effect::ScheduleReveal(delay) => Some(*delay),
            Effect::Persist(_) => None,
        })
    }
}

/// Why an event was refused; the session is unchanged in every case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("today's game is already over")]
    GameOver,
    #[error("no guesses left today")]
    OutOfGuesses,
    #[error("the game is still in progress")]
    StillPlaying,
}

/// Apply one event to a session
///
/// # Errors
///
/// Returns a [`SessionError`] when the event is not allowed in the current
/// state or the guess text is not a valid number. Nothing is recorded then.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use guesstimate::core::Target;
/// use guesstimate::game::{GameEvent, GameResult, GameSession, transition};
///
/// let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
/// let session = GameSession::fresh("visitor".into(), date, 2, 4, 9, None);
/// let target = Target::new(31.7, "years", 1);
///
/// let step = transition(&session, &target, GameEvent::guess("30")).unwrap();
/// assert_eq!(step.session.result, GameResult::Win);
/// assert_eq!(step.session.streak, 3);
/// assert!(step.persisted().is_some());
/// ```
pub fn transition(
    session: &GameSession,
    target: &Target,
    event: GameEvent,
) -> Result<Step, SessionError> {
    match event {
        GameEvent::Guess {
            input,
            timestamp,
            response_time,
        } => {
            ensure_accepting(session)?;
            let value = validate_guess(&input)?;
            Ok(record(
                session,
                Guess::scored(value, target, timestamp, response_time),
            ))
        }
        GameEvent::TimeExpired { timestamp } => {
            ensure_accepting(session)?;
            Ok(record(session, Guess::timed_out(target, timestamp)))
        }
        GameEvent::Reveal => reveal(session),
    }
}

fn ensure_accepting(session: &GameSession) -> Result<(), SessionError> {
    if session.is_game_over() {
        return Err(SessionError::GameOver);
    }
    if session.guesses.len() >= MAX_GUESSES {
        return Err(SessionError::OutOfGuesses);
    }
    Ok(())
}

fn record(session: &GameSession, guess: Guess) -> Step {
    let mut next = session.clone();
    let won = guess.is_winning();
    debug!(
        value = guess.value,
        level = %guess.feedback.level,
        timed_out = guess.timed_out,
        "guess recorded"
    );
    next.guesses.push(guess);

    if won {
        next.result = GameResult::Win;
        // Counters come from disk and may already sit at the limit
        next.streak = next.streak.saturating_add(1);
        next.longest_streak = next.longest_streak.max(next.streak);
        next.games_played = next.games_played.saturating_add(1);
        next.last_played = Some(next.date);
    } else if next.guesses.len() >= MAX_GUESSES {
        next.result = GameResult::Loss;
        next.streak = 0;
        next.games_played = next.games_played.saturating_add(1);
        next.last_played = Some(next.date);
    }

    let mut effects = vec![Effect::Persist(next.to_day_state())];
    if next.is_game_over() {
        debug!(result = ?next.result, streak = next.streak, "game finished");
        effects.push(Effect::ScheduleReveal(REVEAL_DELAY));
    }

    Step {
        session: next,
        effects,
    }
}

fn reveal(session: &GameSession) -> Result<Step, SessionError> {
    if !session.is_game_over() {
        return Err(SessionError::StillPlaying);
    }

    let mut next = session.clone();
    next.screen = Screen::Reveal;
    Ok(Step {
        session: next,
        effects: Vec::new(),
    })
}
