//! Today's game wired to a store and a question
//!
//! Front ends hold a [`DailyGame`] and feed it events. It applies the session
//! transition, writes through the store on every persist effect, and hands
//! the reveal delay back to the caller's event loop.

use crate::core::{Question, Target};
use crate::game::{
    Effect, GameDayState, GameEvent, GameSession, GameStore, HydrationCase, Persistence,
    SessionError, hydrate, new_visitor_id, transition,
};
use crate::questions::QuestionProvider;
use crate::share::generate_share_text;
use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use std::borrow::Cow;
use std::time::Duration;
use tracing::warn;

pub struct DailyGame<P: Persistence> {
    store: GameStore<P>,
    question: Question,
    target: Target,
    session: GameSession,
    case: HydrationCase,
    failed_writes: usize,
}

impl<P: Persistence> DailyGame<P> {
    /// Hydrate today's session and write it back when hydration requires it
    ///
    /// # Errors
    ///
    /// Returns an error if the provider has no question for `today`. A failed
    /// write is logged and does not stop the game.
    pub fn open(
        store: GameStore<P>,
        provider: &impl QuestionProvider,
        today: NaiveDate,
    ) -> Result<Self> {
        let question = provider
            .question_for(today)
            .map(Cow::into_owned)
            .ok_or_else(|| anyhow!("no question available for {today}"))?;
        let target = Target::from(&question);
        let hydrated = hydrate(store.read(), today, &target, new_visitor_id);
        let needs_write = hydrated.needs_write();

        let mut game = Self {
            store,
            question,
            target,
            case: hydrated.case,
            session: hydrated.session,
            failed_writes: 0,
        };
        if needs_write {
            let state = game.session.to_day_state();
            game.persist(&state);
        }
        Ok(game)
    }

    /// Apply one event; returns the reveal delay when the game just ended
    ///
    /// # Errors
    ///
    /// Returns the session's refusal unchanged; nothing is written then.
    pub fn apply(&mut self, event: GameEvent) -> Result<Option<Duration>, SessionError> {
        let step = transition(&self.session, &self.target, event)?;

        let mut reveal = None;
        for effect in &step.effects {
            match effect {
                Effect::Persist(state) => self.persist(state),
                Effect::ScheduleReveal(delay) => reveal = Some(*delay),
            }
        }
        self.session = step.session;
        Ok(reveal)
    }

    fn persist(&mut self, state: &GameDayState) {
        if let Err(e) = self.store.write(state) {
            self.failed_writes += 1;
            warn!(error = %e, "failed to save game state, continuing");
        }
    }

    #[must_use]
    pub const fn session(&self) -> &GameSession {
        &self.session
    }

    #[must_use]
    pub const fn question(&self) -> &Question {
        &self.question
    }

    #[must_use]
    pub const fn target(&self) -> &Target {
        &self.target
    }

    #[must_use]
    pub const fn hydration_case(&self) -> HydrationCase {
        self.case
    }

    /// Writes that failed since opening
    #[must_use]
    pub const fn failed_writes(&self) -> usize {
        self.failed_writes
    }

    #[must_use]
    pub const fn store(&self) -> &GameStore<P> {
        &self.store
    }

    pub fn into_store(self) -> GameStore<P> {
        self.store
    }

    #[must_use]
    pub fn share_text(&self, url: &str) -> String {
        generate_share_text(
            self.question.question_number,
            &self.session.guesses,
            self.session.is_solved(),
            self.target.answer,
            &self.target.unit,
            url,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::calendar::parse_date;
    use crate::game::{GameResult, Loaded, MemoryStore, Screen, StoreError};
    use crate::questions::QuestionBank;

    fn bank() -> QuestionBank {
        QuestionBank::embedded().unwrap()
    }

    fn day() -> NaiveDate {
        parse_date("2026-10-18").unwrap()
    }

    #[derive(Debug, Default)]
    struct BrokenStore;

    impl Persistence for BrokenStore {
        fn load(&self) -> Result<Option<String>, StoreError> {
            Ok(None)
        }

        fn save(&mut self, _blob: &str) -> Result<(), StoreError> {
            Err(StoreError::Io {
                path: "broken".into(),
                source: std::io::Error::other("disk full"),
            })
        }
    }

    #[test]
    fn first_open_writes_fresh_state() {
        let game = DailyGame::open(GameStore::new(MemoryStore::new()), &bank(), day()).unwrap();

        assert_eq!(game.hydration_case(), HydrationCase::FirstVisit);
        assert_eq!(game.store().channel().writes(), 1);
        assert!(matches!(game.store().read(), Loaded::Found(s) if s.guesses.is_empty()));
        assert_eq!(game.question().date, day());
    }

    #[test]
    fn every_guess_is_written_through() {
        let mut game =
            DailyGame::open(GameStore::new(MemoryStore::new()), &bank(), day()).unwrap();
        game.apply(GameEvent::guess("1")).unwrap();
        game.apply(GameEvent::guess("2")).unwrap();

        assert_eq!(game.store().channel().writes(), 3);
        match game.store().read() {
            Loaded::Found(state) => assert_eq!(state.guesses, vec![1.0, 2.0]),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn rejected_input_writes_nothing() {
        let mut game =
            DailyGame::open(GameStore::new(MemoryStore::new()), &bank(), day()).unwrap();
        assert!(game.apply(GameEvent::guess("abc")).is_err());
        assert_eq!(game.store().channel().writes(), 1);
        assert!(game.session().guesses.is_empty());
    }

    #[test]
    fn winning_returns_reveal_delay_then_reveals() {
        let mut game =
            DailyGame::open(GameStore::new(MemoryStore::new()), &bank(), day()).unwrap();
        let answer = game.target().answer.to_string();

        let delay = game.apply(GameEvent::guess(answer)).unwrap();
        assert_eq!(delay, Some(crate::game::REVEAL_DELAY));
        assert_eq!(game.session().result, GameResult::Win);

        assert_eq!(game.apply(GameEvent::Reveal).unwrap(), None);
        assert_eq!(game.session().screen, Screen::Reveal);
        assert!(game.share_text("u").contains("🤯"));
    }

    #[test]
    fn failed_writes_do_not_stop_play() {
        let mut game = DailyGame::open(GameStore::new(BrokenStore), &bank(), day()).unwrap();
        assert_eq!(game.failed_writes(), 1);

        game.apply(GameEvent::guess("5")).unwrap();
        assert_eq!(game.failed_writes(), 2);
        assert_eq!(game.session().guesses.len(), 1);
    }

    #[test]
    fn maxed_out_counters_still_win() {
        let blob = r#"{"v":"x","d":"2026-10-17","g":[],"r":"p","sk":4294967295,"sl":4294967295,"gp":4294967295,"ld":"2026-10-17"}"#;
        let store = GameStore::new(MemoryStore::with_blob(blob));
        let mut game = DailyGame::open(store, &bank(), day()).unwrap();
        assert_eq!(game.hydration_case(), HydrationCase::StreakKept);

        let answer = game.target().answer.to_string();
        assert!(game.apply(GameEvent::guess(answer)).unwrap().is_some());
        assert_eq!(game.session().result, GameResult::Win);
        assert_eq!(game.session().streak, u32::MAX);
        assert_eq!(game.session().games_played, u32::MAX);
    }

    #[test]
    fn reopening_same_day_resumes() {
        let mut game =
            DailyGame::open(GameStore::new(MemoryStore::new()), &bank(), day()).unwrap();
        game.apply(GameEvent::guess("7")).unwrap();
        let store = game.into_store();

        let resumed = DailyGame::open(store, &bank(), day()).unwrap();
        assert_eq!(resumed.hydration_case(), HydrationCase::SameDay);
        assert_eq!(resumed.session().guesses.len(), 1);
        // Same-day resume does not write
        assert_eq!(resumed.store().channel().writes(), 2);
    }
}
