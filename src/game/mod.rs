//! Daily game state: session state machine, persistence, hydration, timers

pub mod calendar;
mod hydrate;
mod session;
mod state;
pub mod store;
pub mod timer;

pub use hydrate::{HydrationCase, Hydrated, hydrate, new_visitor_id, rebuild_guesses};
pub use session::{
    Effect, GameEvent, GameResult, GameSession, Guess, MAX_GUESSES, REVEAL_DELAY, Screen,
    SessionError, Step, transition,
};
pub use state::{GameDayState, ResultCode};
pub use store::{FileStore, GameStore, Loaded, MemoryStore, Persistence, StoreError};
pub use timer::{GuessClock, RevealTimer, guess_time_limit};
