//! Command implementations

pub mod classify;
pub mod daily;
pub mod share;
pub mod simple;
pub mod stats;

pub use classify::{ClassifyError, ClassifyResult, classify_guess};
pub use daily::DailyGame;
pub use share::{ShareError, ShareResult, share_saved};
pub use simple::{SimpleOptions, SimpleOutcome, run_simple};
pub use stats::{StatsReport, TodaySummary, collect_stats};
