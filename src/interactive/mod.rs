//! Interactive TUI
//!
//! Ready screen, countdown per guess, colored history and the reveal screen.

mod app;
mod rendering;

pub use app::{App, InputMode, Message, MessageStyle, run_tui};
pub use rendering::ui;
