//! Simple interactive CLI mode
//!
//! Line-based game without TUI. A blocking read cannot be interrupted, so the
//! countdown is checked when the answer arrives: a late answer is recorded as
//! a timeout.

use super::daily::DailyGame;
use crate::game::calendar::now_millis;
use crate::game::{GameEvent, GameResult, GuessClock, MAX_GUESSES, Persistence, SessionError};
use crate::output::{write_guess, write_question, write_reveal};
use anyhow::Result;
use colored::Colorize;
use std::io::{BufRead, Write};
use std::thread;
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct SimpleOptions {
    /// Enforce the per-guess countdown and pause before the reveal
    pub timed: bool,
    pub share_url: String,
}

/// How the session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleOutcome {
    pub result: GameResult,
    pub guesses: usize,
    /// Present once the game is over
    pub share_text: Option<String>,
}

/// Run the simple interactive CLI mode
///
/// Returns when the game is over, the player quits, or input ends. Progress is
/// saved after every guess, so quitting early resumes later.
///
/// # Errors
///
/// Returns an error if reading input or writing output fails.
pub fn run_simple<P: Persistence>(
    game: &mut DailyGame<P>,
    mut input: impl BufRead,
    mut out: impl Write,
    options: &SimpleOptions,
) -> Result<SimpleOutcome> {
    write_question(&mut out, game.question())?;

    for (i, guess) in game.session().guesses.iter().enumerate() {
        write_guess(&mut out, i, guess)?;
    }

    if !game.session().is_game_over() {
        writeln!(
            out,
            "Type a number like 42, 1.5k, 3m or 2b. 'quit' to stop, progress is saved.\n"
        )?;
    }

    while !game.session().is_game_over() {
        let index = game.session().guesses.len();
        let clock = GuessClock::start(Instant::now(), index);

        if options.timed {
            write!(
                out,
                "Guess {}/{MAX_GUESSES} ({}s): ",
                index + 1,
                clock.limit().as_secs()
            )?;
        } else {
            write!(out, "Guess {}/{MAX_GUESSES}: ", index + 1)?;
        }
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out, "\n👋 Saved. Come back later today to finish.")?;
            return Ok(outcome(game, None));
        }
        let line = line.trim();

        match line.to_lowercase().as_str() {
            "quit" | "q" | "exit" => {
                writeln!(out, "\n👋 Saved. Come back later today to finish.")?;
                return Ok(outcome(game, None));
            }
            "help" | "?" => {
                writeln!(
                    out,
                    "Suffixes: k = thousand, m = million, b = billion, t = trillion. Commas are fine.\n"
                )?;
                continue;
            }
            _ => {}
        }

        let now = Instant::now();
        let event = if options.timed && clock.expired(now) {
            writeln!(out, "{}", "⏰ Time's up! That counts as a guess.".yellow())?;
            GameEvent::TimeExpired {
                timestamp: now_millis(),
            }
        } else {
            GameEvent::Guess {
                input: line.to_string(),
                timestamp: now_millis(),
                response_time: options.timed.then(|| clock.response_time_ms(now)),
            }
        };

        match game.apply(event) {
            Ok(reveal) => {
                if let Some(last) = game.session().guesses.last() {
                    write_guess(&mut out, index, last)?;
                }
                if let Some(delay) = reveal
                    && options.timed
                {
                    thread::sleep(delay);
                }
            }
            Err(SessionError::Input(e)) => {
                writeln!(out, "{}", format!("❌ {e}").red())?;
            }
            Err(e) => return Err(e.into()),
        }
    }

    // Idempotent when the game was already revealed on a previous run
    game.apply(GameEvent::Reveal)?;
    let share_text = game.share_text(&options.share_url);
    write_reveal(&mut out, game.session(), game.question(), &share_text)?;

    Ok(outcome(game, Some(share_text)))
}

fn outcome<P: Persistence>(game: &DailyGame<P>, share_text: Option<String>) -> SimpleOutcome {
    SimpleOutcome {
        result: game.session().result,
        guesses: game.session().guesses.len(),
        share_text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::calendar::parse_date;
    use crate::game::{GameStore, HydrationCase, MemoryStore};
    use crate::questions::QuestionBank;
    use std::io::Cursor;

    fn open(store: MemoryStore) -> DailyGame<MemoryStore> {
        let bank = QuestionBank::embedded().unwrap();
        DailyGame::open(GameStore::new(store), &bank, parse_date("2026-10-18").unwrap()).unwrap()
    }

    fn options() -> SimpleOptions {
        SimpleOptions {
            timed: false,
            share_url: "https://g.test".to_string(),
        }
    }

    fn play(game: &mut DailyGame<MemoryStore>, script: &str) -> (SimpleOutcome, String) {
        let mut out = Vec::new();
        let outcome = run_simple(game, Cursor::new(script.to_string()), &mut out, &options())
            .unwrap();
        (outcome, String::from_utf8(out).unwrap())
    }

    #[test]
    fn win_prints_reveal_and_share() {
        let mut game = open(MemoryStore::new());
        let answer = game.target().answer;
        let script = format!("{}\n{answer}\n", answer * 10.0);

        let (outcome, text) = play(&mut game, &script);
        assert_eq!(outcome.result, GameResult::Win);
        assert_eq!(outcome.guesses, 2);
        let share = outcome.share_text.unwrap();
        assert!(share.starts_with("🎯 Guesstimate #"));
        assert!(share.ends_with("https://g.test"));
        assert!(text.contains("Nailed it!"));
        assert!(text.contains("Solved in 2"));
    }

    #[test]
    fn bad_input_is_reported_and_not_counted() {
        let mut game = open(MemoryStore::new());
        let (outcome, text) = play(&mut game, "lots\n-5\n");

        assert_eq!(outcome.result, GameResult::Playing);
        assert_eq!(outcome.guesses, 0);
        assert!(text.contains("not a number"));
        assert!(text.contains("must not be negative"));
        assert_eq!(outcome.share_text, None);
    }

    #[test]
    fn five_misses_lose() {
        let mut game = open(MemoryStore::new());
        let (outcome, text) = play(&mut game, "1\n1\n1\n1\n1\n");
        assert_eq!(outcome.result, GameResult::Loss);
        assert!(text.contains("Out of guesses"));
        assert!(outcome.share_text.unwrap().contains("❌ 💀"));
    }

    #[test]
    fn quit_keeps_progress_for_later() {
        let mut game = open(MemoryStore::new());
        let (outcome, _) = play(&mut game, "1\nquit\n");
        assert_eq!(outcome.guesses, 1);

        let store = game.into_store().into_inner();
        let mut resumed = open(store);
        assert_eq!(resumed.hydration_case(), HydrationCase::SameDay);
        let (outcome, text) = play(&mut resumed, "");
        assert_eq!(outcome.guesses, 1);
        assert!(text.contains("1. "));
    }

    #[test]
    fn finished_game_just_reveals() {
        let mut game = open(MemoryStore::new());
        let answer = game.target().answer;
        play(&mut game, &format!("{answer}\n"));

        let store = game.into_store().into_inner();
        let mut again = open(store);
        let (outcome, text) = play(&mut again, "5\n");
        assert_eq!(outcome.result, GameResult::Win);
        assert_eq!(outcome.guesses, 1);
        assert!(!text.contains("Guess 2/"));
    }
}
