//! Guesstimate - CLI
//!
//! Daily numeric guessing game with TUI and line modes.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use guesstimate::{
    commands::{
        DailyGame, SimpleOptions, classify_guess, collect_stats, run_simple, share_saved,
    },
    config::Settings,
    game::calendar::parse_date,
    output::{print_classify_result, print_stats},
};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

#[derive(Parser)]
#[command(
    name = "guesstimate",
    about = "Daily numeric guessing game: five guesses, hot/cold feedback, streaks",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Saved game file (default: <data dir>/guesstimate/state.json)
    #[arg(long, global = true, env = "GUESSTIMATE_STATE")]
    state_file: Option<PathBuf>,

    /// Question bank JSON file (default: built-in questions)
    #[arg(long, global = true, env = "GUESSTIMATE_QUESTIONS")]
    questions: Option<PathBuf>,

    /// Play as if today were this UTC date (YYYY-MM-DD)
    #[arg(long, global = true, value_parser = parse_date_arg)]
    date: Option<NaiveDate>,

    /// Link appended to the share text
    #[arg(long, global = true, env = "GUESSTIMATE_URL")]
    share_url: Option<String>,

    /// Write logs to this file (the TUI discards logs otherwise)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI mode (default)
    Play,

    /// Simple line mode (no TUI)
    Simple {
        /// Do not enforce the per-guess countdown
        #[arg(long)]
        untimed: bool,
    },

    /// Classify a guess against any answer
    Classify {
        /// The guess, e.g. 1.5k
        guess: String,

        /// The answer, e.g. 2000
        answer: String,

        /// Upper log-distance bound for "hot"
        #[arg(long)]
        hot: Option<f64>,

        /// Upper log-distance bound for "warm"
        #[arg(long)]
        warm: Option<f64>,
    },

    /// Print the share text for today's finished game
    Share,

    /// Show streaks and today's progress
    Stats,
}

fn parse_date_arg(text: &str) -> Result<NaiveDate, String> {
    parse_date(text).ok_or_else(|| format!("'{text}' is not a YYYY-MM-DD date"))
}

fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize logging; `RUST_LOG` overrides the -v level
fn init_logging(verbose: u8, log_file: Option<&PathBuf>, tui: bool) -> Result<()> {
    let level = log_level(verbose);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("guesstimate={level}")));

    // The TUI owns the terminal, so its logs go to a file or nowhere
    let writer = match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None if tui => BoxMakeWriter::new(io::sink),
        None => BoxMakeWriter::new(io::stderr),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(log_file.is_none())
        .with_target(false)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let mut cli = Cli::parse();

    // Default to Play mode if no command given
    let command = cli.command.take().unwrap_or(Commands::Play);
    init_logging(
        cli.verbose,
        cli.log_file.as_ref(),
        matches!(command, Commands::Play),
    )?;

    match command {
        Commands::Play => run_play_command(&resolve_settings(&cli)?),
        Commands::Simple { untimed } => run_simple_command(&resolve_settings(&cli)?, !untimed),
        Commands::Classify {
            guess,
            answer,
            hot,
            warm,
        } => run_classify_command(&guess, &answer, hot, warm),
        Commands::Share => run_share_command(&resolve_settings(&cli)?),
        Commands::Stats => {
            run_stats_command(&resolve_settings(&cli)?);
            Ok(())
        }
    }
}

fn resolve_settings(cli: &Cli) -> Result<Settings> {
    let settings = Settings::resolve(
        cli.state_file.clone(),
        cli.questions.clone(),
        cli.date,
        cli.share_url.clone(),
    )?;
    info!(
        date = %settings.date,
        state = %settings.state_path().display(),
        "settings resolved"
    );
    Ok(settings)
}

fn open_game(settings: &Settings) -> Result<DailyGame<guesstimate::game::FileStore>> {
    let bank = settings
        .questions
        .load()
        .context("failed to load questions")?;
    DailyGame::open(settings.open_store(), &bank, settings.date)
}

fn run_play_command(settings: &Settings) -> Result<()> {
    use guesstimate::interactive::{App, run_tui};
    use std::time::Instant;

    let game = open_game(settings)?;
    let app = App::new(game, settings.share_url.clone(), Instant::now());
    run_tui(app)
}

fn run_simple_command(settings: &Settings, timed: bool) -> Result<()> {
    let mut game = open_game(settings)?;
    let options = SimpleOptions {
        timed,
        share_url: settings.share_url.clone(),
    };
    let stdin = io::stdin();
    run_simple(&mut game, stdin.lock(), io::stdout(), &options)?;

    if game.failed_writes() > 0 {
        eprintln!(
            "warning: progress could not be saved to {}",
            settings.state_path().display()
        );
    }
    Ok(())
}

fn run_classify_command(
    guess: &str,
    answer: &str,
    hot: Option<f64>,
    warm: Option<f64>,
) -> Result<()> {
    let result = classify_guess(guess, answer, hot, warm)?;
    print_classify_result(&result);
    Ok(())
}

fn run_share_command(settings: &Settings) -> Result<()> {
    let bank = settings
        .questions
        .load()
        .context("failed to load questions")?;
    let loaded = settings.open_store().read();
    let shared = share_saved(loaded, &bank, settings.date, &settings.share_url)?;
    println!("{}", shared.text);
    Ok(())
}

fn run_stats_command(settings: &Settings) {
    let report = collect_stats(settings.open_store().read(), settings.date);
    print_stats(&report);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli =
            Cli::try_parse_from(["guesstimate", "stats", "--date", "2026-10-18", "-vv"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Stats)));
        assert_eq!(cli.date, parse_date("2026-10-18"));
        assert_eq!(log_level(cli.verbose), "debug");
    }

    #[test]
    fn bad_date_is_rejected() {
        assert!(Cli::try_parse_from(["guesstimate", "--date", "18/10/2026"]).is_err());
    }
}
