//! Display functions for command results

use super::formatters::{guess_row, hex_to_rgb, percent_off_text, proximity_bar};
use crate::commands::{ClassifyResult, StatsReport};
use crate::core::{Question, format_num};
use crate::game::{GameResult, GameSession, Guess, MAX_GUESSES};
use colored::{ColoredString, Colorize};
use std::io::{self, Write};

/// Color text with a feedback hex color, plain if the color is malformed
fn paint(text: &str, hex: &str) -> ColoredString {
    match hex_to_rgb(hex) {
        Some((r, g, b)) => text.truecolor(r, g, b),
        None => text.normal(),
    }
}

/// Print the result of classifying a single guess
pub fn print_classify_result(result: &ClassifyResult) {
    println!("\n{}", "─".repeat(50).cyan());
    println!(
        "Guess {} against {}",
        format_num(result.guess).bright_yellow().bold(),
        format_num(result.answer).bright_white().bold()
    );
    println!("{}", "─".repeat(50).cyan());

    let feedback = &result.feedback;
    println!(
        "\n  {} {}",
        feedback.emoji,
        paint(&feedback.label, feedback.color).bold()
    );
    println!("  Tier:      {}", feedback.level);
    println!(
        "  Closeness: [{}] {:.3} log",
        paint(&proximity_bar(result.distance, 20), feedback.color),
        result.distance
    );
    println!("  Off by:    {}", percent_off_text(result.pct_off));
}

/// Print the saved streak summary
pub fn print_stats(report: &StatsReport) {
    println!("\n{}", "═".repeat(50).cyan());
    println!(" {} ", "GUESSTIMATE STATS".bright_cyan().bold());
    println!("{}", "═".repeat(50).cyan());

    if report.corrupt {
        println!(
            "\n{}",
            "Saved state was unreadable; it will be replaced on the next game.".yellow()
        );
    }

    println!("\n   Games played:   {}", report.games_played);
    println!(
        "   Current streak: {}",
        report.current_streak.to_string().bright_yellow().bold()
    );
    println!("   Longest streak: {}", report.longest_streak);
    match report.last_played {
        Some(date) => println!("   Last finished:  {date}"),
        None => println!("   Last finished:  {}", "never".bright_black()),
    }

    match report.today {
        Some(today) => {
            let status = match today.result {
                GameResult::Playing => format!(
                    "in progress, {} of {MAX_GUESSES} guesses used",
                    today.guesses
                )
                .yellow(),
                GameResult::Win => format!("solved in {}", today.guesses).green(),
                GameResult::Loss => "not solved".to_string().red(),
            };
            println!("   Today:          {status}");
        }
        None => println!("   Today:          {}", "not started".bright_black()),
    }
}

/// Header with today's question
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_question(out: &mut impl Write, question: &Question) -> io::Result<()> {
    writeln!(out, "\n{}", "═".repeat(60).bright_cyan())?;
    writeln!(
        out,
        "  {} #{}  {}",
        "🎯 GUESSTIMATE".bright_cyan().bold(),
        question.question_number,
        question.category.label().bright_black()
    )?;
    writeln!(out, "{}", "═".repeat(60).bright_cyan())?;
    writeln!(out, "\n  {}", question.question.bold())?;
    writeln!(out, "  {}", format!("Answer in {}", question.unit).bright_black())?;
    writeln!(out)
}

/// One colored guess row with its closeness bar
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_guess(out: &mut impl Write, index: usize, guess: &Guess) -> io::Result<()> {
    let row = guess_row(index, guess);
    if guess.timed_out {
        return writeln!(out, "  {}", row.bright_black());
    }
    writeln!(
        out,
        "  {}  {}",
        paint(&row, guess.feedback.color),
        paint(&proximity_bar(guess.distance, 12), guess.feedback.color)
    )
}

/// Final screen: result, answer, explanation, streaks, share text
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_reveal(
    out: &mut impl Write,
    session: &GameSession,
    question: &Question,
    share_text: &str,
) -> io::Result<()> {
    writeln!(out, "\n{}", "═".repeat(60).bright_cyan())?;
    if session.is_solved() {
        writeln!(
            out,
            "{}",
            format!("  🎉 Solved in {}!", session.guesses.len())
                .bright_green()
                .bold()
        )?;
    } else {
        writeln!(out, "{}", "  😅 Out of guesses".bright_red().bold())?;
    }
    writeln!(
        out,
        "\n  The answer: {} {}",
        format_num(question.answer).bright_yellow().bold(),
        question.unit
    )?;
    if !question.explanation.is_empty() {
        writeln!(out, "  {}", question.explanation)?;
    }
    if !question.source.is_empty() {
        writeln!(out, "  {}", format!("Source: {}", question.source).bright_black())?;
    }

    writeln!(
        out,
        "\n  Streak {}  ·  Best {}  ·  Played {}",
        session.streak.to_string().bright_yellow().bold(),
        session.longest_streak,
        session.games_played
    )?;

    writeln!(out, "\n{}", "  Share:".bright_cyan())?;
    for line in share_text.lines() {
        writeln!(out, "  {line}")?;
    }
    writeln!(out, "{}", "═".repeat(60).bright_cyan())
}
