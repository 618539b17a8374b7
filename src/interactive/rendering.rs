//! TUI rendering with ratatui

use super::app::{App, InputMode, MessageStyle};
use crate::core::format_num;
use crate::game::{MAX_GUESSES, Persistence};
use crate::output::formatters::{guess_row, hex_to_rgb, proximity_bar};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, List, ListItem, Paragraph, Wrap},
};
use std::time::Instant;

fn feedback_color(hex: &str) -> Color {
    hex_to_rgb(hex).map_or(Color::White, |(r, g, b)| Color::Rgb(r, g, b))
}

/// Main UI rendering function
pub fn ui<P: Persistence>(f: &mut Frame, app: &App<P>, now: Instant) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Input area
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    if app.input_mode == InputMode::Reveal {
        render_reveal(f, app, main_chunks[0]);
    } else {
        render_main_panel(f, app, main_chunks[0]);
    }
    render_info_panel(f, app, now, main_chunks[1]);

    render_input(f, app, chunks[2]);
    render_status(f, app, chunks[3]);
}

fn render_header<P: Persistence>(f: &mut Frame, app: &App<P>, area: Rect) {
    let question = app.game.question();
    let header = Paragraph::new(format!(
        "🎯 GUESSTIMATE #{}  ·  {}",
        question.question_number,
        question.category.label()
    ))
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(header, area);
}

fn render_main_panel<P: Persistence>(f: &mut Frame, app: &App<P>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    render_question(f, app, chunks[0]);
    render_history(f, app, chunks[1]);
}

fn render_question<P: Persistence>(f: &mut Frame, app: &App<P>, area: Rect) {
    let question = app.game.question();
    let content = if app.input_mode == InputMode::Ready {
        vec![
            Line::from("Guess the number. You get 5 tries."),
            Line::from("We'll tell you if you're hot, warm, or cold, and which way to go."),
            Line::from(""),
            Line::from(Span::styled(
                "Press Enter to see the question. The clock starts then.",
                Style::default().fg(Color::Yellow),
            )),
        ]
    } else {
        vec![
            Line::from(Span::styled(
                question.question.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!("Answer in {}", question.unit),
                Style::default().fg(Color::DarkGray),
            )),
        ]
    };

    let paragraph = Paragraph::new(content)
        .block(
            Block::default()
                .title(" Question ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn render_history<P: Persistence>(f: &mut Frame, app: &App<P>, area: Rect) {
    let guesses = &app.game.session().guesses;
    let items: Vec<ListItem> = guesses
        .iter()
        .enumerate()
        .map(|(i, guess)| {
            let color = if guess.timed_out {
                Color::DarkGray
            } else {
                feedback_color(guess.feedback.color)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<36}", guess_row(i, guess)), Style::default().fg(color)),
                Span::styled(proximity_bar(guess.distance, 10), Style::default().fg(color)),
            ]))
        })
        .collect();

    let title = format!(" Guesses {}/{MAX_GUESSES} ", guesses.len());
    let history = List::new(items).block(Block::default().title(title).borders(Borders::ALL));
    f.render_widget(history, area);
}

fn render_reveal<P: Persistence>(f: &mut Frame, app: &App<P>, area: Rect) {
    let session = app.game.session();
    let question = app.game.question();

    let (headline, color) = if session.is_solved() {
        (format!("🎉 Solved in {}!", session.guesses.len()), Color::Green)
    } else {
        ("😅 Out of guesses".to_string(), Color::Red)
    };

    let mut lines = vec![
        Line::from(Span::styled(
            headline,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw("The answer: "),
            Span::styled(
                format!("{} {}", format_num(question.answer), question.unit),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(question.explanation.clone()),
    ];
    if !question.source.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("Source: {}", question.source),
            Style::default().fg(Color::DarkGray),
        )));
    }

    lines.push(Line::from(""));
    lines.extend(app.share_text().lines().map(|l| Line::from(l.to_string())));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" Result ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(color)),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn render_info_panel<P: Persistence>(f: &mut Frame, app: &App<P>, now: Instant, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    render_countdown(f, app, now, chunks[0]);
    render_messages(f, app, chunks[1]);
}

fn render_countdown<P: Persistence>(f: &mut Frame, app: &App<P>, now: Instant, area: Rect) {
    let block = Block::default()
        .title(" Time ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);

    let Some(clock) = app.clock else {
        f.render_widget(Paragraph::new("--").alignment(Alignment::Center).block(block), area);
        return;
    };

    let remaining = clock.remaining(now);
    let ratio = remaining.as_secs_f64() / clock.limit().as_secs_f64();
    let color = if ratio > 0.5 {
        Color::Green
    } else if ratio > 0.25 {
        Color::Yellow
    } else {
        Color::Red
    };

    let gauge = Gauge::default()
        .block(block)
        .gauge_style(Style::default().fg(color))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(format!("{:.0}s", remaining.as_secs_f64().ceil()));
    f.render_widget(gauge, area);
}

fn render_messages<P: Persistence>(f: &mut Frame, app: &App<P>, area: Rect) {
    let messages: Vec<ListItem> = app
        .messages
        .iter()
        .rev()
        .map(|msg| {
            let style = match msg.style {
                MessageStyle::Info => Style::default().fg(Color::White),
                MessageStyle::Success => Style::default().fg(Color::Green),
                MessageStyle::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(msg.text.clone()).style(style)
        })
        .collect();

    let messages_list =
        List::new(messages).block(Block::default().title(" Messages ").borders(Borders::ALL));
    f.render_widget(messages_list, area);
}

fn render_input<P: Persistence>(f: &mut Frame, app: &App<P>, area: Rect) {
    let (title, content, color) = match app.input_mode {
        InputMode::Ready => (" Ready? ", "Press Enter", Color::Cyan),
        InputMode::Guessing => (
            " Your guess (42, 1.5k, 3m, 2b) | Enter to submit ",
            app.input_buffer.as_str(),
            Color::Yellow,
        ),
        InputMode::Revealing => (" Game over ", "Press Enter to see the answer", Color::Cyan),
        InputMode::Reveal => (" See you tomorrow ", "Press q to quit", Color::Green),
    };

    let input = Paragraph::new(content)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .style(Style::default().fg(color)),
        );
    f.render_widget(input, area);
}

fn render_status<P: Persistence>(f: &mut Frame, app: &App<P>, area: Rect) {
    let session = app.game.session();
    let status = format!(
        "Streak: {} | Best: {} | Played: {} | Guesses left: {} | q: Quit",
        session.streak,
        session.longest_streak,
        session.games_played,
        session.guesses_left()
    );
    let paragraph = Paragraph::new(status)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::DailyGame;
    use crate::game::calendar::parse_date;
    use crate::game::{GameStore, MemoryStore};
    use crate::questions::QuestionBank;
    use ratatui::{Terminal, backend::TestBackend};

    fn draw(app: &App<MemoryStore>, now: Instant) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| ui(f, app, now)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    fn app(now: Instant) -> App<MemoryStore> {
        let bank = QuestionBank::embedded().unwrap();
        let game = DailyGame::open(
            GameStore::new(MemoryStore::new()),
            &bank,
            parse_date("2026-10-18").unwrap(),
        )
        .unwrap();
        App::new(game, "https://g.test", now)
    }

    #[test]
    fn ready_screen_hides_question() {
        let now = Instant::now();
        let app = app(now);
        let screen = draw(&app, now);
        assert!(screen.contains("GUESSTIMATE"));
        assert!(screen.contains("Press Enter"));
        assert!(!screen.contains("Titanic"));
    }

    #[test]
    fn playing_screen_shows_question_and_timer() {
        let now = Instant::now();
        let mut app = app(now);
        app.start(now);
        let screen = draw(&app, now);
        assert!(screen.contains("Titanic"));
        assert!(screen.contains("20s"));
        assert!(screen.contains("Guesses 0/5"));
    }
}
