//! TUI application state and logic

use crate::commands::DailyGame;
use crate::game::calendar::now_millis;
use crate::game::{GameEvent, GuessClock, Persistence, RevealTimer, Screen, SessionError};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::{Duration, Instant};

/// Redraw often enough for a smooth countdown
const TICK: Duration = Duration::from_millis(250);

/// Application state
pub struct App<P: Persistence> {
    pub game: DailyGame<P>,
    pub input_mode: InputMode,
    pub input_buffer: String,
    pub messages: Vec<Message>,
    pub clock: Option<GuessClock>,
    pub reveal_timer: RevealTimer,
    pub share_url: String,
    pub should_quit: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Question not shown yet; the countdown starts on Enter
    Ready,
    Guessing,
    /// Game over, waiting for the reveal delay
    Revealing,
    Reveal,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

impl<P: Persistence> App<P> {
    #[must_use]
    pub fn new(game: DailyGame<P>, share_url: impl Into<String>, now: Instant) -> Self {
        let session = game.session();
        let (input_mode, clock) = if session.is_game_over() {
            (InputMode::Reveal, None)
        } else if session.guesses.is_empty() {
            (InputMode::Ready, None)
        } else {
            // Resumed mid-game: the countdown restarts for the next guess
            (
                InputMode::Guessing,
                Some(GuessClock::start(now, session.guesses.len())),
            )
        };

        let mut app = Self {
            game,
            input_mode,
            input_buffer: String::new(),
            messages: Vec::new(),
            clock,
            reveal_timer: RevealTimer::new(),
            share_url: share_url.into(),
            should_quit: false,
        };

        match app.input_mode {
            InputMode::Ready => app.add_message(
                "Guess the number in 5 tries. Press Enter when ready.",
                MessageStyle::Info,
            ),
            InputMode::Guessing => {
                app.add_message("Welcome back! Your guesses were saved.", MessageStyle::Info);
            }
            InputMode::Revealing | InputMode::Reveal => {
                app.add_message("You already played today. See you tomorrow!", MessageStyle::Info);
            }
        }
        app
    }

    /// Leave the ready screen and start the first countdown
    pub fn start(&mut self, now: Instant) {
        if self.input_mode == InputMode::Ready {
            self.input_mode = InputMode::Guessing;
            self.clock = Some(GuessClock::start(now, self.game.session().guesses.len()));
        }
    }

    pub fn submit(&mut self, now: Instant) {
        if self.input_mode != InputMode::Guessing {
            return;
        }
        let event = GameEvent::Guess {
            input: self.input_buffer.clone(),
            timestamp: now_millis(),
            response_time: self.clock.map(|clock| clock.response_time_ms(now)),
        };
        if self.apply(event, now) {
            self.input_buffer.clear();
        }
    }

    /// Advance timers; call on every loop iteration
    pub fn tick(&mut self, now: Instant) {
        if self.input_mode == InputMode::Guessing
            && self.clock.is_some_and(|clock| clock.expired(now))
        {
            self.input_buffer.clear();
            self.apply(
                GameEvent::TimeExpired {
                    timestamp: now_millis(),
                },
                now,
            );
        }

        if self.reveal_timer.poll(now) {
            self.reveal();
        }
    }

    /// Show the reveal screen now instead of waiting for the delay
    pub fn skip_reveal(&mut self) {
        if self.input_mode == InputMode::Revealing {
            self.reveal_timer.cancel();
            self.reveal();
        }
    }

    fn reveal(&mut self) {
        match self.game.apply(GameEvent::Reveal) {
            Ok(_) => self.input_mode = InputMode::Reveal,
            Err(e) => self.add_message(&e.to_string(), MessageStyle::Error),
        }
    }

    /// Returns whether the event was accepted
    fn apply(&mut self, event: GameEvent, now: Instant) -> bool {
        match self.game.apply(event) {
            Ok(reveal) => {
                let note = self.game.session().guesses.last().map(|guess| {
                    if guess.timed_out {
                        (
                            "⏰ Time's up! That counted as a guess.".to_string(),
                            MessageStyle::Error,
                        )
                    } else {
                        let style = if guess.is_winning() {
                            MessageStyle::Success
                        } else {
                            MessageStyle::Info
                        };
                        (format!("{} {}", guess.feedback.emoji, guess.feedback.label), style)
                    }
                });
                if let Some((text, style)) = note {
                    self.add_message(&text, style);
                }

                if let Some(delay) = reveal {
                    self.clock = None;
                    self.input_mode = InputMode::Revealing;
                    self.reveal_timer.schedule(now, delay);
                } else {
                    self.clock = Some(GuessClock::start(now, self.game.session().guesses.len()));
                }
                true
            }
            Err(SessionError::Input(e)) => {
                self.add_message(&format!("❌ {e}"), MessageStyle::Error);
                false
            }
            Err(e) => {
                self.add_message(&e.to_string(), MessageStyle::Error);
                false
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.input_mode {
            InputMode::Ready => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => self.start(now),
                KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
                _ => {}
            },
            InputMode::Guessing => match key.code {
                KeyCode::Char(c) if is_number_char(c) => self.input_buffer.push(c),
                KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
                KeyCode::Backspace => {
                    self.input_buffer.pop();
                }
                KeyCode::Enter => self.submit(now),
                _ => {}
            },
            InputMode::Revealing => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => self.skip_reveal(),
                KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
                _ => {}
            },
            InputMode::Reveal => {
                if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter) {
                    self.should_quit = true;
                }
            }
        }
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        // Keep only last 5 messages
        if self.messages.len() > 5 {
            self.messages.remove(0);
        }
    }

    #[must_use]
    pub fn share_text(&self) -> String {
        self.game.share_text(&self.share_url)
    }

    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.game.session().screen == Screen::Reveal
    }

    /// How long the event loop may block waiting for a key
    #[must_use]
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        let mut timeout = TICK;
        if let Some(clock) = self.clock {
            timeout = timeout.min(clock.remaining(now));
        }
        if let Some(remaining) = self.reveal_timer.remaining(now) {
            timeout = timeout.min(remaining);
        }
        timeout
    }
}

/// Characters that can appear in a guess such as `1,234.5k`
const fn is_number_char(c: char) -> bool {
    matches!(
        c,
        '0'..='9' | '.' | ',' | 'k' | 'K' | 'm' | 'M' | 'b' | 'B' | 't' | 'T'
    )
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui<P: Persistence>(app: App<P>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    match res {
        Ok(Some(share_text)) => {
            println!("{share_text}");
            Ok(())
        }
        Ok(None) => Ok(()),
        Err(err) => Err(err),
    }
}

/// Returns the share text when the player leaves from the reveal screen
fn run_app<B: ratatui::backend::Backend, P: Persistence>(
    terminal: &mut Terminal<B>,
    mut app: App<P>,
) -> Result<Option<String>> {
    loop {
        let now = Instant::now();
        terminal.draw(|f| super::rendering::ui(f, &app, now))?;

        if event::poll(app.poll_timeout(now))?
            && let Event::Key(key) = event::read()?
            // Only process key press events (fixes Windows double-input bug)
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key, Instant::now());
        }

        app.tick(Instant::now());

        if app.should_quit {
            break;
        }
    }

    Ok(app.is_revealed().then(|| app.share_text()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::calendar::parse_date;
    use crate::game::{GameResult, GameStore, MemoryStore, REVEAL_DELAY};
    use crate::questions::QuestionBank;

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

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App<MemoryStore>, text: &str, now: Instant) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)), now);
        }
    }

    #[test]
    fn starts_on_ready_screen() {
        let now = Instant::now();
        let mut app = app(now);
        assert_eq!(app.input_mode, InputMode::Ready);
        assert!(app.clock.is_none());

        app.handle_key(key(KeyCode::Enter), now);
        assert_eq!(app.input_mode, InputMode::Guessing);
        assert_eq!(app.clock.unwrap().limit(), Duration::from_secs(20));
    }

    #[test]
    fn typing_filters_non_numeric_keys() {
        let now = Instant::now();
        let mut app = app(now);
        app.start(now);
        type_text(&mut app, "1x2.5k", now);
        assert_eq!(app.input_buffer, "12.5k");
        app.handle_key(key(KeyCode::Backspace), now);
        assert_eq!(app.input_buffer, "12.5");
    }

    #[test]
    fn guess_records_response_time_and_restarts_clock() {
        let start = Instant::now();
        let mut app = app(start);
        app.start(start);
        type_text(&mut app, "10", start);

        let later = start + Duration::from_millis(3_500);
        app.handle_key(key(KeyCode::Enter), later);

        let session = app.game.session();
        assert_eq!(session.guesses.len(), 1);
        assert_eq!(session.guesses[0].response_time, Some(3_500));
        assert!(app.input_buffer.is_empty());
        assert_eq!(app.clock.unwrap().limit(), Duration::from_secs(10));
    }

    #[test]
    fn invalid_guess_keeps_buffer() {
        let now = Instant::now();
        let mut app = app(now);
        app.start(now);
        type_text(&mut app, "..", now);
        app.submit(now);

        assert!(app.game.session().guesses.is_empty());
        assert_eq!(app.input_buffer, "..");
        assert_eq!(app.messages.last().unwrap().style, MessageStyle::Error);
    }

    #[test]
    fn countdown_expiry_records_timeout() {
        let start = Instant::now();
        let mut app = app(start);
        app.start(start);

        app.tick(start + Duration::from_secs(19));
        assert!(app.game.session().guesses.is_empty());

        app.tick(start + Duration::from_secs(20));
        let session = app.game.session();
        assert_eq!(session.guesses.len(), 1);
        assert!(session.guesses[0].timed_out);
    }

    #[test]
    fn win_waits_for_reveal_delay() {
        let start = Instant::now();
        let mut app = app(start);
        app.start(start);
        let answer = app.game.target().answer.to_string();
        type_text(&mut app, &answer, start);
        app.submit(start);

        assert_eq!(app.game.session().result, GameResult::Win);
        assert_eq!(app.input_mode, InputMode::Revealing);
        assert!(!app.is_revealed());

        app.tick(start + REVEAL_DELAY - Duration::from_millis(1));
        assert_eq!(app.input_mode, InputMode::Revealing);

        app.tick(start + REVEAL_DELAY);
        assert_eq!(app.input_mode, InputMode::Reveal);
        assert!(app.is_revealed());
        assert!(app.share_text().ends_with("https://g.test"));
    }

    #[test]
    fn enter_skips_reveal_delay_once() {
        let start = Instant::now();
        let mut app = app(start);
        app.start(start);
        let answer = app.game.target().answer.to_string();
        type_text(&mut app, &answer, start);
        app.submit(start);

        app.handle_key(key(KeyCode::Enter), start);
        assert_eq!(app.input_mode, InputMode::Reveal);
        assert!(!app.reveal_timer.is_armed());

        // A cancelled timer never fires a second reveal
        app.tick(start + Duration::from_secs(5));
        assert_eq!(app.input_mode, InputMode::Reveal);
    }

    #[test]
    fn five_timeouts_lose() {
        let mut now = Instant::now();
        let mut app = app(now);
        app.start(now);
        for _ in 0..5 {
            now += Duration::from_secs(20);
            app.tick(now);
        }
        assert_eq!(app.game.session().result, GameResult::Loss);
        assert_eq!(app.input_mode, InputMode::Revealing);
        assert!(app.share_text().contains("⏰ ⏰ ⏰ ⏰ ⏰ ❌ 😴"));
    }

    #[test]
    fn poll_timeout_shrinks_near_deadline() {
        let start = Instant::now();
        let mut app = app(start);
        assert_eq!(app.poll_timeout(start), TICK);
        app.start(start);
        let near = start + Duration::from_millis(19_900);
        assert_eq!(app.poll_timeout(near), Duration::from_millis(100));
    }

    #[test]
    fn q_quits_and_ctrl_c_always_quits() {
        let now = Instant::now();
        let mut app = app(now);
        app.handle_key(key(KeyCode::Char('q')), now);
        assert!(app.should_quit);

        let mut app = super::tests::app(now);
        app.start(now);
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), now);
        assert!(app.should_quit);
    }
}
