//! Interactive terminal frontend
//!
//! Raw-mode crossterm loop. The reset timer is a deadline checked between
//! key events, so no background thread is needed.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use console::style;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{self, ClearType};
use crossterm::{cursor, execute, queue};
use keypad_calc::config::EngineConfig;
use keypad_calc::core::{Engine, Operator};
use keypad_calc::frontend::{DisplaySink, OperatorHighlight, ResetTimer};

use crate::error::CliResult;

/// How long to wait for a key when no reset is pending
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Display width in characters
const DISPLAY_WIDTH: usize = 24;

/// Terminal-side presentation state
#[derive(Debug, Default)]
pub struct TerminalFrontend {
    display: String,
    error: bool,
    active: Option<Operator>,
    reset_deadline: Option<Instant>,
    dirty: bool,
}

impl TerminalFrontend {
    /// Creates an empty frontend
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Display text
    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Whether error styling is on
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.error
    }

    /// Highlighted operator
    #[must_use]
    pub fn active(&self) -> Option<Operator> {
        self.active
    }

    /// When the pending reset is due
    #[must_use]
    pub fn reset_deadline(&self) -> Option<Instant> {
        self.reset_deadline
    }

    /// Takes the reset if its deadline has passed at `now`
    pub fn take_due_reset(&mut self, now: Instant) -> bool {
        match self.reset_deadline {
            Some(deadline) if deadline <= now => {
                self.reset_deadline = None;
                true
            }
            _ => false,
        }
    }

    /// How long to block waiting for input at `now`
    #[must_use]
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        self.reset_deadline
            .map_or(IDLE_POLL, |deadline| deadline.saturating_duration_since(now).min(IDLE_POLL))
    }

    /// Whether anything changed since the last draw; clears the flag
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// The lines to draw: display box then operator row
    #[must_use]
    pub fn screen_lines(&self) -> Vec<String> {
        let border = format!("+{}+", "-".repeat(DISPLAY_WIDTH + 2));
        let text = format!("{:>width$}", self.display, width = DISPLAY_WIDTH);
        let text = if self.error {
            style(text).red().bold().to_string()
        } else {
            style(text).bold().to_string()
        };

        let operators: Vec<String> = Operator::ALL
            .iter()
            .map(|op| {
                let label = format!(" {op} ");
                if Some(*op) == self.active {
                    style(label).reverse().to_string()
                } else {
                    label
                }
            })
            .collect();

        vec![
            border.clone(),
            format!("| {text} |"),
            border,
            operators.join(""),
            "q: quit   Esc/c: clear   Backspace: delete".to_string(),
        ]
    }
}

impl DisplaySink for TerminalFrontend {
    fn render(&mut self, text: &str) {
        self.display = text.to_string();
        self.dirty = true;
    }

    fn set_error_style(&mut self, error: bool) {
        self.dirty |= self.error != error;
        self.error = error;
    }
}

impl OperatorHighlight for TerminalFrontend {
    fn highlight(&mut self, op: Option<Operator>) {
        self.dirty |= self.active != op;
        self.active = op;
    }
}

impl ResetTimer for TerminalFrontend {
    fn schedule_reset(&mut self, after: Duration) {
        self.reset_deadline = Some(Instant::now() + after);
    }

    fn cancel_reset(&mut self) {
        self.reset_deadline = None;
    }
}

/// What a terminal key press means
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalInput {
    /// A key for the engine, in `KeyboardEvent.key` spelling
    Key(String),
    /// Leave the session
    Quit,
    /// Not ours
    Ignored,
}

/// Maps a crossterm key event
#[must_use]
pub fn map_key(event: &KeyEvent) -> TerminalInput {
    if event.kind == KeyEventKind::Release {
        return TerminalInput::Ignored;
    }
    if event.modifiers.contains(KeyModifiers::CONTROL) {
        return match event.code {
            KeyCode::Char('c' | 'd') => TerminalInput::Quit,
            _ => TerminalInput::Ignored,
        };
    }
    match event.code {
        KeyCode::Char('q' | 'Q') => TerminalInput::Quit,
        KeyCode::Char(ch) => TerminalInput::Key(ch.to_string()),
        KeyCode::Enter => TerminalInput::Key("Enter".to_string()),
        KeyCode::Esc => TerminalInput::Key("Escape".to_string()),
        KeyCode::Backspace | KeyCode::Delete => TerminalInput::Key("Backspace".to_string()),
        _ => TerminalInput::Ignored,
    }
}

fn draw(out: &mut impl Write, frontend: &TerminalFrontend) -> io::Result<()> {
    queue!(
        out,
        cursor::MoveTo(0, 0),
        terminal::Clear(ClearType::All)
    )?;
    for (row, line) in frontend.screen_lines().iter().enumerate() {
        queue!(out, cursor::MoveTo(0, row as u16))?;
        write!(out, "{line}")?;
    }
    out.flush()
}

/// Restores the terminal on drop, including on early return
struct RawModeGuard;

impl RawModeGuard {
    fn enter(out: &mut impl Write) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(out, terminal::EnterAlternateScreen, cursor::Hide)?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let mut out = io::stdout();
        let _ = execute!(out, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Runs the interactive session until the user quits
pub fn run_interactive(config: EngineConfig) -> CliResult<()> {
    let mut engine = Engine::with_config(TerminalFrontend::new(), config)?;
    let mut out = io::stdout();
    let _guard = RawModeGuard::enter(&mut out)?;
    tracing::info!("interactive session started");

    draw(&mut out, engine.frontend())?;
    loop {
        let timeout = engine.frontend().poll_timeout(Instant::now());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                match map_key(&key) {
                    TerminalInput::Quit => break,
                    TerminalInput::Key(name) => {
                        engine.press_key(&name);
                    }
                    TerminalInput::Ignored => {}
                }
            }
        }

        if engine.frontend_mut().take_due_reset(Instant::now()) {
            engine.reset_after_error();
        }
        if engine.frontend_mut().take_dirty() {
            draw(&mut out, engine.frontend())?;
        }
    }

    tracing::info!("interactive session ended");
    Ok(())
}
