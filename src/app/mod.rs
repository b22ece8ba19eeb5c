//! Application core: state, lifecycle, and event dispatch.
//!
//! The [`App`] struct holds all runtime state and is the single entry point
//! for the rest of the binary.  Heavy concerns are delegated to focused
//! submodules:
//!
//! | Module       | Responsibility                            |
//! |--------------|-------------------------------------------|
//! | `chat`       | Reply generation launch & collection      |
//! | `commands`   | Slash-command dispatch & handlers         |
//! | `input`      | Text-input editing (cursor, insert, etc.) |
//! | `logging`    | `LogLevel`, `LogLine`                     |
//! | `ui`         | TUI rendering                             |

mod chat;
mod commands;
mod input;
mod logging;
mod ui;

use anyhow::{Context, Result};
use chrono::Local;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use tokio::runtime::Runtime;
use tokio::sync::mpsc;

use crate::agents::{self, TypingDelay};
use crate::config::Settings;
use crate::constants::{APP_NAME, APP_VERSION, MAX_LOGS};
use crate::conversation::{Conversation, ConversationState};
use crate::store::{FileStore, KeyValueStore, MemoryStore, load_state};

use self::chat::ReplyResult;
use self::logging::{LogLevel, LogLine};

/// Log a `Warn`/`Error` message, attaching `[file:line]` in debug-logs builds.
///
/// In release (no `debug-logs` feature) this behaves like `self.log()`.
///
/// ```ignore
/// log_src!(self, LogLevel::Warn, format!("something broke: {err:#}"));
/// ```
macro_rules! log_src {
    ($app:expr, $level:expr, $msg:expr) => {{
        #[cfg(feature = "debug-logs")]
        {
            let loc = format!("{}:{}", file!(), line!());
            $app.log_with_src($level, $msg, &loc);
        }
        #[cfg(not(feature = "debug-logs"))]
        {
            $app.log($level, $msg);
        }
    }};
}
pub(crate) use log_src;

// ── Application state ────────────────────────────────────────────────

/// Top-level application state.
///
/// Fields use `pub(crate)` visibility so that the sibling submodules
/// (`commands`, `chat`, `ui`, …) can access them directly.
pub struct App {
    pub(crate) runtime: Runtime,
    pub(crate) conversation: Conversation<Box<dyn KeyValueStore>>,
    pub(crate) typing_delay: TypingDelay,
    pub(crate) reply_tx: mpsc::UnboundedSender<ReplyResult>,
    pub(crate) reply_rx: mpsc::UnboundedReceiver<ReplyResult>,
    pub(crate) input: String,
    pub(crate) cursor: usize,
    pub(crate) logs: Vec<LogLine>,
    pub(crate) scroll_offset: u16,
    pub(crate) should_quit: bool,
}

// ── Lifecycle ────────────────────────────────────────────────────────

impl App {
    /// Create and initialise a new application instance.
    pub fn new() -> Result<Self> {
        let (settings, source) = Settings::load()?;
        let file_store = settings.resolved_state_dir().map(FileStore::new);
        let store_label = file_store
            .as_ref()
            .map(|store| store.dir().display().to_string());
        let store: Box<dyn KeyValueStore> = match file_store {
            Some(store) => Box::new(store),
            None => Box::new(MemoryStore::default()),
        };

        let mut app = Self::with_store(&settings, store)?;
        app.log(
            LogLevel::Info,
            format!("{APP_NAME} {APP_VERSION}, settings from {}.", source.label()),
        );
        match store_label {
            Some(label) => app.log(LogLevel::Info, format!("Conversation state: {label}.")),
            None => log_src!(
                app,
                LogLevel::Warn,
                "No data directory found; this conversation will not be saved.".to_string()
            ),
        }
        Ok(app)
    }

    /// Build the app around an explicit store, restoring any saved state.
    pub(crate) fn with_store(settings: &Settings, store: Box<dyn KeyValueStore>) -> Result<Self> {
        let runtime = Runtime::new().context("create tokio runtime")?;
        let (reply_tx, reply_rx) = mpsc::unbounded_channel();
        let (min, max) = settings.typing_delay();

        let (state, restore_error) = match load_state(&store) {
            Ok(Some(state)) => (state, None),
            Ok(None) => (ConversationState::default(), None),
            Err(err) => (ConversationState::default(), Some(err)),
        };

        let mut app = App {
            runtime,
            conversation: Conversation::new(state, store),
            typing_delay: TypingDelay::new(min, max),
            reply_tx,
            reply_rx,
            input: String::new(),
            cursor: 0,
            logs: Vec::new(),
            scroll_offset: 0,
            should_quit: false,
        };

        if let Some(err) = restore_error {
            log_src!(
                app,
                LogLevel::Warn,
                format!("Saved conversation unreadable, starting fresh: {err:#}")
            );
        } else if !app.conversation.messages().is_empty() {
            app.log(
                LogLevel::Info,
                format!(
                    "📝 Restored {} message(s) with {}.",
                    app.conversation.messages().len(),
                    app.conversation.active_agent().name
                ),
            );
        }
        app.log(
            LogLevel::Info,
            "Type to chat, Tab to switch agents, /help for commands.".to_string(),
        );
        Ok(app)
    }

    /// Whether the user has requested to quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}

// ── Event handling ───────────────────────────────────────────────────

impl App {
    /// Route a terminal event to the appropriate handler.
    pub fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            self.handle_key(key)?;
        }
        Ok(())
    }

    /// Dispatch a key press to input editing, agent switching, or control actions.
    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        match key {
            KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => self.should_quit = true,

            KeyEvent {
                code: KeyCode::Char('l'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => self.logs.clear(),

            KeyEvent { code, .. } => match code {
                KeyCode::Tab => {
                    let next = agents::cycle(self.conversation.active_agent(), 1);
                    self.switch_agent(next);
                }
                KeyCode::BackTab => {
                    let prev = agents::cycle(self.conversation.active_agent(), -1);
                    self.switch_agent(prev);
                }
                KeyCode::Up => self.scroll_up(1),
                KeyCode::Down => self.scroll_down(1),
                KeyCode::PageUp => self.scroll_up(10),
                KeyCode::PageDown => self.scroll_down(10),
                KeyCode::Esc => self.should_quit = true,
                // The input box is disabled while a reply is being generated.
                _ if self.conversation.is_generating() => {}
                KeyCode::Char(ch) => {
                    self.scroll_offset = 0; // snap to bottom on new input
                    self.insert_char(ch);
                }
                KeyCode::Backspace => self.backspace(),
                KeyCode::Delete => self.delete(),
                KeyCode::Left => self.move_cursor_left(),
                KeyCode::Right => self.move_cursor_right(),
                KeyCode::Home => self.move_cursor_home(),
                KeyCode::End => self.move_cursor_end(),
                KeyCode::Enter => {
                    self.scroll_offset = 0; // snap to bottom on submit
                    self.submit_input()?;
                }
                _ => {}
            },
        }
        Ok(())
    }

    /// Submit the current input line for processing.
    fn submit_input(&mut self) -> Result<()> {
        if self.conversation.is_generating() {
            return Ok(());
        }
        let raw = self.take_input();
        let line = raw.trim();

        if line.is_empty() {
            return Ok(());
        }

        if line.starts_with('/') {
            self.handle_command(line)?;
        } else {
            self.handle_chat_message(&raw);
        }

        Ok(())
    }
}

// ── Scrolling ────────────────────────────────────────────────────────

impl App {
    /// Scroll the transcript up by `n` lines.
    pub(crate) fn scroll_up(&mut self, n: u16) {
        self.scroll_offset = self.scroll_offset.saturating_add(n);
    }

    /// Scroll the transcript down by `n` lines (towards the latest).
    pub(crate) fn scroll_down(&mut self, n: u16) {
        self.scroll_offset = self.scroll_offset.saturating_sub(n);
    }
}

// ── Logging ──────────────────────────────────────────────────────────

impl App {
    /// Append a message to the activity log.
    pub(crate) fn log(&mut self, level: LogLevel, message: String) {
        let timestamp = Local::now().format("%H:%M:%S").to_string();
        self.logs.push(LogLine {
            timestamp,
            level,
            message,
        });
        if self.logs.len() > MAX_LOGS {
            let overflow = self.logs.len() - MAX_LOGS;
            self.logs.drain(0..overflow);
        }
    }

    /// Append a message with a source location suffix (debug-logs builds only).
    #[cfg(feature = "debug-logs")]
    pub(crate) fn log_with_src(&mut self, level: LogLevel, message: String, src: &str) {
        let tagged = match level {
            LogLevel::Warn | LogLevel::Error => format!("{message}  [{src}]"),
            _ => message,
        };
        self.log(level, tagged);
    }
}
