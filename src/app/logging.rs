//! Activity-log entries shown in the bottom panel.

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

/// Severity of an activity-log entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn label(self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    fn color(self) -> Color {
        match self {
            LogLevel::Info => Color::Cyan,
            LogLevel::Warn => Color::Yellow,
            LogLevel::Error => Color::Red,
        }
    }
}

/// A single timestamped line in the activity panel.
#[derive(Clone, Debug)]
pub struct LogLine {
    pub timestamp: String,
    pub level: LogLevel,
    pub message: String,
}

impl LogLine {
    pub fn render(&self) -> Line<'static> {
        Line::from(vec![
            Span::styled(
                format!("{} ", self.timestamp),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                format!("{:<5} ", self.level.label()),
                Style::default().fg(self.level.color()),
            ),
            Span::raw(self.message.clone()),
        ])
    }
}
