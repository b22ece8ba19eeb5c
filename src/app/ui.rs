//! Terminal UI rendering: agent picker, transcript, activity log, and input.

use chrono::Local;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::agents::{self, Agent};
use crate::constants::ACTIVITY_PANEL_HEIGHT;
use crate::conversation::{Message, Role};

use super::App;

impl App {
    /// Render the full TUI frame.
    pub fn draw(&mut self, frame: &mut Frame<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(4),
                Constraint::Min(3),
                Constraint::Length(ACTIVITY_PANEL_HEIGHT),
                Constraint::Length(3),
            ])
            .split(frame.area());

        let agent = self.conversation.active_agent();

        frame.render_widget(Paragraph::new(agent_tabs(agent)), chunks[0]);
        frame.render_widget(agent_info(agent), chunks[1]);
        self.draw_transcript(frame, chunks[2], agent);
        self.draw_activity(frame, chunks[3]);
        self.draw_input(frame, chunks[4], agent);
    }

    // ── Transcript ───────────────────────────────────────────────────

    fn draw_transcript(&mut self, frame: &mut Frame<'_>, area: Rect, agent: &Agent) {
        if self.conversation.messages().is_empty() && !self.conversation.is_generating() {
            let placeholder = Text::from(vec![
                Line::from(""),
                Line::styled(
                    format!("{} Start a conversation with {}", agent.icon.glyph(), agent.name),
                    Style::default().fg(Color::Gray),
                ),
                Line::styled(
                    agent.description.to_string(),
                    Style::default().fg(Color::DarkGray),
                ),
            ]);
            let panel = Paragraph::new(placeholder)
                .block(Block::default().borders(Borders::ALL).title(" Conversation "))
                .centered()
                .wrap(Wrap { trim: true });
            frame.render_widget(panel, area);
            return;
        }

        let mut lines: Vec<Line> = Vec::new();
        for message in self.conversation.messages() {
            lines.extend(message_lines(message, agent));
        }
        if self.conversation.is_generating() {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{} ", agent.icon.glyph()),
                    Style::default().fg(Color::Blue),
                ),
                Span::styled("● ● ●", Style::default().fg(Color::DarkGray)),
            ]));
        }

        let inner_width = area.width.saturating_sub(2);
        let inner_height = area.height.saturating_sub(2) as usize;
        let paragraph = Paragraph::new(Text::from(lines)).wrap(Wrap { trim: false });

        let total_visual = paragraph.line_count(inner_width);
        let max_scroll = total_visual.saturating_sub(inner_height);

        // Clamp scroll_offset (lines from the bottom) to valid range.
        if (self.scroll_offset as usize) > max_scroll {
            self.scroll_offset = max_scroll as u16;
        }
        let top_row = max_scroll.saturating_sub(self.scroll_offset as usize) as u16;

        let title = if self.scroll_offset > 0 {
            format!(" Conversation [↑{}] ", self.scroll_offset)
        } else {
            " Conversation ".to_string()
        };

        let panel = paragraph
            .block(Block::default().borders(Borders::ALL).title(title))
            .scroll((top_row, 0));
        frame.render_widget(panel, area);
    }

    // ── Activity log ─────────────────────────────────────────────────

    fn draw_activity(&self, frame: &mut Frame<'_>, area: Rect) {
        let visible = area.height.saturating_sub(2) as usize;
        let skip = self.logs.len().saturating_sub(visible);
        let lines: Vec<Line> = self.logs[skip..].iter().map(|l| l.render()).collect();
        let panel = Paragraph::new(Text::from(lines))
            .block(Block::default().borders(Borders::ALL).title(" Activity "));
        frame.render_widget(panel, area);
    }

    // ── Input prompt ─────────────────────────────────────────────────

    fn draw_input(&self, frame: &mut Frame<'_>, area: Rect, agent: &Agent) {
        let generating = self.conversation.is_generating();
        let (title, style) = if generating {
            (
                format!(" {} is typing… ", agent.name),
                Style::default().fg(Color::DarkGray),
            )
        } else {
            (format!(" Message {}... ", agent.name), Style::default())
        };

        let input_panel = Paragraph::new(self.input.as_str())
            .style(style)
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(input_panel, area);

        if generating {
            return;
        }
        let input_width = area.width.saturating_sub(2) as usize;
        let cursor = self.cursor.min(input_width);
        frame.set_cursor_position(Position::new(area.x + 1 + cursor as u16, area.y + 1));
    }
}

/// One tab per agent, the active one highlighted.
fn agent_tabs(active: &Agent) -> Line<'static> {
    let mut spans = Vec::new();
    for agent in agents::all() {
        let style = if agent == active {
            Style::default()
                .fg(Color::Blue)
                .bg(Color::Gray)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(
            format!(" {} {} ", agent.icon.glyph(), agent.name),
            style,
        ));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

/// Name, description, and expertise tags of the active agent.
fn agent_info(agent: &Agent) -> Paragraph<'static> {
    let mut tags = Vec::new();
    for skill in agent.expertise {
        tags.push(Span::styled(
            format!("◆ {skill}"),
            Style::default().fg(Color::Gray),
        ));
        tags.push(Span::raw("  "));
    }
    let text = Text::from(vec![
        Line::from(vec![
            Span::styled(
                format!("{} ", agent.icon.glyph()),
                Style::default().fg(Color::Blue),
            ),
            Span::styled(
                agent.name.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::styled(
            agent.description.to_string(),
            Style::default().fg(Color::DarkGray),
        ),
        Line::from(tags),
    ]);
    Paragraph::new(text)
        .block(Block::default().borders(Borders::BOTTOM))
        .wrap(Wrap { trim: true })
}

/// Header line plus body for one message; user messages are right-aligned.
fn message_lines(message: &Message, agent: &Agent) -> Vec<Line<'static>> {
    let time = message.timestamp.with_timezone(&Local).format("%H:%M").to_string();
    let (header, body_style) = match message.role {
        Role::User => (
            Line::from(vec![
                Span::styled(format!("{time} "), Style::default().fg(Color::DarkGray)),
                Span::styled("You", Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)),
            ])
            .right_aligned(),
            Style::default().fg(Color::White),
        ),
        Role::Assistant => (
            Line::from(vec![
                Span::styled(
                    format!("{} ", agent.icon.glyph()),
                    Style::default().fg(Color::Blue),
                ),
                Span::styled(time, Style::default().fg(Color::DarkGray)),
            ]),
            Style::default().fg(Color::Gray),
        ),
    };

    let mut lines = vec![header];
    for text in message.content.lines() {
        let line = Line::styled(text.to_string(), body_style);
        lines.push(match message.role {
            Role::User => line.right_aligned(),
            Role::Assistant => line,
        });
    }
    lines.push(Line::from(""));
    lines
}
