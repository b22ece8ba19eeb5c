//! Slash-command dispatch and handler implementations.
//!
//! Every `/command` typed by the user is routed through [`App::handle_command`]
//! and dispatched to the appropriate handler method in this module.

use anyhow::Result;

use crate::agents;

use super::App;
use super::log_src;
use super::logging::LogLevel;

// ── Command dispatch ─────────────────────────────────────────────────

impl App {
    /// Route a slash-command to the matching handler.
    pub(crate) fn handle_command(&mut self, line: &str) -> Result<()> {
        let mut parts = line.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "/help" => self.show_help(),
            "/quit" | "/exit" => self.should_quit = true,
            "/clear" => self.logs.clear(),
            "/agents" => self.list_agents(),
            "/agent" => self.handle_agent_command(parts.collect()),
            "/new" => self.start_new_conversation(),
            _ => log_src!(self, LogLevel::Warn, format!("Unknown command: {cmd}")),
        }

        Ok(())
    }
}

// ── Help ─────────────────────────────────────────────────────────────

impl App {
    fn show_help(&mut self) {
        let lines = [
            "Commands:",
            "(no slash)             Chat with the active agent",
            "/agents                List available agents",
            "/agent                 Show the active agent",
            "/agent <n|name|kind>   Switch agent (e.g. /agent 2, /agent creative)",
            "/new                   Start a fresh conversation",
            "/clear                 Clear activity log",
            "/quit                  Exit",
            "Keys: Tab/Shift-Tab switch agent, Up/Down/PgUp/PgDn scroll, Esc quit",
        ];
        for line in lines {
            self.log(LogLevel::Info, line.to_string());
        }
    }
}

// ── Agent commands ───────────────────────────────────────────────────

impl App {
    fn list_agents(&mut self) {
        self.log(LogLevel::Info, "Available agents:".to_string());
        let active = self.conversation.active_agent();
        for (index, agent) in agents::all().iter().enumerate() {
            let marker = if agent == active { "*" } else { " " };
            self.log(
                LogLevel::Info,
                format!(
                    "{marker} {}. {} [{}] {}",
                    index + 1,
                    agent.name,
                    agent.icon.tag(),
                    agent.description
                ),
            );
        }
    }

    fn handle_agent_command(&mut self, args: Vec<&str>) {
        if args.is_empty() {
            self.show_active_agent();
            return;
        }

        let query = args.join(" ");
        match agents::find_by_query(&query) {
            Some(agent) => self.switch_agent(agent),
            None => log_src!(
                self,
                LogLevel::Warn,
                format!("No agent matches '{query}'. Try /agents.")
            ),
        }
    }

    fn show_active_agent(&mut self) {
        let agent = self.conversation.active_agent();
        self.log(
            LogLevel::Info,
            format!("{} {}: {}", agent.icon.glyph(), agent.name, agent.description),
        );
        self.log(
            LogLevel::Info,
            format!("Expertise: {}", agent.expertise.join(", ")),
        );
    }

    fn start_new_conversation(&mut self) {
        if !self.conversation.reset() {
            log_src!(
                self,
                LogLevel::Warn,
                "Wait for the current reply before starting over.".to_string()
            );
            return;
        }
        self.persist_conversation();
        self.scroll_offset = 0;
        self.log(LogLevel::Info, "Started a new conversation.".to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::test_app;
    use crate::agents::AgentKind;
    use crate::app::logging::LogLevel;

    #[test]
    fn agent_command_switches_by_query() {
        let mut app = test_app();
        app.handle_command("/agent Creative Mind").unwrap();
        assert_eq!(app.conversation.active_agent().kind, AgentKind::Creative);
        assert_eq!(app.conversation.messages().len(), 1);

        app.handle_command("/agent 2").unwrap();
        assert_eq!(app.conversation.active_agent().kind, AgentKind::Technical);
        // Transcript was not empty, so no second greeting.
        assert_eq!(app.conversation.messages().len(), 1);
    }

    #[test]
    fn unknown_agent_and_command_warn() {
        let mut app = test_app();
        app.handle_command("/agent poet").unwrap();
        app.handle_command("/dance").unwrap();
        let warnings = app
            .logs
            .iter()
            .filter(|line| line.level == LogLevel::Warn)
            .count();
        assert_eq!(warnings, 2);
        assert_eq!(app.conversation.active_agent().kind, AgentKind::General);
    }

    #[test]
    fn new_clears_transcript() {
        let mut app = test_app();
        app.handle_command("/agent technical").unwrap();
        app.handle_command("/new").unwrap();
        assert!(app.conversation.messages().is_empty());
        assert_eq!(app.conversation.active_agent().kind, AgentKind::Technical);
    }

    #[test]
    fn new_is_refused_mid_turn() {
        let mut app = test_app();
        app.handle_chat_message("hello");
        app.handle_command("/new").unwrap();
        assert_eq!(app.conversation.messages().len(), 1);
    }

    #[test]
    fn quit_commands_set_flag() {
        let mut app = test_app();
        app.handle_command("/exit").unwrap();
        assert!(app.should_quit());
    }
}
