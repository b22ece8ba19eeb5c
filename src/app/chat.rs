//! Chat flow: launching reply generation and collecting the results.

use crate::agents::{self, Agent, GenerationError};
use crate::conversation::{PendingTurn, TurnOutcome};

use super::App;
use super::log_src;
use super::logging::LogLevel;

/// Result of one background generation, sent back to the UI thread.
pub(crate) type ReplyResult = Result<String, GenerationError>;

impl App {
    /// Record `message` and launch a non-blocking reply generation.
    ///
    /// The generator runs on the tokio runtime; its result comes back over
    /// `reply_tx` and is applied by [`App::poll_replies`].
    pub(crate) fn handle_chat_message(&mut self, message: &str) {
        let Some(turn) = self.conversation.begin_turn(message) else {
            return;
        };
        self.persist_conversation();

        let PendingTurn {
            agent,
            message,
            history,
        } = turn;
        let delay = self.typing_delay;
        let tx = self.reply_tx.clone();

        self.runtime.spawn(async move {
            let task = tokio::spawn(agents::generate(agent.kind, message, history, delay));
            let result = task.await.map_err(GenerationError::from);
            let _ = tx.send(result);
        });
    }

    /// Apply every generation result that has arrived since the last call.
    pub fn poll_replies(&mut self) {
        while let Ok(result) = self.reply_rx.try_recv() {
            match self.conversation.complete_turn(result) {
                TurnOutcome::Replied => self.persist_conversation(),
                TurnOutcome::Failed(err) => {
                    log_src!(
                        self,
                        LogLevel::Error,
                        format!("Error generating response: {err}")
                    );
                }
                TurnOutcome::Stale => {
                    log_src!(
                        self,
                        LogLevel::Warn,
                        "Dropped a reply that arrived with no turn in flight.".to_string()
                    );
                }
            }
        }
    }

    /// Make `agent` active, greeting the user if the transcript is empty.
    pub(crate) fn switch_agent(&mut self, agent: &'static Agent) {
        self.conversation.select_agent(agent);
        self.persist_conversation();
        self.scroll_offset = 0;
        self.log(
            LogLevel::Info,
            format!("{} Agent: {}", agent.icon.glyph(), agent.name),
        );
    }

    /// Save the conversation, logging (not propagating) any failure.
    pub(crate) fn persist_conversation(&mut self) {
        if let Err(err) = self.conversation.save() {
            log_src!(
                self,
                LogLevel::Warn,
                format!("Saving conversation failed: {err:#}")
            );
        }
    }
}
