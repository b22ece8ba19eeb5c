//! Conversation state and the turn-taking controller.
//!
//! [`Conversation`] owns the transcript and gates submissions with a two-state
//! machine: while a reply is being generated, further submissions are ignored.
//! Generation itself happens elsewhere; the controller hands out a
//! [`PendingTurn`] and expects the outcome back via
//! [`Conversation::complete_turn`].

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::agents::{self, Agent, GenerationError};
use crate::store::{KeyValueStore, save_state};

/// Who authored a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single transcript entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub content: String,
    pub role: Role,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: content.into(),
            role,
            timestamp: Utc::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Everything that survives a restart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationState {
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default = "default_agent_id")]
    pub selected_agent_id: String,
}

fn default_agent_id() -> String {
    agents::default_agent().name.to_string()
}

impl Default for ConversationState {
    fn default() -> Self {
        Self {
            messages: Vec::new(),
            selected_agent_id: default_agent_id(),
        }
    }
}

impl ConversationState {
    /// Replace an unknown agent name with the default agent's.
    fn normalized(mut self) -> Self {
        self.selected_agent_id = agents::resolve(&self.selected_agent_id).name.to_string();
        self
    }
}

/// Whether a reply is currently being produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnStatus {
    Idle,
    Generating,
}

/// A submitted message waiting for its reply.
#[derive(Clone, Debug)]
pub struct PendingTurn {
    pub agent: &'static Agent,
    pub message: String,
    /// Transcript as it stood before `message` was appended.
    pub history: Vec<Message>,
}

/// What happened when a generation result came back.
#[derive(Debug)]
pub enum TurnOutcome {
    Replied,
    Failed(GenerationError),
    /// A result arrived with no turn in flight; it was dropped.
    Stale,
}

/// Transcript, active agent, and turn state, plus the store they are saved to.
pub struct Conversation<S> {
    state: ConversationState,
    status: TurnStatus,
    store: S,
}

impl<S: KeyValueStore> Conversation<S> {
    pub fn new(state: ConversationState, store: S) -> Self {
        Self {
            state: state.normalized(),
            status: TurnStatus::Idle,
            store,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.state.messages
    }

    pub fn active_agent(&self) -> &'static Agent {
        agents::resolve(&self.state.selected_agent_id)
    }

    pub fn is_generating(&self) -> bool {
        self.status == TurnStatus::Generating
    }

    /// Record a user message and start a turn.
    ///
    /// Returns `None` (and changes nothing) when `input` is blank or a turn
    /// is already in flight. Otherwise `input` is stored exactly as typed.
    pub fn begin_turn(&mut self, input: &str) -> Option<PendingTurn> {
        if input.trim().is_empty() || self.is_generating() {
            return None;
        }

        let history = self.state.messages.clone();
        self.state.messages.push(Message::user(input));
        self.status = TurnStatus::Generating;

        Some(PendingTurn {
            agent: self.active_agent(),
            message: input.to_string(),
            history,
        })
    }

    /// Finish the in-flight turn with the generator's result.
    pub fn complete_turn(&mut self, result: Result<String, GenerationError>) -> TurnOutcome {
        if !self.is_generating() {
            return TurnOutcome::Stale;
        }
        self.status = TurnStatus::Idle;
        match result {
            Ok(reply) => {
                self.state.messages.push(Message::assistant(reply));
                TurnOutcome::Replied
            }
            Err(err) => TurnOutcome::Failed(err),
        }
    }

    /// Make `agent` the active agent. On an empty transcript its greeting
    /// becomes the first message; returns whether that happened.
    pub fn select_agent(&mut self, agent: &'static Agent) -> bool {
        self.state.selected_agent_id = agent.name.to_string();
        if self.state.messages.is_empty() {
            self.state.messages.push(Message::assistant(agent.greeting));
            return true;
        }
        false
    }

    /// Drop the transcript, keeping the active agent. Refused mid-turn.
    pub fn reset(&mut self) -> bool {
        if self.is_generating() {
            return false;
        }
        self.state.messages.clear();
        true
    }

    /// Persist the current state.
    pub fn save(&mut self) -> Result<()> {
        save_state(&mut self.store, &self.state)
    }

    #[cfg(test)]
    pub(crate) fn state(&self) -> &ConversationState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::{AgentKind, TypingDelay, find_by_query, generate};
    use crate::store::{MemoryStore, load_state};

    fn conversation() -> Conversation<MemoryStore> {
        Conversation::new(ConversationState::default(), MemoryStore::default())
    }

    async fn run_turn(conversation: &mut Conversation<MemoryStore>, input: &str) -> TurnOutcome {
        let turn = conversation.begin_turn(input).unwrap();
        let reply = generate(
            turn.agent.kind,
            turn.message,
            turn.history,
            TypingDelay::none(),
        )
        .await;
        conversation.complete_turn(Ok(reply))
    }

    #[test]
    fn blank_input_is_ignored() {
        let mut conversation = conversation();
        assert!(conversation.begin_turn("   ").is_none());
        assert!(conversation.messages().is_empty());
        assert!(!conversation.is_generating());
    }

    #[test]
    fn submit_while_generating_is_a_no_op() {
        let mut conversation = conversation();
        let turn = conversation.begin_turn("hello there").unwrap();
        assert_eq!(turn.message, "hello there");
        assert!(turn.history.is_empty());
        assert_eq!(conversation.messages().len(), 1);

        assert!(conversation.begin_turn("again").is_none());
        assert_eq!(conversation.messages().len(), 1);
        assert!(conversation.is_generating());
    }

    #[test]
    fn message_is_kept_as_typed() {
        let mut conversation = conversation();
        let turn = conversation.begin_turn("  What is AI?  ").unwrap();
        assert_eq!(turn.message, "  What is AI?  ");
        assert_eq!(conversation.messages()[0].content, "  What is AI?  ");
    }

    #[tokio::test]
    async fn leading_space_defeats_the_what_pattern() {
        let mut conversation = conversation();
        run_turn(&mut conversation, "  What is AI?  ").await;
        let reply = &conversation.messages()[1].content;
        assert!(reply.starts_with("I understand you're interested in \"  What is AI?  \""));
    }

    #[test]
    fn failed_generation_appends_nothing() {
        let mut conversation = conversation();
        conversation.begin_turn("hello").unwrap();
        let outcome = conversation.complete_turn(Err(GenerationError::Cancelled));
        assert!(matches!(outcome, TurnOutcome::Failed(GenerationError::Cancelled)));
        assert_eq!(conversation.messages().len(), 1);
        assert!(!conversation.is_generating());

        // The user may resubmit right away.
        assert!(conversation.begin_turn("hello again").is_some());
    }

    #[test]
    fn stray_result_is_dropped() {
        let mut conversation = conversation();
        let outcome = conversation.complete_turn(Ok("late".to_string()));
        assert!(matches!(outcome, TurnOutcome::Stale));
        assert!(conversation.messages().is_empty());
    }

    #[test]
    fn switching_on_empty_transcript_seeds_greeting() {
        let mut conversation = conversation();
        let creative = find_by_query("creative").unwrap();
        assert!(conversation.select_agent(creative));
        assert_eq!(conversation.messages().len(), 1);
        assert_eq!(conversation.messages()[0].role, Role::Assistant);
        assert_eq!(conversation.messages()[0].content, creative.greeting);

        let technical = find_by_query("technical").unwrap();
        assert!(!conversation.select_agent(technical));
        assert_eq!(conversation.messages().len(), 1);
        assert_eq!(conversation.active_agent(), technical);
    }

    #[test]
    fn switching_mid_turn_keeps_the_turn() {
        let mut conversation = conversation();
        conversation.begin_turn("hello").unwrap();
        conversation.select_agent(find_by_query("creative").unwrap());
        assert!(conversation.is_generating());
        assert!(matches!(
            conversation.complete_turn(Ok("hi".to_string())),
            TurnOutcome::Replied
        ));
        assert_eq!(conversation.messages().len(), 2);
    }

    #[test]
    fn reset_is_refused_mid_turn() {
        let mut conversation = conversation();
        conversation.begin_turn("hello").unwrap();
        assert!(!conversation.reset());
        conversation.complete_turn(Ok("hi".to_string()));
        assert!(conversation.reset());
        assert!(conversation.messages().is_empty());
    }

    #[test]
    fn unknown_persisted_agent_falls_back_to_default() {
        let state = ConversationState {
            messages: Vec::new(),
            selected_agent_id: "Retired Agent".to_string(),
        };
        let conversation = Conversation::new(state, MemoryStore::default());
        assert_eq!(conversation.active_agent(), agents::default_agent());
        assert_eq!(conversation.state().selected_agent_id, "General Assistant");
    }

    #[test]
    fn history_excludes_the_new_message() {
        let mut conversation = conversation();
        conversation.begin_turn("first").unwrap();
        conversation.complete_turn(Ok("reply".to_string()));
        let turn = conversation.begin_turn("second").unwrap();
        let contents: Vec<_> = turn.history.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, ["first", "reply"]);
    }

    #[test]
    fn save_writes_current_state() {
        let mut conversation = conversation();
        conversation.select_agent(find_by_query("technical").unwrap());
        conversation.save().unwrap();
        let restored = load_state(conversation.store()).unwrap().unwrap();
        assert_eq!(&restored, conversation.state());
    }

    #[tokio::test]
    async fn general_agent_answers_definition_question() {
        let mut conversation = conversation();
        let outcome = run_turn(&mut conversation, "What is machine learning?").await;
        assert!(matches!(outcome, TurnOutcome::Replied));

        let reply = &conversation.messages()[1];
        assert_eq!(reply.role, Role::Assistant);
        assert!(reply.content.starts_with("Machine learning is a branch of artificial intelligence"));
        let menu: Vec<_> = reply.content.lines().rev().take(4).collect();
        assert_eq!(menu[0], "4. Getting started with machine learning");
        assert_eq!(menu[3], "1. Practical applications");
    }

    #[tokio::test]
    async fn technical_agent_answers_with_code() {
        let mut conversation = conversation();
        conversation.select_agent(find_by_query("technical").unwrap());
        run_turn(&mut conversation, "how do I learn react").await;

        let reply = conversation.messages().last().unwrap();
        assert_eq!(reply.role, Role::Assistant);
        assert!(reply.content.contains("```javascript"));
        assert!(reply.content.contains("## Best Practices"));
        assert_eq!(conversation.active_agent().kind, AgentKind::Technical);
    }
}
