//! Agent registry and reply generation.
//!
//! Each [`Agent`] is plain data: a name, some display metadata, and an
//! [`AgentKind`] tag that selects one of the canned reply generators:
//!
//! | Kind        | Module       | Strategy                                  |
//! |-------------|--------------|-------------------------------------------|
//! | `General`   | `general`    | what/how/why question templates           |
//! | `Technical` | `technical`  | code keyword match → snippet or analysis  |
//! | `Creative`  | `creative`   | theme extraction + decorated sections     |
//!
//! [`generate`] wraps the synchronous generators with a randomized typing
//! delay so the UI has something to show while the agent "thinks".

mod creative;
mod definitions;
mod general;
mod technical;
mod words;

use std::time::Duration;

use rand::Rng;
use regex::Regex;
use thiserror::Error;
use tokio::task::JoinError;

use crate::conversation::Message;

use self::words::{RandomPicker, WordPicker};

// ── Registry ─────────────────────────────────────────────────────────

/// Which reply generator an agent uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AgentKind {
    General,
    Technical,
    Creative,
}

/// Icon shown next to an agent in the UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Icon {
    User,
    Code,
    Sparkles,
}

impl Icon {
    pub fn tag(self) -> &'static str {
        match self {
            Icon::User => "user",
            Icon::Code => "code",
            Icon::Sparkles => "sparkles",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Icon::User => "👤",
            Icon::Code => "⌨",
            Icon::Sparkles => "✨",
        }
    }
}

/// A selectable persona with a fixed reply strategy.
#[derive(Debug, PartialEq, Eq)]
pub struct Agent {
    /// Display name; doubles as the persisted identifier.
    pub name: &'static str,
    pub description: &'static str,
    pub icon: Icon,
    pub expertise: &'static [&'static str],
    /// First assistant message when a conversation starts with this agent.
    pub greeting: &'static str,
    pub kind: AgentKind,
}

static AGENTS: [Agent; 3] = [
    Agent {
        name: "General Assistant",
        description: "A helpful general-purpose assistant that provides clear, structured responses",
        icon: Icon::User,
        expertise: &[
            "General Knowledge",
            "Clear Explanations",
            "Structured Responses",
            "Practical Advice",
        ],
        greeting: "Hello! I'm your general assistant. I provide clear, structured responses to help you better understand any topic. How can I assist you today?",
        kind: AgentKind::General,
    },
    Agent {
        name: "Technical Expert",
        description: "Specialized in technical explanations with code examples and best practices",
        icon: Icon::Code,
        expertise: &[
            "Programming",
            "System Design",
            "Code Examples",
            "Best Practices",
            "Technical Analysis",
        ],
        greeting: "Welcome! I'm your technical expert. I provide detailed technical explanations with code examples and best practices. What technical challenge can I help you with?",
        kind: AgentKind::Technical,
    },
    Agent {
        name: "Creative Mind",
        description: "Offers creative and imaginative responses with structured exploration of ideas",
        icon: Icon::Sparkles,
        expertise: &[
            "Brainstorming",
            "Creative Writing",
            "Idea Generation",
            "Conceptual Exploration",
        ],
        greeting: "Greetings! I'm your creative companion. I help explore ideas and concepts in unique and structured ways. What creative journey shall we embark on?",
        kind: AgentKind::Creative,
    },
];

/// All agents, in display order.
pub fn all() -> &'static [Agent] {
    &AGENTS
}

/// The agent used when nothing else is selected.
pub fn default_agent() -> &'static Agent {
    &AGENTS[0]
}

/// Exact lookup by name.
pub fn find_by_name(name: &str) -> Option<&'static Agent> {
    AGENTS.iter().find(|agent| agent.name == name)
}

/// Lookup by name, falling back to [`default_agent`].
pub fn resolve(name: &str) -> &'static Agent {
    find_by_name(name).unwrap_or_else(default_agent)
}

/// Lenient lookup for user input: a 1-based index, the full name in any
/// case, or the kind slug (`general`, `technical`, `creative`).
pub fn find_by_query(query: &str) -> Option<&'static Agent> {
    let query = query.trim();
    if let Ok(index) = query.parse::<usize>() {
        return index.checked_sub(1).and_then(|i| AGENTS.get(i));
    }
    let query = query.to_lowercase();
    AGENTS
        .iter()
        .find(|agent| agent.name.to_lowercase() == query || agent.kind.slug() == query)
}

/// Position of `agent` in the registry.
pub fn position(agent: &Agent) -> usize {
    AGENTS
        .iter()
        .position(|candidate| candidate.name == agent.name)
        .unwrap_or(0)
}

/// The agent `offset` places away from `agent`, wrapping around.
pub fn cycle(agent: &Agent, offset: isize) -> &'static Agent {
    let len = AGENTS.len() as isize;
    let next = (position(agent) as isize + offset).rem_euclid(len);
    &AGENTS[next as usize]
}

// ── Generation ───────────────────────────────────────────────────────

impl AgentKind {
    pub fn slug(self) -> &'static str {
        match self {
            AgentKind::General => "general",
            AgentKind::Technical => "technical",
            AgentKind::Creative => "creative",
        }
    }

    /// Produce the reply text for `message`.
    ///
    /// `history` is the transcript before `message` was added. The canned
    /// templates do not depend on it.
    pub fn respond(self, message: &str, _history: &[Message], words: &mut dyn WordPicker) -> String {
        match self {
            AgentKind::General => general::respond(message),
            AgentKind::Technical => technical::respond(message),
            AgentKind::Creative => creative::respond(message, words),
        }
    }
}

/// Failure of a single generation turn.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("reply generation panicked: {0}")]
    Panicked(String),
    #[error("reply generation was cancelled")]
    Cancelled,
}

impl From<JoinError> for GenerationError {
    fn from(err: JoinError) -> Self {
        if err.is_panic() {
            GenerationError::Panicked(err.to_string())
        } else {
            GenerationError::Cancelled
        }
    }
}

/// Bounds of the simulated "typing" pause before a reply is ready.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypingDelay {
    pub min: Duration,
    pub max: Duration,
}

impl TypingDelay {
    pub fn new(min: Duration, max: Duration) -> Self {
        Self {
            min,
            max: max.max(min),
        }
    }

    /// No pause at all.
    pub fn none() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    pub fn sample(&self) -> Duration {
        if self.max <= self.min {
            return self.min;
        }
        rand::thread_rng().gen_range(self.min..self.max)
    }
}

/// Wait out the typing delay, then produce the reply for `message`.
pub async fn generate(
    kind: AgentKind,
    message: String,
    history: Vec<Message>,
    delay: TypingDelay,
) -> String {
    tokio::time::sleep(delay.sample()).await;
    let mut words = RandomPicker::new(rand::thread_rng());
    kind.respond(&message, &history, &mut words)
}

fn compile_regex(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(regex) => regex,
        Err(err) => panic!("invalid regex pattern `{pattern}`: {err}"),
    }
}
