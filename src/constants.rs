//! Compile-time constants and tunables shared across the crate.

/// Application name used for config and data directories.
pub const APP_NAME: &str = "agent-chat";
/// Application version injected from `Cargo.toml` at compile time.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Storage key under which the conversation state is persisted.
pub const STATE_KEY: &str = "chatbot_state";
/// File name of the optional settings file.
pub const SETTINGS_FILE: &str = "agent-chat.json";

/// Lower bound of the simulated typing delay.
pub const DEFAULT_TYPING_DELAY_MIN_MS: u64 = 500;
/// Upper bound (exclusive) of the simulated typing delay.
pub const DEFAULT_TYPING_DELAY_MAX_MS: u64 = 1500;

/// Maximum number of log entries kept in the activity panel.
pub const MAX_LOGS: usize = 1000;
/// Height of the activity panel, borders included.
pub const ACTIVITY_PANEL_HEIGHT: u16 = 6;
