//! Durable key-value storage for the conversation.
//!
//! The whole [`ConversationState`] is written as one JSON record under
//! [`STATE_KEY`]. Timestamps are stored as RFC 3339 text.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::constants::STATE_KEY;
use crate::conversation::ConversationState;

/// String values addressed by key.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

// ── File-backed store ────────────────────────────────────────────────

/// One `<key>.json` file per key inside a directory.
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err).with_context(|| format!("read {}", path.display())),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("create state dir {}", self.dir.display()))?;
        let path = self.path_for(key);
        // Write then rename so a crash never leaves a half-written record.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).with_context(|| format!("write {}", tmp.display()))?;
        fs::rename(&tmp, &path).with_context(|| format!("replace {}", path.display()))?;
        Ok(())
    }
}

// ── In-memory store ──────────────────────────────────────────────────

/// Volatile store, used when no state directory is available and in tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ── Conversation record ──────────────────────────────────────────────

pub fn save_state<S: KeyValueStore + ?Sized>(store: &mut S, state: &ConversationState) -> Result<()> {
    let json = serde_json::to_string(state).context("serialize conversation state")?;
    store.set(STATE_KEY, &json)
}

/// Load the saved conversation. `Ok(None)` when nothing has been saved yet;
/// an error when the record exists but cannot be parsed.
pub fn load_state<S: KeyValueStore + ?Sized>(store: &S) -> Result<Option<ConversationState>> {
    let Some(json) = store.get(STATE_KEY)? else {
        return Ok(None);
    };
    if json.trim().is_empty() {
        return Ok(None);
    }
    let state = serde_json::from_str(&json).context("parse saved conversation state")?;
    Ok(Some(state))
}
