//! One-slot persistence for the last-edited source.

use thiserror::Error;

/// The single logical slot sources are saved under.
pub const SAVED_SOURCE_KEY: &str = "saved-code";

#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store rejected the operation.
    #[error("source store failure: {0}")]
    Backend(String),
}

/// Persists the last-edited source under one logical slot.
///
/// The playground only ever needs "save the current text" and "give me
/// the text back"; any key-value backend (browser local storage, a file,
/// a test fixture) can stand behind this.
pub trait SourceStore {
    fn save(&mut self, source: &str) -> Result<(), StoreError>;
    fn load(&self) -> Result<Option<String>, StoreError>;
}

/// In-memory store, for tests and direct embeddings.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SourceStore for MemoryStore {
    fn save(&mut self, source: &str) -> Result<(), StoreError> {
        self.slot = Some(source.to_string());
        Ok(())
    }

    fn load(&self) -> Result<Option<String>, StoreError> {
        Ok(self.slot.clone())
    }
}
