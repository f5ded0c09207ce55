//! Bookkeeping for idempotent handler binding.
//!
//! Main-content swaps replace DOM elements wholesale, so element identity
//! never survives a re-render. The registry tracks which element keys have
//! been issued a bind instruction in the current generation; a wholesale
//! replacement starts a new generation (fresh clones are never-yet-bound),
//! while a container-only re-render invalidates just that key prefix.

use std::collections::HashSet;

/// Key for the file-list back button.
pub const BACK_KEY: &str = "back";

/// Group key for the host-authored dashboard cards. The cards live in markup
/// the host wrote, so their cardinality is unknown here; they are bound as
/// one group per generation and deduplicated per element on the DOM side.
pub const CARDS_KEY: &str = "cards";

/// Group key for storage rows restored from the dashboard snapshot.
pub const STORAGE_ROWS_KEY: &str = "storage-rows";

/// Key for a storage row rendered by this crate.
pub fn storage_key(index: usize) -> String {
    format!("storage#{index}")
}

/// Key for a file-list row.
pub fn file_key(index: usize) -> String {
    format!("file#{index}")
}

/// Tracks which element keys already carry a handler in the current
/// render generation.
#[derive(Debug, Default)]
pub struct BindingRegistry {
    generation: u64,
    bound: HashSet<String>,
}

impl BindingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new generation after a wholesale main-content replacement.
    /// Every previously bound key is forgotten.
    pub fn begin_generation(&mut self) {
        self.generation += 1;
        self.bound.clear();
    }

    /// Forget keys with the given prefix, used when a single container is
    /// re-rendered without replacing the rest of the view.
    pub fn invalidate_prefix(&mut self, prefix: &str) {
        self.bound.retain(|key| !key.starts_with(prefix));
    }

    /// Mark the given keys as bound, returning only those that were not
    /// already bound in this generation.
    pub fn filter_unbound<I>(&mut self, keys: I) -> Vec<String>
    where
        I: IntoIterator<Item = String>,
    {
        keys.into_iter()
            .filter(|key| self.bound.insert(key.clone()))
            .collect()
    }

    pub fn is_bound(&self, key: &str) -> bool {
        self.bound.contains(key)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
