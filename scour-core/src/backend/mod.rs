mod directory;
mod process;
mod vacuum;

pub use directory::{DirectoryBackend, expand_home};
pub use process::is_process_running;

use std::collections::HashMap;
use std::path::PathBuf;

use crate::config::CleanerConfig;
use crate::error::BackendError;

/// Lazy sequence of candidate paths
pub type PathStream = Box<dyn Iterator<Item = Result<PathBuf, BackendError>>>;

/// Lazy sequence of special (non-path) cleanup results
pub type SpecialStream = Box<dyn Iterator<Item = Result<SpecialResult, BackendError>>>;

/// Outcome of one special cleanup step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialResult {
    /// Work done while deleting: bytes reclaimed and what was done
    Freed { bytes: u64, description: String },
    /// Work that would be done (preview)
    Pending(String),
    /// No more results; ends the sequence early
    Stop,
}

/// A source of things to clean for one operation.
///
/// Streams are owned so the driver can keep them across suspension points.
pub trait CleaningBackend {
    /// Operation identifier, e.g. `firefox`
    fn id(&self) -> &str;

    /// Display name, e.g. `Firefox`
    fn name(&self) -> &str;

    /// Whether the application owning these files is alive right now
    fn is_running(&self) -> bool;

    /// Enable or disable one option before listing
    fn set_option(&mut self, option: &str, enabled: bool);

    fn list_paths(&self) -> PathStream;

    fn special_cleanup(&self, really_delete: bool) -> SpecialStream;
}

/// Backends keyed by operation identifier
#[derive(Default)]
pub struct BackendRegistry {
    backends: HashMap<String, Box<dyn CleaningBackend>>,
}

impl BackendRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// One [`DirectoryBackend`] per cleaner definition
    pub fn from_config(config: &CleanerConfig) -> Self {
        let mut registry = Self::new();
        for def in &config.cleaners {
            registry.register(Box::new(DirectoryBackend::new(def.clone())));
        }
        registry
    }

    /// Add a backend under its own id, returning any backend it replaced
    pub fn register(
        &mut self,
        backend: Box<dyn CleaningBackend>,
    ) -> Option<Box<dyn CleaningBackend>> {
        self.backends.insert(backend.id().to_string(), backend)
    }

    pub fn get(&self, id: &str) -> Option<&(dyn CleaningBackend + 'static)> {
        self.backends.get(id).map(|b| b.as_ref())
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut (dyn CleaningBackend + 'static)> {
        self.backends.get_mut(id).map(|b| b.as_mut())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.backends.contains_key(id)
    }

    /// Registered ids, sorted
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.backends.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.backends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }
}
