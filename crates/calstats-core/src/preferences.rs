//! Persisted UI preferences
//!
//! String-keyed, string-valued storage for the last selected interval mode,
//! custom bounds, and category color assignments. The store is injected into
//! the pieces that need it, so the core stays free of global state.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Well-known preference keys
pub mod keys {
    /// Last selected interval mode (wire string)
    pub const INTERVAL_OPTION: &str = "interval.option";
    /// Custom interval bounds, RFC 3339
    pub const CUSTOM_START: &str = "interval.custom.start";
    pub const CUSTOM_END: &str = "interval.custom.end";
    /// Rotating palette cursor
    pub const COLOR_INDEX: &str = "color.index";

    /// Per-category color assignment key
    pub fn color(category: &str) -> String {
        format!("color.{category}")
    }
}

/// Key-value preference storage
///
/// `set` is best-effort: preference loss is cosmetic, so implementations log
/// write failures instead of propagating them into the statistics path.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// Preferences persisted as a JSON map in `<config_dir>/preferences.json`.
/// Returns defaults on any read or parse error (graceful degradation).
pub struct FilePreferences {
    path: PathBuf,
    values: RwLock<HashMap<String, String>>,
}

impl FilePreferences {
    pub fn load(config_dir: &Path) -> Self {
        let path = config_dir.join("preferences.json");
        let values = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => HashMap::new(),
        };
        Self {
            path,
            values: RwLock::new(values),
        }
    }

    fn persist(&self, values: &HashMap<String, String>) {
        let parent = match self.path.parent() {
            Some(parent) => parent,
            None => return,
        };
        let result = std::fs::create_dir_all(parent)
            .and_then(|_| {
                let content = serde_json::to_string_pretty(values)?;
                std::fs::write(&self.path, content)
            });
        if let Err(e) = result {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to persist preferences");
        }
    }
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut values = self.values.write();
        values.insert(key.to_string(), value.to_string());
        self.persist(&values);
    }
}

/// In-memory store for tests and ephemeral sessions
#[derive(Default)]
pub struct MemoryPreferences {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values.write().insert(key.to_string(), value.to_string());
    }
}
