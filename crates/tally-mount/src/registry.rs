//! Process-wide record of which plugins have initialized.

use std::collections::HashSet;
use std::sync::{Mutex, OnceLock, PoisonError};

/// Identifier the statistics view registers under.
pub const PLUGIN_ID: &str = "ocount-stats";

static GLOBAL_REGISTRY: OnceLock<PluginRegistry> = OnceLock::new();

/// Set-once initialization flags keyed by plugin id.
///
/// A flag is never cleared once set. Check-and-set happens under one lock, so
/// two racing bootstraps cannot both win.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    loaded: Mutex<HashSet<String>>,
}

impl PluginRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry shared by the whole process.
    pub fn global() -> &'static Self {
        GLOBAL_REGISTRY.get_or_init(Self::new)
    }

    /// Mark `plugin_id` as loaded. Returns `false` if it already was.
    pub fn try_register(&self, plugin_id: &str) -> bool {
        self.loaded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(plugin_id.to_string())
    }

    #[must_use]
    pub fn is_loaded(&self, plugin_id: &str) -> bool {
        self.loaded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(plugin_id)
    }
}
