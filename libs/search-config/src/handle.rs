//! Shared configuration handle with atomic reload.

use std::path::Path;
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::config::SearchConfig;
use crate::error::Result;
use crate::loader;

/// A process-wide handle to the current configuration.
///
/// Readers take a cheap snapshot with [`current`](Self::current) and keep
/// using it for the whole request; a concurrent [`swap`](Self::swap)
/// replaces the configuration for *subsequent* snapshots only. No reader
/// ever observes a partially-updated registry set.
#[derive(Debug)]
pub struct ConfigHandle {
    inner: ArcSwap<SearchConfig>,
}

impl ConfigHandle {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            inner: ArcSwap::from_pointee(config),
        }
    }

    /// Snapshot of the current configuration.
    pub fn current(&self) -> Arc<SearchConfig> {
        self.inner.load_full()
    }

    /// Atomically replace the configuration. Returns the previous one.
    pub fn swap(&self, config: SearchConfig) -> Arc<SearchConfig> {
        self.inner.swap(Arc::new(config))
    }

    /// Reload from a declarative source file.
    ///
    /// The new document is fully loaded and validated before the swap; on
    /// any failure the running configuration stays in place.
    pub fn reload_from_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let config = loader::from_file(path.as_ref())?;
        self.swap(config);
        tracing::info!(path = %path.as_ref().display(), "search configuration reloaded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::SearchField;
    use crate::sorts::{SortField, SortKey};

    fn config_with_handler(handler: &str) -> SearchConfig {
        let mut defaults = crate::GlobalDefaults::default();
        defaults.request_handler = handler.to_string();
        SearchConfig::builder()
            .defaults(defaults)
            .add_search_field(SearchField::keyed("all_fields"))
            .add_sort_field(SortField::new("relevance", vec![SortKey::relevance()]))
            .build()
            .unwrap()
    }

    #[test]
    fn swap_is_visible_to_later_snapshots_only() {
        let handle = Arc::new(ConfigHandle::new(config_with_handler("search")));

        let before = handle.current();
        handle.swap(config_with_handler("advanced"));
        let after = handle.current();

        assert_eq!(before.defaults.request_handler, "search");
        assert_eq!(after.defaults.request_handler, "advanced");
    }

    #[test]
    fn failed_reload_keeps_running_configuration() {
        let handle = ConfigHandle::new(config_with_handler("search"));
        let missing = std::path::Path::new("/nonexistent/quire.toml");
        assert!(handle.reload_from_file(missing).is_err());
        assert_eq!(handle.current().defaults.request_handler, "search");
    }
}
