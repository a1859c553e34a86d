//! Sort resolution.
//!
//! Maps a requested sort label to its composed expression, degrading to the
//! configured default for absent or unknown labels. This never fails
//! outward; the caller decides whether a fallback is worth a warning.

use quire_config::SearchConfig;

/// Outcome of resolving a requested sort label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSort {
    /// The composed sort expression to send to the backend. Empty when the
    /// configuration registers no sorts at all (backend ordering applies).
    pub expression: String,
    /// The requested label, when it was set but not registered.
    pub fallback_from: Option<String>,
}

/// Resolve `requested` against the configuration's sort registry.
pub fn resolve(config: &SearchConfig, requested: Option<&str>) -> ResolvedSort {
    if let Some(label) = requested {
        if let Some(expression) = config.sorts.resolve(label) {
            return ResolvedSort {
                expression: expression.to_string(),
                fallback_from: None,
            };
        }
        return ResolvedSort {
            expression: config.default_sort_expression().unwrap_or_default().to_string(),
            fallback_from: Some(label.to_string()),
        };
    }

    ResolvedSort {
        expression: config.default_sort_expression().unwrap_or_default().to_string(),
        fallback_from: None,
    }
}
