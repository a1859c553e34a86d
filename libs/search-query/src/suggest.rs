//! Spelling-suggestion gating.

use quire_config::SearchConfig;

/// Decides whether "did you mean" suggestions are worth showing.
///
/// A search that already found plenty of results does not need spelling
/// help; the threshold comes from the configuration. Pure and stateless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestionGate {
    max_results: usize,
}

impl SuggestionGate {
    pub fn new(max_results: usize) -> Self {
        Self { max_results }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(config.defaults.spell_max)
    }

    /// True when suggestions should be shown for `result_count` hits.
    /// The boundary is inclusive: exactly `max_results` still suggests.
    pub fn should_suggest(&self, result_count: usize) -> bool {
        result_count <= self.max_results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_is_inclusive() {
        let gate = SuggestionGate::new(5);
        assert!(gate.should_suggest(0));
        assert!(gate.should_suggest(5));
        assert!(!gate.should_suggest(6));
    }
}
