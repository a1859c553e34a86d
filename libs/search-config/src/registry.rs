//! Insertion-ordered registries with key validation.
//!
//! Registration order is meaningful: display field registries render in
//! exactly that order, and the sort registry's first entry is the natural
//! pulldown default. Lookups go through a key index, so iteration order and
//! lookup cost are independent.

use std::collections::HashMap;

use crate::error::{ConfigError, Result};
use crate::fields::{DisplayField, FacetField, SearchField};
use crate::sorts::SortField;

/// Implemented by field descriptors stored in a [`FieldRegistry`].
pub trait Keyed {
    fn key(&self) -> &str;
    fn label(&self) -> &str;

    /// Descriptor-specific load-time checks. The default accepts anything.
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

impl Keyed for FacetField {
    fn key(&self) -> &str {
        &self.key
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn validate(&self) -> Result<()> {
        if self.range && !self.field_type.is_range_compatible() {
            return Err(ConfigError::InvalidRangeField {
                key: self.key.clone(),
                field_type: self.field_type.as_str().to_string(),
            });
        }
        Ok(())
    }
}

impl Keyed for DisplayField {
    fn key(&self) -> &str {
        &self.key
    }

    fn label(&self) -> &str {
        &self.label
    }
}

impl Keyed for SearchField {
    fn key(&self) -> &str {
        &self.key
    }

    fn label(&self) -> &str {
        &self.label
    }
}

/// An insertion-ordered collection of field descriptors with unique keys.
#[derive(Debug, Clone)]
pub struct FieldRegistry<T: Keyed> {
    category: &'static str,
    entries: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T: Keyed> FieldRegistry<T> {
    pub fn new(category: &'static str) -> Self {
        Self {
            category,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Register a descriptor, appending it to the display order.
    pub fn register(&mut self, spec: T) -> Result<()> {
        if spec.key().is_empty() {
            return Err(ConfigError::EmptyKey);
        }
        if spec.label().is_empty() {
            return Err(ConfigError::EmptyLabel {
                category: self.category,
                key: spec.key().to_string(),
            });
        }
        spec.validate()?;
        if self.index.contains_key(spec.key()) {
            return Err(ConfigError::DuplicateKey {
                category: self.category,
                key: spec.key().to_string(),
            });
        }
        self.index.insert(spec.key().to_string(), self.entries.len());
        self.entries.push(spec);
        Ok(())
    }

    pub fn lookup(&self, key: &str) -> Option<&T> {
        self.index.get(key).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Iterate in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(Keyed::key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Named sort specifications with their composed backend expressions.
///
/// Composition happens at registration so every resolve is a plain lookup.
#[derive(Debug, Clone, Default)]
pub struct SortRegistry {
    entries: Vec<(SortField, String)>,
    index: HashMap<String, usize>,
}

impl SortRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, sort: SortField) -> Result<()> {
        if self.index.contains_key(&sort.label) {
            return Err(ConfigError::DuplicateSort {
                label: sort.label.clone(),
            });
        }
        let expression = sort.compose()?;
        self.index.insert(sort.label.clone(), self.entries.len());
        self.entries.push((sort, expression));
        Ok(())
    }

    /// The composed sort expression for `label`, if registered.
    pub fn resolve(&self, label: &str) -> Option<&str> {
        self.index.get(label).map(|&i| self.entries[i].1.as_str())
    }

    pub fn lookup(&self, label: &str) -> Option<&SortField> {
        self.index.get(label).map(|&i| &self.entries[i].0)
    }

    /// Labels in registration order (the pulldown order).
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(s, _)| s.label.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
