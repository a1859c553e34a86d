//! Named multi-key sort specifications.
//!
//! A sort option is a display label over an ordered sequence of
//! `(field, direction)` pairs, composed once into a single backend
//! sort-expression string such as
//! `pub_date_sort desc, title_sort asc, ord_sort asc`.

use crate::error::{ConfigError, Result};

/// The relevance pseudo-field. The only field allowed to omit an explicit
/// sort direction; it composes to the backend-native best-match-first token.
pub const RELEVANCE_FIELD: &str = "score";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

/// One `(field, direction)` pair inside a sort specification.
#[derive(Debug, Clone, PartialEq)]
pub struct SortKey {
    pub field: String,
    /// `None` is only valid for [`RELEVANCE_FIELD`].
    pub direction: Option<SortDirection>,
}

impl SortKey {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Some(SortDirection::Asc),
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Some(SortDirection::Desc),
        }
    }

    /// Best match first, using the backend's native relevance ordering.
    pub fn relevance() -> Self {
        Self {
            field: RELEVANCE_FIELD.to_string(),
            direction: None,
        }
    }

    fn compose(&self) -> Result<String> {
        match self.direction {
            Some(direction) => Ok(format!("{} {}", self.field, direction.as_str())),
            None if self.field == RELEVANCE_FIELD => {
                Ok(format!("{RELEVANCE_FIELD} desc"))
            }
            None => Err(ConfigError::MissingSortDirection {
                field: self.field.clone(),
            }),
        }
    }
}

/// A named sort option.
#[derive(Debug, Clone, PartialEq)]
pub struct SortField {
    pub label: String,
    pub keys: Vec<SortKey>,
}

impl SortField {
    pub fn new(label: impl Into<String>, keys: Vec<SortKey>) -> Self {
        Self {
            label: label.into(),
            keys,
        }
    }

    /// Compose the backend sort-expression string.
    ///
    /// Fails with [`ConfigError::EmptySortSpec`] when there are no keys and
    /// with [`ConfigError::MissingSortDirection`] when a non-relevance key
    /// omits its direction.
    pub fn compose(&self) -> Result<String> {
        if self.keys.is_empty() {
            return Err(ConfigError::EmptySortSpec {
                label: self.label.clone(),
            });
        }
        let parts = self
            .keys
            .iter()
            .map(SortKey::compose)
            .collect::<Result<Vec<_>>>()?;
        Ok(parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composes_multi_key_expression() {
        let sort = SortField::new(
            "year",
            vec![
                SortKey::desc("pub_date_sort"),
                SortKey::asc("title_sort"),
                SortKey::asc("ord_sort"),
            ],
        );
        assert_eq!(
            sort.compose().unwrap(),
            "pub_date_sort desc, title_sort asc, ord_sort asc"
        );
    }

    #[test]
    fn relevance_key_uses_native_token() {
        let sort = SortField::new(
            "relevance",
            vec![SortKey::relevance(), SortKey::desc("pub_date_sort")],
        );
        assert_eq!(sort.compose().unwrap(), "score desc, pub_date_sort desc");
    }

    #[test]
    fn direction_required_for_ordinary_fields() {
        let sort = SortField::new(
            "broken",
            vec![SortKey {
                field: "title_sort".to_string(),
                direction: None,
            }],
        );
        assert!(matches!(
            sort.compose(),
            Err(ConfigError::MissingSortDirection { .. })
        ));
    }

    #[test]
    fn empty_key_sequence_is_rejected() {
        let sort = SortField::new("empty", Vec::new());
        assert!(matches!(
            sort.compose(),
            Err(ConfigError::EmptySortSpec { .. })
        ));
    }
}
