//! Recipe category filter.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Category selection for the recipe listing.
///
/// The literal `"all"` (and an empty value) selects every recipe; anything
/// else selects recipes whose category matches exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    /// Query-string value meaning "no filter".
    pub const ALL: &'static str = "all";

    /// Build a filter from a raw query value.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == Self::ALL {
            Self::All
        } else {
            Self::Named(trimmed.to_owned())
        }
    }

    /// The value sent as the `category` query parameter.
    #[must_use]
    pub fn as_query_value(&self) -> &str {
        match self {
            Self::All => Self::ALL,
            Self::Named(name) => name,
        }
    }

    /// Whether a recipe in `category` passes this filter.
    #[must_use]
    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => name == category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_query_value())
    }
}

impl From<String> for CategoryFilter {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        filter.as_query_value().to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_and_empty() {
        assert_eq!(CategoryFilter::parse("all"), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse(""), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse("  "), CategoryFilter::All);
    }

    #[test]
    fn test_parse_named_is_case_sensitive() {
        assert_eq!(
            CategoryFilter::parse("All"),
            CategoryFilter::Named("All".to_owned())
        );
    }

    #[test]
    fn test_matches() {
        let dessert = CategoryFilter::parse("Dessert");
        assert!(dessert.matches("Dessert"));
        assert!(!dessert.matches("dessert"));
        assert!(CategoryFilter::All.matches("anything"));
    }
}
