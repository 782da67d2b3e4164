//! Ingredient quantity.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Quantity of an ingredient on a shopping list.
///
/// Stored documents carry either a number (`2`, `0.5`) or free text
/// (`"1/2"`, `"a pinch"`); both are preserved as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
}

impl Default for Amount {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}
