//! Shopping list documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{Amount, ShoppingListId, UserId};

/// One line of a shopping list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingItem {
    pub ingredient_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: Amount,
    #[serde(default, deserialize_with = "null_as_default")]
    pub unit: String,
}

/// Stored items sometimes carry an explicit `null`; read it as blank.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Ingredients copied from a recipe into a user's shopping list.
///
/// The recipe is referenced by name only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingList {
    #[serde(rename = "_id")]
    pub id: ShoppingListId,
    pub user_id: UserId,
    pub recipe_name: String,
    #[serde(default)]
    pub items: Vec<ShoppingItem>,
    pub created_at: DateTime<Utc>,
}

/// A shopping list that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewShoppingList {
    pub user_id: UserId,
    pub recipe_name: String,
    pub items: Vec<ShoppingItem>,
}

impl NewShoppingList {
    /// Attach an ID and creation time, producing the stored form.
    #[must_use]
    pub fn into_list(self, id: ShoppingListId, created_at: DateTime<Utc>) -> ShoppingList {
        ShoppingList {
            id,
            user_id: self.user_id,
            recipe_name: self.recipe_name,
            items: self.items,
            created_at,
        }
    }
}
