//! Client-side shapes of API payloads.

use serde::Deserialize;

use meal_planner_core::ShoppingItem;

/// A shopping list as the Shopping-List view consumes it.
///
/// `createdAt` stays a raw string; values that do not parse render as
/// "Invalid Date". Missing fields default to empty.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListEntry {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub recipe_name: String,
    #[serde(default)]
    pub items: Vec<ShoppingItem>,
    #[serde(default)]
    pub created_at: Option<String>,
}
