//! Documents stored by the meal planner.
//!
//! Field names follow the document-store convention used on the wire:
//! camelCase, with the primary key serialized as `_id`.

pub mod meal_plan;
pub mod recipe;
pub mod shopping_list;

pub use meal_plan::MealPlan;
pub use recipe::{NewRecipe, Recipe};
pub use shopping_list::{NewShoppingList, ShoppingItem, ShoppingList};
