//! Request and response payloads shared by the server and its clients.
//!
//! Request fields that the handlers validate themselves are `Option`s so a
//! missing field reaches the handler (and becomes a 400 with the handler's
//! own message) instead of failing deserialization.

use serde::{Deserialize, Serialize};

use crate::models::{Recipe, ShoppingItem};

/// Endpoint paths.
pub mod paths {
    pub const MEAL_PLANNER: &str = "/api/meal-planner/meal-planner";
    pub const RECIPES_DELETE: &str = "/api/recipes/delete";
    pub const RECIPES_FILTERED: &str = "/api/recipes/filtered";
    pub const RECIPES: &str = "/api/recipes";
    pub const SHOPPING_LIST_DISPLAY: &str = "/api/shopping-list/display";
    pub const SHOPPING_LIST_DELETE: &str = "/api/shopping-list/delete";
    pub const SHOPPING_LIST_CREATE: &str = "/api/shopping-list/create";
    pub const LOGIN_PAGE: &str = "/auth/login";
}

// =============================================================================
// Meal plans
// =============================================================================

/// Body of `POST /api/meal-planner/meal-planner`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveMealPlanRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub meal_plan: Option<serde_json::Value>,
}

/// Body of `DELETE /api/meal-planner/meal-planner`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteMealPlanRequest {
    #[serde(default)]
    pub user_id: Option<String>,
}

// =============================================================================
// Recipes
// =============================================================================

/// Query of `GET /api/recipes/filtered`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipeFilterQuery {
    #[serde(default)]
    pub category: Option<String>,
}

/// Response of `GET /api/recipes/filtered`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilteredRecipes {
    pub recipes: Vec<Recipe>,
    /// Every distinct category in the store, sorted, regardless of the filter.
    pub categories: Vec<String>,
}

/// Query of `DELETE /api/recipes/delete`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDeleteQuery {
    #[serde(default)]
    pub recipe_id: Option<String>,
    #[serde(default)]
    pub creator: Option<String>,
}

// =============================================================================
// Shopping lists
// =============================================================================

/// Query of `GET /api/shopping-list/display`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListQuery {
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Query of `DELETE /api/shopping-list/delete`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListDeleteQuery {
    #[serde(default)]
    pub list_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Body of `POST /api/shopping-list/create`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShoppingListRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub recipe_name: Option<String>,
    #[serde(default)]
    pub items: Vec<ShoppingItem>,
}

// =============================================================================
// Generic responses
// =============================================================================

/// Success body carrying a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Success body of delete endpoints that only acknowledge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    #[must_use]
    pub const fn ok() -> Self {
        Self { success: true }
    }
}

/// Error body returned by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_save_request_tolerates_missing_fields() {
        let req: SaveMealPlanRequest = serde_json::from_str("{}").unwrap();
        assert!(req.user_id.is_none());
        assert!(req.meal_plan.is_none());

        let req: SaveMealPlanRequest =
            serde_json::from_str(r#"{"userId": "u1", "mealPlan": null}"#).unwrap();
        assert_eq!(req.user_id.as_deref(), Some("u1"));
        assert!(req.meal_plan.is_none());
    }

    #[test]
    fn test_delete_query_uses_camel_case() {
        let query = serde_json::to_value(ShoppingListDeleteQuery {
            list_id: Some("l1".to_owned()),
            user_id: Some("u1".to_owned()),
        })
        .unwrap();
        assert_eq!(query["listId"], "l1");
        assert_eq!(query["userId"], "u1");
    }
}
