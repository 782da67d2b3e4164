//! HTTP route handlers for the meal planner API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                          - Liveness check
//! GET    /health/ready                    - Readiness check (pings the store)
//!
//! # Meal plans
//! POST   /api/meal-planner/meal-planner   - Save (upsert) a user's meal plan
//! DELETE /api/meal-planner/meal-planner   - Delete a user's meal plan
//!
//! # Recipes
//! GET    /api/recipes/filtered            - Recipes in a category + all categories
//! GET    /api/recipes/{recipe_id}         - Single recipe
//! DELETE /api/recipes/delete              - Delete a recipe owned by `creator`
//!
//! # Shopping lists
//! GET    /api/shopping-list/display       - A user's lists, newest first
//! POST   /api/shopping-list/create        - Store a new list
//! DELETE /api/shopping-list/delete        - Delete one of a user's lists
//! ```
//!
//! The meal planner and recipe delete endpoints answer unsupported methods
//! with a JSON 405 carrying an `Allow` header.

pub mod health;
pub mod meal_planner;
pub mod recipes;
pub mod shopping_list;

use axum::{
    Router,
    routing::{delete, get, post},
};

use meal_planner_core::api::paths;

use crate::state::AppState;

/// Create the meal plan routes router.
pub fn meal_planner_routes() -> Router<AppState> {
    Router::new().route(
        paths::MEAL_PLANNER,
        post(meal_planner::save)
            .delete(meal_planner::delete)
            .fallback(meal_planner::method_not_allowed),
    )
}

/// Create the recipe routes router.
pub fn recipe_routes() -> Router<AppState> {
    Router::new()
        .route(
            paths::RECIPES_DELETE,
            delete(recipes::delete).fallback(recipes::delete_method_not_allowed),
        )
        .route(paths::RECIPES_FILTERED, get(recipes::filtered))
        .route("/api/recipes/{recipe_id}", get(recipes::show))
}

/// Create the shopping list routes router.
pub fn shopping_list_routes() -> Router<AppState> {
    Router::new()
        .route(paths::SHOPPING_LIST_DISPLAY, get(shopping_list::display))
        .route(paths::SHOPPING_LIST_CREATE, post(shopping_list::create))
        .route(paths::SHOPPING_LIST_DELETE, delete(shopping_list::delete))
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .merge(meal_planner_routes())
        .merge(recipe_routes())
        .merge(shopping_list_routes())
}
