//! Persistence for the meal planner collections.
//!
//! # Collections
//!
//! - `recipe` - Recipes, owned by their creator
//! - `meal_plan` - One meal plan document per user
//! - `shopping_list` - Ingredient lists copied from recipes
//!
//! Handlers only see the repository traits below, one method per operation.
//! Two implementations exist:
//!
//! - [`PgStore`] - `PostgreSQL` (schema `meal_planner`, JSONB for document bodies)
//! - [`MemoryStore`] - process-local, used by tests and `MEAL_PLANNER_STORAGE=memory`
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p meal-planner-cli -- migrate
//! ```

pub mod memory;
pub mod postgres;

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use meal_planner_core::{
    CategoryFilter, MealPlan, NewRecipe, NewShoppingList, Recipe, RecipeId, ShoppingList,
    ShoppingListId, UserId,
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation (e.g., duplicate ID).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Meal plan persistence. At most one plan exists per user.
#[async_trait]
pub trait MealPlanRepository: Send + Sync {
    /// Insert the user's plan, or replace it if one exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the write fails.
    async fn upsert_meal_plan(
        &self,
        user_id: &UserId,
        meal_plan: &serde_json::Value,
        updated_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError>;

    /// Delete the user's plan. Returns `false` if there was none.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the write fails.
    async fn delete_meal_plan(&self, user_id: &UserId) -> Result<bool, RepositoryError>;

    /// Fetch the user's plan.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the read fails.
    async fn get_meal_plan(&self, user_id: &UserId) -> Result<Option<MealPlan>, RepositoryError>;
}

/// Recipe persistence.
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Store a new recipe under a fresh ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the write fails.
    async fn insert_recipe(&self, recipe: NewRecipe) -> Result<Recipe, RepositoryError>;

    /// Fetch one recipe.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the read fails.
    async fn get_recipe(&self, id: RecipeId) -> Result<Option<Recipe>, RepositoryError>;

    /// Delete a recipe only if `creator` created it. Returns `false` if no
    /// recipe matched both.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the write fails.
    async fn delete_recipe(&self, id: RecipeId, creator: &UserId)
    -> Result<bool, RepositoryError>;

    /// Recipes passing `filter`, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the read fails.
    async fn list_recipes(&self, filter: &CategoryFilter) -> Result<Vec<Recipe>, RepositoryError>;

    /// Distinct categories across all recipes, sorted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the read fails.
    async fn list_categories(&self) -> Result<Vec<String>, RepositoryError>;

    /// Remove every recipe. Returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the write fails.
    async fn clear_recipes(&self) -> Result<u64, RepositoryError>;
}

/// Shopping list persistence.
#[async_trait]
pub trait ShoppingListRepository: Send + Sync {
    /// Store a new list under a fresh ID, stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the write fails.
    async fn create_shopping_list(
        &self,
        list: NewShoppingList,
    ) -> Result<ShoppingList, RepositoryError>;

    /// All of a user's lists, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the read fails.
    async fn list_shopping_lists(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<ShoppingList>, RepositoryError>;

    /// Delete a list only if it belongs to `user_id`. Returns `false` if no
    /// list matched both.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the write fails.
    async fn delete_shopping_list(
        &self,
        id: ShoppingListId,
        user_id: &UserId,
    ) -> Result<bool, RepositoryError>;
}

/// Everything the HTTP handlers need from persistence.
#[async_trait]
pub trait Store: MealPlanRepository + RecipeRepository + ShoppingListRepository {
    /// Check that the backing store is reachable.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if it is not.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
