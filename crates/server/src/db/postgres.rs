//! `PostgreSQL` implementation of the repository traits.
//!
//! Queries are checked at runtime (`sqlx::query_as`) so the crate builds
//! without a live database or an offline query cache.
//!
//! Text ordering uses `COLLATE "C"` (byte order), the same order
//! [`MemoryStore`](super::MemoryStore) sorts `String`s in.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;

use meal_planner_core::{
    CategoryFilter, MakingTime, MealPlan, NewRecipe, NewShoppingList, Recipe, RecipeId,
    ShoppingItem, ShoppingList, ShoppingListId, UserId,
};

use super::{
    MealPlanRepository, RecipeRepository, RepositoryError, ShoppingListRepository, Store,
};

const RECIPE_COLUMNS: &str =
    "id, creator, recipe_name, recipe_image, category, making_hours, making_minutes";

/// Repository backed by a `PostgreSQL` pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Create a new store over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

// =============================================================================
// Row types
// =============================================================================

#[derive(sqlx::FromRow)]
struct RecipeRow {
    id: RecipeId,
    creator: UserId,
    recipe_name: String,
    recipe_image: Option<String>,
    category: String,
    making_hours: i32,
    making_minutes: i32,
}

impl TryFrom<RecipeRow> for Recipe {
    type Error = RepositoryError;

    fn try_from(row: RecipeRow) -> Result<Self, Self::Error> {
        let hours = u32::try_from(row.making_hours).map_err(|_| {
            RepositoryError::DataCorruption(format!("negative making_hours on recipe {}", row.id))
        })?;
        let minutes = u32::try_from(row.making_minutes).map_err(|_| {
            RepositoryError::DataCorruption(format!(
                "negative making_minutes on recipe {}",
                row.id
            ))
        })?;

        Ok(Self {
            id: row.id,
            creator: row.creator,
            recipe_name: row.recipe_name,
            recipe_image: row.recipe_image,
            category: row.category,
            making_time: MakingTime::new(hours, minutes),
        })
    }
}

#[derive(sqlx::FromRow)]
struct MealPlanRow {
    user_id: UserId,
    meal_plan: Json<serde_json::Value>,
    updated_at: DateTime<Utc>,
}

impl From<MealPlanRow> for MealPlan {
    fn from(row: MealPlanRow) -> Self {
        Self {
            user_id: row.user_id,
            meal_plan: row.meal_plan.0,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ShoppingListRow {
    id: ShoppingListId,
    user_id: UserId,
    recipe_name: String,
    items: Json<Vec<ShoppingItem>>,
    created_at: DateTime<Utc>,
}

impl From<ShoppingListRow> for ShoppingList {
    fn from(row: ShoppingListRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            recipe_name: row.recipe_name,
            items: row.items.0,
            created_at: row.created_at,
        }
    }
}

fn making_time_column(value: u32, column: &str) -> Result<i32, RepositoryError> {
    i32::try_from(value)
        .map_err(|_| RepositoryError::DataCorruption(format!("{column} out of range: {value}")))
}

fn map_unique_violation(e: sqlx::Error, what: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(format!("{what} already exists"));
    }
    RepositoryError::Database(e)
}

// =============================================================================
// Meal plans
// =============================================================================

#[async_trait]
impl MealPlanRepository for PgStore {
    async fn upsert_meal_plan(
        &self,
        user_id: &UserId,
        meal_plan: &serde_json::Value,
        updated_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO meal_planner.meal_plan (user_id, meal_plan, updated_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id) DO UPDATE
            SET meal_plan = EXCLUDED.meal_plan,
                updated_at = EXCLUDED.updated_at
            ",
        )
        .bind(user_id)
        .bind(Json(meal_plan))
        .bind(updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_meal_plan(&self, user_id: &UserId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM meal_planner.meal_plan WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn get_meal_plan(&self, user_id: &UserId) -> Result<Option<MealPlan>, RepositoryError> {
        let row = sqlx::query_as::<_, MealPlanRow>(
            r"
            SELECT user_id, meal_plan, updated_at
            FROM meal_planner.meal_plan
            WHERE user_id = $1
            ",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(MealPlan::from))
    }
}

// =============================================================================
// Recipes
// =============================================================================

#[async_trait]
impl RecipeRepository for PgStore {
    async fn insert_recipe(&self, recipe: NewRecipe) -> Result<Recipe, RepositoryError> {
        let recipe = recipe.into_recipe(RecipeId::generate());
        let hours = making_time_column(recipe.making_time.hours, "making_hours")?;
        let minutes = making_time_column(recipe.making_time.minutes, "making_minutes")?;

        let row = sqlx::query_as::<_, RecipeRow>(&format!(
            r"
            INSERT INTO meal_planner.recipe
                (id, creator, recipe_name, recipe_image, category, making_hours, making_minutes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {RECIPE_COLUMNS}
            "
        ))
        .bind(recipe.id)
        .bind(&recipe.creator)
        .bind(&recipe.recipe_name)
        .bind(&recipe.recipe_image)
        .bind(&recipe.category)
        .bind(hours)
        .bind(minutes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "recipe"))?;

        Recipe::try_from(row)
    }

    async fn get_recipe(&self, id: RecipeId) -> Result<Option<Recipe>, RepositoryError> {
        let row = sqlx::query_as::<_, RecipeRow>(&format!(
            "SELECT {RECIPE_COLUMNS} FROM meal_planner.recipe WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Recipe::try_from).transpose()
    }

    async fn delete_recipe(
        &self,
        id: RecipeId,
        creator: &UserId,
    ) -> Result<bool, RepositoryError> {
        let result =
            sqlx::query("DELETE FROM meal_planner.recipe WHERE id = $1 AND creator = $2")
                .bind(id)
                .bind(creator)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_recipes(&self, filter: &CategoryFilter) -> Result<Vec<Recipe>, RepositoryError> {
        let rows = match filter {
            CategoryFilter::All => {
                sqlx::query_as::<_, RecipeRow>(&format!(
                    r#"
                    SELECT {RECIPE_COLUMNS} FROM meal_planner.recipe
                    ORDER BY recipe_name COLLATE "C", id
                    "#
                ))
                .fetch_all(&self.pool)
                .await?
            }
            CategoryFilter::Named(category) => {
                sqlx::query_as::<_, RecipeRow>(&format!(
                    r#"
                    SELECT {RECIPE_COLUMNS} FROM meal_planner.recipe
                    WHERE category = $1
                    ORDER BY recipe_name COLLATE "C", id
                    "#
                ))
                .bind(category)
                .fetch_all(&self.pool)
                .await?
            }
        };

        rows.into_iter().map(Recipe::try_from).collect()
    }

    async fn list_categories(&self) -> Result<Vec<String>, RepositoryError> {
        let categories = sqlx::query_scalar::<_, String>(
            r#"
            SELECT category FROM meal_planner.recipe
            GROUP BY category
            ORDER BY category COLLATE "C"
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    async fn clear_recipes(&self) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM meal_planner.recipe")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

// =============================================================================
// Shopping lists
// =============================================================================

#[async_trait]
impl ShoppingListRepository for PgStore {
    async fn create_shopping_list(
        &self,
        list: NewShoppingList,
    ) -> Result<ShoppingList, RepositoryError> {
        let row = sqlx::query_as::<_, ShoppingListRow>(
            r"
            INSERT INTO meal_planner.shopping_list (id, user_id, recipe_name, items)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, recipe_name, items, created_at
            ",
        )
        .bind(ShoppingListId::generate())
        .bind(&list.user_id)
        .bind(&list.recipe_name)
        .bind(Json(&list.items))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "shopping list"))?;

        Ok(row.into())
    }

    async fn list_shopping_lists(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<ShoppingList>, RepositoryError> {
        let rows = sqlx::query_as::<_, ShoppingListRow>(
            r"
            SELECT id, user_id, recipe_name, items, created_at
            FROM meal_planner.shopping_list
            WHERE user_id = $1
            ORDER BY created_at DESC, id
            ",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ShoppingList::from).collect())
    }

    async fn delete_shopping_list(
        &self,
        id: ShoppingListId,
        user_id: &UserId,
    ) -> Result<bool, RepositoryError> {
        let result =
            sqlx::query("DELETE FROM meal_planner.shopping_list WHERE id = $1 AND user_id = $2")
                .bind(id)
                .bind(user_id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
