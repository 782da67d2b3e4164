//! In-memory implementation of the repository traits.
//!
//! Each operation takes the lock once, so every upsert/delete is atomic with
//! respect to concurrent requests, matching the single-document guarantees of
//! the `PostgreSQL` store.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use meal_planner_core::{
    CategoryFilter, MealPlan, NewRecipe, NewShoppingList, Recipe, RecipeId, ShoppingList,
    ShoppingListId, UserId,
};

use super::{
    MealPlanRepository, RecipeRepository, RepositoryError, ShoppingListRepository, Store,
};

#[derive(Debug, Default)]
struct Collections {
    recipes: HashMap<RecipeId, Recipe>,
    meal_plans: HashMap<UserId, MealPlan>,
    shopping_lists: HashMap<ShoppingListId, ShoppingList>,
}

/// Process-local store. Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fully-formed recipe, keeping its ID.
    pub async fn put_recipe(&self, recipe: Recipe) {
        self.inner.write().await.recipes.insert(recipe.id, recipe);
    }

    /// Insert a fully-formed shopping list, keeping its ID and timestamp.
    pub async fn put_shopping_list(&self, list: ShoppingList) {
        self.inner
            .write()
            .await
            .shopping_lists
            .insert(list.id, list);
    }

    /// Number of stored meal plans.
    pub async fn meal_plan_count(&self) -> usize {
        self.inner.read().await.meal_plans.len()
    }
}

#[async_trait]
impl MealPlanRepository for MemoryStore {
    async fn upsert_meal_plan(
        &self,
        user_id: &UserId,
        meal_plan: &serde_json::Value,
        updated_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        self.inner.write().await.meal_plans.insert(
            user_id.clone(),
            MealPlan {
                user_id: user_id.clone(),
                meal_plan: meal_plan.clone(),
                updated_at,
            },
        );
        Ok(())
    }

    async fn delete_meal_plan(&self, user_id: &UserId) -> Result<bool, RepositoryError> {
        Ok(self
            .inner
            .write()
            .await
            .meal_plans
            .remove(user_id)
            .is_some())
    }

    async fn get_meal_plan(&self, user_id: &UserId) -> Result<Option<MealPlan>, RepositoryError> {
        Ok(self.inner.read().await.meal_plans.get(user_id).cloned())
    }
}

#[async_trait]
impl RecipeRepository for MemoryStore {
    async fn insert_recipe(&self, recipe: NewRecipe) -> Result<Recipe, RepositoryError> {
        let recipe = recipe.into_recipe(RecipeId::generate());
        let mut inner = self.inner.write().await;

        if inner.recipes.contains_key(&recipe.id) {
            return Err(RepositoryError::Conflict("recipe already exists".to_owned()));
        }

        inner.recipes.insert(recipe.id, recipe.clone());
        Ok(recipe)
    }

    async fn get_recipe(&self, id: RecipeId) -> Result<Option<Recipe>, RepositoryError> {
        Ok(self.inner.read().await.recipes.get(&id).cloned())
    }

    async fn delete_recipe(
        &self,
        id: RecipeId,
        creator: &UserId,
    ) -> Result<bool, RepositoryError> {
        let mut inner = self.inner.write().await;

        let owned = inner
            .recipes
            .get(&id)
            .is_some_and(|recipe| &recipe.creator == creator);

        if owned {
            inner.recipes.remove(&id);
        }
        Ok(owned)
    }

    async fn list_recipes(&self, filter: &CategoryFilter) -> Result<Vec<Recipe>, RepositoryError> {
        let inner = self.inner.read().await;

        let mut recipes: Vec<Recipe> = inner
            .recipes
            .values()
            .filter(|recipe| filter.matches(&recipe.category))
            .cloned()
            .collect();

        recipes.sort_by(|a, b| {
            a.recipe_name
                .cmp(&b.recipe_name)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(recipes)
    }

    async fn list_categories(&self) -> Result<Vec<String>, RepositoryError> {
        let inner = self.inner.read().await;

        let mut categories: Vec<String> = inner
            .recipes
            .values()
            .map(|recipe| recipe.category.clone())
            .collect();

        categories.sort();
        categories.dedup();
        Ok(categories)
    }

    async fn clear_recipes(&self) -> Result<u64, RepositoryError> {
        let mut inner = self.inner.write().await;
        let removed = inner.recipes.len() as u64;
        inner.recipes.clear();
        Ok(removed)
    }
}

#[async_trait]
impl ShoppingListRepository for MemoryStore {
    async fn create_shopping_list(
        &self,
        list: NewShoppingList,
    ) -> Result<ShoppingList, RepositoryError> {
        let list = list.into_list(ShoppingListId::generate(), Utc::now());
        self.inner
            .write()
            .await
            .shopping_lists
            .insert(list.id, list.clone());
        Ok(list)
    }

    async fn list_shopping_lists(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<ShoppingList>, RepositoryError> {
        let inner = self.inner.read().await;

        let mut lists: Vec<ShoppingList> = inner
            .shopping_lists
            .values()
            .filter(|list| &list.user_id == user_id)
            .cloned()
            .collect();

        lists.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(lists)
    }

    async fn delete_shopping_list(
        &self,
        id: ShoppingListId,
        user_id: &UserId,
    ) -> Result<bool, RepositoryError> {
        let mut inner = self.inner.write().await;

        let owned = inner
            .shopping_lists
            .get(&id)
            .is_some_and(|list| &list.user_id == user_id);

        if owned {
            inner.shopping_lists.remove(&id);
        }
        Ok(owned)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}
