//! Recipe route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use tracing::instrument;

use meal_planner_core::api::{FilteredRecipes, RecipeDeleteQuery, RecipeFilterQuery, SuccessResponse};
use meal_planner_core::{CategoryFilter, Recipe, RecipeId, UserId};

use crate::error::{AppError, DatabaseContext, Result};
use crate::state::AppState;

/// List recipes in a category, along with every known category.
///
/// GET /api/recipes/filtered?category=<name|all>
///
/// # Errors
///
/// - 500 if the read fails
#[instrument(skip(state))]
pub async fn filtered(
    State(state): State<AppState>,
    Query(query): Query<RecipeFilterQuery>,
) -> Result<Json<FilteredRecipes>> {
    let filter = CategoryFilter::parse(query.category.as_deref().unwrap_or_default());

    let recipes = state
        .store()
        .list_recipes(&filter)
        .await
        .context("Failed to fetch recipes")?;
    let categories = state
        .store()
        .list_categories()
        .await
        .context("Failed to fetch recipes")?;

    tracing::debug!(
        category = %filter,
        recipes = recipes.len(),
        categories = categories.len(),
        "Recipes listed"
    );
    Ok(Json(FilteredRecipes {
        recipes,
        categories,
    }))
}

/// Fetch a single recipe for its detail page.
///
/// GET /api/recipes/{recipe_id}
///
/// # Errors
///
/// - 404 if the ID is malformed or unknown
/// - 500 if the read fails
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(recipe_id): Path<String>,
) -> Result<Json<Recipe>> {
    let not_found = || AppError::NotFound("Recipe not found".to_string());

    let id = RecipeId::parse(&recipe_id).map_err(|_| not_found())?;

    state
        .store()
        .get_recipe(id)
        .await
        .context("Failed to fetch recipe")?
        .map(Json)
        .ok_or_else(not_found)
}

/// Delete a recipe owned by `creator`.
///
/// DELETE /api/recipes/delete?recipeId=<id>&creator=<user>
///
/// # Errors
///
/// - 400 if either parameter is missing or `recipeId` is malformed
/// - 404 if no recipe has that ID and creator
/// - 500 if the write fails
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Query(query): Query<RecipeDeleteQuery>,
) -> Result<Json<SuccessResponse>> {
    let recipe_id = query
        .recipe_id
        .as_deref()
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Recipe ID is required".to_string()))?;
    let id = RecipeId::parse(recipe_id)
        .map_err(|e| AppError::BadRequest(format!("Invalid recipe ID: {e}")))?;
    let creator = UserId::from_optional(query.creator.as_deref())
        .map_err(|_| AppError::BadRequest("Creator is required".to_string()))?;

    let deleted = state
        .store()
        .delete_recipe(id, &creator)
        .await
        .context("Failed to delete recipe")?;

    if !deleted {
        return Err(AppError::NotFound("Recipe not found".to_string()));
    }

    tracing::info!(recipe_id = %id, creator = %creator, "Recipe deleted");
    Ok(Json(SuccessResponse::ok()))
}

/// Reject any method other than `DELETE` on the delete endpoint.
pub async fn delete_method_not_allowed() -> AppError {
    AppError::MethodNotAllowed {
        message: "Method not allowed".to_string(),
        allow: "DELETE",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use meal_planner_core::{MakingTime, NewRecipe};

    use super::*;
    use crate::db::{MemoryStore, RecipeRepository};
    use crate::routes::tests::test_state;

    async fn seeded() -> (Arc<MemoryStore>, Recipe) {
        let store = Arc::new(MemoryStore::new());
        let recipe = store
            .insert_recipe(NewRecipe {
                creator: UserId::parse("alice").unwrap(),
                recipe_name: "Shakshuka".to_string(),
                recipe_image: None,
                category: "Breakfast".to_string(),
                making_time: MakingTime::new(0, 40),
            })
            .await
            .unwrap();
        (store, recipe)
    }

    fn delete_query(recipe_id: Option<String>, creator: Option<&str>) -> RecipeDeleteQuery {
        RecipeDeleteQuery {
            recipe_id,
            creator: creator.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_delete_with_wrong_creator_keeps_recipe() {
        let (store, recipe) = seeded().await;
        let state = test_state(store.clone());

        let err = delete(
            State(state),
            Query(delete_query(Some(recipe.id.to_string()), Some("mallory"))),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert!(store.get_recipe(recipe.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_by_creator() {
        let (store, recipe) = seeded().await;
        let state = test_state(store.clone());

        let Json(body) = delete(
            State(state),
            Query(delete_query(Some(recipe.id.to_string()), Some("alice"))),
        )
        .await
        .unwrap();

        assert!(body.success);
        assert!(store.get_recipe(recipe.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_validates_parameters() {
        let (store, recipe) = seeded().await;
        let state = test_state(store);

        for query in [
            delete_query(None, Some("alice")),
            delete_query(Some("not-a-uuid".to_string()), Some("alice")),
            delete_query(Some(recipe.id.to_string()), None),
        ] {
            let err = delete(State(state.clone()), Query(query))
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::BadRequest(_)));
        }
    }

    #[tokio::test]
    async fn test_filtered_keeps_all_categories() {
        let (store, _) = seeded().await;
        store
            .insert_recipe(NewRecipe {
                creator: UserId::parse("bob").unwrap(),
                recipe_name: "Ramen".to_string(),
                recipe_image: Some("https://img.example/ramen.jpg".to_string()),
                category: "Dinner".to_string(),
                making_time: MakingTime::new(2, 0),
            })
            .await
            .unwrap();
        let state = test_state(store);

        let Json(body) = filtered(
            State(state),
            Query(RecipeFilterQuery {
                category: Some("Dinner".to_string()),
            }),
        )
        .await
        .unwrap();

        assert_eq!(body.recipes.len(), 1);
        assert_eq!(body.recipes[0].recipe_name, "Ramen");
        assert_eq!(body.categories, ["Breakfast", "Dinner"]);
    }

    #[tokio::test]
    async fn test_show_unknown_is_not_found() {
        let (store, _) = seeded().await;
        let state = test_state(store);

        let err = show(State(state.clone()), Path("garbage".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let err = show(State(state), Path(RecipeId::generate().to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
