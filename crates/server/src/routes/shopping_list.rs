//! Shopping list route handlers.

use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use tracing::instrument;

use meal_planner_core::api::{
    CreateShoppingListRequest, MessageResponse, ShoppingListDeleteQuery, ShoppingListQuery,
};
use meal_planner_core::{NewShoppingList, ShoppingList, ShoppingListId, UserId};

use crate::error::{AppError, DatabaseContext, Result};
use crate::state::AppState;

fn require_user(user_id: Option<&str>) -> Result<UserId> {
    UserId::from_optional(user_id)
        .map_err(|_| AppError::BadRequest("User ID is required".to_string()))
}

/// List a user's shopping lists, newest first.
///
/// GET /api/shopping-list/display?userId=<user>
///
/// # Errors
///
/// - 400 if `userId` is missing
/// - 500 if the read fails
#[instrument(skip(state))]
pub async fn display(
    State(state): State<AppState>,
    Query(query): Query<ShoppingListQuery>,
) -> Result<Json<Vec<ShoppingList>>> {
    let user_id = require_user(query.user_id.as_deref())?;

    let lists = state
        .store()
        .list_shopping_lists(&user_id)
        .await
        .context("Failed to fetch shopping lists")?;

    tracing::debug!(user_id = %user_id, count = lists.len(), "Shopping lists listed");
    Ok(Json(lists))
}

/// Delete one of a user's shopping lists.
///
/// DELETE /api/shopping-list/delete?listId=<id>&userId=<user>
///
/// # Errors
///
/// - 400 if either parameter is missing or `listId` is malformed
/// - 404 if the user owns no list with that ID
/// - 500 if the write fails
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Query(query): Query<ShoppingListDeleteQuery>,
) -> Result<Json<MessageResponse>> {
    let list_id = query
        .list_id
        .as_deref()
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("List ID is required".to_string()))?;
    let id = ShoppingListId::parse(list_id)
        .map_err(|e| AppError::BadRequest(format!("Invalid list ID: {e}")))?;
    let user_id = require_user(query.user_id.as_deref())?;

    let deleted = state
        .store()
        .delete_shopping_list(id, &user_id)
        .await
        .context("Failed to delete shopping list")?;

    if !deleted {
        return Err(AppError::NotFound("Shopping list not found".to_string()));
    }

    tracing::info!(list_id = %id, user_id = %user_id, "Shopping list deleted");
    Ok(Json(MessageResponse::new(
        "Shopping list deleted successfully",
    )))
}

/// Store a new shopping list for a user.
///
/// POST /api/shopping-list/create
///
/// # Errors
///
/// - 400 if `userId` or `recipeName` is missing
/// - 500 if the write fails
#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateShoppingListRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShoppingList>)> {
    let Json(request) =
        payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    let user_id = require_user(request.user_id.as_deref())?;
    let recipe_name = request
        .recipe_name
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| AppError::BadRequest("Recipe name is required".to_string()))?;

    let list = state
        .store()
        .create_shopping_list(NewShoppingList {
            user_id,
            recipe_name,
            items: request.items,
        })
        .await
        .context("Failed to create shopping list")?;

    tracing::info!(list_id = %list.id, user_id = %list.user_id, "Shopping list created");
    Ok((StatusCode::CREATED, Json(list)))
}
