//! Meal plan route handlers.
//!
//! One endpoint, two methods: `POST` upserts the caller's plan and `DELETE`
//! removes it. Everything else is answered with 405.

use std::num::FpCategory;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::Method,
};
use chrono::Utc;
use serde_json::Value;
use tracing::instrument;

use meal_planner_core::UserId;
use meal_planner_core::api::{DeleteMealPlanRequest, MessageResponse, SaveMealPlanRequest};

use crate::error::{AppError, DatabaseContext, Result};
use crate::state::AppState;

/// Methods this endpoint answers, as advertised in the `Allow` header.
pub const ALLOWED_METHODS: &str = "POST, DELETE";

/// `null`, `false`, `0` and `""` count as no plan at all.
fn is_blank_plan(plan: &Value) -> bool {
    match plan {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(n) => n.as_f64().is_some_and(|n| n.classify() == FpCategory::Zero),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Save (insert or replace) a user's meal plan.
///
/// POST /api/meal-planner/meal-planner
///
/// # Errors
///
/// - 400 if `userId` or `mealPlan` is missing or blank
/// - 500 if the write fails
#[instrument(skip_all)]
pub async fn save(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SaveMealPlanRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>> {
    let request = payload.map_or_else(
        |rejection| {
            tracing::debug!(%rejection, "Unreadable meal plan body");
            SaveMealPlanRequest::default()
        },
        |Json(request)| request,
    );

    let (Ok(user_id), Some(meal_plan)) = (
        UserId::from_optional(request.user_id.as_deref()),
        request.meal_plan.filter(|plan| !is_blank_plan(plan)),
    ) else {
        return Err(AppError::BadRequest("Invalid data provided.".to_string()));
    };

    state
        .store()
        .upsert_meal_plan(&user_id, &meal_plan, Utc::now())
        .await
        .context("Failed to save meal plan.")?;

    tracing::info!(user_id = %user_id, "Meal plan saved");
    Ok(Json(MessageResponse::new("Meal plan saved successfully!")))
}

/// Delete a user's meal plan.
///
/// DELETE /api/meal-planner/meal-planner
///
/// # Errors
///
/// - 400 if `userId` is missing
/// - 404 if the user has no meal plan
/// - 500 if the write fails
#[instrument(skip_all)]
pub async fn delete(
    State(state): State<AppState>,
    payload: std::result::Result<Json<DeleteMealPlanRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>> {
    let request = payload.map_or_else(
        |rejection| {
            tracing::debug!(%rejection, "Unreadable meal plan body");
            DeleteMealPlanRequest::default()
        },
        |Json(request)| request,
    );

    let user_id = UserId::from_optional(request.user_id.as_deref())
        .map_err(|_| AppError::BadRequest("User ID is required.".to_string()))?;

    let deleted = state
        .store()
        .delete_meal_plan(&user_id)
        .await
        .context("Failed to delete meal plan.")?;

    if !deleted {
        return Err(AppError::NotFound("Meal plan not found.".to_string()));
    }

    tracing::info!(user_id = %user_id, "Meal plan deleted");
    Ok(Json(MessageResponse::new("Meal plan deleted successfully!")))
}

/// Reject any method other than `POST` and `DELETE`.
pub async fn method_not_allowed(method: Method) -> AppError {
    AppError::MethodNotAllowed {
        message: format!("Method {method} not allowed"),
        allow: ALLOWED_METHODS,
    }
}
