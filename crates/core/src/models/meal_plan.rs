//! Meal plan documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::UserId;

/// A user's meal plan. There is at most one per user.
///
/// The plan body is opaque to the server; the front-end decides its shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlan {
    pub user_id: UserId,
    pub meal_plan: serde_json::Value,
    pub updated_at: DateTime<Utc>,
}
