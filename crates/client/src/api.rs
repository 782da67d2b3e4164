//! HTTP client for the Meal Planner JSON API.
//!
//! Views talk to the API through [`MealPlannerApi`] so they can be driven by
//! a fake in tests. [`HttpApi`] is the `reqwest` implementation and also
//! exposes the endpoints no view uses (meal plans, recipe deletion, shopping
//! list creation).

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use meal_planner_core::api::{
    CreateShoppingListRequest, DeleteMealPlanRequest, ErrorResponse, FilteredRecipes,
    MessageResponse, SaveMealPlanRequest, SuccessResponse, paths,
};
use meal_planner_core::{CategoryFilter, Recipe, RecipeId, ShoppingList, UserId};

use crate::error::ClientError;
use crate::models::ShoppingListEntry;

/// Operations the page views depend on.
#[async_trait]
pub trait MealPlannerApi: Send + Sync {
    /// Recipes in `category` plus every known category.
    async fn filtered_recipes(
        &self,
        category: &CategoryFilter,
    ) -> Result<FilteredRecipes, ClientError>;

    /// A user's shopping lists, newest first.
    ///
    /// A body that is not a JSON array is reported as
    /// [`ClientError::UnexpectedPayload`].
    async fn shopping_lists(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<ShoppingListEntry>, ClientError>;

    /// Delete one of a user's shopping lists.
    async fn delete_shopping_list(
        &self,
        list_id: &str,
        user_id: &UserId,
    ) -> Result<(), ClientError>;
}

/// `reqwest` client for a running Meal Planner server.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpApi {
    /// Create a client for the server at `base_url` (e.g. `http://127.0.0.1:3000`).
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Url` if `base_url` is not an absolute URL.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Like [`HttpApi::new`], reusing an existing `reqwest::Client`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Url` if `base_url` is not an absolute URL.
    pub fn with_client(base_url: &str, client: reqwest::Client) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase));
        }

        Ok(Self { client, base_url })
    }

    /// Base URL requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, ClientError> {
        let mut url = self.base_url.join(path)?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Fetch a single recipe.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Status` with 404 if the recipe does not exist.
    #[instrument(skip(self))]
    pub async fn recipe(&self, id: RecipeId) -> Result<Recipe, ClientError> {
        let url = self.endpoint(&format!("{}/{id}", paths::RECIPES), &[])?;
        let response = self.client.get(url).send().await?;
        read_json(response).await
    }

    /// Delete a recipe owned by `creator`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Status` with 404 if no recipe matches both.
    #[instrument(skip(self))]
    pub async fn delete_recipe(&self, id: RecipeId, creator: &UserId) -> Result<(), ClientError> {
        let id = id.to_string();
        let url = self.endpoint(
            paths::RECIPES_DELETE,
            &[("recipeId", id.as_str()), ("creator", creator.as_str())],
        )?;
        let response = self.client.delete(url).send().await?;
        let body: SuccessResponse = read_json(response).await?;
        if body.success {
            Ok(())
        } else {
            Err(ClientError::UnexpectedPayload(
                "recipe delete did not report success".to_string(),
            ))
        }
    }

    /// Save (insert or replace) a user's meal plan.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Status` if the server rejects the request.
    #[instrument(skip(self, meal_plan))]
    pub async fn save_meal_plan(
        &self,
        user_id: &UserId,
        meal_plan: serde_json::Value,
    ) -> Result<MessageResponse, ClientError> {
        let url = self.endpoint(paths::MEAL_PLANNER, &[])?;
        let body = SaveMealPlanRequest {
            user_id: Some(user_id.to_string()),
            meal_plan: Some(meal_plan),
        };
        let response = self.client.post(url).json(&body).send().await?;
        read_json(response).await
    }

    /// Delete a user's meal plan.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Status` with 404 if the user has no meal plan.
    #[instrument(skip(self))]
    pub async fn delete_meal_plan(&self, user_id: &UserId) -> Result<MessageResponse, ClientError> {
        let url = self.endpoint(paths::MEAL_PLANNER, &[])?;
        let body = DeleteMealPlanRequest {
            user_id: Some(user_id.to_string()),
        };
        let response = self.client.delete(url).json(&body).send().await?;
        read_json(response).await
    }

    /// Store a new shopping list.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Status` if the server rejects the request.
    #[instrument(skip(self, request))]
    pub async fn create_shopping_list(
        &self,
        request: &CreateShoppingListRequest,
    ) -> Result<ShoppingList, ClientError> {
        let url = self.endpoint(paths::SHOPPING_LIST_CREATE, &[])?;
        let response = self.client.post(url).json(request).send().await?;
        read_json(response).await
    }
}

#[async_trait]
impl MealPlannerApi for HttpApi {
    #[instrument(skip(self))]
    async fn filtered_recipes(
        &self,
        category: &CategoryFilter,
    ) -> Result<FilteredRecipes, ClientError> {
        let url = self.endpoint(
            paths::RECIPES_FILTERED,
            &[("category", category.as_query_value())],
        )?;
        let response = self.client.get(url).send().await?;
        read_json(response).await
    }

    #[instrument(skip(self))]
    async fn shopping_lists(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<ShoppingListEntry>, ClientError> {
        let url = self.endpoint(paths::SHOPPING_LIST_DISPLAY, &[("userId", user_id.as_str())])?;
        let response = self.client.get(url).send().await?;
        let body: serde_json::Value = read_json(response).await?;

        if !body.is_array() {
            return Err(ClientError::UnexpectedPayload(format!(
                "expected an array of shopping lists, got {}",
                json_kind(&body)
            )));
        }

        serde_json::from_value(body).map_err(|e| ClientError::UnexpectedPayload(e.to_string()))
    }

    #[instrument(skip(self))]
    async fn delete_shopping_list(
        &self,
        list_id: &str,
        user_id: &UserId,
    ) -> Result<(), ClientError> {
        let url = self.endpoint(
            paths::SHOPPING_LIST_DELETE,
            &[("listId", list_id), ("userId", user_id.as_str())],
        )?;
        let response = self.client.delete(url).send().await?;
        let _: MessageResponse = read_json(response).await?;
        Ok(())
    }
}

/// Turn a non-success response into `ClientError::Status`, otherwise decode
/// the JSON body.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    debug!(status = %status, url = %response.url(), "API response");

    if !status.is_success() {
        let text = response.text().await.unwrap_or_else(|e| {
            debug!(error = %e, status = %status, "Failed to read error body");
            String::new()
        });
        return Err(ClientError::Status {
            status,
            message: error_message(status, &text),
        });
    }

    Ok(response.json().await?)
}

/// The `error` field of an API error body, or the status reason phrase.
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body).map_or_else(
        |_| status.canonical_reason().unwrap_or("Unknown").to_string(),
        |body| body.error,
    )
}

const fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_relative_url() {
        assert!(matches!(
            HttpApi::new("localhost:3000/api"),
            Err(ClientError::Url(_))
        ));
        assert!(matches!(HttpApi::new("/api"), Err(ClientError::Url(_))));
    }

    #[test]
    fn test_endpoint_encodes_query() {
        let api = HttpApi::new("http://127.0.0.1:3000").unwrap();
        let url = api
            .endpoint(paths::RECIPES_FILTERED, &[("category", "Soups & Stews")])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:3000/api/recipes/filtered?category=Soups+%26+Stews"
        );
    }

    #[test]
    fn test_error_message_prefers_body() {
        assert_eq!(
            error_message(StatusCode::NOT_FOUND, r#"{"error":"Recipe not found"}"#),
            "Recipe not found"
        );
        assert_eq!(
            error_message(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>"),
            "Internal Server Error"
        );
        // Unreadable body.
        assert_eq!(error_message(StatusCode::BAD_GATEWAY, ""), "Bad Gateway");
    }
}
