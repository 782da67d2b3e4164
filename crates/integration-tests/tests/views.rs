//! End-to-end tests: client views and HTTP client against a live server.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use serde_json::json;

use meal_planner_client::views::{AllRecipesView, Navigation, ShoppingListView};
use meal_planner_client::{
    ClientError, MealPlannerApi, MemoryIdentityStore, UserIdentity,
};
use meal_planner_core::api::CreateShoppingListRequest;
use meal_planner_core::{
    Amount, CategoryFilter, MakingTime, NewRecipe, RecipeId, ShoppingItem, UserId,
};
use meal_planner_integration_tests::TestApp;
use meal_planner_server::db::RecipeRepository;

fn user(id: &str) -> UserId {
    UserId::parse(id).unwrap()
}

async fn seed_recipes(app: &TestApp) {
    for (name, category, time) in [
        ("Pancakes", "Breakfast", MakingTime::new(0, 25)),
        ("Beef Stew", "Dinner", MakingTime::new(2, 30)),
        ("Roast Chicken", "Dinner", MakingTime::new(1, 0)),
    ] {
        app.store
            .insert_recipe(NewRecipe {
                creator: user("cook@example.com"),
                recipe_name: name.to_string(),
                recipe_image: None,
                category: category.to_string(),
                making_time: time,
            })
            .await
            .unwrap();
    }
}

// =============================================================================
// All-Recipes View
// =============================================================================

#[tokio::test]
async fn test_all_recipes_view_switches_category() {
    let app = TestApp::new();
    seed_recipes(&app).await;
    let api = app.spawn_client().await;

    let mut view = AllRecipesView::new();
    let fetch = view.mount();
    assert!(view.load(&api, fetch).await);
    assert_eq!(view.recipes().len(), 3);
    assert_eq!(view.categories(), ["Breakfast", "Dinner"]);

    let fetch = view
        .select_category(CategoryFilter::parse("Dinner"))
        .unwrap();
    assert!(view.load(&api, fetch).await);

    let names: Vec<&str> = view
        .recipes()
        .iter()
        .map(|r| r.recipe_name.as_str())
        .collect();
    assert_eq!(names, ["Beef Stew", "Roast Chicken"]);
    assert_eq!(view.categories(), ["Breakfast", "Dinner"]);

    let html = view.render().unwrap();
    assert!(html.contains("2 hr 30 min"));
    assert!(html.contains("1 hr"));
    assert!(!html.contains("Pancakes"));
}

#[tokio::test]
async fn test_all_recipes_view_ignores_overtaken_response() {
    let app = TestApp::new();
    seed_recipes(&app).await;
    let api = app.spawn_client().await;

    let mut view = AllRecipesView::new();
    let first = view.mount();
    let second = view
        .select_category(CategoryFilter::parse("Breakfast"))
        .unwrap();

    // Both requests are in flight; the newer one completes first.
    let (first_result, second_result) = tokio::join!(first.run(&api), second.run(&api));
    assert!(view.apply(&second, second_result));
    assert!(!view.apply(&first, first_result));

    assert_eq!(view.recipes().len(), 1);
    assert_eq!(view.recipes()[0].recipe_name, "Pancakes");
}

// =============================================================================
// Shopping-List View
// =============================================================================

#[tokio::test]
async fn test_shopping_list_view_lifecycle() {
    let app = TestApp::new();
    let api = app.spawn_client().await;

    let created = api
        .create_shopping_list(&CreateShoppingListRequest {
            user_id: Some("cook@example.com".to_string()),
            recipe_name: Some("Beef Stew".to_string()),
            items: vec![ShoppingItem {
                ingredient_name: "Carrots".to_string(),
                amount: Amount::Number(3.0),
                unit: "pcs".to_string(),
            }],
        })
        .await
        .unwrap();

    let identity =
        MemoryIdentityStore::signed_in(UserIdentity::new(user("cook@example.com")));
    let mut view = ShoppingListView::new();
    assert_eq!(view.mount(&api, &identity).await, Navigation::Stay);
    assert_eq!(view.lists().len(), 1);

    let html = view.render().unwrap();
    assert!(html.contains("Beef Stew"));
    assert!(html.contains("3 pcs"));
    assert!(!html.contains("Invalid Date"));

    assert!(view.delete(&api, &created.id.to_string()).await);
    assert!(view.lists().is_empty());
    assert!(view.render().unwrap().contains("Your shopping list is empty"));

    // A second delete of the same list fails and leaves the page alone.
    assert!(!view.delete(&api, &created.id.to_string()).await);
}

#[tokio::test]
async fn test_shopping_list_view_redirects_signed_out_user() {
    let app = TestApp::new();
    let api = app.spawn_client().await;

    let mut view = ShoppingListView::new();
    let nav = view
        .mount(&api, &MemoryIdentityStore::signed_out())
        .await;

    assert_eq!(nav, Navigation::Redirect("/auth/login"));
    assert!(view.is_loading());
}

// =============================================================================
// HTTP Client
// =============================================================================

#[tokio::test]
async fn test_http_client_meal_plans() {
    let app = TestApp::new();
    let api = app.spawn_client().await;
    let u1 = user("u1");

    let saved = api.save_meal_plan(&u1, json!({"days": []})).await.unwrap();
    assert_eq!(saved.message, "Meal plan saved successfully!");

    let deleted = api.delete_meal_plan(&u1).await.unwrap();
    assert_eq!(deleted.message, "Meal plan deleted successfully!");

    let err = api.delete_meal_plan(&u1).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    assert!(
        matches!(err, ClientError::Status { ref message, .. } if message == "Meal plan not found.")
    );
}

#[tokio::test]
async fn test_http_client_recipes() {
    let app = TestApp::new();
    seed_recipes(&app).await;
    let api = app.spawn_client().await;

    let listing = api
        .filtered_recipes(&CategoryFilter::parse("Breakfast"))
        .await
        .unwrap();
    let pancakes = &listing.recipes[0];

    assert_eq!(api.recipe(pancakes.id).await.unwrap(), *pancakes);

    let err = api
        .delete_recipe(pancakes.id, &user("someone-else"))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));

    api.delete_recipe(pancakes.id, &user("cook@example.com"))
        .await
        .unwrap();
    let err = api.recipe(pancakes.id).await.unwrap_err();
    assert!(
        matches!(err, ClientError::Status { ref message, .. } if message == "Recipe not found")
    );

    let err = api.recipe(RecipeId::generate()).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
}
