//! All-Recipes page: category sidebar and recipe card grid.
//!
//! Every fetch is tagged with a sequence number when it is issued. Only the
//! response to the most recently issued fetch is applied, so switching
//! categories quickly never leaves the page showing an older selection.

use askama::Template;
use tracing::{debug, warn};

use meal_planner_core::api::FilteredRecipes;
use meal_planner_core::{CategoryFilter, Recipe};

use crate::api::MealPlannerApi;
use crate::error::ClientError;

/// A fetch issued by the view that has not been applied yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFetch {
    seq: u64,
    category: CategoryFilter,
}

impl PendingFetch {
    /// Sequence number; later fetches have larger numbers.
    #[must_use]
    pub const fn seq(&self) -> u64 {
        self.seq
    }

    /// Category the fetch asks for.
    #[must_use]
    pub const fn category(&self) -> &CategoryFilter {
        &self.category
    }

    /// Perform the request.
    ///
    /// # Errors
    ///
    /// Returns whatever the API call returns.
    pub async fn run<A>(&self, api: &A) -> Result<FilteredRecipes, ClientError>
    where
        A: MealPlannerApi + ?Sized,
    {
        api.filtered_recipes(&self.category).await
    }
}

/// State of the All-Recipes page.
#[derive(Debug, Clone)]
pub struct AllRecipesView {
    recipes: Vec<Recipe>,
    categories: Vec<String>,
    selected: CategoryFilter,
    loading: bool,
    error: Option<String>,
    issued: u64,
}

impl Default for AllRecipesView {
    fn default() -> Self {
        Self::new()
    }
}

impl AllRecipesView {
    /// Fresh page: every category selected, loading.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            recipes: Vec::new(),
            categories: Vec::new(),
            selected: CategoryFilter::All,
            loading: true,
            error: None,
            issued: 0,
        }
    }

    /// Issue the initial fetch.
    pub fn mount(&mut self) -> PendingFetch {
        self.begin_fetch()
    }

    /// Change the selected category.
    ///
    /// Returns the fetch to run, or `None` if `category` is already selected.
    pub fn select_category(&mut self, category: CategoryFilter) -> Option<PendingFetch> {
        if category == self.selected {
            return None;
        }
        self.selected = category;
        Some(self.begin_fetch())
    }

    fn begin_fetch(&mut self) -> PendingFetch {
        self.issued += 1;
        self.loading = true;
        PendingFetch {
            seq: self.issued,
            category: self.selected.clone(),
        }
    }

    /// Apply the outcome of `fetch`.
    ///
    /// Returns `false` (leaving the state untouched) if a newer fetch has
    /// been issued since.
    pub fn apply(
        &mut self,
        fetch: &PendingFetch,
        result: Result<FilteredRecipes, ClientError>,
    ) -> bool {
        if fetch.seq != self.issued {
            debug!(
                seq = fetch.seq,
                latest = self.issued,
                category = %fetch.category,
                "Discarding stale recipe response"
            );
            return false;
        }

        match result {
            Ok(body) => {
                self.recipes = body.recipes;
                self.categories = body.categories;
                self.error = None;
            }
            Err(e) => {
                warn!(error = %e, category = %fetch.category, "Failed to fetch recipes");
                self.error = Some(fetch_error_message(&e));
            }
        }
        self.loading = false;
        true
    }

    /// Run `fetch` against `api` and apply the result.
    pub async fn load<A>(&mut self, api: &A, fetch: PendingFetch) -> bool
    where
        A: MealPlannerApi + ?Sized,
    {
        let result = fetch.run(api).await;
        self.apply(&fetch, result)
    }

    #[must_use]
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    #[must_use]
    pub const fn selected(&self) -> &CategoryFilter {
        &self.selected
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Render the page.
    ///
    /// # Errors
    ///
    /// Returns `askama::Error` if the template fails to render.
    pub fn render(&self) -> Result<String, askama::Error> {
        let all = CategoryButton {
            value: CategoryFilter::ALL,
            label: "All Categories",
            selected: self.selected == CategoryFilter::All,
        };
        let named = self.categories.iter().map(|category| CategoryButton {
            value: category,
            label: category,
            selected: matches!(&self.selected, CategoryFilter::Named(name) if name == category),
        });

        AllRecipesPage {
            loading: self.loading,
            error: self.error.as_deref(),
            categories: std::iter::once(all).chain(named).collect(),
            recipes: self.recipes.iter().map(RecipeCard::from).collect(),
        }
        .render()
    }
}

/// Message shown when a fetch fails.
fn fetch_error_message(err: &ClientError) -> String {
    match err {
        ClientError::Status { status, .. } => format!(
            "Error fetching recipes: {}",
            status.canonical_reason().unwrap_or_else(|| status.as_str())
        ),
        other => other.to_string(),
    }
}

#[derive(Template)]
#[template(path = "all_recipes.html")]
struct AllRecipesPage<'a> {
    loading: bool,
    error: Option<&'a str>,
    categories: Vec<CategoryButton<'a>>,
    recipes: Vec<RecipeCard<'a>>,
}

struct CategoryButton<'a> {
    value: &'a str,
    label: &'a str,
    selected: bool,
}

struct RecipeCard<'a> {
    href: String,
    /// Empty when the recipe has no image.
    image: &'a str,
    name: &'a str,
    making_time: String,
}

impl<'a> From<&'a Recipe> for RecipeCard<'a> {
    fn from(recipe: &'a Recipe) -> Self {
        Self {
            href: recipe.detail_path(),
            image: recipe.recipe_image.as_deref().unwrap_or_default(),
            name: &recipe.recipe_name,
            making_time: recipe.making_time.to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use reqwest::StatusCode;

    use meal_planner_core::{MakingTime, RecipeId, UserId};

    use super::*;
    use crate::models::ShoppingListEntry;

    fn recipe(name: &str, category: &str, image: Option<&str>, time: MakingTime) -> Recipe {
        Recipe {
            id: RecipeId::generate(),
            creator: UserId::parse("cook@example.com").unwrap(),
            recipe_name: name.to_string(),
            recipe_image: image.map(str::to_string),
            category: category.to_string(),
            making_time: time,
        }
    }

    fn listing(recipes: Vec<Recipe>) -> FilteredRecipes {
        FilteredRecipes {
            recipes,
            categories: vec!["Breakfast".to_string(), "Dinner".to_string()],
        }
    }

    /// Serves canned listings per category and records what was asked for.
    #[derive(Default)]
    struct FakeApi {
        listings: HashMap<String, FilteredRecipes>,
        requests: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl MealPlannerApi for FakeApi {
        async fn filtered_recipes(
            &self,
            category: &CategoryFilter,
        ) -> Result<FilteredRecipes, ClientError> {
            let key = category.as_query_value().to_string();
            self.requests.lock().unwrap().push(key.clone());
            self.listings
                .get(&key)
                .cloned()
                .ok_or_else(|| ClientError::Status {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: "Failed to fetch recipes".to_string(),
                })
        }

        async fn shopping_lists(
            &self,
            _user_id: &UserId,
        ) -> Result<Vec<ShoppingListEntry>, ClientError> {
            Ok(Vec::new())
        }

        async fn delete_shopping_list(
            &self,
            _list_id: &str,
            _user_id: &UserId,
        ) -> Result<(), ClientError> {
            Ok(())
        }
    }

    #[test]
    fn test_new_view_is_loading() {
        let view = AllRecipesView::new();
        assert!(view.is_loading());
        assert_eq!(view.selected(), &CategoryFilter::All);
        assert!(view.render().unwrap().contains("alt=\"loading\""));
    }

    #[tokio::test]
    async fn test_mount_loads_all_recipes() {
        let mut api = FakeApi::default();
        api.listings.insert(
            "all".to_string(),
            listing(vec![
                recipe(
                    "Pancakes",
                    "Breakfast",
                    Some("https://img.example/p.jpg"),
                    MakingTime::new(0, 25),
                ),
                recipe("Roast", "Dinner", None, MakingTime::new(2, 15)),
            ]),
        );

        let mut view = AllRecipesView::new();
        let fetch = view.mount();
        assert!(view.load(&api, fetch).await);

        assert!(!view.is_loading());
        assert_eq!(view.recipes().len(), 2);
        assert_eq!(view.categories(), ["Breakfast", "Dinner"]);
        assert_eq!(*api.requests.lock().unwrap(), ["all"]);

        let html = view.render().unwrap();
        assert!(html.contains("All Categories"));
        assert!(html.contains("25 min"));
        assert!(html.contains("2 hr 15 min"));
        assert!(html.contains("No Image"));
        assert!(html.contains("https://img.example/p.jpg"));
        assert!(html.contains(&view.recipes()[1].detail_path()));
        assert!(!html.contains("No recipes found in this category."));
    }

    #[tokio::test]
    async fn test_selecting_same_category_does_not_refetch() {
        let mut view = AllRecipesView::new();
        let _ = view.mount();
        assert!(view.select_category(CategoryFilter::All).is_none());

        let fetch = view
            .select_category(CategoryFilter::parse("Dinner"))
            .unwrap();
        assert_eq!(fetch.category(), &CategoryFilter::parse("Dinner"));
        assert!(view.is_loading());
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut view = AllRecipesView::new();
        let first = view.mount();
        let second = view
            .select_category(CategoryFilter::parse("Dinner"))
            .unwrap();
        assert!(second.seq() > first.seq());

        let dinner = listing(vec![recipe("Roast", "Dinner", None, MakingTime::new(1, 0))]);
        assert!(view.apply(&second, Ok(dinner)));

        // The older "all" response arrives late and must not win.
        let everything = listing(vec![
            recipe("Pancakes", "Breakfast", None, MakingTime::new(0, 20)),
            recipe("Roast", "Dinner", None, MakingTime::new(1, 0)),
        ]);
        assert!(!view.apply(&first, Ok(everything)));

        assert_eq!(view.recipes().len(), 1);
        assert_eq!(view.recipes()[0].recipe_name, "Roast");
        assert!(!view.is_loading());
    }

    #[test]
    fn test_stale_response_keeps_loading() {
        let mut view = AllRecipesView::new();
        let first = view.mount();
        let _second = view
            .select_category(CategoryFilter::parse("Dinner"))
            .unwrap();

        assert!(!view.apply(&first, Ok(listing(Vec::new()))));
        assert!(view.is_loading());
    }

    #[tokio::test]
    async fn test_failed_fetch_shows_status_text() {
        let api = FakeApi::default();
        let mut view = AllRecipesView::new();
        let fetch = view.mount();
        view.load(&api, fetch).await;

        assert!(!view.is_loading());
        assert_eq!(
            view.error(),
            Some("Error fetching recipes: Internal Server Error")
        );
        assert!(
            view.render()
                .unwrap()
                .contains("Error: Error fetching recipes: Internal Server Error")
        );
    }

    #[test]
    fn test_empty_category_message_and_highlight() {
        let mut view = AllRecipesView::new();
        let _ = view.mount();
        let fetch = view
            .select_category(CategoryFilter::parse("Dinner"))
            .unwrap();
        view.apply(&fetch, Ok(listing(Vec::new())));

        let html = view.render().unwrap();
        assert!(html.contains("No recipes found in this category."));
        assert!(html.contains(r#"data-category="Dinner" class="selected""#));
        assert!(!html.contains(r#"data-category="all" class="selected""#));
    }
}
