//! Shopping-List page: the signed-in user's lists, each removable.

use askama::Template;
use chrono::{DateTime, Utc};
use tracing::{info, warn};

use meal_planner_core::ShoppingItem;
use meal_planner_core::api::paths;

use crate::api::MealPlannerApi;
use crate::identity::{IdentityStore, UserIdentity};
use crate::models::ShoppingListEntry;
use crate::views::Navigation;

/// Format a creation timestamp as `October 19, 2026, 03:04 PM` (UTC).
///
/// Missing or unparsable values give `Invalid Date`.
#[must_use]
pub fn format_created_at(raw: Option<&str>) -> String {
    raw.and_then(|raw| DateTime::parse_from_rfc3339(raw.trim()).ok())
        .map_or_else(
            || "Invalid Date".to_string(),
            |date| {
                date.with_timezone(&Utc)
                    .format("%B %-d, %Y, %I:%M %p")
                    .to_string()
            },
        )
}

/// State of the Shopping-List page.
#[derive(Debug, Clone)]
pub struct ShoppingListView {
    lists: Vec<ShoppingListEntry>,
    loading: bool,
    user: Option<UserIdentity>,
}

impl Default for ShoppingListView {
    fn default() -> Self {
        Self::new()
    }
}

impl ShoppingListView {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            lists: Vec::new(),
            loading: true,
            user: None,
        }
    }

    /// Load the signed-in user's lists.
    ///
    /// Without a signed-in user nothing is fetched and the caller is sent to
    /// the login page. Any failure leaves the page with no lists.
    pub async fn mount<A, I>(&mut self, api: &A, identity: &I) -> Navigation
    where
        A: MealPlannerApi + ?Sized,
        I: IdentityStore + ?Sized,
    {
        let Some(user) = identity.current_user() else {
            info!("No signed-in user, redirecting to login");
            return Navigation::Redirect(paths::LOGIN_PAGE);
        };

        match api.shopping_lists(user.user_id()).await {
            Ok(lists) => self.lists = lists,
            Err(e) => {
                warn!(error = %e, user_id = %user.user_id(), "Failed to fetch shopping lists");
                self.lists.clear();
            }
        }

        self.user = Some(user);
        self.loading = false;
        Navigation::Stay
    }

    /// Delete a list and drop it from the page.
    ///
    /// Returns `false` and keeps the page as it was if the delete fails.
    pub async fn delete<A>(&mut self, api: &A, list_id: &str) -> bool
    where
        A: MealPlannerApi + ?Sized,
    {
        let Some(user) = &self.user else {
            warn!(list_id, "Delete requested before a user was loaded");
            return false;
        };

        match api.delete_shopping_list(list_id, user.user_id()).await {
            Ok(()) => {
                self.lists.retain(|list| list.id != list_id);
                true
            }
            Err(e) => {
                warn!(error = %e, list_id, "Failed to delete shopping list");
                false
            }
        }
    }

    #[must_use]
    pub fn lists(&self) -> &[ShoppingListEntry] {
        &self.lists
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Render the page.
    ///
    /// # Errors
    ///
    /// Returns `askama::Error` if the template fails to render.
    pub fn render(&self) -> Result<String, askama::Error> {
        ShoppingListPage {
            loading: self.loading,
            lists: self.lists.iter().map(ListCard::from).collect(),
        }
        .render()
    }
}

#[derive(Template)]
#[template(path = "shopping_list.html")]
struct ShoppingListPage<'a> {
    loading: bool,
    lists: Vec<ListCard<'a>>,
}

struct ListCard<'a> {
    id: &'a str,
    recipe_name: &'a str,
    created_at: String,
    items: Vec<ItemRow<'a>>,
}

impl<'a> From<&'a ShoppingListEntry> for ListCard<'a> {
    fn from(list: &'a ShoppingListEntry) -> Self {
        Self {
            id: &list.id,
            recipe_name: &list.recipe_name,
            created_at: format_created_at(list.created_at.as_deref()),
            items: list.items.iter().map(ItemRow::from).collect(),
        }
    }
}

struct ItemRow<'a> {
    ingredient_name: &'a str,
    /// `amount unit`, e.g. `1/2 cup`.
    quantity: String,
}

impl<'a> From<&'a ShoppingItem> for ItemRow<'a> {
    fn from(item: &'a ShoppingItem) -> Self {
        Self {
            ingredient_name: &item.ingredient_name,
            quantity: format!("{} {}", item.amount, item.unit)
                .trim()
                .to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use reqwest::StatusCode;

    use meal_planner_core::api::FilteredRecipes;
    use meal_planner_core::{Amount, CategoryFilter, UserId};

    use super::*;
    use crate::error::ClientError;
    use crate::identity::MemoryIdentityStore;

    fn entry(id: &str, recipe_name: &str, created_at: &str) -> ShoppingListEntry {
        ShoppingListEntry {
            id: id.to_string(),
            recipe_name: recipe_name.to_string(),
            items: vec![
                ShoppingItem {
                    ingredient_name: "Flour".to_string(),
                    amount: Amount::Number(2.0),
                    unit: "cups".to_string(),
                },
                ShoppingItem {
                    ingredient_name: "Butter".to_string(),
                    amount: Amount::Text("1/2".to_string()),
                    unit: "stick".to_string(),
                },
            ],
            created_at: Some(created_at.to_string()),
        }
    }

    enum Display {
        Lists(Vec<ShoppingListEntry>),
        NotAnArray,
    }

    struct FakeApi {
        display: Display,
        fail_deletes: bool,
        display_calls: Mutex<Vec<String>>,
        deletes: Mutex<Vec<(String, String)>>,
    }

    impl FakeApi {
        fn new(display: Display) -> Self {
            Self {
                display,
                fail_deletes: false,
                display_calls: Mutex::new(Vec::new()),
                deletes: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl MealPlannerApi for FakeApi {
        async fn filtered_recipes(
            &self,
            _category: &CategoryFilter,
        ) -> Result<FilteredRecipes, ClientError> {
            Ok(FilteredRecipes::default())
        }

        async fn shopping_lists(
            &self,
            user_id: &UserId,
        ) -> Result<Vec<ShoppingListEntry>, ClientError> {
            self.display_calls
                .lock()
                .unwrap()
                .push(user_id.to_string());
            match &self.display {
                Display::Lists(lists) => Ok(lists.clone()),
                Display::NotAnArray => Err(ClientError::UnexpectedPayload(
                    "expected an array of shopping lists, got an object".to_string(),
                )),
            }
        }

        async fn delete_shopping_list(
            &self,
            list_id: &str,
            user_id: &UserId,
        ) -> Result<(), ClientError> {
            self.deletes
                .lock()
                .unwrap()
                .push((list_id.to_string(), user_id.to_string()));
            if self.fail_deletes {
                Err(ClientError::Status {
                    status: StatusCode::NOT_FOUND,
                    message: "Shopping list not found".to_string(),
                })
            } else {
                Ok(())
            }
        }
    }

    fn signed_in() -> MemoryIdentityStore {
        MemoryIdentityStore::signed_in(UserIdentity::new(
            UserId::parse("cook@example.com").unwrap(),
        ))
    }

    #[test]
    fn test_format_created_at() {
        assert_eq!(
            format_created_at(Some("2026-10-19T15:04:05.000Z")),
            "October 19, 2026, 03:04 PM"
        );
        assert_eq!(
            format_created_at(Some("2026-03-01T09:30:00+02:00")),
            "March 1, 2026, 07:30 AM"
        );
        assert_eq!(format_created_at(Some("not a date")), "Invalid Date");
        assert_eq!(format_created_at(None), "Invalid Date");
    }

    #[test]
    fn test_item_quantity_skips_blank_parts() {
        let item = |amount: Amount, unit: &str| ShoppingItem {
            ingredient_name: "Salt".to_string(),
            amount,
            unit: unit.to_string(),
        };

        assert_eq!(ItemRow::from(&item(Amount::default(), "pinch")).quantity, "pinch");
        assert_eq!(ItemRow::from(&item(Amount::Number(3.0), "")).quantity, "3");
        assert_eq!(ItemRow::from(&item(Amount::default(), "")).quantity, "");
    }

    #[tokio::test]
    async fn test_mount_without_user_redirects() {
        let api = FakeApi::new(Display::Lists(Vec::new()));
        let mut view = ShoppingListView::new();

        let nav = view.mount(&api, &MemoryIdentityStore::signed_out()).await;

        assert_eq!(nav, Navigation::Redirect("/auth/login"));
        assert!(api.display_calls.lock().unwrap().is_empty());
        assert!(view.render().unwrap().contains("Loading..."));
    }

    #[tokio::test]
    async fn test_mount_renders_lists() {
        let api = FakeApi::new(Display::Lists(vec![entry(
            "list-1",
            "Pancakes",
            "2026-10-19T15:04:05Z",
        )]));
        let mut view = ShoppingListView::new();

        assert_eq!(view.mount(&api, &signed_in()).await, Navigation::Stay);
        assert_eq!(*api.display_calls.lock().unwrap(), ["cook@example.com"]);

        let html = view.render().unwrap();
        assert!(html.contains("Pancakes"));
        assert!(html.contains("October 19, 2026, 03:04 PM"));
        assert!(html.contains("2 cups"));
        assert!(html.contains("1/2 stick"));
        assert!(html.contains("Remove"));
        assert!(html.contains(r#"data-list-id="list-1""#));
        assert!(!html.contains("Loading..."));
    }

    #[tokio::test]
    async fn test_non_array_body_resets_to_empty() {
        let api = FakeApi::new(Display::NotAnArray);
        let mut view = ShoppingListView::new();

        assert_eq!(view.mount(&api, &signed_in()).await, Navigation::Stay);

        assert!(!view.is_loading());
        assert!(view.lists().is_empty());
        assert!(view.render().unwrap().contains("Your shopping list is empty"));
    }

    #[tokio::test]
    async fn test_delete_removes_list() {
        let api = FakeApi::new(Display::Lists(vec![
            entry("list-1", "Pancakes", "2026-10-19T15:04:05Z"),
            entry("list-2", "Chili", "2026-10-18T10:00:00Z"),
        ]));
        let mut view = ShoppingListView::new();
        view.mount(&api, &signed_in()).await;

        assert!(view.delete(&api, "list-1").await);

        let ids: Vec<&str> = view.lists().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["list-2"]);
        assert_eq!(
            *api.deletes.lock().unwrap(),
            [("list-1".to_string(), "cook@example.com".to_string())]
        );
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_list() {
        let mut api = FakeApi::new(Display::Lists(vec![entry(
            "list-1",
            "Pancakes",
            "2026-10-19T15:04:05Z",
        )]));
        api.fail_deletes = true;
        let mut view = ShoppingListView::new();
        view.mount(&api, &signed_in()).await;

        assert!(!view.delete(&api, "list-1").await);
        assert_eq!(view.lists().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_before_mount_is_ignored() {
        let api = FakeApi::new(Display::Lists(Vec::new()));
        let mut view = ShoppingListView::new();

        assert!(!view.delete(&api, "list-1").await);
        assert!(api.deletes.lock().unwrap().is_empty());
    }
}
