//! Page views.
//!
//! Each view owns the state of one page, updates it from API responses and
//! renders it to HTML. Views never navigate themselves; a view that needs to
//! leave the page returns a [`Navigation`] for the caller to follow.

pub mod all_recipes;
pub mod shopping_list;

pub use all_recipes::{AllRecipesView, PendingFetch};
pub use shopping_list::{ShoppingListView, format_created_at};

/// Where the caller should send the user next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Stay on the page.
    Stay,
    /// Redirect to the given path.
    Redirect(&'static str),
}
