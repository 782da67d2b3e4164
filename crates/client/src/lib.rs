//! Meal Planner client library.
//!
//! - [`api`] - HTTP client for the JSON API ([`HttpApi`]) behind the
//!   [`MealPlannerApi`] trait
//! - [`identity`] - where views look up the signed-in user
//! - [`views`] - All-Recipes and Shopping-List page state, rendered to HTML
//!   with Askama

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod error;
pub mod identity;
pub mod models;
pub mod views;

pub use api::{HttpApi, MealPlannerApi};
pub use error::ClientError;
pub use identity::{IdentityStore, MemoryIdentityStore, UserIdentity};
pub use models::ShoppingListEntry;
