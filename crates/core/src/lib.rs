//! Meal Planner Core - Shared types library.
//!
//! This crate provides common types used across all Meal Planner components:
//! - `server` - JSON API over the recipe, meal plan, and shopping list collections
//! - `client` - HTTP client and page view state for the web front-end
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, user identifiers, and recipe values
//! - [`models`] - Stored documents (recipes, meal plans, shopping lists)
//! - [`api`] - Request/response payloads and endpoint paths

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod models;
pub mod types;

pub use models::*;
pub use types::*;
