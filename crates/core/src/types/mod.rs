//! Core types for Meal Planner.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod amount;
pub mod category;
pub mod id;
pub mod making_time;
pub mod user;

pub use amount::Amount;
pub use category::CategoryFilter;
pub use id::*;
pub use making_time::MakingTime;
pub use user::{UserId, UserIdError};
