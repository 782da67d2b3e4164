//! `mp-cli` subcommands.

pub mod migrate;
pub mod seed;

use secrecy::SecretString;

/// Database URL from the environment, loading `.env` first.
///
/// # Errors
///
/// Returns an error if neither `MEAL_PLANNER_DATABASE_URL` nor `DATABASE_URL`
/// is set.
pub fn database_url() -> Result<SecretString, &'static str> {
    // Load .env file if present (ignore errors if not found)
    dotenvy::dotenv().ok();

    std::env::var("MEAL_PLANNER_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| "MEAL_PLANNER_DATABASE_URL not set")
}
