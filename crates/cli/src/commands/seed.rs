//! Seed the recipe collection from a YAML file.
//!
//! # File format
//!
//! ```yaml
//! recipes:
//!   - creator: cook@example.com
//!     recipeName: Pancakes
//!     recipeImage: https://images.example.com/pancakes.jpg
//!     category: Breakfast
//!     makingTime: { hours: 0, minutes: 25 }
//! ```

use std::path::Path;

use serde::Deserialize;
use tracing::{error, info};

use meal_planner_core::NewRecipe;
use meal_planner_server::db::{self, PgStore, RecipeRepository};

use super::database_url;

/// Parsed seed file.
#[derive(Debug, Deserialize)]
pub struct RecipeSeedFile {
    pub recipes: Vec<NewRecipe>,
}

/// Problems that would make a recipe unusable, one message per problem.
#[must_use]
pub fn validate(file: &RecipeSeedFile) -> Vec<String> {
    let mut errors = Vec::new();

    for (index, recipe) in file.recipes.iter().enumerate() {
        let label = if recipe.recipe_name.trim().is_empty() {
            errors.push(format!("recipe #{}: recipeName is empty", index + 1));
            format!("recipe #{}", index + 1)
        } else {
            recipe.recipe_name.clone()
        };

        if recipe.category.trim().is_empty() {
            errors.push(format!("{label}: category is empty"));
        }
        if recipe.making_time.minutes >= 60 {
            errors.push(format!(
                "{label}: makingTime.minutes must be below 60 (got {})",
                recipe.making_time.minutes
            ));
        }
        if i32::try_from(recipe.making_time.hours).is_err() {
            errors.push(format!("{label}: makingTime.hours is too large"));
        }
    }

    errors
}

/// Seed recipes from a YAML file.
///
/// # Arguments
///
/// * `file_path` - Path to the YAML file
/// * `clear_existing` - If true, delete every existing recipe first
///
/// # Errors
///
/// Returns an error if the file is missing or invalid, the database URL is
/// not set, or database operations fail.
pub async fn recipes(
    file_path: &str,
    clear_existing: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    // Verify file exists
    let path = Path::new(file_path);
    if !path.exists() {
        return Err(format!("File not found: {file_path}").into());
    }

    info!(path = %file_path, "Loading recipes from file");

    // Read and validate YAML before connecting to database
    let content = tokio::fs::read_to_string(path).await?;
    let file: RecipeSeedFile = serde_yaml::from_str(&content)?;

    info!(recipes = file.recipes.len(), "Parsed seed file");

    let errors = validate(&file);
    if !errors.is_empty() {
        error!("Seed file validation failed:");
        for err in &errors {
            error!("  - {err}");
        }
        return Err(format!("{} validation errors found", errors.len()).into());
    }

    let database_url = database_url()?;
    let pool = db::create_pool(&database_url).await?;
    info!("Connected to database");

    let store = PgStore::new(pool);

    if clear_existing {
        let removed = store.clear_recipes().await?;
        info!(removed, "Cleared existing recipes");
    }

    let mut inserted = 0usize;
    for recipe in file.recipes {
        let recipe = store.insert_recipe(recipe).await?;
        info!(recipe_id = %recipe.id, name = %recipe.recipe_name, "Inserted recipe");
        inserted += 1;
    }

    info!("Seeding complete!");
    info!("  Recipes inserted: {inserted}");

    Ok(())
}
