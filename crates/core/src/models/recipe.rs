//! Recipe documents.

use serde::{Deserialize, Serialize};

use crate::types::{MakingTime, RecipeId, UserId};

/// A stored recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(rename = "_id")]
    pub id: RecipeId,
    /// User who created the recipe; only they may delete it.
    pub creator: UserId,
    pub recipe_name: String,
    /// Image URL, if one was uploaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe_image: Option<String>,
    pub category: String,
    #[serde(default)]
    pub making_time: MakingTime,
}

impl Recipe {
    /// Path of the recipe's detail page.
    #[must_use]
    pub fn detail_path(&self) -> String {
        format!("/recipes/detail/{}", self.id)
    }
}

/// A recipe that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecipe {
    pub creator: UserId,
    pub recipe_name: String,
    #[serde(default)]
    pub recipe_image: Option<String>,
    pub category: String,
    #[serde(default)]
    pub making_time: MakingTime,
}

impl NewRecipe {
    /// Attach an ID, producing the stored form.
    #[must_use]
    pub fn into_recipe(self, id: RecipeId) -> Recipe {
        Recipe {
            id,
            creator: self.creator,
            recipe_name: self.recipe_name,
            recipe_image: self.recipe_image.filter(|url| !url.trim().is_empty()),
            category: self.category,
            making_time: self.making_time,
        }
    }
}
