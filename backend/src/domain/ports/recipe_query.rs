//! Driving port for read-only recipe queries.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{Error, RecipeId, RecipeLookup};

/// Domain use-case port for contract views.
///
/// Results are relayed in the shape the contract returns them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeQuery: Send + Sync {
    /// All recipes, as the first value of the view result.
    async fn list_recipes(&self) -> Result<Value, Error>;

    /// One recipe, or `None` when the contract has no recipe under `recipe_id`.
    async fn get_recipe(&self, recipe_id: &RecipeId) -> Result<RecipeLookup, Error>;

    /// All appreciation records, as the full view result.
    async fn list_appreciations(&self) -> Result<Vec<Value>, Error>;
}
