//! Driving port for state-changing recipe operations.
//!
//! Inbound adapters call this port to log users in, share recipes and upvote
//! them without knowing how the contract call is built or classified.

use async_trait::async_trait;

use crate::domain::{AuthenticatedUser, Error, Identity, NewRecipe, RecipeId};

/// Domain use-case port for contract writes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeCommand: Send + Sync {
    /// Register or re-register a user. Re-login of an existing user succeeds.
    async fn login(&self, identity: &Identity) -> Result<(), Error>;

    /// Share a new recipe on behalf of the authenticated user.
    async fn add_recipe(&self, user: &AuthenticatedUser, recipe: &NewRecipe) -> Result<(), Error>;

    /// Upvote a recipe, minting the appreciation reward.
    async fn upvote_recipe(
        &self,
        user: &AuthenticatedUser,
        recipe_id: &RecipeId,
    ) -> Result<(), Error>;
}
