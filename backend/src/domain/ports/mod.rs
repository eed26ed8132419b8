//! Domain ports and supporting types for the hexagonal boundary.

mod chain_client;
mod recipe_command;
mod recipe_query;

#[cfg(test)]
pub use chain_client::MockChainClient;
pub use chain_client::{ChainClient, ChainClientError, FixtureChainClient};
#[cfg(test)]
pub use recipe_command::MockRecipeCommand;
pub use recipe_command::RecipeCommand;
#[cfg(test)]
pub use recipe_query::MockRecipeQuery;
pub use recipe_query::RecipeQuery;
