//! Recipe payloads relayed to the contract.
//!
//! Recipes live inside the contract. The gateway never materialises a local
//! record; it forwards identifiers and submission fields and relays whatever
//! shape the contract returns.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque identifier addressing a recipe inside the contract.
///
/// Clients may send the id as a JSON string or a non-negative integer. It is
/// always relayed as a string, which is how the chain's JSON API encodes
/// `u64` arguments.
///
/// # Examples
/// ```
/// use recipe_gateway::domain::RecipeId;
///
/// let from_number: RecipeId = serde_json::from_str("7").unwrap();
/// let from_string: RecipeId = serde_json::from_str("\"7\"").unwrap();
/// assert_eq!(from_number, from_string);
/// assert_eq!(from_number.as_str(), "7");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RecipeIdDto", into = "String")]
pub struct RecipeId(String);

impl RecipeId {
    /// Wrap a raw identifier.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Identifier as relayed to the contract.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<RecipeId> for String {
    fn from(value: RecipeId) -> Self {
        value.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RecipeIdDto {
    Number(u64),
    Text(String),
}

impl TryFrom<RecipeIdDto> for RecipeId {
    type Error = RecipeIdValidationError;

    fn try_from(value: RecipeIdDto) -> Result<Self, Self::Error> {
        match value {
            RecipeIdDto::Number(number) => Ok(Self(number.to_string())),
            RecipeIdDto::Text(text) if text.trim().is_empty() => {
                Err(RecipeIdValidationError::Empty)
            }
            RecipeIdDto::Text(text) => Ok(Self(text)),
        }
    }
}

/// Validation failures for [`RecipeId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecipeIdValidationError {
    /// The identifier was blank.
    #[error("recipe id must not be empty")]
    Empty,
}

/// Fields submitted when sharing a new recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecipe {
    /// Recipe title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Image references, usually URLs.
    pub images: Vec<String>,
}

/// Single recipe lookup result; `None` when the contract holds no such id.
pub type RecipeLookup = Option<Value>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("42", "42")]
    #[case("\"42\"", "42")]
    #[case("\"recipe-7\"", "recipe-7")]
    fn recipe_id_accepts_numbers_and_strings(#[case] raw: &str, #[case] expected: &str) {
        let id: RecipeId = serde_json::from_str(raw).expect("valid recipe id");
        assert_eq!(id.as_str(), expected);
    }

    #[rstest]
    #[case("\"  \"")]
    #[case("-1")]
    #[case("null")]
    fn recipe_id_rejects_blank_or_negative(#[case] raw: &str) {
        assert!(serde_json::from_str::<RecipeId>(raw).is_err());
    }
}
