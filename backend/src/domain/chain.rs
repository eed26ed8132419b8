//! Contract call primitives shared by the dispatcher and chain adapters.
//!
//! A call names one entry function of the `recipes` module plus its ordered
//! JSON arguments. Whether it is signed and submitted or evaluated as a view
//! is fixed per entry function.

use std::fmt;

use serde_json::Value;

/// Name of the Move module exposing the recipe entry points.
pub const RECIPES_MODULE: &str = "recipes";

/// Account address in canonical `0x`-prefixed lowercase hex form.
///
/// # Examples
/// ```
/// use recipe_gateway::domain::AccountAddress;
///
/// let address = AccountAddress::parse("0xABC").unwrap();
/// assert_eq!(address.as_str(), "0xabc");
/// assert!(AccountAddress::parse("0xnot-hex").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountAddress(String);

/// Validation failures for [`AccountAddress`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccountAddressError {
    /// No hex digits followed the optional prefix.
    #[error("account address must not be empty")]
    Empty,
    /// The value contained characters outside `[0-9a-fA-F]`.
    #[error("account address must be hex: {0}")]
    NotHex(String),
    /// More than 32 bytes of hex.
    #[error("account address exceeds 32 bytes: {0}")]
    TooLong(String),
}

impl AccountAddress {
    const MAX_HEX_DIGITS: usize = 64;

    /// Parse a hex address, with or without the `0x` prefix.
    pub fn parse(raw: &str) -> Result<Self, AccountAddressError> {
        let trimmed = raw.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        if digits.is_empty() {
            return Err(AccountAddressError::Empty);
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(AccountAddressError::NotHex(raw.to_owned()));
        }
        if digits.len() > Self::MAX_HEX_DIGITS {
            return Err(AccountAddressError::TooLong(raw.to_owned()));
        }
        Ok(Self(format!("0x{}", digits.to_ascii_lowercase())))
    }

    /// Build an address from raw 32-byte account key material.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(format!("0x{}", hex::encode(bytes)))
    }

    /// Canonical string form.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether an entry function mutates state or only reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    /// Signed, submitted, and awaited until committed.
    Write,
    /// Read-only evaluation against current state.
    View,
}

/// Entry functions of the `recipes` module used by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractFunction {
    CreateUserList,
    CreateRecipeList,
    CreateAppreciationList,
    MintCoin,
    LoginUser,
    AddRecipe,
    AppreciateAndMint,
    GetAllRecipes,
    GetRecipeById,
    GetAllAppreciations,
}

impl ContractFunction {
    /// Function name as declared in the module.
    pub fn name(self) -> &'static str {
        match self {
            Self::CreateUserList => "create_user_list",
            Self::CreateRecipeList => "create_list",
            Self::CreateAppreciationList => "create_appreciation_list",
            Self::MintCoin => "mint_coin",
            Self::LoginUser => "login_user",
            Self::AddRecipe => "add_recipe",
            Self::AppreciateAndMint => "appreciate_and_mint",
            Self::GetAllRecipes => "get_all_recipes",
            Self::GetRecipeById => "get_recipe_by_id",
            Self::GetAllAppreciations => "get_all_appreciations",
        }
    }

    /// Call kind the contract declares for this function.
    pub fn kind(self) -> CallKind {
        match self {
            Self::GetAllRecipes | Self::GetRecipeById | Self::GetAllAppreciations => {
                CallKind::View
            }
            _ => CallKind::Write,
        }
    }
}

/// One entry-function call with its ordered arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryFunctionCall {
    function_id: String,
    function: ContractFunction,
    arguments: Vec<Value>,
}

impl EntryFunctionCall {
    /// Address the call to `<contract>::recipes::<function>`.
    ///
    /// # Examples
    /// ```
    /// use recipe_gateway::domain::{AccountAddress, ContractFunction, EntryFunctionCall};
    /// use serde_json::json;
    ///
    /// let contract = AccountAddress::parse("0x1").unwrap();
    /// let call = EntryFunctionCall::new(&contract, ContractFunction::LoginUser, vec![json!("a@x.com")]);
    /// assert_eq!(call.function_id(), "0x1::recipes::login_user");
    /// ```
    pub fn new(
        contract: &AccountAddress,
        function: ContractFunction,
        arguments: Vec<Value>,
    ) -> Self {
        Self {
            function_id: format!("{contract}::{RECIPES_MODULE}::{}", function.name()),
            function,
            arguments,
        }
    }

    /// Fully qualified function identifier.
    pub fn function_id(&self) -> &str {
        self.function_id.as_str()
    }

    /// Entry function being called.
    pub fn function(&self) -> ContractFunction {
        self.function
    }

    /// Ordered JSON arguments.
    pub fn arguments(&self) -> &[Value] {
        &self.arguments
    }
}

/// Handle of a write that reached finality successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommittedTransaction {
    /// Transaction hash reported by the node.
    pub hash: String,
}
