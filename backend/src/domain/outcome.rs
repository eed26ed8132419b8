//! Classification of failed contract writes.
//!
//! The contract signals known domain conditions through Move abort codes that
//! surface at the end of the VM status string, e.g.
//! `Move abort in 0xcafe::recipes: 0x28`. Matching is a literal suffix test on
//! that string. Errors without a VM status are always unknown.

use super::ports::ChainClientError;

/// Move abort code as it appears at the end of a VM status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbortCode(&'static str);

impl AbortCode {
    /// Wrap a hex abort code such as `0x28`.
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    /// Whether `vm_status` ends with this code.
    ///
    /// # Examples
    /// ```
    /// use recipe_gateway::domain::AbortCode;
    ///
    /// let code = AbortCode::new("0x29");
    /// assert!(code.matches("Move abort in 0x1::recipes: 0x29"));
    /// assert!(!code.matches("Executed successfully"));
    /// ```
    pub fn matches(self, vm_status: &str) -> bool {
        vm_status.ends_with(self.0)
    }
}

/// `login_user` abort raised when the email is already registered.
pub const USER_ALREADY_EXISTS: AbortCode = AbortCode::new("0x28");
/// `appreciate_and_mint` abort raised when the caller authored the recipe.
pub const CANNOT_UPVOTE_OWN_RECIPE: AbortCode = AbortCode::new("0x28");
/// `appreciate_and_mint` abort raised on a repeated upvote.
pub const ALREADY_UPVOTED: AbortCode = AbortCode::new("0x29");

fn aborted_with(error: &ChainClientError, code: AbortCode) -> bool {
    error.vm_status().is_some_and(|status| code.matches(status))
}

/// How a failed `login_user` write is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginFailure {
    /// The user already exists; logging in again is expected and succeeds.
    AlreadyRegistered,
    /// Anything else.
    Unknown,
}

/// Classify a failed login write.
pub fn classify_login_failure(error: &ChainClientError) -> LoginFailure {
    if aborted_with(error, USER_ALREADY_EXISTS) {
        LoginFailure::AlreadyRegistered
    } else {
        LoginFailure::Unknown
    }
}

/// How a failed `appreciate_and_mint` write is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpvoteFailure {
    /// The caller tried to upvote a recipe they authored.
    OwnRecipe,
    /// The caller already upvoted this recipe.
    AlreadyUpvoted,
    /// Anything else.
    Unknown,
}

impl UpvoteFailure {
    /// Client-facing reason for a recognised rejection.
    pub fn rejection_message(self) -> Option<&'static str> {
        match self {
            Self::OwnRecipe => Some("You cannot upvote your own recipe"),
            Self::AlreadyUpvoted => Some("You have already upvoted this recipe"),
            Self::Unknown => None,
        }
    }
}

/// Classify a failed upvote write.
pub fn classify_upvote_failure(error: &ChainClientError) -> UpvoteFailure {
    if aborted_with(error, CANNOT_UPVOTE_OWN_RECIPE) {
        UpvoteFailure::OwnRecipe
    } else if aborted_with(error, ALREADY_UPVOTED) {
        UpvoteFailure::AlreadyUpvoted
    } else {
        UpvoteFailure::Unknown
    }
}
