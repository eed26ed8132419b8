//! User identity carried by session tokens.
//!
//! The contract's user registry owns users; the gateway only relays the
//! email/name pair and never validates its content.

use serde::{Deserialize, Serialize};

/// Email/name pair supplied at login and bound into the session token.
///
/// # Examples
/// ```
/// use recipe_gateway::domain::Identity;
///
/// let identity = Identity::new("a@x.com", "A");
/// assert_eq!(identity.email(), "a@x.com");
/// assert_eq!(identity.name(), "A");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    email: String,
    name: String,
}

impl Identity {
    /// Build an identity from raw values. Empty strings are accepted as-is.
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
        }
    }

    /// Email used as the user key inside the contract.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Display name registered alongside the email.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

/// Caller identity recovered from a verified session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    email: String,
}

impl AuthenticatedUser {
    /// Wrap the email decoded from a verified token.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }

    /// Email the contract uses to attribute writes.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }
}
