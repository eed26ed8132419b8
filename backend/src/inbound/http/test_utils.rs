//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::web;

use crate::domain::Identity;
use crate::domain::ports::{MockRecipeCommand, MockRecipeQuery};
use crate::inbound::http::session::SessionTokens;
use crate::inbound::http::state::HttpState;

/// Secret used by every handler test.
pub const TEST_SECRET: &[u8] = b"test-passphrase";

/// Token service keyed by [`TEST_SECRET`] with no expiry.
pub fn test_tokens() -> Arc<SessionTokens> {
    Arc::new(SessionTokens::new(TEST_SECRET, None))
}

/// Wrap mocks into handler state.
pub fn test_state(command: MockRecipeCommand, query: MockRecipeQuery) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(
        Arc::new(command),
        Arc::new(query),
        test_tokens(),
    ))
}

/// Token for `a@x.com` accepted by [`test_state`].
pub fn valid_token() -> String {
    test_tokens()
        .issue(&Identity::new("a@x.com", "A"))
        .expect("test token issued")
}
