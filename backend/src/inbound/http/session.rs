//! Session tokens issued at login and checked on protected routes.
//!
//! Tokens are HS256 JWTs over `{email, name, iat}`, plus `exp` when a token
//! lifetime is configured. They are verified statelessly; the gateway never
//! stores or revokes them.

use std::time::Duration;

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use chrono::Utc;
use futures_util::future::{Ready, ready};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::domain::{AuthenticatedUser, Error, Identity};
use crate::inbound::http::state::HttpState;

/// Request header carrying the session token.
pub const TOKEN_HEADER: &str = "token";
/// Message returned for every authentication failure.
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid token.";

/// JWT payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub email: String,
    #[serde(default)]
    pub name: String,
    pub iat: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

/// Issues and verifies session tokens with one server-held secret.
pub struct SessionTokens {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Option<Duration>,
}

impl SessionTokens {
    /// Build a token service keyed by `secret`.
    ///
    /// # Examples
    /// ```
    /// use recipe_gateway::domain::Identity;
    /// use recipe_gateway::inbound::http::session::SessionTokens;
    ///
    /// let tokens = SessionTokens::new(b"passphrase", None);
    /// let token = tokens.issue(&Identity::new("a@x.com", "A")).unwrap();
    /// assert_eq!(tokens.verify(&token).unwrap().email(), "a@x.com");
    /// ```
    pub fn new(secret: &[u8], ttl: Option<Duration>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Tokens without `exp` never expire.
        validation.required_spec_claims.clear();
        validation.validate_exp = true;
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    /// Sign a token for `identity`.
    pub fn issue(&self, identity: &Identity) -> Result<String, Error> {
        let iat = Utc::now().timestamp();
        let exp = self.ttl.map(|ttl| {
            let lifetime = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
            iat.saturating_add(lifetime)
        });
        let claims = SessionClaims {
            email: identity.email().to_owned(),
            name: identity.name().to_owned(),
            iat,
            exp,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|err| {
            error!(error = %err, "session token signing failed");
            Error::unknown()
        })
    }

    /// Decode and check a token's signature and expiry.
    pub fn decode(&self, token: &str) -> Result<SessionClaims, Error> {
        decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| {
                debug!(error = %err, "session token rejected");
                Error::unauthorized(INVALID_TOKEN_MESSAGE)
            })
    }

    /// Verify a token and recover the caller.
    pub fn verify(&self, token: &str) -> Result<AuthenticatedUser, Error> {
        self.decode(token)
            .map(|claims| AuthenticatedUser::new(claims.email))
    }
}

/// Extractor that rejects the request unless a valid `token` header is sent.
///
/// Place it before body extractors so authentication failures win over
/// payload validation.
#[derive(Debug, Clone)]
pub struct SessionUser(AuthenticatedUser);

impl SessionUser {
    /// Borrow the authenticated caller.
    pub fn user(&self) -> &AuthenticatedUser {
        &self.0
    }
}

fn authenticate(req: &HttpRequest) -> Result<SessionUser, Error> {
    let Some(state) = req.app_data::<web::Data<HttpState>>() else {
        error!("HttpState missing from app data");
        return Err(Error::unknown());
    };
    let token = req
        .headers()
        .get(TOKEN_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| Error::unauthorized(INVALID_TOKEN_MESSAGE))?;
    state.tokens.verify(token).map(SessionUser)
}

impl FromRequest for SessionUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::{fixture, rstest};

    #[fixture]
    fn tokens() -> SessionTokens {
        SessionTokens::new(b"passphrase", None)
    }

    #[rstest]
    fn issued_tokens_carry_identity_without_expiry(tokens: SessionTokens) {
        let token = tokens
            .issue(&Identity::new("a@x.com", "A"))
            .expect("token issued");
        let claims = tokens.decode(&token).expect("token verifies");
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.name, "A");
        assert!(claims.exp.is_none());
    }

    #[rstest]
    fn configured_ttl_sets_expiry() {
        let tokens = SessionTokens::new(b"passphrase", Some(Duration::from_secs(3600)));
        let token = tokens
            .issue(&Identity::new("a@x.com", "A"))
            .expect("token issued");
        let claims = tokens.decode(&token).expect("token verifies");
        assert_eq!(claims.exp, Some(claims.iat + 3600));
    }

    #[rstest]
    #[case("")]
    #[case("not-a-jwt")]
    #[case("a.b.c")]
    fn malformed_tokens_are_unauthorized(tokens: SessionTokens, #[case] token: &str) {
        let err = tokens.verify(token).expect_err("token rejected");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), INVALID_TOKEN_MESSAGE);
    }

    #[rstest]
    fn tokens_signed_with_another_secret_are_rejected(tokens: SessionTokens) {
        let other = SessionTokens::new(b"other", None);
        let token = other
            .issue(&Identity::new("a@x.com", "A"))
            .expect("token issued");
        assert!(tokens.verify(&token).is_err());
    }

    #[rstest]
    fn expired_tokens_are_rejected(tokens: SessionTokens) {
        let claims = SessionClaims {
            email: "a@x.com".to_owned(),
            name: "A".to_owned(),
            iat: 1_000,
            exp: Some(2_000),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"passphrase"),
        )
        .expect("token encoded");
        assert!(tokens.verify(&token).is_err());
    }

    #[rstest]
    fn tokens_without_name_still_verify(tokens: SessionTokens) {
        let token = encode(
            &Header::new(Algorithm::HS256),
            &serde_json::json!({ "email": "a@x.com", "iat": 1_000 }),
            &EncodingKey::from_secret(b"passphrase"),
        )
        .expect("token encoded");
        let user = tokens.verify(&token).expect("token verifies");
        assert_eq!(user.email(), "a@x.com");
    }
}
