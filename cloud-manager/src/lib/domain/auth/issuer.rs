use std::sync::Arc;

use auth::Claims;
use auth::Clock;
use auth::JwtHandler;
use chrono::Duration;

use crate::domain::auth::errors::TokenIssueError;
use crate::domain::auth::models::Identity;
use crate::domain::auth::models::RoleGrant;

/// Lifetime of an issued token.
pub const TOKEN_VALIDITY_HOURS: i64 = 8;

/// Builds and signs tokens for authenticated identities. Keeps no record of
/// what it issued.
pub struct TokenIssuer {
    handler: Arc<JwtHandler>,
    clock: Arc<dyn Clock>,
}

impl TokenIssuer {
    pub fn new(handler: Arc<JwtHandler>, clock: Arc<dyn Clock>) -> Self {
        Self { handler, clock }
    }

    /// Issue a token valid for [`TOKEN_VALIDITY_HOURS`] from now.
    ///
    /// # Errors
    /// * `MissingSubject` - Identity has an empty name
    /// * `SigningFailed` - Token encoding failed
    pub fn issue(&self, identity: &Identity) -> Result<String, TokenIssueError> {
        if identity.name().is_empty() {
            return Err(TokenIssueError::MissingSubject);
        }

        let expiration = self.clock.now() + Duration::hours(TOKEN_VALIDITY_HOURS);
        let claims = Claims::new()
            .with_username(identity.name())
            .with_authorization(identity.role_grants().iter().map(RoleGrant::as_str))
            .with_expiration(expiration.timestamp());

        self.handler
            .encode(&claims)
            .map_err(|e| TokenIssueError::SigningFailed(e.to_string()))
    }
}
