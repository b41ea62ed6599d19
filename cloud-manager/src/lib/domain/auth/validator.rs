use std::sync::Arc;

use auth::jwt::CLAIM_AUTHORIZATION;
use auth::jwt::CLAIM_USERNAME;
use auth::Claims;
use auth::Clock;
use auth::JwtError;
use auth::JwtHandler;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::Identity;
use crate::domain::auth::models::RoleGrant;

/// Checks tokens and rebuilds the identity they were issued for.
///
/// The token is authoritative for its own lifetime: the user store is never
/// consulted, so a user disabled after issuance keeps access until expiry.
pub struct TokenValidator {
    handler: Arc<JwtHandler>,
    clock: Arc<dyn Clock>,
}

impl TokenValidator {
    pub fn new(handler: Arc<JwtHandler>, clock: Arc<dyn Clock>) -> Self {
        Self { handler, clock }
    }

    /// Validate a token.
    ///
    /// Every failure collapses into `InvalidToken`; the underlying reason is
    /// only logged at debug level.
    ///
    /// # Errors
    /// * `InvalidToken` - Signature, algorithm, expiry or claim check failed
    pub fn validate(&self, token: &str) -> Result<Identity, AuthError> {
        self.check(token).map_err(|e| {
            tracing::debug!(reason = %e, "The JWT is invalid");
            AuthError::InvalidToken
        })
    }

    fn check(&self, token: &str) -> Result<Identity, JwtError> {
        let token_data = self.handler.decode::<Claims>(token)?;

        let algorithm = token_data.header.alg;
        if algorithm != self.handler.algorithm() {
            return Err(JwtError::UnsupportedAlgorithm(format!("{:?}", algorithm)));
        }

        let claims = token_data.claims;
        if claims.exp.is_none() {
            return Err(JwtError::MissingClaim("exp".to_string()));
        }
        let now = self.clock.now().timestamp();
        if claims.is_expired(now) {
            return Err(JwtError::TokenExpired);
        }
        if claims.is_not_yet_valid(now) {
            return Err(JwtError::TokenNotYetValid);
        }

        let grants = role_grants(&claims)?;

        let username = claims
            .username()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| JwtError::MissingClaim(CLAIM_USERNAME.to_string()))?;

        Ok(Identity::from_token(
            username,
            grants.contains(&RoleGrant::Admin),
        ))
    }
}

/// Known grants listed in the authorization claim. Unknown entries are
/// dropped; they never widen access.
fn role_grants(claims: &Claims) -> Result<Vec<RoleGrant>, JwtError> {
    let claim = claims
        .authorization()
        .ok_or_else(|| JwtError::MissingClaim(CLAIM_AUTHORIZATION.to_string()))?;

    let entries = claim.as_array().ok_or_else(|| {
        JwtError::InvalidClaim(format!("{} claim is not a list", CLAIM_AUTHORIZATION))
    })?;

    Ok(entries
        .iter()
        .filter_map(|entry| entry.as_str())
        .filter_map(RoleGrant::from_claim)
        .collect())
}
