use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::StoreError;
use crate::domain::auth::errors::TokenIssueError;
use crate::domain::auth::models::Identity;

/// Port for authentication operations used by the HTTP layer.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Verify a username/password pair.
    ///
    /// # Arguments
    /// * `username` - Claimed user name
    /// * `password` - Plaintext password
    ///
    /// # Returns
    /// Identity of the matched user
    ///
    /// # Errors
    /// * `InvalidCredentials` - Empty input, unknown user or wrong password
    /// * `AuthServiceUnavailable` - User store failed
    async fn authenticate_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Identity, AuthError>;

    /// Issue a signed token for an authenticated identity.
    ///
    /// # Arguments
    /// * `identity` - Identity to embed in the token
    ///
    /// # Returns
    /// Compact JWS string
    ///
    /// # Errors
    /// * `MissingSubject` - Identity has an empty name
    /// * `SigningFailed` - Token encoding failed
    fn issue_token(&self, identity: &Identity) -> Result<String, TokenIssueError>;

    /// Validate a token and rebuild the identity it was issued for.
    ///
    /// # Arguments
    /// * `token` - Compact JWS string
    ///
    /// # Returns
    /// Identity reconstructed from the token claims
    ///
    /// # Errors
    /// * `InvalidToken` - Any signature, algorithm, structure or expiry failure
    fn validate_token(&self, token: &str) -> Result<Identity, AuthError>;
}

/// Credential store owning user records.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Check a username/password pair.
    ///
    /// # Arguments
    /// * `username` - User name, never empty
    /// * `password` - Plaintext password, never empty
    ///
    /// # Returns
    /// Matching user identity, or `None` if the user is unknown or the
    /// password is wrong (the two cases are indistinguishable on purpose)
    ///
    /// # Errors
    /// * `Unavailable` - Store backend cannot be reached
    /// * `CorruptRecord` - Stored credentials are unreadable
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Identity>, StoreError>;
}
