use std::sync::Arc;

use async_trait::async_trait;
use auth::Clock;
use auth::JwtHandler;
use auth::SigningKeyProvider;

use crate::domain::auth::credentials::CredentialAuthenticator;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::TokenIssueError;
use crate::domain::auth::issuer::TokenIssuer;
use crate::domain::auth::models::Identity;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::UserStore;
use crate::domain::auth::validator::TokenValidator;

/// Domain service implementation for authentication.
///
/// Wires the credential authenticator, token issuer and token validator
/// around a single signing key and clock.
pub struct AuthService<US>
where
    US: UserStore,
{
    credentials: CredentialAuthenticator<US>,
    issuer: TokenIssuer,
    validator: TokenValidator,
}

impl<US> AuthService<US>
where
    US: UserStore,
{
    /// Create a new authentication service with injected dependencies.
    ///
    /// # Arguments
    /// * `user_store` - Credential store implementation
    /// * `key_provider` - The process-wide signing key
    /// * `clock` - Time source for expiry computation and checks
    ///
    /// # Returns
    /// Configured authentication service instance
    pub fn new(
        user_store: Arc<US>,
        key_provider: &SigningKeyProvider,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let handler = Arc::new(JwtHandler::from_provider(key_provider));

        Self {
            credentials: CredentialAuthenticator::new(user_store),
            issuer: TokenIssuer::new(Arc::clone(&handler), Arc::clone(&clock)),
            validator: TokenValidator::new(handler, clock),
        }
    }
}

#[async_trait]
impl<US> AuthServicePort for AuthService<US>
where
    US: UserStore,
{
    async fn authenticate_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Identity, AuthError> {
        self.credentials.authenticate(username, password).await
    }

    fn issue_token(&self, identity: &Identity) -> Result<String, TokenIssueError> {
        self.issuer.issue(identity)
    }

    fn validate_token(&self, token: &str) -> Result<Identity, AuthError> {
        self.validator.validate(token)
    }
}
