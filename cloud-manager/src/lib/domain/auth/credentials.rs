use std::sync::Arc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::Identity;
use crate::domain::auth::ports::UserStore;

/// Verifies username/password pairs against the user store.
pub struct CredentialAuthenticator<US>
where
    US: UserStore,
{
    user_store: Arc<US>,
}

impl<US> CredentialAuthenticator<US>
where
    US: UserStore,
{
    pub fn new(user_store: Arc<US>) -> Self {
        Self { user_store }
    }

    /// Authenticate a user.
    ///
    /// Empty input is rejected before the store is contacted. Unknown users
    /// and wrong passwords are reported identically.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Empty input or no matching user
    /// * `AuthServiceUnavailable` - User store failed
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Identity, AuthError> {
        if username.is_empty() || password.is_empty() {
            tracing::debug!("Username or password is empty");
            return Err(AuthError::InvalidCredentials);
        }

        match self.user_store.authenticate(username, password).await {
            Ok(Some(identity)) => {
                tracing::debug!(
                    user = %identity.name(),
                    source = %identity.source(),
                    admin = identity.is_admin(),
                    "Credentials verified"
                );
                Ok(identity)
            }
            Ok(None) => {
                tracing::debug!("Username / password combination is invalid");
                Err(AuthError::InvalidCredentials)
            }
            Err(e) => {
                tracing::error!(error = %e, "Could not query user store");
                Err(AuthError::AuthServiceUnavailable)
            }
        }
    }
}
