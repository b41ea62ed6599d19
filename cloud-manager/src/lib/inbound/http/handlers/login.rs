use axum::extract::State;
use axum::Extension;

use super::ApiError;
use crate::domain::auth::models::AuthContext;
use crate::inbound::http::router::AppState;

/// Exchange credentials for a token.
///
/// Credentials were already verified by the gateway; the body of the
/// response is the bare token.
pub async fn login(
    State(state): State<AppState>,
    context: Option<Extension<AuthContext>>,
) -> Result<String, ApiError> {
    let Some(Extension(context)) = context else {
        return Err(ApiError::Forbidden("Forbidden".to_string()));
    };

    tracing::debug!(
        user = %context.identity().name(),
        source = %context.identity().source(),
        "User logged in via REST endpoint"
    );

    state
        .auth_service
        .issue_token(context.identity())
        .map_err(ApiError::from)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use mockall::mock;

    use super::*;
    use crate::domain::auth::errors::AuthError;
    use crate::domain::auth::errors::TokenIssueError;
    use crate::domain::auth::models::Identity;
    use crate::domain::auth::ports::AuthServicePort;

    mock! {
        pub TestAuthService {}

        #[async_trait]
        impl AuthServicePort for TestAuthService {
            async fn authenticate_credentials(
                &self,
                username: &str,
                password: &str,
            ) -> Result<Identity, AuthError>;
            fn issue_token(&self, identity: &Identity) -> Result<String, TokenIssueError>;
            fn validate_token(&self, token: &str) -> Result<Identity, AuthError>;
        }
    }

    fn state(auth_service: MockTestAuthService) -> AppState {
        AppState {
            auth_service: Arc::new(auth_service),
            instance_name: None,
        }
    }

    #[tokio::test]
    async fn test_login_without_context_is_forbidden() {
        let mut auth_service = MockTestAuthService::new();
        auth_service.expect_issue_token().times(0);

        let result = login(State(state(auth_service)), None).await;

        assert_eq!(result, Err(ApiError::Forbidden("Forbidden".to_string())));
    }

    #[tokio::test]
    async fn test_login_returns_issued_token() {
        let mut auth_service = MockTestAuthService::new();
        auth_service
            .expect_issue_token()
            .withf(|identity| identity.name() == "alice")
            .times(1)
            .returning(|_| Ok("signed.token.value".to_string()));

        let context = AuthContext::new(Identity::new("alice", "local", true));
        let result = login(State(state(auth_service)), Some(Extension(context))).await;

        assert_eq!(result, Ok("signed.token.value".to_string()));
    }

    #[tokio::test]
    async fn test_signing_failure_is_internal_error() {
        let mut auth_service = MockTestAuthService::new();
        auth_service
            .expect_issue_token()
            .returning(|_| Err(TokenIssueError::SigningFailed("boom".to_string())));

        let context = AuthContext::new(Identity::new("alice", "local", true));
        let result = login(State(state(auth_service)), Some(Extension(context))).await;

        assert!(matches!(result, Err(ApiError::InternalServerError(_))));
    }
}
