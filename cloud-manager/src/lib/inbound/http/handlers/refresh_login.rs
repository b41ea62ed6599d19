use axum::extract::State;
use axum::Extension;

use super::ApiError;
use crate::domain::auth::models::AuthContext;
use crate::inbound::http::router::AppState;

/// Issue a fresh token for a caller that is already authenticated, typically
/// with a token that is about to expire.
pub async fn refresh_login(
    State(state): State<AppState>,
    context: Option<Extension<AuthContext>>,
) -> Result<String, ApiError> {
    let Some(Extension(context)) = context else {
        return Err(ApiError::Forbidden("Forbidden".to_string()));
    };

    tracing::debug!(
        user = %context.identity().name(),
        "User refreshed login via REST endpoint"
    );

    state
        .auth_service
        .issue_token(context.identity())
        .map_err(ApiError::from)
}
