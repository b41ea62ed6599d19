use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::header::WWW_AUTHENTICATE;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use super::basic;
use super::handlers::ApiError;
use super::interceptor::intercept;
use super::interceptor::Interception;
use crate::domain::auth::errors::AuthError;
use crate::inbound::http::router::AppState;

/// Every path below this prefix requires authentication.
pub const PROTECTED_PREFIX: &str = "/api/";

pub const LOGIN_PATH: &str = "/api/login";

/// Paths on which bearer tokens are not considered. The login call exists to
/// hand out tokens, so it always authenticates with credentials.
pub const TOKEN_SKIP_PATHS: &[&str] = &[LOGIN_PATH];

pub fn is_protected(path: &str) -> bool {
    path.starts_with(PROTECTED_PREFIX)
}

pub fn accepts_tokens(path: &str) -> bool {
    !TOKEN_SKIP_PATHS.contains(&path)
}

/// Middleware that authenticates every protected request and stores the
/// resulting `AuthContext` in the request extensions.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let path = req.uri().path().to_string();
    if !is_protected(&path) {
        return Ok(next.run(req).await);
    }

    let interception = if accepts_tokens(&path) {
        Interception::classify(req.headers())
    } else {
        Interception::credentials_only(req.headers())
    };
    let missing_header = interception == Interception::Credentials(None);

    let context = intercept(state.auth_service.as_ref(), interception)
        .await
        .map_err(|e| reject(e, &req, missing_header))?;

    tracing::debug!(
        user = %context.identity().name(),
        source = %context.identity().source(),
        method = %req.method(),
        uri = %req.uri(),
        "Request authenticated"
    );

    req.extensions_mut().insert(context);

    Ok(next.run(req).await)
}

fn reject(error: AuthError, req: &Request, missing_header: bool) -> Response {
    tracing::debug!(
        reason = %error,
        method = %req.method(),
        uri = %req.uri(),
        has_authorization = req.headers().contains_key(AUTHORIZATION),
        "Request rejected"
    );

    let mut response = ApiError::from(error).into_response();
    if missing_header {
        if let Ok(challenge) = HeaderValue::from_str(&basic::challenge()) {
            response.headers_mut().insert(WWW_AUTHENTICATE, challenge);
        }
    }
    response
}
