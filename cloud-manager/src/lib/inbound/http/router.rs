use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::instance::instance;
use super::handlers::login::login;
use super::handlers::refresh_login::refresh_login;
use super::middleware::authenticate;
use super::middleware::LOGIN_PATH;
use crate::domain::auth::ports::AuthServicePort;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServicePort>,
    pub instance_name: Option<String>,
}

pub fn create_router(
    auth_service: Arc<dyn AuthServicePort>,
    instance_name: Option<String>,
) -> Router {
    let state = AppState {
        auth_service,
        instance_name,
    };

    // Authentication wraps the whole router so unmatched /api paths are
    // rejected before they can 404.
    let api_routes = Router::new()
        .route(LOGIN_PATH, post(login))
        .route("/api/refreshLogin", post(refresh_login))
        .route("/api/instance", get(instance))
        .layer(middleware::from_fn_with_state(state.clone(), authenticate));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    api_routes
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use axum::http::header::AUTHORIZATION;
    use axum::http::header::WWW_AUTHENTICATE;
    use axum::http::HeaderValue;
    use axum::http::StatusCode;
    use mockall::mock;
    use mockall::predicate::*;
    use tower::ServiceExt;

    use super::*;
    use crate::domain::auth::errors::AuthError;
    use crate::domain::auth::errors::TokenIssueError;
    use crate::domain::auth::models::Identity;

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

    fn untouched_auth_service() -> MockTestAuthService {
        let mut auth_service = MockTestAuthService::new();
        auth_service.expect_authenticate_credentials().times(0);
        auth_service.expect_validate_token().times(0);
        auth_service.expect_issue_token().times(0);
        auth_service
    }

    fn request(path: &str, authorization: &'static str) -> Request<Body> {
        Request::builder()
            .uri(path)
            .header(AUTHORIZATION, HeaderValue::from_static(authorization))
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_empty_bearer_is_rejected_on_the_token_path() {
        for authorization in ["Bearer", "Bearer "] {
            let router = create_router(Arc::new(untouched_auth_service()), None);

            let response = router
                .oneshot(request("/api/instance", authorization))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{authorization:?}");
            assert!(!response.headers().contains_key(WWW_AUTHENTICATE));
        }
    }

    #[tokio::test]
    async fn test_valid_bearer_reaches_handler() {
        let mut auth_service = MockTestAuthService::new();
        auth_service
            .expect_validate_token()
            .with(eq("good-token"))
            .times(1)
            .returning(|_| Ok(Identity::from_token("alice", false)));
        auth_service.expect_authenticate_credentials().times(0);

        let router = create_router(Arc::new(auth_service), Some("eu-1".to_string()));

        let response = router
            .oneshot(request("/api/instance", "Bearer good-token"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
