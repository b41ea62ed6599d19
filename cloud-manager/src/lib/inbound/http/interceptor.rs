use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;

use super::basic::BasicCredentials;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::AuthContext;
use crate::domain::auth::ports::AuthServicePort;

pub const BEARER_PREFIX: &str = "Bearer ";

/// Scheme name alone. HTTP stacks trim trailing whitespace from header values,
/// so `Bearer ` on the wire arrives as this.
pub const BEARER_SCHEME: &str = "Bearer";

/// Authentication mechanism chosen for a request.
///
/// Exactly one applies per request. A request is a bearer candidate only if
/// its `Authorization` header starts with the bearer prefix; everything else,
/// including requests without the header, goes to the credential path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interception<'a> {
    /// Raw text following the bearer prefix.
    Bearer(&'a str),
    /// Header value, if any, for the credential path.
    Credentials(Option<&'a str>),
}

impl<'a> Interception<'a> {
    pub fn classify(headers: &'a HeaderMap) -> Self {
        let Some(value) = headers.get(AUTHORIZATION) else {
            return Interception::Credentials(None);
        };

        match value.to_str() {
            Ok(BEARER_SCHEME) => Interception::Bearer(""),
            Ok(value) => match value.strip_prefix(BEARER_PREFIX) {
                Some(token) => Interception::Bearer(token),
                None => Interception::Credentials(Some(value)),
            },
            // Opaque bytes can never parse as Basic credentials either
            Err(_) => Interception::Credentials(Some("")),
        }
    }

    /// Same as [`Interception::classify`] but never selects the bearer path.
    pub fn credentials_only(headers: &'a HeaderMap) -> Self {
        match Self::classify(headers) {
            Interception::Bearer(_) => Interception::Credentials(
                headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()),
            ),
            credentials => credentials,
        }
    }
}

/// Token text of a bearer candidate.
///
/// # Errors
/// * `InsufficientAuthentication` - Prefix present but nothing usable follows
pub fn extract_bearer_token(raw: &str) -> Result<&str, AuthError> {
    if raw.trim().is_empty() {
        return Err(AuthError::InsufficientAuthentication);
    }
    Ok(raw)
}

/// Run the chosen mechanism and build the request's authentication context.
///
/// A failed bearer attempt is final; the credential path is never tried as a
/// fallback.
pub async fn intercept(
    auth_service: &dyn AuthServicePort,
    interception: Interception<'_>,
) -> Result<AuthContext, AuthError> {
    let identity = match interception {
        Interception::Bearer(raw) => {
            let token = extract_bearer_token(raw)?;
            auth_service.validate_token(token)?
        }
        Interception::Credentials(header) => {
            let header = header.ok_or(AuthError::InvalidCredentials)?;
            let credentials = BasicCredentials::parse(header)?;
            auth_service
                .authenticate_credentials(&credentials.username, &credentials.password)
                .await?
        }
    };

    Ok(AuthContext::new(identity))
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use axum::http::HeaderValue;
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::auth::errors::TokenIssueError;
    use crate::domain::auth::models::Identity;
    use crate::domain::auth::models::RoleGrant;

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

    fn headers(authorization: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(authorization).unwrap());
        headers
    }

    fn basic(user_pass: &str) -> String {
        format!("Basic {}", STANDARD.encode(user_pass))
    }

    #[test]
    fn test_classify() {
        let empty = HeaderMap::new();
        assert_eq!(Interception::classify(&empty), Interception::Credentials(None));

        let bearer = headers("Bearer abc.def.ghi");
        assert_eq!(Interception::classify(&bearer), Interception::Bearer("abc.def.ghi"));

        let bare = headers("Bearer ");
        assert_eq!(Interception::classify(&bare), Interception::Bearer(""));

        let trimmed = headers("Bearer");
        assert_eq!(Interception::classify(&trimmed), Interception::Bearer(""));

        let basic_header = basic("alice:secret");
        let basic = headers(&basic_header);
        assert_eq!(
            Interception::classify(&basic),
            Interception::Credentials(Some(basic_header.as_str()))
        );

        // scheme match is case-sensitive
        let lowercase = headers("bearer abc");
        assert_eq!(
            Interception::classify(&lowercase),
            Interception::Credentials(Some("bearer abc"))
        );
    }

    #[test]
    fn test_credentials_only_ignores_bearer() {
        let bearer = headers("Bearer abc");

        assert_eq!(
            Interception::credentials_only(&bearer),
            Interception::Credentials(Some("Bearer abc"))
        );
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("abc"), Ok("abc"));
        assert_eq!(
            extract_bearer_token(""),
            Err(AuthError::InsufficientAuthentication)
        );
        assert_eq!(
            extract_bearer_token("   "),
            Err(AuthError::InsufficientAuthentication)
        );
    }

    #[tokio::test]
    async fn test_empty_bearer_never_reaches_validator() {
        let mut auth_service = MockTestAuthService::new();
        auth_service.expect_validate_token().times(0);
        auth_service.expect_authenticate_credentials().times(0);

        let result = intercept(&auth_service, Interception::Bearer("")).await;
        assert_eq!(result, Err(AuthError::InsufficientAuthentication));
    }

    #[tokio::test]
    async fn test_valid_bearer_builds_context() {
        let mut auth_service = MockTestAuthService::new();
        auth_service
            .expect_validate_token()
            .with(eq("good-token"))
            .times(1)
            .returning(|_| Ok(Identity::from_token("alice", true)));

        let context = intercept(&auth_service, Interception::Bearer("good-token"))
            .await
            .unwrap();

        assert_eq!(context.identity().name(), "alice");
        assert_eq!(context.grants(), &[RoleGrant::User, RoleGrant::Admin]);
    }

    #[tokio::test]
    async fn test_rejected_bearer_does_not_fall_back_to_credentials() {
        let mut auth_service = MockTestAuthService::new();
        auth_service
            .expect_validate_token()
            .times(1)
            .returning(|_| Err(AuthError::InvalidToken));
        auth_service.expect_authenticate_credentials().times(0);

        let result = intercept(&auth_service, Interception::Bearer("forged")).await;
        assert_eq!(result, Err(AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn test_basic_credentials_are_authenticated() {
        let mut auth_service = MockTestAuthService::new();
        auth_service
            .expect_authenticate_credentials()
            .with(eq("bob"), eq("hunter2"))
            .times(1)
            .returning(|name, _| Ok(Identity::new(name, "local", false)));
        auth_service.expect_validate_token().times(0);

        let header = basic("bob:hunter2");
        let context = intercept(&auth_service, Interception::Credentials(Some(&header)))
            .await
            .unwrap();

        assert_eq!(context.identity().name(), "bob");
        assert_eq!(context.grants(), &[RoleGrant::User]);
    }

    #[tokio::test]
    async fn test_missing_header_is_invalid_credentials() {
        let mut auth_service = MockTestAuthService::new();
        auth_service.expect_authenticate_credentials().times(0);

        let result = intercept(&auth_service, Interception::Credentials(None)).await;
        assert_eq!(result, Err(AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_store_outage_propagates() {
        let mut auth_service = MockTestAuthService::new();
        auth_service
            .expect_authenticate_credentials()
            .times(1)
            .returning(|_, _| Err(AuthError::AuthServiceUnavailable));

        let header = basic("bob:hunter2");
        let result = intercept(&auth_service, Interception::Credentials(Some(&header))).await;
        assert_eq!(result, Err(AuthError::AuthServiceUnavailable));
    }
}
