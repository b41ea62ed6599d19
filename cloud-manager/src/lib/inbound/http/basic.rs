use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::domain::auth::errors::AuthError;

pub const BASIC_PREFIX: &str = "Basic ";

/// Realm announced in the `WWW-Authenticate` challenge.
pub const BASIC_REALM: &str = "Cloud Manager";

/// Username/password pair carried by an `Authorization: Basic` header.
#[derive(PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl BasicCredentials {
    /// Parse the value of an `Authorization` header.
    ///
    /// The payload is base64 of UTF-8 `username:password`, split at the first
    /// colon so passwords may contain colons. Any malformation, including an
    /// empty username or password, is reported as `InvalidCredentials`.
    pub fn parse(header: &str) -> Result<Self, AuthError> {
        let encoded = header
            .strip_prefix(BASIC_PREFIX)
            .ok_or(AuthError::InvalidCredentials)?;

        let decoded = STANDARD
            .decode(encoded.trim())
            .map_err(|_| AuthError::InvalidCredentials)?;
        let decoded = String::from_utf8(decoded).map_err(|_| AuthError::InvalidCredentials)?;

        let (username, password) = decoded
            .split_once(':')
            .ok_or(AuthError::InvalidCredentials)?;

        if username.is_empty() || password.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

impl std::fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Value for the `WWW-Authenticate` response header.
pub fn challenge() -> String {
    format!("Basic realm=\"{}\"", BASIC_REALM)
}
