use thiserror::Error;

/// Failures of the user store collaborator.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("User store unavailable: {0}")]
    Unavailable(String),

    #[error("Stored credentials for user {user} are unreadable: {reason}")]
    CorruptRecord { user: String, reason: String },
}

/// Reasons a request fails to authenticate.
///
/// Messages are deliberately generic: they may end up in logs or responses
/// and must not reveal which check failed or whether a user exists.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Wrong, unknown or empty username/password.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The user store could not be queried.
    #[error("Authentication service unavailable")]
    AuthServiceUnavailable,

    /// Signature, algorithm, structure or expiry check failed.
    #[error("Invalid token")]
    InvalidToken,

    /// Bearer scheme announced without a usable token.
    #[error("Insufficient authentication")]
    InsufficientAuthentication,
}

/// Errors raised while issuing a token.
#[derive(Debug, Clone, Error)]
pub enum TokenIssueError {
    #[error("Cannot issue a token for an identity without a name")]
    MissingSubject,

    #[error("Token signing failed: {0}")]
    SigningFailed(String),
}
