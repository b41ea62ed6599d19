use thiserror::Error;

/// Failures of the password hasher. A wrong password is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// The stored hash is not a readable PHC string.
    #[error("Stored password hash is unreadable: {0}")]
    VerificationFailed(String),
}
