use thiserror::Error;

/// Error type for JWT operations.
#[derive(Debug, Clone, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Failed to decode token: {0}")]
    DecodingFailed(String),

    #[error("Unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token is not valid yet")]
    TokenNotYetValid,

    #[error("Missing required claim: {0}")]
    MissingClaim(String),

    #[error("Invalid claim: {0}")]
    InvalidClaim(String),
}
