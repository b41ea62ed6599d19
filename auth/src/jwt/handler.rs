use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::TokenData;
use jsonwebtoken::Validation;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;
use super::key::SigningKeyProvider;

/// The only algorithm tokens may be signed with.
pub const SIGNATURE_ALGORITHM: Algorithm = Algorithm::HS512;

/// JWT token handler for encoding and decoding tokens.
///
/// Generic over the claims type to allow services to define their own token payload.
/// Signs with HS512 and refuses to decode anything else.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens
    ///
    /// # Returns
    /// JwtHandler instance configured with HS512 algorithm
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: SIGNATURE_ALGORITHM,
        }
    }

    /// Create a handler bound to the provider's key.
    pub fn from_provider(provider: &SigningKeyProvider) -> Self {
        Self::new(provider.signing_key())
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Encode claims into a JWT token.
    ///
    /// # Arguments
    /// * `claims` - Claims to encode (must implement Serialize)
    ///
    /// # Returns
    /// JWT token string
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode a JWT token and verify its signature.
    ///
    /// Time-based claims are NOT checked here: the caller compares `exp`
    /// against its own clock so that "now" stays injectable.
    ///
    /// # Arguments
    /// * `token` - JWT token string to decode
    ///
    /// # Returns
    /// Decoded header and claims
    ///
    /// # Errors
    /// * `UnsupportedAlgorithm` - Token header declares another algorithm
    /// * `DecodingFailed` - Token is malformed or its signature does not verify
    pub fn decode<T: for<'de> Deserialize<'de>>(
        &self,
        token: &str,
    ) -> Result<TokenData<T>, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.required_spec_claims.clear();
        // Time claims are checked by the caller against its own clock
        validation.validate_exp = false;
        validation.validate_nbf = false;

        decode::<T>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
            ErrorKind::InvalidAlgorithm => JwtError::UnsupportedAlgorithm(e.to_string()),
            _ => JwtError::DecodingFailed(e.to_string()),
        })
    }
}
