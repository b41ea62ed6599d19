use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

/// Claim carrying the authenticated user name.
pub const CLAIM_USERNAME: &str = "username";

/// Claim carrying the list of granted roles.
pub const CLAIM_AUTHORIZATION: &str = "authorization";

/// JWT claims structure.
///
/// Only the time claims (`exp`, `nbf`) are typed fields; everything else a
/// token carries (username, role list, future additions) lives in the
/// flattened `extra` map so that callers decide how strictly each claim is
/// interpreted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Expiration time (Unix timestamp, seconds)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Not-before time (Unix timestamp, seconds)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,

    /// Additional custom fields (flattened into token)
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Claims {
    /// Create new empty claims.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Set not-before (Unix timestamp).
    pub fn with_not_before(mut self, nbf: i64) -> Self {
        self.nbf = Some(nbf);
        self
    }

    /// Set the username claim.
    pub fn with_username(self, username: impl Into<String>) -> Self {
        self.with_extra(CLAIM_USERNAME, username.into())
    }

    /// Set the authorization claim from role names.
    pub fn with_authorization<I, S>(self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let roles: Vec<String> = roles.into_iter().map(Into::into).collect();
        self.with_extra(CLAIM_AUTHORIZATION, roles)
    }

    /// Add a custom field.
    pub fn with_extra(mut self, key: impl ToString, value: impl Serialize) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.extra.insert(key.to_string(), json_value);
        }
        self
    }

    /// Get username from extra fields.
    pub fn username(&self) -> Option<&str> {
        self.extra.get(CLAIM_USERNAME).and_then(|v| v.as_str())
    }

    /// Raw authorization claim, if present. Its shape is not checked here.
    pub fn authorization(&self) -> Option<&serde_json::Value> {
        self.extra.get(CLAIM_AUTHORIZATION)
    }

    /// Check if token is expired.
    ///
    /// A token stops being valid at its expiration second, so `exp == now`
    /// already counts as expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp.map_or(false, |exp| current_timestamp >= exp)
    }

    /// Check if the token's not-before time is still in the future.
    pub fn is_not_yet_valid(&self, current_timestamp: i64) -> bool {
        self.nbf.map_or(false, |nbf| current_timestamp < nbf)
    }
}
