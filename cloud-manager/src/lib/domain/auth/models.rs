use std::collections::BTreeMap;
use std::fmt;

/// Origin tag of identities reconstructed from a token.
pub const TOKEN_SOURCE: &str = "token";

/// Authenticated caller.
///
/// Immutable once built. Identities coming from a token carry no attributes,
/// since attributes are never embedded in tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    name: String,
    source: String,
    admin: bool,
    attributes: BTreeMap<String, String>,
}

impl Identity {
    /// Create an identity without attributes.
    ///
    /// # Arguments
    /// * `name` - User name
    /// * `source` - Origin tag (e.g. the user store it was found in)
    /// * `admin` - Whether the user holds administrative rights
    pub fn new(name: impl Into<String>, source: impl Into<String>, admin: bool) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            admin,
            attributes: BTreeMap::new(),
        }
    }

    /// Create an identity carrying user attributes.
    pub fn with_attributes(
        name: impl Into<String>,
        source: impl Into<String>,
        admin: bool,
        attributes: BTreeMap<String, String>,
    ) -> Self {
        Self {
            attributes,
            ..Self::new(name, source, admin)
        }
    }

    /// Identity rebuilt from validated token content.
    pub fn from_token(name: impl Into<String>, admin: bool) -> Self {
        Self::new(name, TOKEN_SOURCE, admin)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_admin(&self) -> bool {
        self.admin
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Role grants implied by the admin flag.
    pub fn role_grants(&self) -> Vec<RoleGrant> {
        RoleGrant::for_admin(self.admin)
    }
}

/// Capability level attached to an identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RoleGrant {
    User,
    Admin,
}

impl RoleGrant {
    /// Wire representation inside the token's authorization claim.
    pub fn as_str(&self) -> &'static str {
        match self {
            RoleGrant::User => "ROLE_USER",
            RoleGrant::Admin => "ROLE_ADMIN",
        }
    }

    /// Parse a claim entry. Unknown names yield `None`.
    pub fn from_claim(value: &str) -> Option<Self> {
        match value {
            "ROLE_USER" => Some(RoleGrant::User),
            "ROLE_ADMIN" => Some(RoleGrant::Admin),
            _ => None,
        }
    }

    /// Every identity holds `User`; admins additionally hold `Admin`.
    pub fn for_admin(admin: bool) -> Vec<RoleGrant> {
        if admin {
            vec![RoleGrant::User, RoleGrant::Admin]
        } else {
            vec![RoleGrant::User]
        }
    }
}

impl fmt::Display for RoleGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-request authentication result, stored in the request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    identity: Identity,
    grants: Vec<RoleGrant>,
}

impl AuthContext {
    pub fn new(identity: Identity) -> Self {
        let grants = identity.role_grants();
        Self { identity, grants }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn grants(&self) -> &[RoleGrant] {
        &self.grants
    }

    pub fn has_grant(&self, grant: RoleGrant) -> bool {
        self.grants.contains(&grant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_identity_holds_both_grants() {
        let context = AuthContext::new(Identity::new("alice", "local", true));

        assert_eq!(context.grants(), &[RoleGrant::User, RoleGrant::Admin]);
        assert!(context.has_grant(RoleGrant::Admin));
    }

    #[test]
    fn test_regular_identity_holds_only_user_grant() {
        let context = AuthContext::new(Identity::new("bob", "local", false));

        assert_eq!(context.grants(), &[RoleGrant::User]);
        assert!(!context.has_grant(RoleGrant::Admin));
    }

    #[test]
    fn test_token_identity_has_token_source_and_no_attributes() {
        let identity = Identity::from_token("alice", false);

        assert_eq!(identity.source(), TOKEN_SOURCE);
        assert!(identity.attributes().is_empty());
    }

    #[test]
    fn test_attributes_are_ordered_by_key() {
        let attributes = BTreeMap::from([
            ("mail".to_string(), "carol@example.com".to_string()),
            ("department".to_string(), "qa".to_string()),
        ]);
        let identity = Identity::with_attributes("carol", "ldap", false, attributes);

        let keys: Vec<&str> = identity.attributes().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["department", "mail"]);
        assert_eq!(identity.attribute("mail"), Some("carol@example.com"));
        assert_eq!(identity.attribute("phone"), None);
    }

    #[test]
    fn test_role_grant_claim_names() {
        for grant in [RoleGrant::User, RoleGrant::Admin] {
            assert_eq!(RoleGrant::from_claim(grant.as_str()), Some(grant));
        }
        assert_eq!(RoleGrant::from_claim("ROLE_SUPERUSER"), None);
        assert_eq!(RoleGrant::from_claim("role_admin"), None);
        assert_eq!(RoleGrant::Admin.to_string(), "ROLE_ADMIN");
    }
}
