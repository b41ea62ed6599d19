use std::collections::HashMap;

use async_trait::async_trait;
use auth::PasswordHasher;

use crate::config::UserConfig;
use crate::domain::auth::errors::StoreError;
use crate::domain::auth::models::Identity;
use crate::domain::auth::ports::UserStore;

/// Verified in place of a real record when the user is unknown, so lookups of
/// missing users cost the same Argon2 work as a wrong password. Uses the
/// hasher's default parameters; no password matches it.
const UNKNOWN_USER_HASH: &str = concat!(
    "$argon2id$v=19$m=19456,t=2,p=1",
    "$dW5rbm93bi11c2VyLXNhbHQ",
    "$AAECAwQFBgcICQoLDA0ODxAREhMUFRYXGBkaGxwdHh8",
);

struct StoredUser {
    identity: Identity,
    password_hash: String,
}

/// User store backed by a fixed set of records held in memory.
///
/// Passwords are kept as Argon2 PHC hashes, never in plaintext.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: HashMap<String, StoredUser>,
    password_hasher: PasswordHasher,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from configured user records.
    pub fn from_config(users: &[UserConfig]) -> Self {
        users.iter().fold(Self::new(), |store, user| {
            store.with_user(
                Identity::with_attributes(
                    user.name.clone(),
                    user.source.clone(),
                    user.admin,
                    user.attributes.clone(),
                ),
                user.password_hash.clone(),
            )
        })
    }

    /// Add a user. A later record with the same name replaces an earlier one.
    pub fn with_user(mut self, identity: Identity, password_hash: impl Into<String>) -> Self {
        self.users.insert(
            identity.name().to_string(),
            StoredUser {
                identity,
                password_hash: password_hash.into(),
            },
        );
        self
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Identity>, StoreError> {
        let user = self.users.get(username);

        let password_hasher = self.password_hasher;
        let password = password.to_string();
        let password_hash = user
            .map_or(UNKNOWN_USER_HASH, |user| user.password_hash.as_str())
            .to_string();

        // Argon2 blocks; run it off the async workers
        let verified =
            tokio::task::spawn_blocking(move || password_hasher.verify(&password, &password_hash))
                .await
                .map_err(|e| StoreError::Unavailable(format!("password check aborted: {}", e)))?;

        let Some(user) = user else {
            return Ok(None);
        };

        let matches = verified.map_err(|e| StoreError::CorruptRecord {
            user: username.to_string(),
            reason: e.to_string(),
        })?;

        Ok(matches.then(|| user.identity.clone()))
    }
}
