use std::fmt;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use rand::rngs::OsRng;
use rand::rngs::StdRng;
use rand::RngCore;
use rand::SeedableRng;

/// Length of generated signing keys in bytes (512 bits, one HS512 block).
pub const SIGNING_KEY_LENGTH: usize = 64;

/// Constant key used in development mode. Anyone knowing it can forge tokens.
const DEVELOPMENT_SIGNING_KEY: &[u8] = b"JwTt0Kn-development-only-signing-key";

/// Owner of the symmetric key used to sign and verify tokens.
///
/// Construct exactly one provider per process and share it. Outside of
/// development mode the key is random and lives only in memory, so a restart
/// invalidates every token issued before it.
pub struct SigningKeyProvider {
    key: Vec<u8>,
    development: bool,
}

impl SigningKeyProvider {
    /// Create a provider for the given mode.
    ///
    /// # Arguments
    /// * `development_mode` - Use the fixed development key instead of a random one
    pub fn new(development_mode: bool) -> Self {
        if development_mode {
            Self::development()
        } else {
            Self::random()
        }
    }

    /// Provider returning the fixed development key.
    pub fn development() -> Self {
        Self {
            key: DEVELOPMENT_SIGNING_KEY.to_vec(),
            development: true,
        }
    }

    /// Provider with a fresh random key from the operating system.
    pub fn random() -> Self {
        Self::from_rng(&mut OsRng)
    }

    /// Fill the key from `strong`, degrading to a time-seeded generator if it
    /// cannot deliver.
    fn from_rng<R: RngCore>(strong: &mut R) -> Self {
        let mut key = vec![0u8; SIGNING_KEY_LENGTH];

        if let Err(e) = strong.try_fill_bytes(&mut key) {
            tracing::warn!(
                error = %e,
                "No secure random source available, using pseudorandom generator for signing key"
            );
            pseudorandom_rng().fill_bytes(&mut key);
        }

        Self {
            key,
            development: false,
        }
    }

    /// Key bytes for signing and verification.
    pub fn signing_key(&self) -> &[u8] {
        &self.key
    }

    pub fn is_development(&self) -> bool {
        self.development
    }
}

fn pseudorandom_rng() -> StdRng {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();
    StdRng::seed_from_u64(nanos ^ u64::from(std::process::id()))
}

impl fmt::Debug for SigningKeyProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKeyProvider")
            .field("key", &"<redacted>")
            .field("development", &self.development)
            .finish()
    }
}
