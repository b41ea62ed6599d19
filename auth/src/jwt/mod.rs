pub mod claims;
pub mod clock;
pub mod errors;
pub mod handler;
pub mod key;

pub use claims::Claims;
pub use claims::CLAIM_AUTHORIZATION;
pub use claims::CLAIM_USERNAME;
pub use clock::Clock;
pub use clock::FixedClock;
pub use clock::SystemClock;
pub use errors::JwtError;
pub use handler::JwtHandler;
pub use handler::SIGNATURE_ALGORITHM;
pub use key::SigningKeyProvider;
