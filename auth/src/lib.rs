//! Authentication utilities library
//!
//! Provides the domain-neutral building blocks of token authentication:
//! - Signing key provisioning (random per process, fixed in development mode)
//! - An injectable clock
//! - HS512 JWT encoding and signature verification
//! - Password hashing (Argon2id) for credential stores
//!
//! Services define what an identity is and how claims map onto it; this crate
//! only guarantees that what comes out of `JwtHandler::decode` was signed with
//! the provider's key using the single supported algorithm.
//!
//! # Examples
//!
//! ## Signing and verifying
//! ```
//! use auth::{Claims, JwtHandler, SigningKeyProvider};
//!
//! let provider = SigningKeyProvider::new(false);
//! let handler = JwtHandler::from_provider(&provider);
//!
//! let claims = Claims::new()
//!     .with_username("alice")
//!     .with_authorization(["ROLE_USER"])
//!     .with_expiration(4_102_444_800);
//! let token = handler.encode(&claims).unwrap();
//!
//! let decoded = handler.decode::<Claims>(&token).unwrap();
//! assert_eq!(decoded.claims.username(), Some("alice"));
//! ```
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```

pub mod jwt;
pub mod password;

pub use jwt::Claims;
pub use jwt::Clock;
pub use jwt::FixedClock;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::SigningKeyProvider;
pub use jwt::SystemClock;
pub use password::PasswordError;
pub use password::PasswordHasher;
