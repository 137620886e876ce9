//! # Journal Auth
//!
//! Authentication primitives for the journal service:
//!
//! - [`claims`]: bearer token claims
//! - [`jwt`]: HMAC-only token verification and minting
//! - [`key`]: the [`AuthKey`] descriptor attached to authenticated requests
//! - [`cookie`]: the AES-GCM sealed `role` cookie caching an [`AuthKey`]
//!
//! # Example
//!
//! ```ignore
//! use journal_auth::{RoleCookieCodec, verify_token};
//!
//! let claims = verify_token(token, &config.secret)?;
//! let codec = RoleCookieCodec::new(&config.secret);
//! let key = codec.open(cookie_value)?;
//! if key.email == claims.email {
//!     // cache hit, no database round-trip
//! }
//! ```

pub mod claims;
pub mod cookie;
pub mod jwt;
pub mod key;

pub use claims::Claims;
pub use cookie::{CookieError, ROLE_COOKIE, ROLE_COOKIE_MAX_AGE_SECS, RoleCookieCodec};
pub use jwt::{ACCEPTED_ALGORITHMS, bearer_token, create_token, verify_token};
pub use key::AuthKey;
