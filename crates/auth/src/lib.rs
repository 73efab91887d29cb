//! Bearer-token verification and identity resolution.
//!
//! Authentication happens in two ordered stages:
//! 1. A [`TokenGate`] verifies the raw bearer token's signature and
//!    standard claims, minting a [`VerifiedToken`].
//! 2. An [`IdentityResolver`] reads the subject out of a verified token
//!    and looks up the matching user record.
//!
//! Only a gate can construct a `VerifiedToken`, so a resolver can never
//! run against an unverified token.

pub mod claims;
pub mod error;
pub mod gate;
pub mod identity;

pub use claims::Claims;
pub use error::AuthError;
pub use gate::{JwtGate, TokenGate, VerifiedToken};
pub use identity::{IdentityResolver, RequestIdentity, bearer_token};
