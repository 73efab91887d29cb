//! Authentication error types.

use thiserror::Error;

/// Errors produced by token verification and identity resolution.
///
/// Every failure collapses to a single variant so the response layer
/// cannot leak which stage rejected the request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("unauthorized")]
    Unauthorized,
}
