//! Identity resolution: from a verified token to a known user.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use common::UserId;
use store::UserStore;

use crate::error::AuthError;
use crate::gate::VerifiedToken;

/// The caller's identity, attached to a request once resolution
/// succeeds. Immutable for the remainder of the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestIdentity {
    pub subject: String,
    pub user_id: UserId,
}

/// Extracts the token from an `Authorization: Bearer <token>` header
/// value. A missing or malformed header is a plain unauthorized.
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    header
        .and_then(|h| h.strip_prefix("Bearer "))
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::Unauthorized)
}

/// Maps a verified token's subject to a stored user record.
#[derive(Debug, Clone)]
pub struct IdentityResolver<U> {
    users: U,
}

impl<U: UserStore> IdentityResolver<U> {
    pub fn new(users: U) -> Self {
        Self { users }
    }

    /// Reads the subject claim out of the verified token and looks up
    /// the matching user.
    ///
    /// The payload is decoded without re-verifying the signature; the
    /// [`VerifiedToken`](crate::gate::VerifiedToken) type guarantees a
    /// gate already did. Unknown subjects and store faults both come
    /// back as unauthorized.
    pub async fn resolve(&self, token: &VerifiedToken) -> Result<RequestIdentity, AuthError> {
        let subject = subject_of(token.raw()).ok_or(AuthError::Unauthorized)?;

        let user = self
            .users
            .find_user_by_subject(&subject)
            .await
            .map_err(|err| {
                tracing::warn!(error = %err, "user lookup failed during identity resolution");
                AuthError::Unauthorized
            })?
            .ok_or(AuthError::Unauthorized)?;

        Ok(RequestIdentity {
            subject,
            user_id: user.id,
        })
    }
}

fn subject_of(raw: &str) -> Option<String> {
    let payload = raw.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
    let value: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    value.get("sub")?.as_str().map(str::to_string)
}
