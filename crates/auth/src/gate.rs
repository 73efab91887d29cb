//! Token gates: signature and claim verification.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use crate::claims::Claims;
use crate::error::AuthError;

/// A bearer token that has passed gate verification.
///
/// The raw token is private and the only constructor is crate-internal,
/// so holding one proves a [`TokenGate`] accepted it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedToken {
    raw: String,
}

impl VerifiedToken {
    pub(crate) fn new(raw: String) -> Self {
        Self { raw }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }
}

/// Verifies a raw bearer token's signature and registered claims.
pub trait TokenGate: Send + Sync {
    fn verify(&self, token: &str) -> Result<VerifiedToken, AuthError>;
}

/// JWT gate validating signature, expiry, issuer, and audience.
pub struct JwtGate {
    key: DecodingKey,
    validation: Validation,
}

impl JwtGate {
    /// Gate for RS256 tokens, keyed by the issuer's public key in PEM form.
    pub fn rs256(
        public_key_pem: &str,
        issuer: &str,
        audience: &str,
    ) -> Result<Self, jsonwebtoken::errors::Error> {
        let key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes())?;
        Ok(Self {
            key,
            validation: build_validation(Algorithm::RS256, issuer, audience),
        })
    }

    /// Gate for HS256 tokens with a shared secret.
    pub fn hs256(secret: &str, issuer: &str, audience: &str) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation: build_validation(Algorithm::HS256, issuer, audience),
        }
    }
}

fn build_validation(algorithm: Algorithm, issuer: &str, audience: &str) -> Validation {
    let mut validation = Validation::new(algorithm);
    validation.set_issuer(&[issuer]);
    validation.set_audience(&[audience]);
    validation
}

impl TokenGate for JwtGate {
    fn verify(&self, token: &str) -> Result<VerifiedToken, AuthError> {
        match decode::<Claims>(token, &self.key, &self.validation) {
            Ok(_) => Ok(VerifiedToken::new(token.to_string())),
            Err(err) => {
                tracing::debug!(error = %err, "token rejected");
                Err(AuthError::Unauthorized)
            }
        }
    }
}
