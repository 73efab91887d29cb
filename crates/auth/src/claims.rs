//! Token claims.

use serde::{Deserialize, Serialize};

/// The registered claims the gate validates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iss: String,
    pub exp: u64,
    #[serde(default)]
    pub aud: Option<String>,
}
