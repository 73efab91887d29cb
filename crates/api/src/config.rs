//! Application configuration loaded from environment variables.

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST` — bind address (default: `"0.0.0.0"`)
/// - `PORT` — listen port (default: `3000`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
/// - `AUTH_ISSUER_BASE_URL` — expected token issuer
/// - `AUTH_AUDIENCE` — expected token audience
/// - `AUTH_PUBLIC_KEY` — RSA public key PEM for RS256 verification
/// - `AUTH_SHARED_SECRET` — HS256 secret, used when no public key is set
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub token: TokenConfig,
}

/// Token verification settings.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub issuer: String,
    pub audience: String,
    pub public_key_pem: Option<String>,
    pub shared_secret: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            token: TokenConfig {
                issuer: std::env::var("AUTH_ISSUER_BASE_URL").unwrap_or_default(),
                audience: std::env::var("AUTH_AUDIENCE").unwrap_or_default(),
                public_key_pem: std::env::var("AUTH_PUBLIC_KEY").ok(),
                shared_secret: std::env::var("AUTH_SHARED_SECRET").ok(),
            },
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            token: TokenConfig {
                issuer: String::new(),
                audience: String::new(),
                public_key_pem: None,
                shared_secret: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.log_level, "info");
        assert!(config.token.public_key_pem.is_none());
        assert!(config.token.shared_secret.is_none());
    }

    #[test]
    fn test_addr_formatting() {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 8080,
            ..Config::default()
        };
        assert_eq!(config.addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_addr_default() {
        let config = Config::default();
        assert_eq!(config.addr(), "0.0.0.0:3000");
    }
}
