//! API configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `GIFTWISE_DATABASE_URL` - `PostgreSQL` connection string
//! - `GIFTWISE_TOKEN_SECRET` - JWT signing secret (min 32 chars)
//! - `KAKAO_CLIENT_ID` - Kakao REST API key
//! - `KAKAO_REDIRECT_URI` - Registered Kakao OAuth redirect URI
//!
//! ## Optional
//! - `GIFTWISE_HOST` - Bind address (default: 127.0.0.1)
//! - `GIFTWISE_PORT` - Listen port (default: 3000)
//! - `GIFTWISE_TOKEN_TTL_MINUTES` - Token lifetime (default: 60)
//! - `KAKAO_AUTH_BASE_URL` - Token endpoint base (default: <https://kauth.kakao.com>)
//! - `KAKAO_API_BASE_URL` - Profile endpoint base (default: <https://kapi.kakao.com>)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Trace sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

const MIN_TOKEN_SECRET_LENGTH: usize = 32;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// API application configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// JWT signing secret
    pub token_secret: SecretString,
    /// Token lifetime in minutes
    pub token_ttl_minutes: i64,
    /// Kakao OAuth configuration
    pub kakao: KakaoConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate
    pub sentry_sample_rate: f32,
    /// Sentry trace sample rate
    pub sentry_traces_sample_rate: f32,
}

/// Kakao OAuth configuration.
#[derive(Debug, Clone)]
pub struct KakaoConfig {
    /// Kakao REST API key
    pub client_id: String,
    /// Registered redirect URI
    pub redirect_uri: String,
    /// Token endpoint base URL
    pub auth_base_url: String,
    /// Profile endpoint base URL
    pub api_base_url: String,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for a missing required variable, an unparsable
    /// value, or a token secret shorter than 32 characters.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = SecretString::from(required("GIFTWISE_DATABASE_URL")?);

        let token_secret = required("GIFTWISE_TOKEN_SECRET")?;
        if token_secret.len() < MIN_TOKEN_SECRET_LENGTH {
            return Err(ConfigError::InsecureSecret(
                "GIFTWISE_TOKEN_SECRET".to_owned(),
                format!("must be at least {MIN_TOKEN_SECRET_LENGTH} characters"),
            ));
        }
        let token_secret = SecretString::from(token_secret);

        let host = optional("GIFTWISE_HOST")
            .unwrap_or_else(|| "127.0.0.1".to_owned())
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("GIFTWISE_HOST".to_owned(), e.to_string()))?;

        let port = parse_optional("GIFTWISE_PORT", 3000_u16)?;
        let token_ttl_minutes = parse_optional("GIFTWISE_TOKEN_TTL_MINUTES", 60_i64)?;

        let kakao = KakaoConfig {
            client_id: required("KAKAO_CLIENT_ID")?,
            redirect_uri: required("KAKAO_REDIRECT_URI")?,
            auth_base_url: optional("KAKAO_AUTH_BASE_URL")
                .unwrap_or_else(|| "https://kauth.kakao.com".to_owned()),
            api_base_url: optional("KAKAO_API_BASE_URL")
                .unwrap_or_else(|| "https://kapi.kakao.com".to_owned()),
        };

        Ok(Self {
            database_url,
            host,
            port,
            token_secret,
            token_ttl_minutes,
            kakao,
            sentry_dsn: optional("SENTRY_DSN"),
            sentry_environment: optional("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_optional("SENTRY_SAMPLE_RATE", 1.0_f32)?,
            sentry_traces_sample_rate: parse_optional("SENTRY_TRACES_SAMPLE_RATE", 0.0_f32)?,
        })
    }

    /// The socket address to bind.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_owned()))
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn parse_optional<T: std::str::FromStr>(name: &str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    optional(name).map_or(Ok(default), |v| {
        v.parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(name.to_owned(), e.to_string()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_optional_default() {
        // Relies on the variable being absent in the test environment.
        let port: u16 = parse_optional("GIFTWISE_TEST_UNSET_PORT", 3000).unwrap_or(3000);
        assert_eq!(port, 3000);
    }

    #[test]
    fn test_secret_length_floor() {
        assert!("short".len() < MIN_TOKEN_SECRET_LENGTH);
        assert!("a-signing-secret-that-is-long-enough-to-pass".len() >= MIN_TOKEN_SECRET_LENGTH);
    }
}
