//! Kakao OAuth client.
//!
//! Exchanges an authorization code for an access token, then fetches the
//! account profile (id + nickname). Failures are surfaced to the caller as
//! typed errors; no retries are performed here.

use reqwest::header::{HeaderMap, HeaderValue};
use serde::Deserialize;

use crate::config::KakaoConfig;

/// Errors that can occur when talking to Kakao.
#[derive(Debug, thiserror::Error)]
pub enum KakaoError {
    /// HTTP request failed (connect, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Kakao returned a non-success response.
    #[error("Kakao API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse a Kakao response.
    #[error("parse error: {0}")]
    Parse(String),
}

/// The profile Kakao resolves for an authorization code.
#[derive(Debug, Clone)]
pub struct KakaoProfile {
    /// Kakao account identifier, stable across logins.
    pub id: String,
    /// Profile nickname (used as a placeholder credential on first login).
    pub nickname: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    id: i64,
    properties: Option<UserProperties>,
}

#[derive(Debug, Deserialize)]
struct UserProperties {
    nickname: Option<String>,
}

/// Client for the Kakao OAuth token exchange and profile lookup.
#[derive(Clone)]
pub struct KakaoClient {
    client: reqwest::Client,
    client_id: String,
    redirect_uri: String,
    auth_base_url: String,
    api_base_url: String,
}

impl KakaoClient {
    /// Create a new Kakao client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &KakaoConfig) -> Result<Self, KakaoError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "Content-Type",
            HeaderValue::from_static("application/x-www-form-urlencoded;charset=utf-8"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            client_id: config.client_id.clone(),
            redirect_uri: config.redirect_uri.clone(),
            auth_base_url: config.auth_base_url.clone(),
            api_base_url: config.api_base_url.clone(),
        })
    }

    /// Exchange an authorization code for the account profile.
    ///
    /// # Errors
    ///
    /// Returns `KakaoError::Api` when Kakao rejects the code and
    /// `KakaoError::Http`/`Parse` for transport or decoding failures.
    pub async fn exchange_code(&self, code: &str) -> Result<KakaoProfile, KakaoError> {
        let access_token = self.fetch_access_token(code).await?;
        self.fetch_profile(&access_token).await
    }

    async fn fetch_access_token(&self, code: &str) -> Result<String, KakaoError> {
        let url = format!("{}/oauth/token", self.auth_base_url);
        let params = [
            ("grant_type", "authorization_code"),
            ("client_id", self.client_id.as_str()),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("code", code),
        ];

        let response = self.client.post(&url).form(&params).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(KakaoError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| KakaoError::Parse(e.to_string()))?;

        Ok(token.access_token)
    }

    async fn fetch_profile(&self, access_token: &str) -> Result<KakaoProfile, KakaoError> {
        let url = format!("{}/v2/user/me", self.api_base_url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(KakaoError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let user: UserResponse = response
            .json()
            .await
            .map_err(|e| KakaoError::Parse(e.to_string()))?;

        let nickname = user
            .properties
            .and_then(|p| p.nickname)
            .unwrap_or_else(|| format!("kakao-{}", user.id));

        Ok(KakaoProfile {
            id: user.id.to_string(),
            nickname,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_user_response_decoding() {
        let json = r#"{"id": 123456789, "properties": {"nickname": "gifter"}}"#;
        let user: UserResponse = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, 123_456_789);
        assert_eq!(user.properties.unwrap().nickname.as_deref(), Some("gifter"));
    }

    #[test]
    fn test_user_response_without_properties() {
        let json = r#"{"id": 42}"#;
        let user: UserResponse = serde_json::from_str(json).unwrap();
        assert!(user.properties.is_none());
    }

    #[test]
    fn test_token_response_ignores_extras() {
        let json = r#"{"access_token": "abc", "token_type": "bearer", "expires_in": 21599}"#;
        let token: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(token.access_token, "abc");
    }
}
