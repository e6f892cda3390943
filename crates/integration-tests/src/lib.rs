//! Integration tests for Giftwise.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and run migrations
//! docker compose up -d postgres
//! cargo run -p giftwise-cli -- migrate
//!
//! # Start the API server
//! cargo run -p giftwise-api
//!
//! # Run integration tests
//! cargo test -p giftwise-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `auth` - Registration, login, and token gating
//! - `catalog` - Category, product, and option CRUD
//! - `wishlist` - Wish lifecycle against a live server
//! - `ordering` - Order placement and inventory effects

use reqwest::Client;
use serde_json::{Value, json};

/// Base URL for the API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("GIFTWISE_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// A plain HTTP client.
#[must_use]
pub fn client() -> Client {
    Client::new()
}

/// Register a fresh member with a unique email and return the issued token.
///
/// # Panics
///
/// Panics if the registration request fails.
pub async fn register_member(client: &Client) -> String {
    let email = format!("member-{}@integration.test", unique_suffix());
    let resp = client
        .post(format!("{}/api/members/register", base_url()))
        .json(&json!({ "email": email, "password": "correct horse battery" }))
        .send()
        .await
        .expect("Failed to register member");

    assert!(resp.status().is_success(), "registration failed: {}", resp.status());
    let body: Value = resp.json().await.expect("Failed to parse token response");
    body["token"]
        .as_str()
        .expect("token missing from response")
        .to_owned()
}

/// A unique-enough suffix for test emails and names.
#[must_use]
pub fn unique_suffix() -> u128 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default()
}
