//! Integration tests for order placement and its inventory effects.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The API server running (cargo run -p giftwise-api)
//!
//! Run with: cargo test -p giftwise-integration-tests -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use giftwise_integration_tests::{base_url, client, register_member, unique_suffix};

/// Set up a category, product, and option with the given stock.
/// Returns `(product_id, option_id)`.
async fn seed_option(client: &Client, token: &str, stock: i64) -> (i64, i64) {
    let resp = client
        .post(format!("{}/api/categories", base_url()))
        .bearer_auth(token)
        .json(&json!({
            "name": format!("order-cat-{}", unique_suffix()),
            "color": "#8b5a2b",
            "image_url": "https://img.example.com/cat.png",
        }))
        .send()
        .await
        .expect("Failed to create category");
    let category: Value = resp.json().await.expect("Failed to parse category");

    let resp = client
        .post(format!("{}/api/products", base_url()))
        .bearer_auth(token)
        .json(&json!({
            "name": format!("order-product-{}", unique_suffix()),
            "price": 30_000,
            "image_url": "https://img.example.com/p.png",
            "category_id": category["id"],
            "option_name": "Default",
            "option_quantity": stock,
        }))
        .send()
        .await
        .expect("Failed to create product");
    let product: Value = resp.json().await.expect("Failed to parse product");
    let product_id = product["id"].as_i64().expect("product id missing");

    let resp = client
        .get(format!("{}/api/products/{product_id}/options", base_url()))
        .bearer_auth(token)
        .send()
        .await
        .expect("Failed to list options");
    let options: Value = resp.json().await.expect("Failed to parse options");
    let option_id = options[0]["id"].as_i64().expect("option id missing");

    (product_id, option_id)
}

async fn option_quantity(client: &Client, token: &str, product_id: i64, option_id: i64) -> i64 {
    let resp = client
        .get(format!("{}/api/products/{product_id}/options", base_url()))
        .bearer_auth(token)
        .send()
        .await
        .expect("Failed to list options");
    let options: Value = resp.json().await.expect("Failed to parse options");
    options
        .as_array()
        .expect("options missing")
        .iter()
        .find(|o| o["id"].as_i64() == Some(option_id))
        .and_then(|o| o["quantity"].as_i64())
        .expect("option quantity missing")
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_order_decrements_inventory() {
    let client = client();
    let token = register_member(&client).await;
    let (product_id, option_id) = seed_option(&client, &token, 10).await;

    let resp = client
        .post(format!("{}/api/orders", base_url()))
        .bearer_auth(&token)
        .json(&json!({ "option_id": option_id, "quantity": 4, "message": "happy birthday" }))
        .send()
        .await
        .expect("Failed to place order");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let order: Value = resp.json().await.expect("Failed to parse order");
    assert_eq!(order["quantity"], 4);
    assert_eq!(order["product_id"].as_i64(), Some(product_id));

    assert_eq!(option_quantity(&client, &token, product_id, option_id).await, 6);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_order_beyond_stock_conflicts_and_leaves_inventory() {
    let client = client();
    let token = register_member(&client).await;
    let (product_id, option_id) = seed_option(&client, &token, 3).await;

    let resp = client
        .post(format!("{}/api/orders", base_url()))
        .bearer_auth(&token)
        .json(&json!({ "option_id": option_id, "quantity": 5 }))
        .send()
        .await
        .expect("Failed to place order");
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    assert_eq!(option_quantity(&client, &token, product_id, option_id).await, 3);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_draining_stock_to_zero_succeeds_once() {
    let client = client();
    let token = register_member(&client).await;
    let (product_id, option_id) = seed_option(&client, &token, 100).await;

    let resp = client
        .post(format!("{}/api/orders", base_url()))
        .bearer_auth(&token)
        .json(&json!({ "option_id": option_id, "quantity": 100 }))
        .send()
        .await
        .expect("Failed to place order");
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(option_quantity(&client, &token, product_id, option_id).await, 0);

    // The drained option cannot cover even a single further unit.
    let resp = client
        .post(format!("{}/api/orders", base_url()))
        .bearer_auth(&token)
        .json(&json!({ "option_id": option_id, "quantity": 1 }))
        .send()
        .await
        .expect("Failed to place order");
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(option_quantity(&client, &token, product_id, option_id).await, 0);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_order_quantity_bounds() {
    let client = client();
    let token = register_member(&client).await;
    let (_, option_id) = seed_option(&client, &token, 10).await;

    for quantity in [0, -1, 100_000_001] {
        let resp = client
            .post(format!("{}/api/orders", base_url()))
            .bearer_auth(&token)
            .json(&json!({ "option_id": option_id, "quantity": quantity }))
            .send()
            .await
            .expect("Failed to place order");
        assert_eq!(
            resp.status(),
            StatusCode::BAD_REQUEST,
            "quantity {quantity} should be rejected"
        );
    }
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_order_removes_matching_wish() {
    let client = client();
    let token = register_member(&client).await;
    let (product_id, option_id) = seed_option(&client, &token, 10).await;

    let resp = client
        .post(format!("{}/api/wishes", base_url()))
        .bearer_auth(&token)
        .json(&json!({ "product_id": product_id, "quantity": 1 }))
        .send()
        .await
        .expect("Failed to create wish");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = client
        .post(format!("{}/api/orders", base_url()))
        .bearer_auth(&token)
        .json(&json!({ "option_id": option_id, "quantity": 1 }))
        .send()
        .await
        .expect("Failed to place order");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = client
        .get(format!("{}/api/wishes", base_url()))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to list wishes");
    let page: Value = resp.json().await.expect("Failed to parse page");
    assert_eq!(page["total_elements"], 0, "wish should be removed by the order");
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_unknown_option_is_not_found() {
    let client = client();
    let token = register_member(&client).await;

    let resp = client
        .post(format!("{}/api/orders", base_url()))
        .bearer_auth(&token)
        .json(&json!({ "option_id": i64::MAX, "quantity": 1 }))
        .send()
        .await
        .expect("Failed to place order");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // Option resolution comes before quantity validation: an unknown option
    // wins over an out-of-range quantity.
    let resp = client
        .post(format!("{}/api/orders", base_url()))
        .bearer_auth(&token)
        .json(&json!({ "option_id": i64::MAX, "quantity": 0 }))
        .send()
        .await
        .expect("Failed to place order");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_product_with_order_history_cannot_be_deleted() {
    let client = client();
    let token = register_member(&client).await;
    let (product_id, option_id) = seed_option(&client, &token, 10).await;

    let resp = client
        .post(format!("{}/api/orders", base_url()))
        .bearer_auth(&token)
        .json(&json!({ "option_id": option_id, "quantity": 1 }))
        .send()
        .await
        .expect("Failed to place order");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = client
        .delete(format!("{}/api/products/{product_id}", base_url()))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to delete product");
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // The product survives the rejected delete.
    let resp = client
        .get(format!("{}/api/products/{product_id}", base_url()))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to get product");
    assert_eq!(resp.status(), StatusCode::OK);
}
