//! Integration tests for the wishlist lifecycle.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The API server running (cargo run -p giftwise-api)
//!
//! Run with: cargo test -p giftwise-integration-tests -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use giftwise_integration_tests::{base_url, client, register_member, unique_suffix};

/// Set up a category and product, returning the product id.
async fn seed_product(client: &Client, token: &str) -> i64 {
    let resp = client
        .post(format!("{}/api/categories", base_url()))
        .bearer_auth(token)
        .json(&json!({
            "name": format!("wish-cat-{}", unique_suffix()),
            "color": "#f08080",
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
            "name": format!("wish-product-{}", unique_suffix()),
            "price": 9_900,
            "image_url": "https://img.example.com/p.png",
            "category_id": category["id"],
            "option_name": "Default",
            "option_quantity": 30,
        }))
        .send()
        .await
        .expect("Failed to create product");
    let product: Value = resp.json().await.expect("Failed to parse product");
    product["id"].as_i64().expect("product id missing")
}

async fn create_wish(client: &Client, token: &str, product_id: i64, quantity: i64) -> Value {
    let resp = client
        .post(format!("{}/api/wishes", base_url()))
        .bearer_auth(token)
        .json(&json!({ "product_id": product_id, "quantity": quantity }))
        .send()
        .await
        .expect("Failed to create wish");
    assert_eq!(resp.status(), StatusCode::CREATED);
    resp.json().await.expect("Failed to parse wish")
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_wish_create_list_delete() {
    let client = client();
    let token = register_member(&client).await;
    let product_id = seed_product(&client, &token).await;

    let wish = create_wish(&client, &token, product_id, 2).await;
    let wish_id = wish["id"].as_i64().expect("wish id missing");

    // The listing carries the joined product fields
    let resp = client
        .get(format!("{}/api/wishes", base_url()))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to list wishes");
    assert_eq!(resp.status(), StatusCode::OK);
    let page: Value = resp.json().await.expect("Failed to parse page");
    let content = page["content"].as_array().expect("content missing");
    assert_eq!(content.len(), 1);
    assert_eq!(content[0]["quantity"], 2);
    assert!(content[0]["product_name"].as_str().is_some());

    let resp = client
        .delete(format!("{}/api/wishes/{wish_id}", base_url()))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to delete wish");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = client
        .get(format!("{}/api/wishes", base_url()))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to list wishes");
    let page: Value = resp.json().await.expect("Failed to parse page");
    assert_eq!(page["total_elements"], 0);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_duplicate_wish_conflicts() {
    let client = client();
    let token = register_member(&client).await;
    let product_id = seed_product(&client, &token).await;

    create_wish(&client, &token, product_id, 1).await;

    let resp = client
        .post(format!("{}/api/wishes", base_url()))
        .bearer_auth(&token)
        .json(&json!({ "product_id": product_id, "quantity": 3 }))
        .send()
        .await
        .expect("Failed to re-create wish");
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_zero_quantity_update_deletes_wish() {
    let client = client();
    let token = register_member(&client).await;
    let product_id = seed_product(&client, &token).await;

    let wish = create_wish(&client, &token, product_id, 5).await;
    let wish_id = wish["id"].as_i64().expect("wish id missing");

    let resp = client
        .put(format!("{}/api/wishes/{wish_id}", base_url()))
        .bearer_auth(&token)
        .json(&json!({ "quantity": 0 }))
        .send()
        .await
        .expect("Failed to update wish");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse update");
    assert_eq!(body["deleted"], true);
    assert!(body["wish"].is_null());

    let resp = client
        .get(format!("{}/api/wishes", base_url()))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to list wishes");
    let page: Value = resp.json().await.expect("Failed to parse page");
    assert_eq!(page["total_elements"], 0);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_negative_quantity_update_deletes_wish() {
    // A negative quantity takes the same deletion transition as zero.
    let client = client();
    let token = register_member(&client).await;
    let product_id = seed_product(&client, &token).await;

    let wish = create_wish(&client, &token, product_id, 5).await;
    let wish_id = wish["id"].as_i64().expect("wish id missing");

    let resp = client
        .put(format!("{}/api/wishes/{wish_id}", base_url()))
        .bearer_auth(&token)
        .json(&json!({ "quantity": -1 }))
        .send()
        .await
        .expect("Failed to update wish");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse update");
    assert_eq!(body["deleted"], true);
    assert!(body["wish"].is_null());

    // The wish is gone, not zero-quantity.
    let resp = client
        .put(format!("{}/api/wishes/{wish_id}", base_url()))
        .bearer_auth(&token)
        .json(&json!({ "quantity": 3 }))
        .send()
        .await
        .expect("Failed to re-update wish");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_wish_of_another_member_is_forbidden() {
    let client = client();
    let owner_token = register_member(&client).await;
    let intruder_token = register_member(&client).await;
    let product_id = seed_product(&client, &owner_token).await;

    let wish = create_wish(&client, &owner_token, product_id, 1).await;
    let wish_id = wish["id"].as_i64().expect("wish id missing");

    let resp = client
        .put(format!("{}/api/wishes/{wish_id}", base_url()))
        .bearer_auth(&intruder_token)
        .json(&json!({ "quantity": 9 }))
        .send()
        .await
        .expect("Failed to update wish");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = client
        .delete(format!("{}/api/wishes/{wish_id}", base_url()))
        .bearer_auth(&intruder_token)
        .send()
        .await
        .expect("Failed to delete wish");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}
