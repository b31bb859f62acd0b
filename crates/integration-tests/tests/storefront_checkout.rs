//! End-to-end checkout tests against a running storefront.
//!
//! These tests require:
//! - A migrated, seeded `PostgreSQL` database (panier-cli migrate && panier-cli seed)
//! - The storefront server running (cargo run -p panier-storefront)
//!
//! Run with: cargo test -p panier-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};

use panier_integration_tests::{http_client, storefront_base_url};

/// Fetch the seeded catalog of supplier 1 and return (`product_id`, `selling_price`).
async fn first_product(client: &reqwest::Client) -> (i64, i64) {
    let base_url = storefront_base_url();
    let resp = client
        .get(format!("{base_url}/api/suppliers/1/products"))
        .send()
        .await
        .expect("Failed to list products");
    assert_eq!(resp.status(), StatusCode::OK);

    let products: Vec<Value> = resp.json().await.expect("Failed to parse products");
    let product = products.first().expect("Supplier 1 has no products");
    let id = product["id"].as_i64().expect("product id");
    let price: i64 = product["selling_price"]
        .as_str()
        .expect("selling_price serialized as string")
        .parse()
        .expect("whole-unit selling price");
    (id, price)
}

#[tokio::test]
#[ignore = "Requires running storefront server and seeded database"]
async fn test_health() {
    let client = http_client();
    let resp = client
        .get(format!("{}/health", storefront_base_url()))
        .send()
        .await
        .expect("Failed to reach storefront");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running storefront server and seeded database"]
async fn test_catalog_never_exposes_supplier_cost() {
    let client = http_client();
    let resp = client
        .get(format!("{}/api/suppliers/1/products", storefront_base_url()))
        .send()
        .await
        .expect("Failed to list products");
    assert_eq!(resp.status(), StatusCode::OK);

    let products: Vec<Value> = resp.json().await.expect("Failed to parse products");
    assert!(!products.is_empty());
    for product in &products {
        assert!(
            product.get("supplier_price").is_none(),
            "confidential cost leaked: {product}"
        );
    }
}

#[tokio::test]
#[ignore = "Requires running storefront server and seeded database"]
async fn test_checkout_without_promo_charges_full_price() {
    let client = http_client();
    let (product_id, selling_price) = first_product(&client).await;

    let resp = client
        .post(format!("{}/api/checkout", storefront_base_url()))
        .json(&json!({
            "client_id": 1,
            "supplier_id": 1,
            "delivery_fee": 1000,
            "lines": [{"product_id": product_id, "quantity": 2}]
        }))
        .send()
        .await
        .expect("Checkout request failed");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let order: Value = resp.json().await.expect("Failed to parse order");
    assert!(order["promo"].is_null());
    assert_eq!(order["status"], "pending");

    let items_total: i64 = order["items_total"].as_str().unwrap().parse().unwrap();
    let grand_total: i64 = order["grand_total"].as_str().unwrap().parse().unwrap();
    assert_eq!(items_total, selling_price * 2);
    assert_eq!(grand_total, items_total + 1000);
}

#[tokio::test]
#[ignore = "Requires running storefront server and seeded database"]
async fn test_checkout_with_promo_freezes_the_benefit() {
    let client = http_client();
    let (product_id, selling_price) = first_product(&client).await;

    let resp = client
        .post(format!("{}/api/checkout", storefront_base_url()))
        .json(&json!({
            "client_id": 1,
            "supplier_id": 1,
            "promo_code": "cheikh26",
            "lines": [{"product_id": product_id, "quantity": 1}]
        }))
        .send()
        .await
        .expect("Checkout request failed");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let order: Value = resp.json().await.expect("Failed to parse order");
    let promo = &order["promo"];
    assert_eq!(promo["code"], "CHEIKH26", "codes are stored uppercase");
    assert_eq!(promo["partner_level"], "standard");
    assert_eq!(promo["status"], "applied");

    let discount: i64 = promo["discount_amount"].as_str().unwrap().parse().unwrap();
    let grand_total: i64 = order["grand_total"].as_str().unwrap().parse().unwrap();
    assert!(discount > 0);
    assert_eq!(grand_total, selling_price - discount);
}

#[tokio::test]
#[ignore = "Requires running storefront server and seeded database"]
async fn test_checkout_with_unknown_promo_is_blocked() {
    let client = http_client();
    let (product_id, _) = first_product(&client).await;

    let resp = client
        .post(format!("{}/api/checkout", storefront_base_url()))
        .json(&json!({
            "client_id": 1,
            "supplier_id": 1,
            "promo_code": "NOSUCHCODE",
            "lines": [{"product_id": product_id, "quantity": 1}]
        }))
        .send()
        .await
        .expect("Checkout request failed");
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
#[ignore = "Requires running storefront server and seeded database"]
async fn test_checkout_rejects_an_empty_cart() {
    let client = http_client();
    let resp = client
        .post(format!("{}/api/checkout", storefront_base_url()))
        .json(&json!({
            "client_id": 1,
            "supplier_id": 1,
            "lines": []
        }))
        .send()
        .await
        .expect("Checkout request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
