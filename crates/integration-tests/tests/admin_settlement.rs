//! End-to-end lifecycle and settlement tests against both running servers.
//!
//! These tests require:
//! - A migrated, seeded `PostgreSQL` database (panier-cli migrate && panier-cli seed)
//! - The storefront server running (cargo run -p panier-storefront)
//! - The admin server running (cargo run -p panier-admin)
//!
//! Run with: cargo test -p panier-integration-tests -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use panier_integration_tests::{admin_base_url, http_client, storefront_base_url};

/// Place an order for supplier 1 through the storefront and return its JSON.
async fn place_order(client: &Client, promo_code: Option<&str>, delivery_fee: i64) -> Value {
    let base_url = storefront_base_url();
    let products: Vec<Value> = client
        .get(format!("{base_url}/api/suppliers/1/products"))
        .send()
        .await
        .expect("Failed to list products")
        .json()
        .await
        .expect("Failed to parse products");
    let product_id = products.first().expect("no products")["id"]
        .as_i64()
        .expect("product id");

    let mut body = json!({
        "client_id": 1,
        "supplier_id": 1,
        "delivery_fee": delivery_fee,
        "lines": [{"product_id": product_id, "quantity": 1}]
    });
    if let Some(code) = promo_code {
        body["promo_code"] = json!(code);
    }

    let resp = client
        .post(format!("{base_url}/api/checkout"))
        .json(&body)
        .send()
        .await
        .expect("Checkout request failed");
    assert_eq!(resp.status(), StatusCode::CREATED);
    resp.json().await.expect("Failed to parse order")
}

/// Drive an order through the given statuses, asserting each transition.
async fn advance(client: &Client, order_id: i64, statuses: &[&str]) -> Value {
    let base_url = admin_base_url();
    let mut last = Value::Null;
    for status in statuses {
        let resp = client
            .post(format!("{base_url}/api/orders/{order_id}/status"))
            .json(&json!({"status": status}))
            .send()
            .await
            .expect("Status change failed");
        assert_eq!(resp.status(), StatusCode::OK, "transition to {status}");
        last = resp.json().await.expect("Failed to parse order summary");
    }
    last
}

async fn supplier_debt(client: &Client) -> f64 {
    let resp = client
        .get(format!("{}/api/suppliers/1/financials", admin_base_url()))
        .send()
        .await
        .expect("Failed to fetch financials");
    assert_eq!(resp.status(), StatusCode::OK);
    let financials: Value = resp.json().await.expect("Failed to parse financials");
    financials["platform_debt"]
        .as_str()
        .expect("decimal as string")
        .parse()
        .expect("numeric debt")
}

#[tokio::test]
#[ignore = "Requires running storefront and admin servers with a seeded database"]
async fn test_lifecycle_rejects_a_skipped_step() {
    let client = http_client();
    let order = place_order(&client, None, 0).await;
    let order_id = order["id"].as_i64().unwrap();

    let resp = client
        .post(format!("{}/api/orders/{order_id}/status", admin_base_url()))
        .json(&json!({"status": "delivered"}))
        .send()
        .await
        .expect("Status change failed");
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "Requires running storefront and admin servers with a seeded database"]
async fn test_shipping_order_enters_the_debt_and_settlement_clears_it() {
    let client = http_client();
    let order = place_order(&client, None, 1000).await;
    let order_id = order["id"].as_i64().unwrap();
    let platform_debt: f64 = order["platform_debt"].as_str().unwrap().parse().unwrap();

    let debt_before = supplier_debt(&client).await;
    advance(&client, order_id, &["preparing", "shipping"]).await;
    let debt_shipping = supplier_debt(&client).await;

    // The order's frozen margin plus 10% of the fee joins the debt.
    let expected_delta = platform_debt + 100.0;
    assert!(
        (debt_shipping - debt_before - expected_delta).abs() < 0.01,
        "debt moved by {} instead of {expected_delta}",
        debt_shipping - debt_before
    );

    let resp = client
        .post(format!("{}/api/suppliers/1/settle", admin_base_url()))
        .send()
        .await
        .expect("Settle request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let settled: Value = resp.json().await.expect("Failed to parse settle response");
    assert!(settled["settled"].as_u64().unwrap() >= 1);

    assert!(supplier_debt(&client).await.abs() < 0.01);
}

#[tokio::test]
#[ignore = "Requires running storefront and admin servers with a seeded database"]
async fn test_delivery_credits_the_partner() {
    let client = http_client();

    let partner_before = partner_by_code(&client, "MARIAMA1").await;
    let sales_before = partner_before["total_sales"].as_i64().unwrap();

    let order = place_order(&client, Some("MARIAMA1"), 0).await;
    let order_id = order["id"].as_i64().unwrap();
    let commission: f64 = order["promo"]["partner_commission"]
        .as_str()
        .unwrap()
        .parse()
        .unwrap();

    assert_eq!(order["promo"]["status"], "applied");

    advance(&client, order_id, &["preparing", "shipping", "delivered"]).await;

    // The promo sub-record is validated once the sale is delivered.
    let orders: Vec<Value> = client
        .get(format!("{}/api/suppliers/1/orders", admin_base_url()))
        .send()
        .await
        .expect("Failed to list orders")
        .json()
        .await
        .expect("Failed to parse orders");
    let delivered = orders
        .iter()
        .find(|o| o["id"].as_i64() == Some(order_id))
        .expect("order missing from listing");
    assert_eq!(delivered["promo_status"], "validated");

    let partner_after = partner_by_code(&client, "MARIAMA1").await;
    assert_eq!(
        partner_after["total_sales"].as_i64().unwrap(),
        sales_before + 1
    );

    let wallet_before: f64 = partner_before["wallet_balance"].as_str().unwrap().parse().unwrap();
    let wallet_after: f64 = partner_after["wallet_balance"].as_str().unwrap().parse().unwrap();
    assert!((wallet_after - wallet_before - commission).abs() < 0.01);
}

async fn partner_by_code(client: &Client, code: &str) -> Value {
    let partners: Vec<Value> = client
        .get(format!("{}/api/partners", admin_base_url()))
        .send()
        .await
        .expect("Failed to list partners")
        .json()
        .await
        .expect("Failed to parse partners");
    partners
        .into_iter()
        .find(|p| p["promo_code"] == code)
        .expect("seeded partner missing")
}
