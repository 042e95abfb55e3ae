//! End-to-end tests for the public and admin API.
//!
//! Each test starts a fresh server (see `TestServer`) and drives it over HTTP.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};
use tiffin_core::Customer;
use tiffin_integration_tests::{ADMIN_PASSWORD, TestServer};

#[derive(Debug, Deserialize)]
struct SignupBody {
    message: String,
    customer: Customer,
}

async fn sign_up(server: &TestServer, email: &str) -> reqwest::Response {
    server
        .client
        .post(server.url("/api/signup"))
        .json(&json!({
            "name": "Guest",
            "email": email,
            "phone": "9876543210",
            "street": "12 MG Road",
            "city": "Bengaluru",
            "state": "KA",
            "pincode": "560001",
            "dob": "1990-04-01",
            "password": "hunter22"
        }))
        .send()
        .await
        .unwrap()
}

async fn get_text(server: &TestServer, path: &str) -> (StatusCode, String) {
    let resp = server.client.get(server.url(path)).send().await.unwrap();
    let status = resp.status();
    (status, resp.text().await.unwrap())
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_endpoints() {
    let server = TestServer::start().await;

    assert_eq!(get_text(&server, "/health").await, (StatusCode::OK, "ok".to_owned()));
    assert_eq!(get_text(&server, "/health/ready").await.0, StatusCode::OK);
}

// ============================================================================
// Signup
// ============================================================================

#[tokio::test]
async fn test_two_signups_preserve_order_with_distinct_ids() {
    let server = TestServer::start().await;

    let first = sign_up(&server, "a@x.com").await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let first: SignupBody = first.json().await.unwrap();
    assert_eq!(first.message, "Signup successful");

    let second: SignupBody = sign_up(&server, "b@x.com").await.json().await.unwrap();

    let customers: Vec<Customer> = server
        .client
        .get(server.url("/api/customers"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(customers.len(), 2);
    assert_eq!(customers[0].email.as_str(), "a@x.com");
    assert_eq!(customers[1].email.as_str(), "b@x.com");
    assert_ne!(customers[0].id, customers[1].id);
    assert_eq!(customers[0], first.customer);
    assert_eq!(customers[1], second.customer);
}

#[tokio::test]
async fn test_duplicate_signup_is_rejected_and_store_unchanged() {
    let server = TestServer::start().await;
    sign_up(&server, "a@x.com").await;
    let customers_file = server.data_dir().join("customers.json");
    let before = std::fs::read_to_string(&customers_file).unwrap();

    let resp = sign_up(&server, "a@x.com").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({"message": "Email already registered"}));

    assert_eq!(std::fs::read_to_string(&customers_file).unwrap(), before);
}

#[tokio::test]
async fn test_signup_ignores_caller_id_and_signup_date() {
    let server = TestServer::start().await;

    let resp = server
        .client
        .post(server.url("/api/signup"))
        .json(&json!({
            "name": "Guest",
            "email": "c@x.com",
            "id": 1,
            "signupDate": "1999-01-01T00:00:00.000Z"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: SignupBody = resp.json().await.unwrap();
    assert_ne!(body.customer.id.as_i64(), 1);
    assert_ne!(body.customer.signup_date.to_rfc3339(), "1999-01-01T00:00:00+00:00");
}

// ============================================================================
// Orders & Reservations
// ============================================================================

#[tokio::test]
async fn test_order_id_and_date_are_server_generated() {
    let server = TestServer::start().await;

    let resp = server
        .client
        .post(server.url("/api/orders"))
        .json(&json!({"id": "client-id", "date": "client-date", "items": ["Thali"], "total": 240}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Order placed successfully");

    let stored: Vec<Value> = serde_json::from_str(
        &std::fs::read_to_string(server.data_dir().join("orders.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0], body["order"]);
    assert!(stored[0]["id"].is_i64());
    assert_ne!(stored[0]["date"], "client-date");
    assert_eq!(stored[0]["items"], json!(["Thali"]));
}

#[tokio::test]
async fn test_reservation_round_trip_through_export() {
    let server = TestServer::start().await;

    let resp = server
        .client
        .post(server.url("/api/reservations"))
        .json(&json!({"name": "Ravi", "guests": 4, "time": "19:30"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Reservation made successfully");

    let resp = server
        .client
        .get(server.url("/api/export-reservations"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()["content-disposition"],
        "attachment; filename=\"reservations.csv\""
    );
    let csv = resp.text().await.unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("\"id\",\"date\",\"name\",\"guests\",\"time\""));
    let row = lines.next().unwrap();
    assert!(row.starts_with(&body["reservation"]["id"].to_string()));
    assert!(row.ends_with(",\"Ravi\",4,\"19:30\""));
    assert_eq!(lines.next(), None);
}

// ============================================================================
// Menu
// ============================================================================

#[tokio::test]
async fn test_update_menu_replaces_prior_content() {
    let server = TestServer::start().await;

    for menu in [json!([{"name": "Paneer"}, {"name": "Naan"}]), json!([{"name": "Dal"}])] {
        let resp = server
            .client
            .post(server.url("/api/update-menu"))
            .json(&json!({"password": ADMIN_PASSWORD, "menu": menu}))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let menu: Value = server
        .client
        .get(server.url("/api/menu"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(menu, json!([{"name": "Dal"}]));
}

#[tokio::test]
async fn test_update_menu_wrong_password_is_unauthorized() {
    let server = TestServer::start().await;

    let resp = server
        .client
        .post(server.url("/api/update-menu"))
        .json(&json!({"password": "not-the-key", "menu": [{"name": "Dal"}]}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let (_, menu) = get_text(&server, "/api/menu").await;
    assert_eq!(serde_json::from_str::<Value>(&menu).unwrap(), json!([]));
}

// ============================================================================
// Exports
// ============================================================================

#[tokio::test]
async fn test_exports_of_empty_collections_are_plain_sentences() {
    let server = TestServer::start().await;

    for (path, sentence) in [
        ("/api/export-orders", "No orders to export."),
        ("/api/export-reservations", "No reservations to export."),
        ("/api/export-customers", "No customers to export."),
    ] {
        assert_eq!(get_text(&server, path).await, (StatusCode::OK, sentence.to_owned()));
    }
}

#[tokio::test]
async fn test_export_customers_lists_signups() {
    let server = TestServer::start().await;
    sign_up(&server, "a@x.com").await;
    sign_up(&server, "b@x.com").await;

    let (status, csv) = get_text(&server, "/api/export-customers").await;
    assert_eq!(status, StatusCode::OK);

    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].contains("\"a@x.com\""));
    assert!(lines[2].contains("\"b@x.com\""));
    assert!(!csv.contains("hunter22"));
}

// ============================================================================
// Storage edge cases
// ============================================================================

#[tokio::test]
async fn test_truncated_collection_file_reads_as_empty() {
    let server = TestServer::start().await;
    std::fs::create_dir_all(server.data_dir()).unwrap();
    std::fs::write(server.data_dir().join("orders.json"), "").unwrap();

    let (status, body) = get_text(&server, "/api/export-orders").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "No orders to export.");
}

#[tokio::test]
async fn test_corrupt_collection_file_is_internal_error() {
    let server = TestServer::start().await;
    std::fs::create_dir_all(server.data_dir()).unwrap();
    std::fs::write(server.data_dir().join("customers.json"), "[{\"id\": ").unwrap();

    let resp = sign_up(&server, "a@x.com").await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({"message": "Internal server error"}));
}
