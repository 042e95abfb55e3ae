//! Concurrent writers against one server.
//!
//! Every append runs under the collection's lock, so parallel requests must
//! neither drop records nor let a duplicate email through.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::collections::HashSet;
use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::{Value, json};
use tiffin_integration_tests::TestServer;

#[tokio::test]
async fn test_parallel_signups_are_all_kept() {
    let server = Arc::new(TestServer::start().await);

    let tasks: Vec<_> = (0..30)
        .map(|n| {
            let server = Arc::clone(&server);
            tokio::spawn(async move {
                server
                    .client
                    .post(server.url("/api/signup"))
                    .json(&json!({"name": format!("Guest {n}"), "email": format!("guest{n}@x.com")}))
                    .send()
                    .await
                    .unwrap()
                    .status()
            })
        })
        .collect();
    for task in tasks {
        assert_eq!(task.await.unwrap(), StatusCode::CREATED);
    }

    let customers: Vec<Value> = server
        .client
        .get(server.url("/api/customers"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(customers.len(), 30);

    let ids: HashSet<i64> = customers
        .iter()
        .map(|c| c["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids.len(), 30);
}

#[tokio::test]
async fn test_parallel_duplicate_signups_admit_one() {
    let server = Arc::new(TestServer::start().await);

    let tasks: Vec<_> = (0..10)
        .map(|_| {
            let server = Arc::clone(&server);
            tokio::spawn(async move {
                server
                    .client
                    .post(server.url("/api/signup"))
                    .json(&json!({"name": "Same", "email": "same@x.com"}))
                    .send()
                    .await
                    .unwrap()
                    .status()
            })
        })
        .collect();

    let mut created = 0;
    for task in tasks {
        match task.await.unwrap() {
            StatusCode::CREATED => created += 1,
            status => assert_eq!(status, StatusCode::BAD_REQUEST),
        }
    }
    assert_eq!(created, 1);
}

#[tokio::test]
async fn test_parallel_orders_and_reservations_are_all_kept() {
    let server = Arc::new(TestServer::start().await);

    let tasks: Vec<_> = (0..40)
        .map(|n| {
            let server = Arc::clone(&server);
            tokio::spawn(async move {
                let path = if n % 2 == 0 { "/api/orders" } else { "/api/reservations" };
                server
                    .client
                    .post(server.url(path))
                    .json(&json!({"n": n}))
                    .send()
                    .await
                    .unwrap()
                    .status()
            })
        })
        .collect();
    for task in tasks {
        assert_eq!(task.await.unwrap(), StatusCode::CREATED);
    }

    for file in ["orders.json", "reservations.json"] {
        let stored: Vec<Value> = serde_json::from_str(
            &std::fs::read_to_string(server.data_dir().join(file)).unwrap(),
        )
        .unwrap();
        assert_eq!(stored.len(), 20, "{file}");
    }
}
