//! API smoke tests against a running server.
//!
//! Run with: cargo test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080";

#[tokio::test]
#[ignore]
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_list_books() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body.is_array());
}

#[tokio::test]
#[ignore]
async fn test_create_update_and_delete_book() {
    let client = Client::new();

    // Needs a section with id 1 and an author with id 1 in the database.
    let response = client
        .post(format!("{}/books/book", BASE_URL))
        .json(&json!({
            "title": "Smoke Test Book",
            "isbn": "0123456789999",
            "copyright": 2020,
            "section": { "id": 1 },
            "wrotes": [ { "author": { "id": 1 } } ]
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    let book_id = body["id"].as_i64().expect("No book ID");

    // Partial update: title only
    let response = client
        .put(format!("{}/books/book/{}", BASE_URL, book_id))
        .json(&json!({ "title": "Smoke Test Book (updated)" }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["title"], "Smoke Test Book (updated)");
    assert_eq!(body["isbn"], "0123456789999");

    // Delete
    let response = client
        .delete(format!("{}/books/book/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
}

#[tokio::test]
#[ignore]
async fn test_get_unknown_book_is_404() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books/book/999999", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
    let body = response.text().await.expect("Failed to read body");
    assert!(body.is_empty());
}
