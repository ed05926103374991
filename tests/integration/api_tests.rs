//! API integration tests

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use catalog_server::{api, AppConfig, AppState};

/// Start a server with an empty catalog on an ephemeral port and return its base URL
async fn spawn_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("No local address");

    let app = api::router(AppState::new(AppConfig::default()));
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    format!("http://{}", addr)
}

async fn add_book(client: &Client, base: &str, body: Value) -> Value {
    let response = client
        .post(format!("{}/api/add", base))
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    response.json().await.expect("Failed to parse response")
}

async fn list_books(client: &Client, base: &str) -> Vec<Value> {
    client
        .get(format!("{}/api/books", base))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response")
}

#[tokio::test]
async fn test_health_check() {
    let base = spawn_server().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/health", base))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_readiness_reports_catalog_size() {
    let base = spawn_server().await;
    let client = Client::new();

    add_book(&client, &base, json!({"title": "Emma", "author": "Jane Austen", "year": 1815})).await;

    let body: Value = client
        .get(format!("{}/ready", base))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    assert_eq!(body["status"], "ready");
    assert_eq!(body["books"], 1);
    assert_eq!(body["listen"], "0.0.0.0:8080");
}

#[tokio::test]
async fn test_empty_catalog_lists_empty_array() {
    let base = spawn_server().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/api/books", base))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_full_book_lifecycle() {
    let base = spawn_server().await;
    let client = Client::new();

    let book = add_book(
        &client,
        &base,
        json!({"title": "1984", "author": "George Orwell", "year": 1949}),
    )
    .await;
    assert_eq!(book["title"], "1984");
    assert_eq!(book["id"], 1);
    assert_eq!(book["borrowed"], false);

    assert_eq!(list_books(&client, &base).await.len(), 1);

    // Borrow
    let body: Value = client
        .get(format!("{}/api/borrow?id=1", base))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(body["borrowed"], true);

    // Return
    let body: Value = client
        .get(format!("{}/api/return?id=1", base))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(body["borrowed"], false);

    // Update
    let response = client
        .put(format!("{}/api/update?id=1", base))
        .json(&json!({"title": "New", "author": "B", "year": 2021}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["title"], "New");
    assert_eq!(body["author"], "B");
    assert_eq!(body["year"], 2021);
    assert_eq!(body["id"], 1);

    // Delete
    let response = client
        .delete(format!("{}/api/delete?id=1", base))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({"message": "Book deleted"}));
    assert!(list_books(&client, &base).await.is_empty());

    // Delete again
    let response = client
        .delete(format!("{}/api/delete?id=1", base))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_keeps_insertion_order() {
    let base = spawn_server().await;
    let client = Client::new();

    for title in ["a", "b", "c"] {
        add_book(&client, &base, json!({"title": title, "author": "X", "year": 2000})).await;
    }
    client
        .delete(format!("{}/api/delete?id=2", base))
        .send()
        .await
        .expect("Failed to send request");
    let added = add_book(&client, &base, json!({"title": "d"})).await;
    assert_eq!(added["id"], 4);
    assert_eq!(added["author"], "");
    assert_eq!(added["year"], 0);

    let titles: Vec<Value> = list_books(&client, &base)
        .await
        .into_iter()
        .map(|b| b["title"].clone())
        .collect();
    assert_eq!(titles, vec![json!("a"), json!("c"), json!("d")]);
}

#[tokio::test]
async fn test_add_ignores_client_id_and_borrowed() {
    let base = spawn_server().await;
    let client = Client::new();

    let book = add_book(
        &client,
        &base,
        json!({"id": 77, "title": "Dune", "author": "Frank Herbert", "year": 1965, "borrowed": true}),
    )
    .await;
    assert_eq!(book["id"], 1);
    assert_eq!(book["borrowed"], false);
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let base = spawn_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/add", base))
        .body("{not json")
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.text().await.unwrap(), "Invalid request body");

    add_book(&client, &base, json!({"title": "Kept"})).await;

    let response = client
        .put(format!("{}/api/update?id=1", base))
        .body(r#"{"year":"soon"}"#)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let books = list_books(&client, &base).await;
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["title"], "Kept");
}

#[tokio::test]
async fn test_repeated_id_takes_first_value() {
    let base = spawn_server().await;
    let client = Client::new();

    add_book(&client, &base, json!({"title": "Twice"})).await;

    let response = client
        .get(format!("{}/api/borrow?id=1&id=2", base))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["borrowed"], true);

    let response = client
        .delete(format!("{}/api/delete?id=1&id=1", base))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_permissive_body_decoding() {
    let base = spawn_server().await;
    let client = Client::new();

    let book = add_book(&client, &base, Value::Null).await;
    assert_eq!(book["id"], 1);
    assert_eq!(book["title"], "");

    let book = add_book(&client, &base, json!({"year": 3_000_000_000i64})).await;
    assert_eq!(book["year"], 3_000_000_000i64);

    let response = client
        .post(format!("{}/api/add", base))
        .body(r#"{"title":"a","title":"b"}"#)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["title"], "b");

    let book = add_book(&client, &base, json!({"Title": "Caps", "YEAR": 1})).await;
    assert_eq!(book["title"], "Caps");
    assert_eq!(book["year"], 1);

    let response = client
        .put(format!("{}/api/update?id=1", base))
        .json(&json!({"AUTHOR": "Upper"}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["author"], "Upper");
}

#[tokio::test]
async fn test_unknown_or_invalid_id_is_not_found() {
    let base = spawn_server().await;
    let client = Client::new();

    add_book(&client, &base, json!({"title": "Only"})).await;

    for path in ["borrow?id=9", "return?id=9", "borrow?id=abc", "return"] {
        let response = client
            .get(format!("{}/api/{}", base, path))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "GET /api/{}", path);
        assert_eq!(response.text().await.unwrap(), "Book not found");
    }

    let response = client
        .put(format!("{}/api/update?id=9", base))
        .json(&json!({"title": "X"}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = client
        .delete(format!("{}/api/delete?id=9", base))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let books = list_books(&client, &base).await;
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["title"], "Only");
    assert_eq!(books[0]["borrowed"], false);
}

#[tokio::test]
async fn test_cors_preflight_and_headers() {
    let base = spawn_server().await;
    let client = Client::new();

    for path in ["books", "add", "borrow", "return", "update", "delete"] {
        let response = client
            .request(reqwest::Method::OPTIONS, format!("{}/api/{}", base, path))
            .header("Origin", "http://localhost:3000")
            .header("Access-Control-Request-Method", "POST")
            .send()
            .await
            .expect("Failed to send request");

        assert_eq!(response.status(), StatusCode::OK, "OPTIONS /api/{}", path);
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "*"
        );
        assert!(response.text().await.unwrap().is_empty());
    }

    let response = client
        .get(format!("{}/api/books", base))
        .header("Origin", "http://localhost:3000")
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}

#[tokio::test]
async fn test_openapi_document_lists_catalog_routes() {
    let base = spawn_server().await;
    let client = Client::new();

    let body: Value = client
        .get(format!("{}/api-docs/openapi.json", base))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    for path in ["/api/books", "/api/add", "/api/borrow", "/api/return", "/api/update", "/api/delete"] {
        assert!(body["paths"][path].is_object(), "missing {}", path);
    }
}
