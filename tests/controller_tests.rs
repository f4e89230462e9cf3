//! HTTP adapter tests: the real router over a hand-written service double.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use bookstore_server::{
    api,
    config::AppConfig,
    error::{AppError, AppResult},
    models::{Author, Book, Section, Wrote},
    services::{BookService, Services},
    AppState,
};

/// Fixed-data stand-in for the book service.
struct StubBookService {
    books: Vec<Book>,
}

#[async_trait]
impl BookService for StubBookService {
    async fn find_all(&self) -> AppResult<Vec<Book>> {
        Ok(self.books.clone())
    }

    async fn find_book_by_id(&self, id: i64) -> AppResult<Book> {
        self.books
            .iter()
            .find(|b| b.id == Some(id))
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    async fn save(&self, mut candidate: Book) -> AppResult<Book> {
        candidate.id = Some(99);
        Ok(candidate)
    }

    async fn update(&self, mut candidate: Book, id: i64) -> AppResult<Book> {
        if self.books.iter().any(|b| b.id == Some(id)) {
            candidate.id = Some(id);
            Ok(candidate)
        } else {
            Err(AppError::NotFound(format!("Book with id {} not found", id)))
        }
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        if self.books.iter().any(|b| b.id == Some(id)) {
            Ok(())
        } else {
            Err(AppError::NotFound(format!("Book with id {} not found", id)))
        }
    }

    async fn delete_all(&self) -> AppResult<()> {
        Ok(())
    }
}

fn seeded_books() -> Vec<Book> {
    let fiction = Section::new(1, "Fiction");

    let mut flatterland = Book::new("Flatterland", "9780738206752", 2001, fiction.clone());
    flatterland.id = Some(1);
    flatterland
        .wrotes
        .push(Wrote::new(Author::new(6, "Ian", "Stewart")));

    let mut fortress = Book::new("Digital Fortress", "9788489367012", 2007, fiction);
    fortress.id = Some(2);
    fortress
        .wrotes
        .push(Wrote::new(Author::new(2, "Dan", "Brown")));

    vec![flatterland, fortress]
}

fn test_app() -> Router {
    let state = AppState {
        config: Arc::new(AppConfig {
            server: Default::default(),
            database: Default::default(),
            logging: Default::default(),
        }),
        services: Arc::new(Services {
            books: Arc::new(StubBookService {
                books: seeded_books(),
            }),
        }),
    };
    api::create_router(state)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn list_all_books() {
    let response = test_app()
        .oneshot(Request::builder().uri("/books/books").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
    assert_eq!(body[0]["title"], "Flatterland");
}

#[tokio::test]
async fn get_book_by_id() {
    let response = test_app()
        .oneshot(Request::builder().uri("/books/book/2").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["id"], 2);
    assert_eq!(body["title"], "Digital Fortress");
    assert_eq!(body["wrotes"][0]["author"]["lastname"], "Brown");
}

#[tokio::test]
async fn get_unknown_book_is_a_bodiless_404() {
    let response = test_app()
        .oneshot(Request::builder().uri("/books/book/100").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn create_book_returns_201_with_location() {
    let payload = json!({
        "title": "Test Book",
        "isbn": "0123456789999",
        "copyright": 2001,
        "section": { "id": 1, "name": "Fiction" },
        "wrotes": [ { "author": { "id": 2, "firstname": "Dan", "lastname": "Brown" } } ]
    });

    let response = test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/books/book")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/books/book/99"
    );
    let body = body_json(response).await;
    assert_eq!(body["id"], 99);
    assert_eq!(body["title"], "Test Book");
}

#[tokio::test]
async fn update_book_returns_the_merged_book() {
    let payload = json!({ "title": "Test updated book" });

    let response = test_app()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/books/book/1")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["title"], "Test updated book");
}

#[tokio::test]
async fn update_unknown_book_is_404() {
    let payload = json!({ "title": "Ghost" });

    let response = test_app()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/books/book/100")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_book_returns_200() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/books/book/1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn delete_unknown_book_is_404() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/books/book/100")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_route_is_404() {
    let response = test_app()
        .oneshot(Request::builder().uri("/books/nothing").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_check_is_wired() {
    let response = test_app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
}
