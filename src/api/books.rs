//! Book endpoints

use axum::{
    extract::{Path, State},
    http::{header, HeaderName, StatusCode},
    Json,
};

use crate::{error::AppResult, models::Book};

/// List all books
#[utoipa::path(
    get,
    path = "/books/books",
    tag = "books",
    responses(
        (status = 200, description = "List of all books", body = Vec<Book>)
    )
)]
pub async fn list_books(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.books.find_all().await?;
    Ok(Json(books))
}

/// Get one book by id
#[utoipa::path(
    get,
    path = "/books/book/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book id")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Book>> {
    let book = state.services.books.find_book_by_id(id).await?;
    Ok(Json(book))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/books/book",
    tag = "books",
    request_body = Book,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Referenced section or author not found"),
        (status = 409, description = "A book with this ISBN already exists")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    Json(candidate): Json<Book>,
) -> AppResult<(StatusCode, [(HeaderName, String); 1], Json<Book>)> {
    let created = state.services.books.save(candidate).await?;
    let location = match created.id {
        Some(id) => format!("/books/book/{}", id),
        None => "/books/book".to_string(),
    };
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    ))
}

/// Update an existing book (partial merge)
#[utoipa::path(
    put,
    path = "/books/book/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book id")
    ),
    request_body = Book,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 404, description = "Book, section or author not found"),
        (status = 409, description = "A book with this ISBN already exists")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
    Json(candidate): Json<Book>,
) -> AppResult<Json<Book>> {
    let updated = state.services.books.update(candidate, id).await?;
    Ok(Json(updated))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/book/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book id")
    ),
    responses(
        (status = 200, description = "Book deleted"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.services.books.delete(id).await?;
    Ok(StatusCode::OK)
}
