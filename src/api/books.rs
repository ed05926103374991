//! Book (catalog) endpoints

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::book::{Book, BookIdQuery, BookInput, MessageResponse},
    AppState,
};

use super::JsonBody;

/// List all books
#[utoipa::path(
    get,
    path = "/api/books",
    tag = "books",
    responses(
        (status = 200, description = "All books in insertion order", body = Vec<Book>)
    )
)]
pub async fn list_books(State(state): State<AppState>) -> Json<Vec<Book>> {
    Json(state.services.catalog.list_books())
}

/// Add a new book
#[utoipa::path(
    post,
    path = "/api/add",
    tag = "books",
    request_body = BookInput,
    responses(
        (status = 200, description = "Book added", body = Book),
        (status = 400, description = "Invalid request body")
    )
)]
pub async fn add_book(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<BookInput>,
) -> Json<Book> {
    Json(state.services.catalog.add_book(input))
}

/// Borrow a book
#[utoipa::path(
    get,
    path = "/api/borrow",
    tag = "books",
    params(BookIdQuery),
    responses(
        (status = 200, description = "Book borrowed", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn borrow_book(
    State(state): State<AppState>,
    query: BookIdQuery,
) -> AppResult<Json<Book>> {
    let book = state.services.catalog.borrow_book(query.book_id())?;
    Ok(Json(book))
}

/// Return a borrowed book
#[utoipa::path(
    get,
    path = "/api/return",
    tag = "books",
    params(BookIdQuery),
    responses(
        (status = 200, description = "Book returned", body = Book),
        (status = 404, description = "Book not found")
    )
)]
pub async fn return_book(
    State(state): State<AppState>,
    query: BookIdQuery,
) -> AppResult<Json<Book>> {
    let book = state.services.catalog.return_book(query.book_id())?;
    Ok(Json(book))
}

/// Update title, author and year of a book
#[utoipa::path(
    put,
    path = "/api/update",
    tag = "books",
    params(BookIdQuery),
    request_body = BookInput,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Invalid request body"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    query: BookIdQuery,
    JsonBody(input): JsonBody<BookInput>,
) -> AppResult<Json<Book>> {
    let book = state.services.catalog.update_book(query.book_id(), input)?;
    Ok(Json(book))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/api/delete",
    tag = "books",
    params(BookIdQuery),
    responses(
        (status = 200, description = "Book deleted", body = MessageResponse),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    query: BookIdQuery,
) -> AppResult<Json<MessageResponse>> {
    state.services.catalog.delete_book(query.book_id())?;
    Ok(Json(MessageResponse::new("Book deleted")))
}
