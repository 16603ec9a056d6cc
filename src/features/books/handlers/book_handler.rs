use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppPath, AppQuery};
use crate::features::books::dtos::{BookDto, BookRequestDto, SearchBooksQuery};
use crate::features::books::services::BookService;

/// List all books
#[utoipa::path(
    get,
    path = "/api/books",
    responses(
        (status = 200, description = "All books", body = Vec<BookDto>),
    ),
    tag = "books"
)]
pub async fn get_all_books(State(service): State<Arc<BookService>>) -> Result<Json<Vec<BookDto>>> {
    let books = service.get_all_books().await?;
    Ok(Json(books))
}

/// Find a book by exact title and author
#[utoipa::path(
    get,
    path = "/api/books/search",
    params(SearchBooksQuery),
    responses(
        (status = 200, description = "Book found", body = BookDto),
        (status = 400, description = "Missing title or author"),
        (status = 404, description = "No book with this title and author")
    ),
    tag = "books"
)]
pub async fn search_books(
    State(service): State<Arc<BookService>>,
    AppQuery(query): AppQuery<SearchBooksQuery>,
) -> Result<Json<BookDto>> {
    service
        .find_by_title_and_author(&query.title, &query.author)
        .await?
        .map(Json)
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Book '{}' by '{}' not found",
                query.title, query.author
            ))
        })
}

/// List the books of a category
///
/// An unknown category is not an error; it simply has no books.
#[utoipa::path(
    get,
    path = "/api/books/category/{name}",
    params(
        ("name" = String, Path, description = "Category name")
    ),
    responses(
        (status = 200, description = "Books in the category", body = Vec<BookDto>),
    ),
    tag = "books"
)]
pub async fn get_books_by_category(
    State(service): State<Arc<BookService>>,
    AppPath(name): AppPath<String>,
) -> Result<Json<Vec<BookDto>>> {
    let books = service.find_by_category_name(&name).await?;
    Ok(Json(books))
}

/// Create a book
#[utoipa::path(
    post,
    path = "/api/books",
    request_body = BookRequestDto,
    responses(
        (status = 201, description = "Book created", body = BookDto),
        (status = 400, description = "Validation error or duplicate title and author")
    ),
    tag = "books"
)]
pub async fn create_book(
    State(service): State<Arc<BookService>>,
    AppJson(dto): AppJson<BookRequestDto>,
) -> Result<(StatusCode, Json<BookDto>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let book = service.create_book(dto).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// Replace a book
#[utoipa::path(
    put,
    path = "/api/books/{id}",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    request_body = BookRequestDto,
    responses(
        (status = 200, description = "Book updated", body = BookDto),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Book not found")
    ),
    tag = "books"
)]
pub async fn update_book(
    State(service): State<Arc<BookService>>,
    AppPath(id): AppPath<i64>,
    AppJson(dto): AppJson<BookRequestDto>,
) -> Result<Json<BookDto>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let book = service.update_book(id, dto).await?;
    Ok(Json(book))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/api/books/{id}",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found")
    ),
    tag = "books"
)]
pub async fn delete_book(
    State(service): State<Arc<BookService>>,
    AppPath(id): AppPath<i64>,
) -> Result<StatusCode> {
    service.delete_book(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
