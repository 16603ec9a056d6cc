use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use crate::features::books::handlers;
use crate::features::books::services::BookService;

/// Create routes for the books feature
///
/// Note: This feature is public (no authentication required)
pub fn routes(service: Arc<BookService>) -> Router {
    Router::new()
        .route(
            "/api/books",
            get(handlers::get_all_books).post(handlers::create_book),
        )
        .route("/api/books/search", get(handlers::search_books))
        .route(
            "/api/books/category/{name}",
            get(handlers::get_books_by_category),
        )
        .route(
            "/api/books/{id}",
            put(handlers::update_book).delete(handlers::delete_book),
        )
        .with_state(service)
}
