use utoipa::{Modify, OpenApi};

use crate::features::books::{dtos as books_dtos, handlers as books_handlers};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Books (public)
        books_handlers::get_all_books,
        books_handlers::search_books,
        books_handlers::get_books_by_category,
        books_handlers::create_book,
        books_handlers::update_book,
        books_handlers::delete_book,
    ),
    components(
        schemas(
            books_dtos::BookDto,
            books_dtos::BookRequestDto,
        )
    ),
    tags(
        (name = "books", description = "Book catalog with categories created on first use"),
    ),
    info(
        title = "Book Catalog API",
        version = "0.1.0",
        description = "API documentation for the book catalog",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
