use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::features::books::models::Book;

/// Book as exposed over HTTP, with its category flattened to a name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookDto {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub publication_year: Option<i32>,
    pub description: Option<String>,
    pub category_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Book> for BookDto {
    fn from(b: Book) -> Self {
        Self {
            id: b.id,
            title: b.title,
            author: b.author,
            isbn: b.isbn,
            publication_year: b.publication_year,
            description: b.description,
            category_name: b.category.name,
            created_at: b.created_at,
            updated_at: b.updated_at,
        }
    }
}

/// Request DTO for creating or replacing a book
///
/// `id`, `createdAt` and `updatedAt` are assigned by the server; if a client
/// sends them they are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookRequestDto {
    #[validate(
        custom(function = "not_blank", message = "Title is required"),
        length(max = 255, message = "Title must be at most 255 characters")
    )]
    pub title: String,

    #[validate(
        custom(function = "not_blank", message = "Author is required"),
        length(max = 255, message = "Author must be at most 255 characters")
    )]
    pub author: String,

    #[validate(length(max = 255, message = "ISBN must be at most 255 characters"))]
    pub isbn: Option<String>,

    /// Year of publication; negative for BCE
    pub publication_year: Option<i32>,

    pub description: Option<String>,

    #[validate(
        custom(function = "not_blank", message = "Category name is required"),
        length(max = 255, message = "Category name must be at most 255 characters")
    )]
    pub category_name: String,
}

/// Query params for the title/author search
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchBooksQuery {
    /// Exact title
    pub title: String,
    /// Exact author
    pub author: String,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
