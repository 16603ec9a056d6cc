//! Persistence gateway traits for books and categories.

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::books::models::{Book, Category, NewBook};

/// Opens units of work against the catalog tables
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn CatalogTx>>;
}

/// A single transaction over `books` and `categories`.
///
/// Dropping a unit of work without calling [`CatalogTx::commit`] rolls back
/// everything done through it.
#[async_trait]
pub trait CatalogTx: Send {
    async fn find_all_books(&mut self) -> Result<Vec<Book>>;

    async fn find_book_by_id(&mut self, id: i64) -> Result<Option<Book>>;

    async fn exists_book_by_id(&mut self, id: i64) -> Result<bool>;

    async fn find_book_by_title_and_author(
        &mut self,
        title: &str,
        author: &str,
    ) -> Result<Option<Book>>;

    async fn exists_book_by_title_and_author(&mut self, title: &str, author: &str)
        -> Result<bool>;

    /// Books joined to the category with exactly this name
    async fn find_books_by_category_name(&mut self, category_name: &str) -> Result<Vec<Book>>;

    async fn find_books_by_category(&mut self, category: &Category) -> Result<Vec<Book>>;

    async fn insert_book(&mut self, book: NewBook) -> Result<Book>;

    /// Overwrite every mutable column of an existing book
    async fn update_book(&mut self, book: Book) -> Result<Book>;

    async fn delete_book_by_id(&mut self, id: i64) -> Result<()>;

    async fn find_category_by_name(&mut self, name: &str) -> Result<Option<Category>>;

    async fn exists_category_by_name(&mut self, name: &str) -> Result<bool>;

    /// Fails with a conflict when the name is already taken
    async fn insert_category(&mut self, name: &str) -> Result<Category>;

    async fn commit(self: Box<Self>) -> Result<()>;
}
