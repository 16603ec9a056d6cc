use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::books::cache::BookCache;
use crate::features::books::dtos::{BookDto, BookRequestDto};
use crate::features::books::models::{Category, NewBook};
use crate::features::books::repositories::{CatalogStore, CatalogTx};

/// Service for book catalog operations
///
/// Reads go through [`BookCache`]; every mutation flushes the whole cache
/// before touching storage, so even a failed mutation leaves it empty.
pub struct BookService {
    store: Arc<dyn CatalogStore>,
    cache: BookCache,
}

impl BookService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self {
            store,
            cache: BookCache::new(),
        }
    }

    #[cfg(test)]
    pub fn cache(&self) -> &BookCache {
        &self.cache
    }

    /// List every book
    pub async fn get_all_books(&self) -> Result<Vec<BookDto>> {
        if let Some(books) = self.cache.all_books.get(&()).await {
            tracing::debug!("Cache hit: {}", self.cache.all_books.name());
            return Ok(books);
        }

        let mut tx = self.store.begin().await?;
        let books = tx.find_all_books().await?;
        tx.commit().await?;

        let books: Vec<BookDto> = books.into_iter().map(BookDto::from).collect();
        self.cache.all_books.put((), books.clone()).await;

        Ok(books)
    }

    /// Find a book by exact title and author; `None` when there is no match
    pub async fn find_by_title_and_author(
        &self,
        title: &str,
        author: &str,
    ) -> Result<Option<BookDto>> {
        if let Some(book) = self.cache.get_book(title, author).await {
            tracing::debug!(
                "Cache hit: {}[{}]",
                self.cache.books.name(),
                BookCache::title_author_key(title, author)
            );
            return Ok(book);
        }

        let mut tx = self.store.begin().await?;
        let book = tx.find_book_by_title_and_author(title, author).await?;
        tx.commit().await?;

        let book = book.map(BookDto::from);
        self.cache.put_book(title, author, book.clone()).await;

        Ok(book)
    }

    /// List the books of a category; unknown categories yield an empty list
    pub async fn find_by_category_name(&self, category_name: &str) -> Result<Vec<BookDto>> {
        let key = category_name.to_string();
        if let Some(books) = self.cache.books_by_category.get(&key).await {
            tracing::debug!(
                "Cache hit: {}[{}]",
                self.cache.books_by_category.name(),
                key
            );
            return Ok(books);
        }

        let mut tx = self.store.begin().await?;
        let books = tx.find_books_by_category_name(category_name).await?;
        tx.commit().await?;

        let books: Vec<BookDto> = books.into_iter().map(BookDto::from).collect();
        self.cache.books_by_category.put(key, books.clone()).await;

        Ok(books)
    }

    /// Create a book, creating its category on first use
    pub async fn create_book(&self, dto: BookRequestDto) -> Result<BookDto> {
        self.cache.evict_all().await;

        let mut tx = self.store.begin().await?;

        if tx
            .exists_book_by_title_and_author(&dto.title, &dto.author)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "Book with title '{}' and author '{}' already exists",
                dto.title, dto.author
            )));
        }

        let category = get_or_create_category(tx.as_mut(), &dto.category_name).await?;

        let book = tx
            .insert_book(NewBook {
                title: dto.title,
                author: dto.author,
                isbn: dto.isbn,
                publication_year: dto.publication_year,
                description: dto.description,
                category,
            })
            .await?;
        tx.commit().await?;

        tracing::info!(
            "Book created: id={}, title={:?}, category={:?}",
            book.id,
            book.title,
            book.category.name
        );

        Ok(book.into())
    }

    /// Replace every mutable field of an existing book
    pub async fn update_book(&self, id: i64, dto: BookRequestDto) -> Result<BookDto> {
        self.cache.evict_all().await;

        let mut tx = self.store.begin().await?;

        let mut book = tx
            .find_book_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book not found with id: {}", id)))?;

        let category = get_or_create_category(tx.as_mut(), &dto.category_name).await?;

        book.title = dto.title;
        book.author = dto.author;
        book.isbn = dto.isbn;
        book.publication_year = dto.publication_year;
        book.description = dto.description;
        book.category = category;

        let book = tx.update_book(book).await?;
        tx.commit().await?;

        tracing::info!("Book updated: id={}", book.id);

        Ok(book.into())
    }

    pub async fn delete_book(&self, id: i64) -> Result<()> {
        self.cache.evict_all().await;

        let mut tx = self.store.begin().await?;

        if !tx.exists_book_by_id(id).await? {
            return Err(AppError::NotFound(format!("Book not found with id: {}", id)));
        }

        tx.delete_book_by_id(id).await?;
        tx.commit().await?;

        tracing::info!("Book deleted: id={}", id);

        Ok(())
    }
}

/// Look a category up by exact name, inserting it when missing.
///
/// Not atomic: a concurrent insert of the same name surfaces as a conflict
/// from the unique constraint.
pub async fn get_or_create_category(tx: &mut dyn CatalogTx, name: &str) -> Result<Category> {
    if let Some(category) = tx.find_category_by_name(name).await? {
        return Ok(category);
    }

    let category = tx.insert_category(name).await?;
    tracing::info!("Category created: id={}, name={:?}", category.id, category.name);

    Ok(category)
}
