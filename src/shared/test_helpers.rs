//! In-memory catalog gateway and request builders for tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::Utc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::core::error::{AppError, Result};
use crate::features::books::dtos::BookRequestDto;
use crate::features::books::models::{Book, Category, NewBook};
use crate::features::books::repositories::{CatalogStore, CatalogTx};
use crate::features::books::{routes, BookService};

#[derive(Debug, Clone, Default)]
struct CatalogState {
    books: BTreeMap<i64, Book>,
    categories: BTreeMap<i64, Category>,
    next_book_id: i64,
    next_category_id: i64,
}

/// Catalog gateway backed by process memory.
///
/// Units of work are serialized: each one holds the state lock, mutates a
/// private copy, and publishes it on commit.
#[derive(Default)]
pub struct InMemoryCatalogStore {
    state: Arc<Mutex<CatalogState>>,
    transactions: AtomicUsize,
    stale_category_lookups: AtomicBool,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `find_category_by_name` miss committed categories, as a
    /// transaction racing another insert of the same name would
    pub fn make_category_lookups_stale(&self) {
        self.stale_category_lookups.store(true, Ordering::SeqCst);
    }

    /// Number of units of work opened so far
    pub fn transactions_started(&self) -> usize {
        self.transactions.load(Ordering::SeqCst)
    }

    pub async fn categories_named(&self, name: &str) -> usize {
        self.state
            .lock()
            .await
            .categories
            .values()
            .filter(|c| c.name == name)
            .count()
    }

    pub async fn category_id_of_book(&self, book_id: i64) -> Option<i64> {
        self.state
            .lock()
            .await
            .books
            .get(&book_id)
            .map(|b| b.category.id)
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn begin(&self) -> Result<Box<dyn CatalogTx>> {
        self.transactions.fetch_add(1, Ordering::SeqCst);
        let guard = self.state.clone().lock_owned().await;
        let working = guard.clone();

        Ok(Box::new(InMemoryCatalogTx {
            guard,
            working,
            stale_category_lookups: self.stale_category_lookups.load(Ordering::SeqCst),
        }))
    }
}

pub struct InMemoryCatalogTx {
    guard: OwnedMutexGuard<CatalogState>,
    working: CatalogState,
    stale_category_lookups: bool,
}

impl InMemoryCatalogTx {
    fn books_where(&self, predicate: impl Fn(&Book) -> bool) -> Vec<Book> {
        self.working
            .books
            .values()
            .filter(|&b| predicate(b))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl CatalogTx for InMemoryCatalogTx {
    async fn find_all_books(&mut self) -> Result<Vec<Book>> {
        Ok(self.books_where(|_| true))
    }

    async fn find_book_by_id(&mut self, id: i64) -> Result<Option<Book>> {
        Ok(self.working.books.get(&id).cloned())
    }

    async fn exists_book_by_id(&mut self, id: i64) -> Result<bool> {
        Ok(self.working.books.contains_key(&id))
    }

    async fn find_book_by_title_and_author(
        &mut self,
        title: &str,
        author: &str,
    ) -> Result<Option<Book>> {
        Ok(self
            .books_where(|b| b.title == title && b.author == author)
            .into_iter()
            .next())
    }

    async fn exists_book_by_title_and_author(
        &mut self,
        title: &str,
        author: &str,
    ) -> Result<bool> {
        Ok(self
            .working
            .books
            .values()
            .any(|b| b.title == title && b.author == author))
    }

    async fn find_books_by_category_name(&mut self, category_name: &str) -> Result<Vec<Book>> {
        Ok(self.books_where(|b| b.category.name == category_name))
    }

    async fn find_books_by_category(&mut self, category: &Category) -> Result<Vec<Book>> {
        Ok(self.books_where(|b| b.category.id == category.id))
    }

    async fn insert_book(&mut self, book: NewBook) -> Result<Book> {
        self.working.next_book_id += 1;
        let now = Utc::now();
        let book = Book {
            id: self.working.next_book_id,
            title: book.title,
            author: book.author,
            isbn: book.isbn,
            publication_year: book.publication_year,
            description: book.description,
            created_at: now,
            updated_at: now,
            category: book.category,
        };
        self.working.books.insert(book.id, book.clone());

        Ok(book)
    }

    async fn update_book(&mut self, mut book: Book) -> Result<Book> {
        let existing = self
            .working
            .books
            .get(&book.id)
            .ok_or_else(|| AppError::NotFound(format!("Book not found with id: {}", book.id)))?;

        book.created_at = existing.created_at;
        book.updated_at = Utc::now();
        self.working.books.insert(book.id, book.clone());

        Ok(book)
    }

    async fn delete_book_by_id(&mut self, id: i64) -> Result<()> {
        self.working.books.remove(&id);
        Ok(())
    }

    async fn find_category_by_name(&mut self, name: &str) -> Result<Option<Category>> {
        if self.stale_category_lookups {
            return Ok(None);
        }

        Ok(self
            .working
            .categories
            .values()
            .find(|c| c.name == name)
            .cloned())
    }

    async fn exists_category_by_name(&mut self, name: &str) -> Result<bool> {
        Ok(self.working.categories.values().any(|c| c.name == name))
    }

    async fn insert_category(&mut self, name: &str) -> Result<Category> {
        if self.working.categories.values().any(|c| c.name == name) {
            return Err(AppError::Conflict(format!(
                "Duplicate value violates categories_name_unique: {}",
                name
            )));
        }

        self.working.next_category_id += 1;
        let category = Category {
            id: self.working.next_category_id,
            name: name.to_string(),
        };
        self.working
            .categories
            .insert(category.id, category.clone());

        Ok(category)
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        let InMemoryCatalogTx {
            mut guard, working, ..
        } = *self;
        *guard = working;
        Ok(())
    }
}

/// Request body with only the required fields set
pub fn book_request(title: &str, author: &str, category_name: &str) -> BookRequestDto {
    BookRequestDto {
        title: title.to_string(),
        author: author.to_string(),
        isbn: None,
        publication_year: None,
        description: None,
        category_name: category_name.to_string(),
    }
}

/// Book routes served over an in-memory catalog
pub fn test_server() -> (TestServer, Arc<InMemoryCatalogStore>) {
    let store = Arc::new(InMemoryCatalogStore::new());
    let service = Arc::new(BookService::new(store.clone()));
    let server = TestServer::new(routes::routes(service)).expect("failed to start test server");

    (server, store)
}
