//! Read-through cache for catalog queries.
//!
//! Three regions, all unbounded and without expiry. Any mutation flushes
//! every region at once; there is no per-key invalidation.

use std::collections::HashMap;
use std::hash::Hash;

use tokio::sync::RwLock;

use crate::features::books::dtos::BookDto;
use crate::shared::constants::{CACHE_ALL_BOOKS, CACHE_BOOKS, CACHE_BOOKS_BY_CATEGORY};

/// A named key/value partition of the cache
pub struct CacheRegion<K, V> {
    name: &'static str,
    entries: RwLock<HashMap<K, V>>,
}

impl<K, V> CacheRegion<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub async fn get(&self, key: &K) -> Option<V> {
        self.entries.read().await.get(key).cloned()
    }

    pub async fn put(&self, key: K, value: V) {
        self.entries.write().await.insert(key, value);
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

/// Entry of the `books` region.
///
/// `title_author_key` is ambiguous when a title or author contains `_`, so
/// the entry keeps the exact pair it was loaded for.
#[derive(Debug, Clone)]
pub struct TitleAuthorEntry {
    title: String,
    author: String,
    /// `None` when no such book exists
    book: Option<BookDto>,
}

/// Cache regions owned by the book service
pub struct BookCache {
    pub all_books: CacheRegion<(), Vec<BookDto>>,
    pub books: CacheRegion<String, TitleAuthorEntry>,
    pub books_by_category: CacheRegion<String, Vec<BookDto>>,
}

impl BookCache {
    pub fn new() -> Self {
        Self {
            all_books: CacheRegion::new(CACHE_ALL_BOOKS),
            books: CacheRegion::new(CACHE_BOOKS),
            books_by_category: CacheRegion::new(CACHE_BOOKS_BY_CATEGORY),
        }
    }

    /// Key of the `books` region
    pub fn title_author_key(title: &str, author: &str) -> String {
        format!("{}_{}", title, author)
    }

    /// Cached lookup for this exact title and author; `Some(None)` is a cached absence
    pub async fn get_book(&self, title: &str, author: &str) -> Option<Option<BookDto>> {
        self.books
            .get(&Self::title_author_key(title, author))
            .await
            .filter(|entry| entry.title == title && entry.author == author)
            .map(|entry| entry.book)
    }

    pub async fn put_book(&self, title: &str, author: &str, book: Option<BookDto>) {
        let entry = TitleAuthorEntry {
            title: title.to_string(),
            author: author.to_string(),
            book,
        };
        self.books
            .put(Self::title_author_key(title, author), entry)
            .await;
    }

    /// Drop every entry in every region
    pub async fn evict_all(&self) {
        let dropped = self.entry_count().await;

        self.all_books.clear().await;
        self.books.clear().await;
        self.books_by_category.clear().await;

        tracing::debug!(
            "Evicted {} entries from {}, {}, {}",
            dropped,
            self.all_books.name(),
            self.books.name(),
            self.books_by_category.name()
        );
    }

    /// Total entries across all regions
    pub async fn entry_count(&self) -> usize {
        self.all_books.len().await + self.books.len().await + self.books_by_category.len().await
    }
}

impl Default for BookCache {
    fn default() -> Self {
        Self::new()
    }
}
