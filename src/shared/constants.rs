// =============================================================================
// CACHE REGIONS
// =============================================================================

/// Region holding the full book list under a single entry
pub const CACHE_ALL_BOOKS: &str = "allBooks";

/// Region keyed by `title_author`, holding at most one book
pub const CACHE_BOOKS: &str = "books";

/// Region keyed by category name
pub const CACHE_BOOKS_BY_CATEGORY: &str = "booksByCategory";
