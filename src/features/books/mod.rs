//! Book catalog feature.
//!
//! Books belong to exactly one category; categories are created on first
//! use and never deleted.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/books` | No | List all books |
//! | GET | `/api/books/search?title=&author=` | No | Find by exact title and author |
//! | GET | `/api/books/category/{name}` | No | List books of a category |
//! | POST | `/api/books` | No | Create a book |
//! | PUT | `/api/books/{id}` | No | Replace a book |
//! | DELETE | `/api/books/{id}` | No | Delete a book |

pub mod cache;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod seed;
pub mod services;

pub use repositories::PgCatalogStore;
pub use services::BookService;
