//! PostgreSQL implementation of the catalog gateway.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use crate::core::error::{AppError, Result};
use crate::features::books::models::{Book, BookRow, Category, NewBook};
use crate::features::books::repositories::{CatalogStore, CatalogTx};

const BOOK_COLUMNS: &str = r#"
    b.id, b.title, b.author, b.isbn, b.publication_year, b.description,
    b.created_at, b.updated_at, b.category_id, c.name AS category_name
"#;

/// Log and translate a storage error
fn db_error(context: &str, e: sqlx::Error) -> AppError {
    tracing::error!("{}: {:?}", context, e);
    AppError::from_db(e)
}

pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn begin(&self) -> Result<Box<dyn CatalogTx>> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;

        Ok(Box::new(PgCatalogTx { tx }))
    }
}

pub struct PgCatalogTx {
    tx: Transaction<'static, Postgres>,
}

impl PgCatalogTx {
    async fn fetch_books(&mut self, sql: &str, context: &str) -> Result<Vec<Book>> {
        let rows: Vec<BookRow> = sqlx::query_as(sql)
            .fetch_all(&mut *self.tx)
            .await
            .map_err(|e| db_error(context, e))?;

        Ok(rows.into_iter().map(Book::from).collect())
    }
}

#[async_trait]
impl CatalogTx for PgCatalogTx {
    async fn find_all_books(&mut self) -> Result<Vec<Book>> {
        let sql = format!(
            "SELECT {} FROM books b JOIN categories c ON c.id = b.category_id ORDER BY b.id",
            BOOK_COLUMNS
        );
        self.fetch_books(&sql, "Failed to list books").await
    }

    async fn find_book_by_id(&mut self, id: i64) -> Result<Option<Book>> {
        let sql = format!(
            "SELECT {} FROM books b JOIN categories c ON c.id = b.category_id WHERE b.id = $1",
            BOOK_COLUMNS
        );
        let row: Option<BookRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(|e| db_error("Failed to get book by id", e))?;

        Ok(row.map(Book::from))
    }

    async fn exists_book_by_id(&mut self, id: i64) -> Result<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM books WHERE id = $1)")
            .bind(id)
            .fetch_one(&mut *self.tx)
            .await
            .map_err(|e| db_error("Failed to check book existence", e))
    }

    async fn find_book_by_title_and_author(
        &mut self,
        title: &str,
        author: &str,
    ) -> Result<Option<Book>> {
        let sql = format!(
            r#"
            SELECT {} FROM books b JOIN categories c ON c.id = b.category_id
            WHERE b.title = $1 AND b.author = $2
            ORDER BY b.id
            LIMIT 1
            "#,
            BOOK_COLUMNS
        );
        let row: Option<BookRow> = sqlx::query_as(&sql)
            .bind(title)
            .bind(author)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(|e| db_error("Failed to find book by title and author", e))?;

        Ok(row.map(Book::from))
    }

    async fn exists_book_by_title_and_author(
        &mut self,
        title: &str,
        author: &str,
    ) -> Result<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM books WHERE title = $1 AND author = $2)",
        )
        .bind(title)
        .bind(author)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| db_error("Failed to check book existence", e))
    }

    async fn find_books_by_category_name(&mut self, category_name: &str) -> Result<Vec<Book>> {
        let sql = format!(
            r#"
            SELECT {} FROM books b JOIN categories c ON c.id = b.category_id
            WHERE c.name = $1
            ORDER BY b.id
            "#,
            BOOK_COLUMNS
        );
        let rows: Vec<BookRow> = sqlx::query_as(&sql)
            .bind(category_name)
            .fetch_all(&mut *self.tx)
            .await
            .map_err(|e| db_error("Failed to list books by category name", e))?;

        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn find_books_by_category(&mut self, category: &Category) -> Result<Vec<Book>> {
        let sql = format!(
            r#"
            SELECT {} FROM books b JOIN categories c ON c.id = b.category_id
            WHERE b.category_id = $1
            ORDER BY b.id
            "#,
            BOOK_COLUMNS
        );
        let rows: Vec<BookRow> = sqlx::query_as(&sql)
            .bind(category.id)
            .fetch_all(&mut *self.tx)
            .await
            .map_err(|e| db_error("Failed to list books by category", e))?;

        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn insert_book(&mut self, book: NewBook) -> Result<Book> {
        let sql = format!(
            r#"
            WITH b AS (
                INSERT INTO books (title, author, isbn, publication_year, description, category_id)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING *
            )
            SELECT {} FROM b JOIN categories c ON c.id = b.category_id
            "#,
            BOOK_COLUMNS
        );
        let row: BookRow = sqlx::query_as(&sql)
            .bind(&book.title)
            .bind(&book.author)
            .bind(&book.isbn)
            .bind(book.publication_year)
            .bind(&book.description)
            .bind(book.category.id)
            .fetch_one(&mut *self.tx)
            .await
            .map_err(|e| db_error("Failed to insert book", e))?;

        Ok(row.into())
    }

    async fn update_book(&mut self, book: Book) -> Result<Book> {
        let sql = format!(
            r#"
            WITH b AS (
                UPDATE books
                SET title = $2, author = $3, isbn = $4, publication_year = $5,
                    description = $6, category_id = $7, updated_at = NOW()
                WHERE id = $1
                RETURNING *
            )
            SELECT {} FROM b JOIN categories c ON c.id = b.category_id
            "#,
            BOOK_COLUMNS
        );
        let row: Option<BookRow> = sqlx::query_as(&sql)
            .bind(book.id)
            .bind(&book.title)
            .bind(&book.author)
            .bind(&book.isbn)
            .bind(book.publication_year)
            .bind(&book.description)
            .bind(book.category.id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(|e| db_error("Failed to update book", e))?;

        row.map(Book::from)
            .ok_or_else(|| AppError::NotFound(format!("Book not found with id: {}", book.id)))
    }

    async fn delete_book_by_id(&mut self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| db_error("Failed to delete book", e))?;

        Ok(())
    }

    async fn find_category_by_name(&mut self, name: &str) -> Result<Option<Category>> {
        sqlx::query_as::<_, Category>("SELECT id, name FROM categories WHERE name = $1")
            .bind(name)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(|e| db_error("Failed to get category by name", e))
    }

    async fn exists_category_by_name(&mut self, name: &str) -> Result<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM categories WHERE name = $1)")
            .bind(name)
            .fetch_one(&mut *self.tx)
            .await
            .map_err(|e| db_error("Failed to check category existence", e))
    }

    async fn insert_category(&mut self, name: &str) -> Result<Category> {
        sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name) VALUES ($1) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| db_error("Failed to insert category", e))
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        self.tx
            .commit()
            .await
            .map_err(|e| db_error("Failed to commit transaction", e))
    }
}
