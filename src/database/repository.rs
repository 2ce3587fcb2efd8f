use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::models::book::{Book, BookChanges, NewBook};
use crate::database::store::{BookStore, StoreError};

const BOOK_COLUMNS: &str = "id, title, author, year, created_at, updated_at";

/// Postgres-backed `BookStore`.
#[derive(Clone)]
pub struct PgBookStore {
    pool: PgPool,
}

impl PgBookStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for PgBookStore {
    async fn create(&self, book: NewBook) -> Result<Book, StoreError> {
        let sql = format!(
            "INSERT INTO books (title, author, year) VALUES ($1, $2, $3) RETURNING {}",
            BOOK_COLUMNS
        );
        let row = sqlx::query_as::<_, Book>(&sql)
            .bind(book.title)
            .bind(book.author)
            .bind(book.year)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_id(&self, id: i64) -> Result<Book, StoreError> {
        let sql = format!("SELECT {} FROM books WHERE id = $1", BOOK_COLUMNS);
        sqlx::query_as::<_, Book>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound)
    }

    async fn find_all(&self) -> Result<Vec<Book>, StoreError> {
        let sql = format!("SELECT {} FROM books ORDER BY id", BOOK_COLUMNS);
        let rows = sqlx::query_as::<_, Book>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn update_fields(&self, id: i64, changes: BookChanges) -> Result<Book, StoreError> {
        // Absent fields bind NULL and COALESCE keeps the stored value
        let sql = format!(
            "UPDATE books SET \
                title = COALESCE($2, title), \
                author = COALESCE($3, author), \
                year = COALESCE($4, year), \
                updated_at = now() \
             WHERE id = $1 RETURNING {}",
            BOOK_COLUMNS
        );
        sqlx::query_as::<_, Book>(&sql)
            .bind(id)
            .bind(changes.title)
            .bind(changes.author)
            .bind(changes.year)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound)
    }

    async fn delete_by_id(&self, id: i64) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
