use async_trait::async_trait;
use thiserror::Error;

use crate::database::models::book::{Book, BookChanges, NewBook};

/// The two failure kinds a store surfaces.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("row not found")]
    NotFound,

    /// Anything below the adapter: connectivity, constraints, timeouts.
    #[error("backend error: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            other => StoreError::Backend(other.to_string()),
        }
    }
}

/// Narrow data-access seam for the `books` table.
///
/// Each call is a single store operation. Concurrent writers to the same id
/// are not serialized: the last write wins.
#[async_trait]
pub trait BookStore: Send + Sync {
    async fn create(&self, book: NewBook) -> Result<Book, StoreError>;

    async fn find_by_id(&self, id: i64) -> Result<Book, StoreError>;

    /// All rows in insertion (id) order.
    async fn find_all(&self) -> Result<Vec<Book>, StoreError>;

    /// Overwrites the present fields of `changes` and returns the merged row.
    async fn update_fields(&self, id: i64, changes: BookChanges) -> Result<Book, StoreError>;

    /// Returns the number of rows removed.
    async fn delete_by_id(&self, id: i64) -> Result<u64, StoreError>;

    /// Round-trips to the backend to confirm it is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
