use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::database::models::book::{Book, BookChanges, NewBook};
use crate::database::store::{BookStore, StoreError};

/// In-process `BookStore` over an id-ordered map. Ids start at 1 and are
/// never reused.
#[derive(Default)]
pub struct MemoryBookStore {
    state: RwLock<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    last_id: i64,
    rows: BTreeMap<i64, Book>,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn create(&self, book: NewBook) -> Result<Book, StoreError> {
        let mut state = self.state.write().await;
        state.last_id += 1;
        let now = Utc::now();
        let row = Book {
            id: state.last_id,
            title: book.title,
            author: book.author,
            year: book.year,
            created_at: now,
            updated_at: now,
        };
        state.rows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn find_by_id(&self, id: i64) -> Result<Book, StoreError> {
        let state = self.state.read().await;
        state.rows.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn find_all(&self) -> Result<Vec<Book>, StoreError> {
        let state = self.state.read().await;
        Ok(state.rows.values().cloned().collect())
    }

    async fn update_fields(&self, id: i64, changes: BookChanges) -> Result<Book, StoreError> {
        let mut state = self.state.write().await;
        let row = state.rows.get_mut(&id).ok_or(StoreError::NotFound)?;
        changes.apply_to(row);
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn delete_by_id(&self, id: i64) -> Result<u64, StoreError> {
        let mut state = self.state.write().await;
        Ok(state.rows.remove(&id).map_or(0, |_| 1))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
