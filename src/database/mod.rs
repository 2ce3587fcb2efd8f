pub mod manager;
pub mod memory;
pub mod models;
pub mod repository;
pub mod store;

pub use manager::{connect, ensure_schema, DatabaseError};
pub use memory::MemoryBookStore;
pub use models::book::{Book, BookChanges, BookUpdate, NewBook};
pub use repository::PgBookStore;
pub use store::{BookStore, StoreError};
