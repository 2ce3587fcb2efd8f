use std::sync::Arc;

use crate::database::models::book::{Book, BookChanges, BookUpdate, NewBook};
use crate::database::store::{BookStore, StoreError};
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};

const INVALID_BOOK: &str = "Title, Author, and Year are required";
const NOT_FOUND: &str = "Book not found";

/// CRUD over books: validation, existence checks and partial-update merging
/// in front of a `BookStore`.
#[derive(Clone)]
pub struct BookService {
    store: Arc<dyn BookStore>,
}

impl BookService {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, payload: NewBook) -> ApiResult<Book> {
        if payload.title.is_empty() || payload.author.is_empty() || payload.year <= 0 {
            return Err(ApiError::validation_error(INVALID_BOOK));
        }

        let book = self
            .store
            .create(payload)
            .await
            .map_err(|e| backend_failure(e, "Failed to create book"))?;

        tracing::info!(id = book.id, "book created");
        Ok(ApiResponse::created("Book created successfully", book))
    }

    pub async fn list(&self) -> ApiResult<Vec<Book>> {
        let books = self
            .store
            .find_all()
            .await
            .map_err(|e| backend_failure(e, "Failed to fetch books"))?;

        Ok(ApiResponse::ok("Books retrieved successfully", books))
    }

    pub async fn get(&self, raw_id: &str) -> ApiResult<Book> {
        let id = parse_id(raw_id)?;
        let book = self.find(id, "Failed to fetch book").await?;
        Ok(ApiResponse::ok("Book retrieved successfully", book))
    }

    /// Partially updates a book.
    ///
    /// `payload` is the body decode outcome; it is only looked at once the
    /// book is known to exist, so an unknown id is always a 404. Nothing is
    /// written unless every present field is valid.
    pub async fn update(&self, raw_id: &str, payload: Result<BookUpdate, ApiError>) -> ApiResult<Book> {
        let id = parse_id(raw_id)?;
        self.find(id, "Failed to update book").await?;

        let changes = validate_update(payload?)?;
        if changes.is_empty() {
            tracing::debug!(id, "update carries no fields");
        }

        let book = self
            .store
            .update_fields(id, changes)
            .await
            .map_err(|e| not_found_or(e, "Failed to update book"))?;

        tracing::info!(id, "book updated");
        Ok(ApiResponse::ok("Book updated successfully", book))
    }

    pub async fn delete(&self, raw_id: &str) -> ApiResult<()> {
        let id = parse_id(raw_id)?;
        let removed = self
            .store
            .delete_by_id(id)
            .await
            .map_err(|e| not_found_or(e, "Failed to delete book"))?;

        if removed == 0 {
            return Err(ApiError::not_found(NOT_FOUND));
        }

        tracing::info!(id, "book deleted");
        Ok(ApiResponse::empty("Book deleted successfully"))
    }

    async fn find(&self, id: i64, failure: &'static str) -> Result<Book, ApiError> {
        self.store
            .find_by_id(id)
            .await
            .map_err(|e| not_found_or(e, failure))
    }
}

/// Path ids are positive 32-bit integers.
pub fn parse_id(raw: &str) -> Result<i64, ApiError> {
    match raw.parse::<u32>() {
        Ok(id) if id > 0 => Ok(i64::from(id)),
        _ => Err(ApiError::bad_request("Invalid id")),
    }
}

fn validate_update(update: BookUpdate) -> Result<BookChanges, ApiError> {
    let invalid = || ApiError::validation_error(INVALID_BOOK);

    let title = match update.title {
        None => None,
        Some(Some(title)) if !title.is_empty() => Some(title),
        Some(_) => return Err(invalid()),
    };
    let author = match update.author {
        None => None,
        Some(Some(author)) if !author.is_empty() => Some(author),
        Some(_) => return Err(invalid()),
    };
    let year = match update.year {
        None => None,
        Some(Some(year)) if year > 0 => Some(year),
        Some(_) => return Err(invalid()),
    };

    Ok(BookChanges { title, author, year })
}

fn not_found_or(err: StoreError, failure: &'static str) -> ApiError {
    match err {
        StoreError::NotFound => ApiError::not_found(NOT_FOUND),
        other => backend_failure(other, failure),
    }
}

// Backend detail is logged here and never reaches the client
fn backend_failure(err: StoreError, failure: &'static str) -> ApiError {
    tracing::error!(error = %err, "{}", failure);
    ApiError::internal_server_error(failure)
}
