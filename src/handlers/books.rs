// Protected book routes. Each handler is a thin adapter: it pulls the path
// id and body out of the request and hands them to `BookService`.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

use crate::app::AppState;
use crate::database::models::book::{Book, BookUpdate, NewBook};
use crate::error::ApiError;
use crate::middleware::response::ApiResult;

/// POST /book - Create a book
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewBook>, JsonRejection>,
) -> ApiResult<Book> {
    let Json(payload) = payload.map_err(invalid_input)?;
    state.books.create(payload).await
}

/// GET /books - List every book
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Book>> {
    state.books.list().await
}

/// GET /book/:id - Get a single book by ID
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Book> {
    state.books.get(&id).await
}

/// PUT /book/:id - Partially update a book by ID
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<BookUpdate>, JsonRejection>,
) -> ApiResult<Book> {
    let payload = payload.map(|Json(update)| update).map_err(invalid_input);
    state.books.update(&id, payload).await
}

/// DELETE /book/:id - Delete a book by ID
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    state.books.delete(&id).await
}

fn invalid_input(rejection: JsonRejection) -> ApiError {
    tracing::debug!("rejected book payload: {}", rejection.body_text());
    ApiError::bad_request("Invalid input")
}
