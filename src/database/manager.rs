use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors raised while bringing the store up
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

const CREATE_BOOKS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS books (
        id         BIGSERIAL PRIMARY KEY,
        title      TEXT NOT NULL CHECK (title <> ''),
        author     TEXT NOT NULL CHECK (author <> ''),
        year       INTEGER NOT NULL CHECK (year > 0),
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
"#;

/// Opens the connection pool described by `config`.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
    validate_url(&config.url)?;

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connection_timeout))
        .connect(&config.url)
        .await?;

    info!(max_connections = config.max_connections, "Created database pool");
    Ok(pool)
}

/// Creates the `books` table when it does not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), DatabaseError> {
    sqlx::query(CREATE_BOOKS_TABLE).execute(pool).await?;
    Ok(())
}

fn validate_url(raw: &str) -> Result<(), DatabaseError> {
    if raw.is_empty() {
        return Err(DatabaseError::ConfigMissing("DB_URL"));
    }
    let url = url::Url::parse(raw).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
    match url.scheme() {
        "postgres" | "postgresql" => Ok(()),
        _ => Err(DatabaseError::InvalidDatabaseUrl),
    }
}
