use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use book_api::app::{self, AppState};
use book_api::config::AppConfig;
use book_api::database::{self, BookStore, MemoryBookStore, PgBookStore};

#[derive(Parser)]
#[command(name = "book-api")]
#[command(about = "Authenticated book catalog HTTP service")]
#[command(version)]
struct Args {
    #[arg(long, env = "BOOK_API_PORT", help = "Port to listen on (overrides PORT)")]
    port: Option<u16>,

    #[arg(long, help = "Keep books in process memory instead of Postgres")]
    in_memory: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DB_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("book_api=info,tower_http=info")),
        )
        .init();

    let args = Args::parse();
    let mut config = AppConfig::from_env();
    if let Some(port) = args.port {
        config.server.port = port;
    }
    tracing::info!("Starting book-api in {:?} mode", config.environment);

    if config.security.jwt_secret.is_empty() {
        tracing::warn!("JWT secret is empty; /token and protected routes will answer 500");
    }

    let store: Arc<dyn BookStore> = if args.in_memory {
        tracing::info!("using in-memory book store");
        Arc::new(MemoryBookStore::new())
    } else {
        let pool = database::connect(&config.database)
            .await
            .context("failed to connect to database")?;
        database::ensure_schema(&pool)
            .await
            .context("failed to create books table")?;
        Arc::new(PgBookStore::new(pool))
    };

    let state = AppState::new(&config, store);
    let router = app::router(state, config.security.enable_cors);

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("book-api listening on http://{}", bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("book-api stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
