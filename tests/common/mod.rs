#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

use book_api::app::{self, AppState};
use book_api::config::AppConfig;
use book_api::database::{BookStore, MemoryBookStore};

pub const SECRET: &str = "integration-test-secret";
pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASS: &str = "Password";

pub struct TestServer {
    pub base_url: String,
    pub store: Arc<MemoryBookStore>,
    pub client: reqwest::Client,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Obtains a fresh token through POST /token.
    pub async fn token(&self) -> Result<String> {
        let res = self
            .client
            .post(self.url("/token"))
            .json(&json!({ "username": ADMIN_USER, "password": ADMIN_PASS }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "token request failed: {}", res.status());

        let body = res.json::<Value>().await?;
        body["data"]["token"]
            .as_str()
            .map(str::to_string)
            .context("token missing from response")
    }

    /// Creates a book through the API and returns its `data` object.
    pub async fn create_book(&self, token: &str, title: &str, author: &str, year: i64) -> Result<Value> {
        let res = self
            .client
            .post(self.url("/book"))
            .header("Authorization", token)
            .json(&json!({ "title": title, "author": author, "year": year }))
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::CREATED, "create failed: {}", res.status());
        Ok(res.json::<Value>().await?["data"].clone())
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

/// Starts the real router on a free port, backed by an in-memory store.
pub async fn spawn_server() -> Result<TestServer> {
    spawn_server_with_secret(SECRET).await
}

pub async fn spawn_server_with_secret(secret: &str) -> Result<TestServer> {
    let mut config = AppConfig::from_lookup(|_| None);
    config.security.jwt_secret = secret.to_string();
    config.security.admin_username = ADMIN_USER.to_string();
    config.security.admin_password = ADMIN_PASS.to_string();

    let store = Arc::new(MemoryBookStore::new());
    let state = AppState::new(&config, store.clone() as Arc<dyn BookStore>);
    let router = app::router(state, false);

    // Pick an unused port for isolation
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .context("failed to bind test listener")?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    let server = TestServer {
        base_url: format!("http://127.0.0.1:{}", port),
        store,
        client: reqwest::Client::new(),
    };
    server.wait_ready(Duration::from_secs(5)).await?;
    Ok(server)
}
