use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::{AdminCredential, CredentialVerifier, TokenIssuer};
use crate::config::AppConfig;
use crate::database::store::BookStore;
use crate::handlers;
use crate::middleware::auth::{require_token, AuthGate};
use crate::services::BookService;

/// Everything handlers need, built once at startup and shared read-only.
#[derive(Clone)]
pub struct AppState {
    pub books: BookService,
    pub issuer: Arc<TokenIssuer>,
    pub gate: AuthGate,
    pub store: Arc<dyn BookStore>,
}

impl AppState {
    pub fn new(config: &AppConfig, store: Arc<dyn BookStore>) -> Self {
        let security = &config.security;
        let admin = AdminCredential::new(&security.admin_username, &security.admin_password);

        Self {
            books: BookService::new(store.clone()),
            issuer: Arc::new(TokenIssuer::new(&security.jwt_secret, admin)),
            gate: AuthGate::new(CredentialVerifier::new(&security.jwt_secret)),
            store,
        }
    }
}

pub fn router(state: AppState, enable_cors: bool) -> Router {
    let app = Router::new()
        // Public
        .route("/health", get(handlers::health::get))
        .route("/token", post(handlers::token::post))
        // Protected
        .merge(book_routes(state.gate.clone()))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if enable_cors {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

fn book_routes(gate: AuthGate) -> Router<AppState> {
    use handlers::books;

    Router::new()
        .route("/book", post(books::create))
        .route("/books", get(books::list))
        .route(
            "/book/:id",
            get(books::get).put(books::update).delete(books::delete),
        )
        // route_layer so unmatched paths still 404 instead of 401
        .route_layer(middleware::from_fn_with_state(gate, require_token))
}
