//! HTTP API server for the ArgentBank front-end
//!
//! Routes are organized into modules:
//! - routes::session: Sign-in, sign-out, profile
//! - routes::accounts: Account list, selection
//! - routes::transactions: Transaction list, search, pagination window

pub mod error;
pub mod routes;

use argentbank_config::Config;
use argentbank_core::Store;
use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub config: Config,
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::accounts::{api_accounts, api_select_account};
    use routes::session::{api_login, api_logout, api_profile, api_profile_update};
    use routes::transactions::{
        api_clear_search, api_page_window, api_search, api_search_term, api_transactions,
    };

    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/summary", get(api_summary))
        .route("/api/login", post(api_login))
        .route("/api/logout", post(api_logout))
        .route("/api/profile", get(api_profile))
        .route("/api/profile", put(api_profile_update))
        .route("/api/accounts", get(api_accounts))
        .route("/api/accounts/select", post(api_select_account))
        .route("/api/transactions", get(api_transactions))
        .route("/api/transactions/search", get(api_search))
        .route("/api/transactions/search/term", post(api_search_term))
        .route("/api/transactions/search/clear", post(api_clear_search))
        .route("/api/transactions/page-window", get(api_page_window))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Store status summary (JSON API)
async fn api_summary(state: axum::extract::State<AppState>) -> String {
    let summary = state.store.summary();
    serde_json::to_string(&summary).unwrap_or_default()
}

/// Start the HTTP server
///
/// Creates the router, binds to the configured address, and serves until
/// shutdown.
pub async fn start_server(config: Config, store: Arc<Store>) {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState { store, config };

    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await.unwrap();
    eprintln!("[INFO] Starting ArgentBank server on http://{}", addr);
    eprintln!("[INFO] Available routes:");
    eprintln!("[INFO]   - POST /api/login (Sign in)");
    eprintln!("[INFO]   - GET  /api/profile (User profile)");
    eprintln!("[INFO]   - GET  /api/accounts (Account list)");
    eprintln!("[INFO]   - GET  /api/transactions/search (Transaction search)");
    eprintln!("[INFO]   - GET  /api/summary (Store status)");

    match axum::serve(listener, router).await {
        Ok(_) => eprintln!("[INFO] Server stopped gracefully"),
        Err(e) => eprintln!("[ERROR] Server error: {}", e),
    }
}
