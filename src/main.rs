//! Notes client - a server-rendered browser front end for the notes API.
//!
//! This is the main entry point for the web server.
//! The application is organized into the following modules:
//!
//! - `config`: `NOTES_*` environment configuration
//! - `api`: HTTP client for the remote notes API
//! - `session`: Session cookies and bearer tokens
//! - `citations` / `presentation`: Citation parsing and rendering model
//! - `selection`: Multi-select and bulk delete for list views
//! - `templates`: HTML/CSS templates and rendering
//! - `handlers`: HTTP route handlers

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use notes_client::{config::Config, handlers, AppState};

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "notes_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(2);
        }
    };
    let bind_addr = config.bind_addr;
    let api_url = config.api_url.clone();

    let state = match AppState::new(config) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            tracing::error!(error = %e, "failed to build HTTP client");
            std::process::exit(1);
        }
    };

    let app = Router::new()
        // Core routes
        .route("/", get(handlers::index))
        .route("/login", get(handlers::login_page).post(handlers::login_submit))
        .route("/register", get(handlers::register_page).post(handlers::register_submit))
        .route("/logout", get(handlers::logout))
        // Note routes
        .route("/notes", get(handlers::notes_list))
        .route("/notes/select/{id}", post(handlers::notes_toggle))
        .route("/notes/select-all", post(handlers::notes_toggle_all))
        .route("/notes/bulk-delete", post(handlers::notes_bulk_delete))
        .route("/notes/new", get(handlers::new_note_page).post(handlers::create_note))
        .route("/notes/{id}", get(handlers::view_note))
        .route("/notes/{id}/edit", get(handlers::edit_note_page).post(handlers::update_note))
        .route("/notes/{id}/delete", post(handlers::delete_note))
        // Group routes
        .route("/groups", get(handlers::groups_list))
        .route("/groups/select/{id}", post(handlers::groups_toggle))
        .route("/groups/select-all", post(handlers::groups_toggle_all))
        .route("/groups/bulk-delete", post(handlers::groups_bulk_delete))
        .route("/groups/clusterize", post(handlers::clusterize))
        .route("/groups/{id}", get(handlers::view_group))
        .route("/groups/{id}/delete", post(handlers::delete_group))
        // Ask routes
        .route("/ask", get(handlers::ask_page).post(handlers::ask_submit))
        .route("/answers/{id}", get(handlers::view_answer))
        .route("/answers/{id}/citations/{number}", get(handlers::follow_citation))
        .route("/answers/{id}/delete", post(handlers::delete_answer))
        .route("/answers/{id}/convert", post(handlers::convert_answer))
        // Search
        .route("/search", get(handlers::search))
        .with_state(state);

    let listener = match tokio::net::TcpListener::bind(bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(addr = %bind_addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };

    tracing::info!(addr = %bind_addr, api = %api_url, "notes client running");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}
