//! HTTP front end.
//!
//! Endpoints:
//! - GET  / - upload form with the language list
//! - GET  /health
//! - GET  /languages
//! - POST /detect-language
//! - POST /translate-text
//! - POST /translate-document (multipart: `file`, `language`)
//! - GET  /static/{file} - translated documents

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::{Config, ConfigError};
pub use error::AppError;
pub use state::AppState;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Build the application router. Uploads larger than `max_upload_bytes` are rejected.
pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::index))
        .route("/health", get(routes::health))
        .route("/languages", get(routes::languages))
        .route("/detect-language", post(routes::detect_language))
        .route("/translate-text", post(routes::translate_text))
        .route("/translate-document", post(routes::translate_document))
        .nest_service("/static", ServeDir::new(state.output_dir()))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
