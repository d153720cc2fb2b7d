//! PDF Tools API - HTTP backend for stateless PDF operations
//!
//! Provides REST endpoints for:
//! - Merging uploaded PDFs
//! - Extracting a page range from a PDF
//! - Assembling uploaded images into a PDF
//! - Downloading produced artifacts by identifier

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod error;
pub mod handlers;
pub mod models;
pub mod state;
pub mod store;

pub use state::AppState;

/// Uploads above this size are rejected by the body-limit layer.
pub const MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

/// Build the application router around an injected state.
///
/// Kept separate from `main` so integration tests can drive the exact
/// router the binary serves, pointed at a per-test temp root.
pub fn app(state: Arc<AppState>) -> Router {
    // CORS configuration for web clients
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Liveness + health
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        // PDF operations
        .route("/api/pdf/merge", post(handlers::merge_pdfs))
        .route("/api/pdf/split", post(handlers::split_pdf))
        .route("/api/pdf/images-to-pdf", post(handlers::images_to_pdf))
        // Artifact delivery
        .route("/api/download/:file_id", get(handlers::download))
        // Add middleware
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
