use crate::{
    handlers, // Import handlers module
    AppState,
};
use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use std::{path::Path, sync::Arc};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

/// Descriptions have no length cap, so allow generous JSON bodies.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024; // 10 MB

/// Creates the Axum router: the JSON API under `/api`, static frontend assets everywhere else.
pub fn create_router(state: Arc<AppState>, static_dir: &Path) -> Router {
    let api = Router::new()
        .route("/health", get(handlers::health))
        .route("/ideas", get(handlers::list_ideas).post(handlers::create_idea))
        .route("/ideas/{id}/like", post(handlers::like_idea))
        .route("/ideas/{id}", delete(handlers::delete_idea))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES));

    Router::new()
        .nest("/api", api)
        .fallback_service(ServeDir::new(static_dir).append_index_html_on_directories(true))
        // Middleware Layers
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state) // Pass the application state
}
