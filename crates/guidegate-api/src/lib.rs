use axum::{
    http::StatusCode,
    middleware::from_fn,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use guidegate_core::{config::AppConfig, AppState};
use serde_json::json;
use tower_http::{services::ServeDir, trace::TraceLayer};

pub mod error;
pub mod middleware;
pub mod routes;

/// Endpoints advertised at startup.
pub const ENDPOINTS: &[(&str, &str)] = &[
    ("GET /public/download", "Download the public user guide"),
    ("GET /download", "Download the public user guide"),
    ("GET /protected/download", "Download the configured user guide (bearer token)"),
    ("GET /download/userguide", "Download the configured user guide (bearer token)"),
    ("GET /health", "Health check"),
    ("GET /static/*", "Static files"),
];

pub fn build_router(config: &AppConfig) -> Router<AppState> {
    Router::new()
        // Health
        .route("/health", get(health))
        // Public, fixed document
        .route("/public/download", get(routes::files::public_download))
        .route("/download", get(routes::files::public_download))
        // Protected, validated document
        .route(
            "/protected/download",
            get(routes::files::download_user_guide),
        )
        .route(
            "/download/userguide",
            get(routes::files::download_user_guide),
        )
        // Operator-trusted static content
        .nest_service("/static", ServeDir::new(&config.static_path))
        // Middleware layers
        .layer(from_fn(middleware::security_headers))
        .layer(TraceLayer::new_for_http())
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
