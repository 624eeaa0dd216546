// src/routes.rs

use axum::{
    Router, http::Method,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{admin, submit, verify};
use crate::state::AppState;

/// Assembles the main application router.
///
/// * Merges the quiz-facing and admin sub-routers.
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (store, config, quiz bank).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        "http://localhost:3000".parse().unwrap(),
        "http://127.0.0.1:3000".parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let quiz_routes = Router::new()
        .route("/verify", post(verify::verify_code))
        .route("/submit", post(submit::submit_quiz));

    // Admin routes carry their own shared-secret check per handler.
    let admin_routes = Router::new()
        .route("/stats", get(admin::get_stats))
        .route("/codes", post(admin::mint_codes))
        .route("/codes/upsert", post(admin::upsert_code));

    Router::new()
        .nest("/api", quiz_routes)
        .nest("/api/admin", admin_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
