//! HTTP route definitions

use crate::{handlers, middleware, AppState};
use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Create the main router
pub fn create_router(state: Arc<AppState>) -> Router {
    // The admission gate is shared by every route.
    let gate = middleware::create_admission_gate(
        state.config.rate_limit_rps,
        state.config.rate_limit_burst,
    );

    Router::new()
        // Service endpoints
        .route("/healthz", get(handlers::health_check))
        // Bucket endpoints
        .route("/buckets", post(handlers::create_bucket))
        .route("/buckets/{bucket_name}", delete(handlers::delete_bucket))
        // Object endpoints
        .route(
            "/buckets/{bucket_name}/objects/{id}",
            put(handlers::put_object)
                .get(handlers::get_object)
                .delete(handlers::delete_object),
        )
        // Apply middleware
        .layer(axum_middleware::from_fn(middleware::request_id_middleware))
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(axum_middleware::from_fn_with_state(
            gate,
            middleware::rate_limit_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
