use std::sync::Arc;

use axum::{
    http::StatusCode,
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    db::UserStore,
    middleware::{
        auth::{require_auth, IdentityVerifier},
        request_id::{make_span_with_request_id, request_id_middleware},
    },
    services::MovieCatalog,
};

pub mod extract;
pub mod movies;
pub mod user;

/// Shared application state: immutable handles to the external collaborators.
/// No in-process mutable state is shared between requests.
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub catalog: Arc<dyn MovieCatalog>,
    pub identity: Arc<dyn IdentityVerifier>,
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/movies", movie_routes(state.clone()))
        .nest("/user", user_routes(state.clone()))
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
}

/// Metadata gateway routes; only recommendations requires auth
fn movie_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/search", get(movies::search))
        .route("/popular", get(movies::popular))
        .route("/:movie_id", get(movies::details))
        .route(
            "/:movie_id/recommendations",
            get(movies::recommendations)
                .route_layer(from_fn_with_state(state, require_auth)),
        )
}

/// User collection routes, all behind the identity check
fn user_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/favorites", post(user::add_favorite))
        .route("/favorites/:movie_id", delete(user::remove_favorite))
        .route("/watchlist", post(user::add_watchlist))
        .route("/watchlist/:movie_id", delete(user::remove_watchlist))
        .route("/ratings", post(user::upsert_rating))
        .route("/profile", put(user::update_profile))
        .route_layer(from_fn_with_state(state, require_auth))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
