//! Axum router construction for the directory API.
//!
//! Assembles all routes into a single [`Router`] with CORS middleware
//! enabled for cross-origin access from the web client.

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the directory service.
///
/// The router includes:
/// - `GET /` -- service banner
/// - `GET /health` -- liveness probe
/// - `GET /sites/` -- site catalog
/// - `GET /spaces/?siteId=` -- space groups of a site
/// - `GET /spaces/tree?siteId=` -- spaces of a site as a forest
/// - `POST /spaces/{space_id}/streams` -- add a stream
/// - `DELETE /streams/{stream_id}` -- delete a stream
///
/// The collection routes answer with and without the trailing slash.
/// Unmatched paths get `404` and unsupported methods `405`, both with the
/// usual `{detail, status}` body. CORS allows any origin, method, and
/// header.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        // Sites
        .route("/sites", get(handlers::list_sites))
        .route("/sites/", get(handlers::list_sites))
        // Spaces
        .route("/spaces", get(handlers::list_spaces))
        .route("/spaces/", get(handlers::list_spaces))
        .route("/spaces/tree", get(handlers::space_tree))
        .route("/spaces/{space_id}/streams", post(handlers::add_stream))
        // Streams
        .route("/streams/{stream_id}", delete(handlers::delete_stream))
        .fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
