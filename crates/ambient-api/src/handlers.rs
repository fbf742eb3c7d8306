//! REST API endpoint handlers for the directory service.
//!
//! Handlers only translate HTTP into [`SpaceDirectory`] calls and map the
//! results back; they validate input but hold no business rules.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Service banner |
//! | `GET` | `/health` | Liveness probe |
//! | `GET` | `/sites/` | List sites |
//! | `GET` | `/spaces/?siteId=` | Space groups of a site |
//! | `GET` | `/spaces/tree?siteId=` | Spaces of a site as a forest |
//! | `POST` | `/spaces/{spaceId}/streams` | Add a stream to a space |
//! | `DELETE` | `/streams/{streamId}` | Delete a stream |
//!
//! Unrouted paths and unsupported methods answer through [`not_found`]
//! and [`method_not_allowed`] so they carry the same JSON error body.
//!
//! [`SpaceDirectory`]: ambient_core::SpaceDirectory

use std::sync::Arc;

use ambient_types::{
    AddStreamRequest, AddStreamResponse, HealthResponse, MessageResponse, SiteId, SitesResponse,
    SpaceId, SpaceTreeResponse, SpacesResponse, StreamId,
};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::{Method, StatusCode, Uri};
use axum::Json;
use validator::Validate;

use crate::error::ApiError;
use crate::state::AppState;

/// Banner returned by `GET /`.
pub const SERVICE_BANNER: &str = "Ambient Spaces API";

// ---------------------------------------------------------------------------
// Query parameter structs
// ---------------------------------------------------------------------------

/// Query parameters for the `/spaces/` endpoints.
#[derive(Debug, serde::Deserialize)]
pub struct SiteQuery {
    /// The site to list spaces for. Required.
    #[serde(rename = "siteId")]
    pub site_id: Option<String>,
}

impl SiteQuery {
    /// The requested site id, or an error when `siteId` is absent.
    fn require_site(self) -> Result<SiteId, ApiError> {
        self.site_id
            .map(SiteId::from)
            .ok_or_else(|| ApiError::InvalidQuery("missing required query parameter: siteId".to_owned()))
    }
}

// ---------------------------------------------------------------------------
// GET / and GET /health
// ---------------------------------------------------------------------------

/// Return the service banner.
pub async fn index() -> Json<MessageResponse> {
    Json(MessageResponse::new(SERVICE_BANNER))
}

/// Report liveness along with the catalog size and uptime.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let sites = state.directory.read().await.site_count();

    Json(HealthResponse {
        status: "ok".to_owned(),
        sites: u32::try_from(sites).unwrap_or(u32::MAX),
        uptime_seconds: state.uptime_seconds(),
    })
}

// ---------------------------------------------------------------------------
// GET /sites/
// ---------------------------------------------------------------------------

/// List the site catalog.
pub async fn list_sites(State(state): State<Arc<AppState>>) -> Json<SitesResponse> {
    let directory = state.directory.read().await;

    Json(SitesResponse {
        sites: directory.list_sites().to_vec(),
    })
}

// ---------------------------------------------------------------------------
// GET /spaces/?siteId=
// ---------------------------------------------------------------------------

/// Return the space groups of one site.
///
/// Site `"3"` always fails with `500`; see
/// [`FAULT_INJECTION_SITE_ID`](ambient_core::FAULT_INJECTION_SITE_ID).
pub async fn list_spaces(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SiteQuery>, QueryRejection>,
) -> Result<Json<SpacesResponse>, ApiError> {
    let Query(params) = query?;
    let site_id = params.require_site()?;

    let directory = state.directory.read().await;
    let groups = directory.list_spaces(&site_id)?;

    Ok(Json(SpacesResponse {
        spaces: groups.to_vec(),
    }))
}

// ---------------------------------------------------------------------------
// GET /spaces/tree?siteId=
// ---------------------------------------------------------------------------

/// Return the spaces of one site arranged by `parentSpaceId`.
pub async fn space_tree(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SiteQuery>, QueryRejection>,
) -> Result<Json<SpaceTreeResponse>, ApiError> {
    let Query(params) = query?;
    let site_id = params.require_site()?;

    let tree = state.directory.read().await.space_tree(&site_id)?;
    tracing::debug!(
        site_id = %site_id,
        roots = tree.len(),
        streams = tree.iter().map(ambient_types::SpaceNode::stream_count).sum::<usize>(),
        "space tree built"
    );

    Ok(Json(SpaceTreeResponse { tree }))
}

// ---------------------------------------------------------------------------
// POST /spaces/{spaceId}/streams
// ---------------------------------------------------------------------------

/// Add a stream to a space. Responds `201 Created` with the new stream.
pub async fn add_stream(
    State(state): State<Arc<AppState>>,
    path: Result<Path<u32>, PathRejection>,
    body: Result<Json<AddStreamRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AddStreamResponse>), ApiError> {
    let Path(raw_space_id) = path?;
    let Json(request) = body?;
    request.validate()?;

    let created = state
        .directory
        .write()
        .await
        .add_stream(SpaceId::new(raw_space_id), &request.name)?;

    Ok((StatusCode::CREATED, Json(created)))
}

// ---------------------------------------------------------------------------
// DELETE /streams/{streamId}
// ---------------------------------------------------------------------------

/// Delete a stream and confirm with its name.
pub async fn delete_stream(
    State(state): State<Arc<AppState>>,
    path: Result<Path<u32>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(raw_stream_id) = path?;

    let removed = state
        .directory
        .write()
        .await
        .delete_stream(StreamId::new(raw_stream_id))?;

    Ok(Json(MessageResponse::new(format!(
        "Stream '{}' deleted successfully",
        removed.name
    ))))
}

// ---------------------------------------------------------------------------
// Fallbacks
// ---------------------------------------------------------------------------

/// Answer a request whose path matches no route.
pub async fn not_found(method: Method, uri: Uri) -> ApiError {
    ApiError::RouteNotFound(format!("{method} {}", uri.path()))
}

/// Answer a request whose path is routed for other methods only.
pub async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    ApiError::MethodNotAllowed(format!("{method} {}", uri.path()))
}
