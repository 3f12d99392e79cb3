use axum::{extract::State, Json};

use crate::scene::ScenePosition;
use crate::telemetry::TelemetrySample;
use crate::tracker::{PollerStatus, Targets};
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[utoipa::path(
    get,
    path = "/api/tracker/sample",
    responses(
        (status = 200, description = "Latest telemetry fix", body = TelemetrySample),
        (status = 404, description = "No fix received yet", body = ErrorResponse)
    ),
    tag = "tracker"
)]
pub async fn sample(State(state): State<AppState>) -> ApiResult<Json<TelemetrySample>> {
    state
        .store
        .latest_sample()
        .map(Json)
        .ok_or(ApiError::NoFix)
}

#[utoipa::path(
    get,
    path = "/api/tracker/targets",
    responses(
        (status = 200, description = "Current object and camera targets", body = Targets)
    ),
    tag = "tracker"
)]
pub async fn targets(State(state): State<AppState>) -> Json<Targets> {
    Json(state.store.current().as_ref().clone())
}

#[utoipa::path(
    get,
    path = "/api/tracker/trail",
    responses(
        (status = 200, description = "Marker trail, oldest first", body = Vec<ScenePosition>)
    ),
    tag = "tracker"
)]
pub async fn trail(State(state): State<AppState>) -> Json<Vec<ScenePosition>> {
    Json(state.store.trail())
}

#[utoipa::path(
    get,
    path = "/api/tracker/status",
    responses(
        (status = 200, description = "Poller state", body = PollerStatus)
    ),
    tag = "tracker"
)]
pub async fn status(State(state): State<AppState>) -> Json<PollerStatus> {
    Json(state.store.status())
}
