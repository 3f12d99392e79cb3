use axum::{extract::State, Json};

use crate::animator::Controls;
use crate::scene::SceneSnapshot;
use crate::web::state::AppState;

#[utoipa::path(
    get,
    path = "/api/scene",
    responses(
        (status = 200, description = "Current model, camera and label transforms", body = SceneSnapshot)
    ),
    tag = "scene"
)]
pub async fn snapshot(State(state): State<AppState>) -> Json<SceneSnapshot> {
    Json(state.stage.lock().unwrap().snapshot())
}

#[utoipa::path(
    get,
    path = "/api/controls",
    responses(
        (status = 200, description = "Camera mode and label visibility", body = Controls)
    ),
    tag = "controls"
)]
pub async fn controls(State(state): State<AppState>) -> Json<Controls> {
    Json(state.stage.lock().unwrap().animator.controls())
}

#[utoipa::path(
    put,
    path = "/api/controls",
    request_body = Controls,
    responses(
        (status = 200, description = "Controls replaced", body = Controls)
    ),
    tag = "controls"
)]
pub async fn set_controls(
    State(state): State<AppState>,
    Json(request): Json<Controls>,
) -> Json<Controls> {
    let mut stage = state.stage.lock().unwrap();
    *stage.animator.controls_mut() = request;
    log::info!(
        "Controls set: camera {:?}, label {}",
        request.camera_mode,
        if request.label_visible { "shown" } else { "hidden" }
    );
    Json(stage.animator.controls())
}

#[utoipa::path(
    post,
    path = "/api/controls/camera/toggle",
    responses(
        (status = 200, description = "Camera mode flipped", body = Controls)
    ),
    tag = "controls"
)]
pub async fn toggle_camera(State(state): State<AppState>) -> Json<Controls> {
    let mut stage = state.stage.lock().unwrap();
    let mode = stage.animator.controls_mut().toggle_camera_mode();
    log::info!("Camera mode: {:?}", mode);
    Json(stage.animator.controls())
}

#[utoipa::path(
    post,
    path = "/api/controls/label/toggle",
    responses(
        (status = 200, description = "Label visibility flipped", body = Controls)
    ),
    tag = "controls"
)]
pub async fn toggle_label(State(state): State<AppState>) -> Json<Controls> {
    let mut stage = state.stage.lock().unwrap();
    let visible = stage.animator.controls_mut().toggle_label();
    log::info!("Telemetry label {}", if visible { "shown" } else { "hidden" });
    Json(stage.animator.controls())
}
