use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::api::scene as scene_handlers;
use super::api::tracker as tracker_handlers;
use super::api_doc::ApiDoc;
use super::state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Tracker
        .route("/api/tracker/sample", get(tracker_handlers::sample))
        .route("/api/tracker/targets", get(tracker_handlers::targets))
        .route("/api/tracker/trail", get(tracker_handlers::trail))
        .route("/api/tracker/status", get(tracker_handlers::status))
        // Scene and controls
        .route("/api/scene", get(scene_handlers::snapshot))
        .route(
            "/api/controls",
            get(scene_handlers::controls).put(scene_handlers::set_controls),
        )
        .route(
            "/api/controls/camera/toggle",
            post(scene_handlers::toggle_camera),
        )
        .route(
            "/api/controls/label/toggle",
            post(scene_handlers::toggle_label),
        )
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(bind_addr: &str, state: AppState) -> std::io::Result<()> {
    let app = router(state);

    log::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::State, response::IntoResponse, Json};
    use chrono::Utc;

    use crate::animator::{AnimationSettings, CameraMode, Controls, Stage};
    use crate::scene::{Mapper, SceneGraph, ScenePosition};
    use crate::telemetry::TelemetrySample;
    use crate::tracker::{PollerState, TargetStore, Targets};

    fn state() -> AppState {
        let store = TargetStore::new(
            Mapper::default(),
            Targets::initial(
                ScenePosition::new(0.0, 70.0, 0.0),
                ScenePosition::new(0.0, 200.0, 0.0),
            ),
            8,
        );
        let stage = Stage::new(
            AnimationSettings::default(),
            SceneGraph::new(
                Some(ScenePosition::new(0.0, 70.0, 0.0)),
                ScenePosition::new(0.0, 200.0, 0.0),
            ),
        )
        .shared();
        AppState { store, stage }
    }

    fn fix() -> TelemetrySample {
        TelemetrySample {
            latitude_deg: -12.5,
            longitude_deg: 77.25,
            altitude_km: 419.9,
            velocity_kph: 27_590.0,
            observed_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn sample_is_not_found_before_first_fix() {
        let result = tracker_handlers::sample(State(state())).await;
        let response = match result {
            Ok(_) => panic!("expected no fix"),
            Err(e) => e.into_response(),
        };
        assert_eq!(response.status(), axum::http::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn tracker_endpoints_reflect_store() {
        let state = state();
        state.store.publish(fix());

        let Ok(Json(sample)) = tracker_handlers::sample(State(state.clone())).await else {
            panic!("expected a fix");
        };
        assert_eq!(sample.longitude_deg, 77.25);

        let Json(targets) = tracker_handlers::targets(State(state.clone())).await;
        assert_eq!(targets, *state.store.current());

        let Json(trail) = tracker_handlers::trail(State(state.clone())).await;
        assert_eq!(trail, vec![targets.object]);

        let Json(status) = tracker_handlers::status(State(state)).await;
        assert_eq!(status.state, PollerState::Idle);
        assert!(status.last_success.is_some());
    }

    #[tokio::test]
    async fn toggles_flip_animator_controls() {
        let state = state();

        let Json(controls) = scene_handlers::toggle_camera(State(state.clone())).await;
        assert_eq!(controls.camera_mode, CameraMode::Fixed);

        let Json(controls) = scene_handlers::toggle_label(State(state.clone())).await;
        assert!(!controls.label_visible);

        let Json(current) = scene_handlers::controls(State(state.clone())).await;
        assert_eq!(current, controls);

        let Json(replaced) = scene_handlers::set_controls(
            State(state.clone()),
            Json(Controls::default()),
        )
        .await;
        assert_eq!(replaced, Controls::default());
    }

    #[tokio::test]
    async fn scene_snapshot_reports_initial_transforms() {
        let Json(scene) = scene_handlers::snapshot(State(state())).await;
        let model = scene.model.expect("model attached");
        assert_eq!(model.position, ScenePosition::new(0.0, 70.0, 0.0));
        assert_eq!(scene.camera.position, ScenePosition::new(0.0, 200.0, 0.0));
    }

    #[test]
    fn openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/tracker/sample",
            "/api/tracker/targets",
            "/api/tracker/trail",
            "/api/tracker/status",
            "/api/scene",
            "/api/controls",
            "/api/controls/camera/toggle",
            "/api/controls/label/toggle",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
