use utoipa::OpenApi;

use super::api::error::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::tracker::sample,
        super::api::tracker::targets,
        super::api::tracker::trail,
        super::api::tracker::status,
        super::api::scene::snapshot,
        super::api::scene::controls,
        super::api::scene::set_controls,
        super::api::scene::toggle_camera,
        super::api::scene::toggle_label,
    ),
    components(
        schemas(
            ErrorResponse,
            crate::telemetry::TelemetrySample,
            crate::tracker::Targets,
            crate::tracker::PollerStatus,
            crate::tracker::PollerState,
            crate::scene::ScenePosition,
            crate::scene::Orientation,
            crate::scene::NodeSnapshot,
            crate::scene::LabelSnapshot,
            crate::scene::SceneSnapshot,
            crate::animator::Controls,
            crate::animator::CameraMode,
        )
    ),
    info(
        title = "Orbit Trace API",
        description = "Live ISS position, scene transforms and view controls",
        version = "0.1.0"
    ),
    tags(
        (name = "tracker", description = "Telemetry fixes and mapped targets"),
        (name = "scene", description = "Animated scene state"),
        (name = "controls", description = "Camera mode and label toggles")
    )
)]
pub struct ApiDoc;
