use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CameraMode {
    /// Chase the camera target published with each fix.
    #[default]
    Follow,
    /// Hold the configured fixed viewpoint.
    Fixed,
}

impl CameraMode {
    pub fn toggled(self) -> Self {
        match self {
            CameraMode::Follow => CameraMode::Fixed,
            CameraMode::Fixed => CameraMode::Follow,
        }
    }
}

/// The two user toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Controls {
    pub camera_mode: CameraMode,
    pub label_visible: bool,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            camera_mode: CameraMode::Follow,
            label_visible: true,
        }
    }
}

impl Controls {
    pub fn toggle_camera_mode(&mut self) -> CameraMode {
        self.camera_mode = self.camera_mode.toggled();
        self.camera_mode
    }

    pub fn toggle_label(&mut self) -> bool {
        self.label_visible = !self.label_visible;
        self.label_visible
    }
}
