use glam::{DQuat, DVec3};
use serde::Serialize;

use super::position::{Orientation, ScenePosition};
use super::transform::{Billboard, Transform};

/// Headless scene object. Holds exactly what a renderer would be told.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    position: DVec3,
    rotation: DQuat,
    text: String,
    visible: bool,
}

impl Node {
    pub fn at(position: DVec3) -> Self {
        Self {
            position,
            rotation: DQuat::IDENTITY,
            text: String::new(),
            visible: true,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn snapshot(&self) -> NodeSnapshot {
        NodeSnapshot {
            position: self.position.into(),
            rotation: self.rotation.into(),
        }
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::at(DVec3::ZERO)
    }
}

impl Transform for Node {
    fn position(&self) -> DVec3 {
        self.position
    }

    fn rotation(&self) -> DQuat {
        self.rotation
    }

    fn set_position(&mut self, position: DVec3) {
        self.position = position;
    }

    fn set_rotation(&mut self, rotation: DQuat) {
        self.rotation = rotation;
    }
}

impl Billboard for Node {
    fn set_text(&mut self, text: &str) {
        if self.text != text {
            self.text = text.to_string();
        }
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct NodeSnapshot {
    pub position: ScenePosition,
    pub rotation: Orientation,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct LabelSnapshot {
    pub position: ScenePosition,
    pub rotation: Orientation,
    pub text: String,
    pub visible: bool,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct SceneSnapshot {
    /// `None` until the model has been attached.
    pub model: Option<NodeSnapshot>,
    pub camera: NodeSnapshot,
    pub label: LabelSnapshot,
}

/// The three objects the animator drives.
#[derive(Debug, Clone)]
pub struct SceneGraph {
    pub model: Option<Node>,
    pub camera: Node,
    pub label: Node,
}

impl SceneGraph {
    /// Places model and camera at their initial positions and aims the camera
    /// at the origin. This is the only place transforms are snapped.
    pub fn new(model_at: Option<ScenePosition>, camera_at: ScenePosition) -> Self {
        let model = model_at.map(|p| Node::at(p.into()));
        let mut camera = Node::at(camera_at.into());
        camera.look_at(DVec3::ZERO);
        let label = Node::at(model.as_ref().map(|m| m.position).unwrap_or(DVec3::ZERO));
        Self {
            model,
            camera,
            label,
        }
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        let label = self.label.snapshot();
        SceneSnapshot {
            model: self.model.as_ref().map(Node::snapshot),
            camera: self.camera.snapshot(),
            label: LabelSnapshot {
                position: label.position,
                rotation: label.rotation,
                text: self.label.text.clone(),
                visible: self.label.visible,
            },
        }
    }
}
