use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};

/// A point in scene units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ScenePosition {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl ScenePosition {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn length(&self) -> f64 {
        DVec3::from(*self).length()
    }

    pub fn scale(&self, factor: f64) -> Self {
        (DVec3::from(*self) * factor).into()
    }

    pub fn distance(&self, other: &ScenePosition) -> f64 {
        DVec3::from(*self).distance(DVec3::from(*other))
    }
}

impl From<DVec3> for ScenePosition {
    fn from(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<ScenePosition> for DVec3 {
    fn from(p: ScenePosition) -> Self {
        DVec3::new(p.x, p.y, p.z)
    }
}

impl From<[f64; 3]> for ScenePosition {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

/// Unit quaternion, serialized component-wise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, utoipa::ToSchema)]
pub struct Orientation {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl From<DQuat> for Orientation {
    fn from(q: DQuat) -> Self {
        Self {
            x: q.x,
            y: q.y,
            z: q.z,
            w: q.w,
        }
    }
}
