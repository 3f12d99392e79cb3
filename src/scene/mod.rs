mod mapper;
mod node;
mod position;
mod trail;
mod transform;

pub use mapper::{camera_position, map, Mapper};
pub use node::{LabelSnapshot, Node, NodeSnapshot, SceneGraph, SceneSnapshot};
pub use position::{Orientation, ScenePosition};
pub use trail::{MarkerTrail, DEFAULT_TRAIL_CAPACITY};
pub use transform::{look_rotation, Billboard, Transform};
