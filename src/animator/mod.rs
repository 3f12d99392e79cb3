mod animator;
mod controls;
mod driver;

pub use animator::{label_text, smooth, wobble, AnimationSettings, FrameAnimator};
pub use controls::{CameraMode, Controls};
pub use driver::{FrameDriver, SharedStage, Stage, DEFAULT_FPS};
