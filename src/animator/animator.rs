use glam::{DQuat, DVec3, EulerRot};
use serde::Deserialize;

use crate::scene::{Billboard, Transform};
use crate::telemetry::TelemetrySample;
use crate::tracker::Targets;

use super::controls::{CameraMode, Controls};

/// Tuning for the per-frame motion. Rates are the fraction of the remaining
/// distance closed per second.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    pub object_rate: f64,
    pub camera_rate: f64,
    pub label_rate: f64,
    pub wobble_speed: f64,
    pub wobble_intensity: f64,
    /// Label offset from the model, in camera space.
    pub label_offset: [f64; 3],
    /// Camera target while in `CameraMode::Fixed`.
    pub fixed_camera: [f64; 3],
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            object_rate: 0.2,
            camera_rate: 0.5,
            label_rate: 4.0,
            wobble_speed: 0.6,
            wobble_intensity: 0.2,
            label_offset: [0.0, 6.0, 0.0],
            fixed_camera: [0.0, 200.0, 0.0],
        }
    }
}

/// Exponential approach: closes `dt * rate` of the gap, capped at the whole gap.
pub fn smooth(current: DVec3, target: DVec3, dt: f64, rate: f64) -> DVec3 {
    let t = (dt * rate).clamp(0.0, 1.0);
    current + (target - current) * t
}

/// Cosmetic sway of the model, a function of elapsed time only.
pub fn wobble(elapsed: f64, speed: f64, intensity: f64) -> DQuat {
    DQuat::from_euler(
        EulerRot::XYZ,
        (elapsed * speed).sin() * intensity,
        0.0,
        (elapsed / 1.2 * speed).sin() * intensity,
    )
}

pub fn label_text(sample: Option<&TelemetrySample>) -> String {
    match sample {
        Some(s) => format!(
            "ISS\nlat {:.2}° lon {:.2}°\nalt {:.1} km\nvel {:.0} km/h",
            s.latitude_deg, s.longitude_deg, s.altitude_km, s.velocity_kph
        ),
        None => "ISS\nawaiting telemetry".to_string(),
    }
}

pub struct FrameAnimator {
    settings: AnimationSettings,
    controls: Controls,
    elapsed: f64,
}

impl FrameAnimator {
    pub fn new(settings: AnimationSettings) -> Self {
        Self {
            settings,
            controls: Controls::default(),
            elapsed: 0.0,
        }
    }

    pub fn controls(&self) -> Controls {
        self.controls
    }

    pub fn controls_mut(&mut self) -> &mut Controls {
        &mut self.controls
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Where the camera is heading under the current mode.
    pub fn camera_target(&self, targets: &Targets) -> DVec3 {
        match self.controls.camera_mode {
            CameraMode::Follow => targets.camera.into(),
            CameraMode::Fixed => DVec3::from_array(self.settings.fixed_camera),
        }
    }

    /// Advance one rendered frame. A missing model is skipped; the label then
    /// hangs off the model's target instead.
    pub fn step<M, C, L>(
        &mut self,
        dt: f64,
        targets: &Targets,
        model: Option<&mut M>,
        camera: &mut C,
        label: &mut L,
    ) where
        M: Transform,
        C: Transform,
        L: Billboard,
    {
        let dt = dt.max(0.0);
        self.elapsed += dt;
        let s = &self.settings;

        let anchor = match model {
            Some(model) => {
                model.set_rotation(wobble(self.elapsed, s.wobble_speed, s.wobble_intensity));
                let position = smooth(model.position(), targets.object.into(), dt, s.object_rate);
                model.set_position(position);
                position
            }
            None => targets.object.into(),
        };

        let camera_target = self.camera_target(targets);
        let camera_position = smooth(camera.position(), camera_target, dt, s.camera_rate);
        camera.set_position(camera_position);
        camera.look_at(DVec3::ZERO);

        let facing = camera.rotation();
        let desired = anchor + facing * DVec3::from_array(s.label_offset);
        label.set_position(smooth(label.position(), desired, dt, s.label_rate));
        label.set_rotation(facing);
        label.set_text(&label_text(targets.sample.as_ref()));
        label.set_visible(self.controls.label_visible);
    }
}
