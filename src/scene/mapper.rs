//! Geodetic latitude/longitude to scene-space positions.
//!
//! The scene is Y-up. Latitude gives the polar angle measured from +Y and
//! longitude the azimuth around Y, with its sign inverted so that east runs
//! the same way as on the textured globe.

use crate::telemetry::TelemetrySample;

use super::position::ScenePosition;

pub const DEFAULT_ORBIT_RADIUS: f64 = 100.0;
pub const DEFAULT_CAMERA_RADIUS: f64 = 120.0;

/// Map a geodetic fix onto the sphere of the given radius.
pub fn map(latitude_deg: f64, longitude_deg: f64, radius: f64) -> ScenePosition {
    let polar = (90.0 - latitude_deg).to_radians();
    let azimuth = (-longitude_deg).to_radians();

    let (sin_polar, cos_polar) = polar.sin_cos();
    let (sin_azimuth, cos_azimuth) = azimuth.sin_cos();

    ScenePosition::new(
        radius * sin_polar * cos_azimuth,
        radius * cos_polar,
        radius * sin_polar * sin_azimuth,
    )
}

/// Same angular position projected onto the concentric camera sphere.
pub fn camera_position(
    latitude_deg: f64,
    longitude_deg: f64,
    radius: f64,
    camera_radius: f64,
) -> ScenePosition {
    map(latitude_deg, longitude_deg, radius).scale(camera_radius / radius)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mapper {
    pub radius: f64,
    pub camera_radius: f64,
}

impl Default for Mapper {
    fn default() -> Self {
        Self {
            radius: DEFAULT_ORBIT_RADIUS,
            camera_radius: DEFAULT_CAMERA_RADIUS,
        }
    }
}

impl Mapper {
    pub fn new(radius: f64, camera_radius: f64) -> Self {
        Self {
            radius,
            camera_radius,
        }
    }

    pub fn object(&self, sample: &TelemetrySample) -> ScenePosition {
        map(sample.latitude_deg, sample.longitude_deg, self.radius)
    }

    pub fn camera(&self, sample: &TelemetrySample) -> ScenePosition {
        camera_position(
            sample.latitude_deg,
            sample.longitude_deg,
            self.radius,
            self.camera_radius,
        )
    }
}
