use serde::{Deserialize, Deserializer};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::animator::{AnimationSettings, DEFAULT_FPS};
use crate::scene::{Mapper, ScenePosition, DEFAULT_TRAIL_CAPACITY};
use crate::telemetry::DEFAULT_ENDPOINT;
use crate::tracker::{Targets, DEFAULT_POLL_INTERVAL};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Every section is optional; an empty file yields the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub telemetry: TelemetryConfig,
    pub scene: SceneConfig,
    pub animation: AnimationSettings,
    pub web: WebConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    pub endpoint: String,
    #[serde(deserialize_with = "deserialize_duration")]
    pub interval: Duration,
    #[serde(deserialize_with = "deserialize_opt_duration")]
    pub timeout: Option<Duration>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            interval: DEFAULT_POLL_INTERVAL,
            timeout: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub orbit_radius: f64,
    pub camera_radius: f64,
    pub initial_object: [f64; 3],
    pub initial_camera: [f64; 3],
    pub trail_capacity: usize,
    pub fps: u32,
    /// Whether a model is attached to the tracked object.
    pub model: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        let mapper = Mapper::default();
        Self {
            orbit_radius: mapper.radius,
            camera_radius: mapper.camera_radius,
            initial_object: [0.0, 70.0, 0.0],
            initial_camera: [0.0, 200.0, 0.0],
            trail_capacity: DEFAULT_TRAIL_CAPACITY,
            fps: DEFAULT_FPS,
            model: true,
        }
    }
}

impl SceneConfig {
    pub fn mapper(&self) -> Mapper {
        Mapper::new(self.orbit_radius, self.camera_radius)
    }

    pub fn initial_targets(&self) -> Targets {
        Targets::initial(
            ScenePosition::from(self.initial_object),
            ScenePosition::from(self.initial_camera),
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    pub bind: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

fn parse_duration(s: &str) -> Result<Duration, String> {
    humantime::parse_duration(s.trim()).map_err(|e| e.to_string())
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_duration(&s).map_err(serde::de::Error::custom)
}

fn deserialize_opt_duration<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|s| parse_duration(&s))
        .transpose()
        .map_err(serde::de::Error::custom)
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    pub fn from_str(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Config::default());
        }
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` if given, otherwise the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Config::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.into()));

        if self.telemetry.endpoint.trim().is_empty() {
            return invalid("telemetry.endpoint must not be empty");
        }
        if self.telemetry.interval.is_zero() {
            return invalid("telemetry.interval must be greater than zero");
        }
        if !(self.scene.orbit_radius > 0.0) {
            return invalid("scene.orbit_radius must be positive");
        }
        if !(self.scene.camera_radius > 0.0) {
            return invalid("scene.camera_radius must be positive");
        }
        if self.scene.trail_capacity == 0 {
            return invalid("scene.trail_capacity must be at least 1");
        }
        if self.scene.fps == 0 {
            return invalid("scene.fps must be at least 1");
        }

        let a = &self.animation;
        for (name, rate) in [
            ("animation.object_rate", a.object_rate),
            ("animation.camera_rate", a.camera_rate),
            ("animation.label_rate", a.label_rate),
        ] {
            if !(rate >= 0.0) {
                return Err(ConfigError::Invalid(format!("{} must not be negative", name)));
            }
        }

        Ok(())
    }
}
