use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::TelemetryError;

/// One position fix of the station. Replaced wholesale by the next fix.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct TelemetrySample {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_km: f64,
    pub velocity_kph: f64,
    pub observed_at: DateTime<Utc>,
}

/// Fields consumed from the `/v1/satellites/{id}` response. Everything else
/// in the payload is ignored.
#[derive(Debug, Deserialize)]
struct SatellitePayload {
    latitude: f64,
    longitude: f64,
    altitude: f64,
    velocity: f64,
}

pub fn parse_sample(body: &str, observed_at: DateTime<Utc>) -> Result<TelemetrySample, TelemetryError> {
    let payload: SatellitePayload = serde_json::from_str(body)?;
    Ok(TelemetrySample {
        latitude_deg: payload.latitude,
        longitude_deg: payload.longitude,
        altitude_km: payload.altitude,
        velocity_kph: payload.velocity,
        observed_at,
    })
}
