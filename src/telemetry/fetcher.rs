use std::time::Duration;

use chrono::Utc;

use super::error::TelemetryError;
use super::sample::{parse_sample, TelemetrySample};

pub const DEFAULT_ENDPOINT: &str = "https://api.wheretheiss.at/v1/satellites/25544";

/// A blocking source of telemetry fixes. The poller runs it on the blocking
/// thread pool, never on the frame loop.
pub trait Fetch: Send + Sync + 'static {
    fn fetch(&self) -> Result<TelemetrySample, TelemetryError>;
}

pub struct HttpFetcher {
    agent: ureq::Agent,
    endpoint: String,
}

impl HttpFetcher {
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Self {
        let mut builder = ureq::AgentBuilder::new();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Self {
            agent: builder.build(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self) -> Result<TelemetrySample, TelemetryError> {
        let response = self.agent.get(&self.endpoint).call()?;
        // ureq only reports 4xx/5xx as errors
        if !(200..300).contains(&response.status()) {
            return Err(TelemetryError::Status(response.status()));
        }
        let body = response
            .into_string()
            .map_err(|e| TelemetryError::Network(e.to_string()))?;
        parse_sample(&body, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Router};

    use crate::telemetry::FailureKind;

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/v1/satellites/25544", addr)
    }

    async fn fetch_from(endpoint: String) -> Result<TelemetrySample, TelemetryError> {
        tokio::task::spawn_blocking(move || {
            HttpFetcher::new(endpoint, Some(Duration::from_secs(5))).fetch()
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn fetches_and_parses_a_fix() {
        let app = Router::new().route(
            "/v1/satellites/25544",
            get(|| async {
                r#"{"name":"iss","latitude":-3.5,"longitude":171.25,"altitude":417.2,"velocity":27599.1,"units":"kilometers"}"#
            }),
        );
        let sample = fetch_from(serve(app).await).await.unwrap();
        assert_eq!(sample.latitude_deg, -3.5);
        assert_eq!(sample.longitude_deg, 171.25);
        assert_eq!(sample.altitude_km, 417.2);
        assert_eq!(sample.velocity_kph, 27599.1);
    }

    #[tokio::test]
    async fn server_error_is_a_network_failure() {
        let app = Router::new().route(
            "/v1/satellites/25544",
            get(|| async { (StatusCode::TOO_MANY_REQUESTS, "slow down") }),
        );
        let err = fetch_from(serve(app).await).await.unwrap_err();
        assert!(matches!(err, TelemetryError::Status(429)));
        assert_eq!(err.kind(), FailureKind::Network);
    }

    #[tokio::test]
    async fn garbage_body_is_a_parse_failure() {
        let app = Router::new().route("/v1/satellites/25544", get(|| async { "not json" }));
        let err = fetch_from(serve(app).await).await.unwrap_err();
        assert_eq!(err.kind(), FailureKind::Parse);
    }

    #[tokio::test]
    async fn unreachable_host_is_a_network_failure() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = fetch_from(format!("http://{}/v1/satellites/25544", addr))
            .await
            .unwrap_err();
        assert!(matches!(err, TelemetryError::Network(_)));
    }
}
