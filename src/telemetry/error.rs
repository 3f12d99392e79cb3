use thiserror::Error;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected http status: {0}")]
    Status(u16),
    #[error("invalid telemetry payload: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Coarse failure classes. Both are handled the same way by the poller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Network,
    Parse,
}

impl TelemetryError {
    pub fn kind(&self) -> FailureKind {
        match self {
            TelemetryError::Network(_) | TelemetryError::Status(_) => FailureKind::Network,
            TelemetryError::Parse(_) => FailureKind::Parse,
        }
    }
}

impl From<ureq::Error> for TelemetryError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(code, _) => TelemetryError::Status(code),
            ureq::Error::Transport(t) => TelemetryError::Network(t.to_string()),
        }
    }
}
