mod error;
mod fetcher;
mod sample;

pub use error::{FailureKind, TelemetryError};
pub use fetcher::{Fetch, HttpFetcher, DEFAULT_ENDPOINT};
pub use sample::{parse_sample, TelemetrySample};
