use thiserror::Error;

#[derive(Debug, Error)]
pub enum PollerError {
    #[error("poller already running")]
    AlreadyRunning,
}
