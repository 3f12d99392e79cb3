mod error;
mod poller;
mod targets;

pub use error::PollerError;
pub use poller::{poll_once, Poller, DEFAULT_POLL_INTERVAL};
pub use targets::{PollerState, PollerStatus, TargetStore, Targets};
