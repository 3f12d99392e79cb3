use std::sync::{Arc, Mutex as StdMutex};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::watch;

use crate::scene::{Mapper, MarkerTrail, ScenePosition};
use crate::telemetry::TelemetrySample;

/// Everything the animator steers toward, published as one value.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct Targets {
    pub sample: Option<TelemetrySample>,
    pub object: ScenePosition,
    pub camera: ScenePosition,
}

impl Targets {
    pub fn initial(object: ScenePosition, camera: ScenePosition) -> Self {
        Self {
            sample: None,
            object,
            camera,
        }
    }

    pub fn from_sample(mapper: &Mapper, sample: TelemetrySample) -> Self {
        Self {
            object: mapper.object(&sample),
            camera: mapper.camera(&sample),
            sample: Some(sample),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub enum PollerState {
    Idle,
    Fetching,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct PollerStatus {
    pub state: PollerState,
    pub last_success: Option<DateTime<Utc>>,
}

#[derive(Debug)]
struct Shared {
    trail: MarkerTrail,
    status: PollerStatus,
}

/// Shared holder between the poller (writer) and the frame loop and API
/// (readers). Targets are swapped as a whole `Arc`, never edited in place.
#[derive(Clone)]
pub struct TargetStore {
    mapper: Mapper,
    targets: Arc<watch::Sender<Arc<Targets>>>,
    shared: Arc<StdMutex<Shared>>,
}

impl TargetStore {
    pub fn new(mapper: Mapper, initial: Targets, trail_capacity: usize) -> Self {
        let (tx, _rx) = watch::channel(Arc::new(initial));
        Self {
            mapper,
            targets: Arc::new(tx),
            shared: Arc::new(StdMutex::new(Shared {
                trail: MarkerTrail::with_capacity(trail_capacity),
                status: PollerStatus {
                    state: PollerState::Idle,
                    last_success: None,
                },
            })),
        }
    }

    /// Latest published targets.
    pub fn current(&self) -> Arc<Targets> {
        self.targets.borrow().clone()
    }

    pub fn latest_sample(&self) -> Option<TelemetrySample> {
        self.targets.borrow().sample.clone()
    }

    /// Receiver notified on every publish.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Targets>> {
        self.targets.subscribe()
    }

    /// Map a fresh sample, replace the targets and drop a marker.
    pub fn publish(&self, sample: TelemetrySample) -> Arc<Targets> {
        let observed_at = sample.observed_at;
        let targets = Arc::new(Targets::from_sample(&self.mapper, sample));

        let mut locked = self.shared.lock().unwrap();
        locked.trail.push(targets.object);
        locked.status.last_success = Some(observed_at);
        self.targets.send_replace(targets.clone());

        targets
    }

    pub fn trail(&self) -> Vec<ScenePosition> {
        self.shared.lock().unwrap().trail.to_vec()
    }

    pub fn trail_len(&self) -> usize {
        self.shared.lock().unwrap().trail.len()
    }

    pub fn status(&self) -> PollerStatus {
        self.shared.lock().unwrap().status.clone()
    }

    pub(super) fn set_state(&self, state: PollerState) {
        self.shared.lock().unwrap().status.state = state;
    }
}
