use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use crate::telemetry::{Fetch, TelemetryError};

use super::error::PollerError;
use super::targets::{PollerState, TargetStore, Targets};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(20);

#[derive(Debug)]
struct WorkerHandle {
    stop_tx: oneshot::Sender<()>,
    join: JoinHandle<()>,
}

/// Fetches a fix on every tick and publishes it into the store.
pub struct Poller<F: Fetch> {
    fetcher: Arc<F>,
    store: TargetStore,
    period: Duration,
    worker: Option<WorkerHandle>,
}

impl<F: Fetch> Poller<F> {
    pub fn new(fetcher: F, store: TargetStore, period: Duration) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            store,
            period,
            worker: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }

    pub fn start(&mut self) -> Result<(), PollerError> {
        if self.worker.is_some() {
            return Err(PollerError::AlreadyRunning);
        }

        let fetcher = self.fetcher.clone();
        let store = self.store.clone();
        let period = self.period;
        let (stop_tx, stop_rx) = oneshot::channel();

        let join = tokio::spawn(run_poll_loop(fetcher, store, period, stop_rx));
        self.worker = Some(WorkerHandle { stop_tx, join });

        log::info!("Telemetry poller started (every {:?})", self.period);
        Ok(())
    }

    pub async fn stop(&mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = worker.stop_tx.send(());
            let _ = worker.join.await;
            log::info!("Telemetry poller stopped");
        }
        self.store.set_state(PollerState::Idle);
    }
}

/// One tick: fetch off the async threads, publish on success. Failures are
/// logged and leave the store untouched.
pub async fn poll_once<F: Fetch>(
    fetcher: &Arc<F>,
    store: &TargetStore,
) -> Result<Arc<Targets>, TelemetryError> {
    store.set_state(PollerState::Fetching);

    let task_fetcher = fetcher.clone();
    let result = tokio::task::spawn_blocking(move || task_fetcher.fetch())
        .await
        .unwrap_or_else(|e| Err(TelemetryError::Network(format!("fetch task failed: {}", e))));

    store.set_state(PollerState::Idle);

    match result {
        Ok(sample) => {
            log::debug!(
                "Telemetry fix lat={:.4} lon={:.4} alt={:.1}km vel={:.0}km/h",
                sample.latitude_deg,
                sample.longitude_deg,
                sample.altitude_km,
                sample.velocity_kph
            );
            Ok(store.publish(sample))
        }
        Err(e) => {
            log::warn!("Dropping telemetry poll ({:?} failure): {}", e.kind(), e);
            Err(e)
        }
    }
}

async fn run_poll_loop<F: Fetch>(
    fetcher: Arc<F>,
    store: TargetStore,
    period: Duration,
    mut stop_rx: oneshot::Receiver<()>,
) {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        let should_stop = tokio::select! {
            _ = ticker.tick() => false,
            _ = &mut stop_rx => true,
        };
        if should_stop {
            return;
        }

        // A hung fetch must not hold up teardown; its blocking task is left
        // to finish on its own and its result is dropped.
        let should_stop = tokio::select! {
            _ = poll_once(&fetcher, &store) => false,
            _ = &mut stop_rx => true,
        };
        if should_stop {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use crate::scene::{Mapper, ScenePosition};
    use crate::telemetry::TelemetrySample;

    /// Replays scripted results, then keeps failing.
    struct ScriptedFetcher {
        script: Mutex<Vec<Result<TelemetrySample, TelemetryError>>>,
        calls: AtomicUsize,
    }

    impl ScriptedFetcher {
        fn new(mut script: Vec<Result<TelemetrySample, TelemetryError>>) -> Self {
            script.reverse();
            Self {
                script: Mutex::new(script),
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl Fetch for ScriptedFetcher {
        fn fetch(&self) -> Result<TelemetrySample, TelemetryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.script
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Err(TelemetryError::Network("connection refused".into())))
        }
    }

    struct SteadyFetcher;

    impl Fetch for SteadyFetcher {
        fn fetch(&self) -> Result<TelemetrySample, TelemetryError> {
            Ok(sample(12.0, 34.0))
        }
    }

    fn sample(lat: f64, lon: f64) -> TelemetrySample {
        TelemetrySample {
            latitude_deg: lat,
            longitude_deg: lon,
            altitude_km: 418.0,
            velocity_kph: 27_580.0,
            observed_at: Utc::now(),
        }
    }

    fn store() -> TargetStore {
        TargetStore::new(
            Mapper::new(100.0, 120.0),
            Targets::initial(
                ScenePosition::new(0.0, 70.0, 0.0),
                ScenePosition::new(0.0, 200.0, 0.0),
            ),
            64,
        )
    }

    #[tokio::test]
    async fn successful_poll_publishes_and_marks() {
        let store = store();
        let fetcher = Arc::new(ScriptedFetcher::new(vec![Ok(sample(0.0, 0.0))]));

        let targets = poll_once(&fetcher, &store).await.unwrap();

        assert!((targets.object.x - 100.0).abs() < 1e-9);
        assert_eq!(store.current().sample, targets.sample);
        assert_eq!(store.trail_len(), 1);
        assert_eq!(store.status().state, PollerState::Idle);
    }

    #[tokio::test]
    async fn failed_poll_keeps_previous_fix_and_trail() {
        let store = store();
        let fetcher = Arc::new(ScriptedFetcher::new(vec![
            Ok(sample(45.0, 90.0)),
            Err(TelemetryError::Network("dns failure".into())),
            Err(TelemetryError::Status(503)),
            Err(TelemetryError::Parse(
                serde_json::from_str::<serde_json::Value>("{").unwrap_err(),
            )),
        ]));

        poll_once(&fetcher, &store).await.unwrap();
        let before = store.current();

        for _ in 0..3 {
            assert!(poll_once(&fetcher, &store).await.is_err());
        }

        let after = store.current();
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 4);
        assert!(Arc::ptr_eq(&before, &after));
        assert_eq!(after.sample.as_ref().unwrap().latitude_deg, 45.0);
        assert_eq!(store.trail_len(), 1);
        assert_eq!(store.status().state, PollerState::Idle);
    }

    #[tokio::test]
    async fn failure_before_first_fix_keeps_initial_targets() {
        let store = store();
        let fetcher = Arc::new(ScriptedFetcher::new(vec![]));

        assert!(poll_once(&fetcher, &store).await.is_err());

        let current = store.current();
        assert!(current.sample.is_none());
        assert_eq!(current.object, ScenePosition::new(0.0, 70.0, 0.0));
        assert_eq!(store.trail_len(), 0);
    }

    #[tokio::test]
    async fn start_twice_is_rejected() {
        let mut poller = Poller::new(SteadyFetcher, store(), Duration::from_secs(60));
        poller.start().unwrap();
        assert!(matches!(poller.start(), Err(PollerError::AlreadyRunning)));
        poller.stop().await;
        assert!(!poller.is_running());
    }

    #[tokio::test]
    async fn loop_polls_immediately_and_on_every_tick() {
        let store = store();
        let mut rx = store.subscribe();
        let mut poller = Poller::new(SteadyFetcher, store.clone(), Duration::from_millis(20));
        poller.start().unwrap();

        for _ in 0..3 {
            tokio::time::timeout(Duration::from_secs(5), rx.changed())
                .await
                .expect("poll did not publish in time")
                .unwrap();
        }
        poller.stop().await;

        assert!(store.trail_len() >= 3);
        let settled = store.trail_len();
        tokio::time::sleep(Duration::from_millis(80)).await;
        assert_eq!(store.trail_len(), settled);
    }

    #[tokio::test]
    async fn subscriber_taken_before_start_sees_the_first_fix() {
        let store = store();
        let mut early = store.subscribe();
        let mut poller = Poller::new(
            ScriptedFetcher::new(vec![Ok(sample(28.5, -80.6))]),
            store.clone(),
            Duration::from_secs(60),
        );
        poller.start().unwrap();

        tokio::time::timeout(Duration::from_secs(5), early.changed())
            .await
            .expect("first fix was not observed")
            .unwrap();
        let seen = early.borrow_and_update().clone();
        assert_eq!(seen.sample.as_ref().unwrap().latitude_deg, 28.5);

        // a receiver taken after the publish never hears about it
        let late = store.subscribe();
        assert!(!late.has_changed().unwrap());
        poller.stop().await;
    }
}
