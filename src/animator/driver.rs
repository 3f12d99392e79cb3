use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval, Instant, MissedTickBehavior};

use crate::scene::{SceneGraph, SceneSnapshot};
use crate::tracker::{TargetStore, Targets};

use super::animator::{AnimationSettings, FrameAnimator};

pub const DEFAULT_FPS: u32 = 60;

/// Animator plus the headless objects it moves.
pub struct Stage {
    pub animator: FrameAnimator,
    pub scene: SceneGraph,
    frames: u64,
}

pub type SharedStage = Arc<StdMutex<Stage>>;

impl Stage {
    pub fn new(settings: AnimationSettings, scene: SceneGraph) -> Self {
        Self {
            animator: FrameAnimator::new(settings),
            scene,
            frames: 0,
        }
    }

    pub fn shared(self) -> SharedStage {
        Arc::new(StdMutex::new(self))
    }

    pub fn advance(&mut self, dt: f64, targets: &Targets) {
        let Stage {
            animator, scene, ..
        } = self;
        animator.step(
            dt,
            targets,
            scene.model.as_mut(),
            &mut scene.camera,
            &mut scene.label,
        );
        self.frames += 1;
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        self.scene.snapshot()
    }
}

#[derive(Debug)]
struct WorkerHandle {
    stop_tx: oneshot::Sender<()>,
    join: JoinHandle<()>,
}

/// Stands in for a renderer's frame scheduler: calls the animator at a fixed
/// rate with the measured frame time.
pub struct FrameDriver {
    stage: SharedStage,
    store: TargetStore,
    fps: u32,
    worker: Option<WorkerHandle>,
}

impl FrameDriver {
    pub fn new(stage: SharedStage, store: TargetStore, fps: u32) -> Self {
        Self {
            stage,
            store,
            fps: fps.max(1),
            worker: None,
        }
    }

    pub fn start(&mut self) {
        if self.worker.is_some() {
            return;
        }

        let (stop_tx, stop_rx) = oneshot::channel();
        let join = tokio::spawn(run_frame_loop(
            self.stage.clone(),
            self.store.clone(),
            Duration::from_secs_f64(1.0 / self.fps as f64),
            stop_rx,
        ));
        self.worker = Some(WorkerHandle { stop_tx, join });
        log::info!("Frame loop started at {} fps", self.fps);
    }

    pub async fn stop(&mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = worker.stop_tx.send(());
            let _ = worker.join.await;
            log::info!("Frame loop stopped");
        }
    }
}

async fn run_frame_loop(
    stage: SharedStage,
    store: TargetStore,
    frame: Duration,
    mut stop_rx: oneshot::Receiver<()>,
) {
    let mut ticker = interval(frame);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut last = Instant::now();

    loop {
        let should_stop = tokio::select! {
            _ = ticker.tick() => false,
            _ = &mut stop_rx => true,
        };
        if should_stop {
            return;
        }

        let now = Instant::now();
        let dt = now.duration_since(last).as_secs_f64();
        last = now;

        let targets = store.current();
        stage.lock().unwrap().advance(dt, &targets);
    }
}
