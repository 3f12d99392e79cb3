use crate::animator::SharedStage;
use crate::tracker::TargetStore;

#[derive(Clone)]
pub struct AppState {
    pub store: TargetStore,
    pub stage: SharedStage,
}
