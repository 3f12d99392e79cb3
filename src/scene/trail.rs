use std::collections::VecDeque;

use super::position::ScenePosition;

pub const DEFAULT_TRAIL_CAPACITY: usize = 1024;

/// Past positions of the tracked object, oldest first. Once full, each push
/// evicts the oldest marker.
#[derive(Debug, Clone)]
pub struct MarkerTrail {
    markers: VecDeque<ScenePosition>,
    capacity: usize,
}

impl MarkerTrail {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            markers: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends unconditionally, duplicates included.
    pub fn push(&mut self, position: ScenePosition) {
        if self.markers.len() == self.capacity {
            self.markers.pop_front();
        }
        self.markers.push_back(position);
    }

    pub(crate) fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn to_vec(&self) -> Vec<ScenePosition> {
        self.markers.iter().copied().collect()
    }
}
