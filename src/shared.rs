//! Explicit-ownership handle for cross-context use.
//!
//! One owner constructs the [`Costmap`] and hands out clones of this
//! handle instead of any process-wide global. The discipline is
//! copy-on-read, not lock-for-duration: producers apply a whole update
//! cycle under one short write lock, consumers take a full snapshot
//! under a short read lock and release it before doing any
//! unbounded-duration planning work. A reader can therefore never
//! observe a half-ray-traced, not-yet-inflated grid, and the producer
//! never blocks on a planner.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::grid::{CellRect, Costmap};
use crate::observations::Observation;

#[derive(Clone)]
pub struct SharedCostmap {
    inner: Arc<RwLock<Costmap>>,
}

impl SharedCostmap {
    pub fn new(map: Costmap) -> Self {
        Self {
            inner: Arc::new(RwLock::new(map)),
        }
    }

    /// Apply one observation batch atomically with respect to
    /// snapshot-takers.
    pub fn update_dynamic_obstacles(&self, observations: &[Observation]) -> Vec<usize> {
        self.inner.write().update_dynamic_obstacles(observations)
    }

    /// Revert to the static baseline, everywhere or outside `window`.
    pub fn revert_to_static(&self, window: Option<CellRect>) {
        self.inner.write().revert_to_static(window)
    }

    /// Full copy of the current grid. The lock is released before this
    /// returns; plan against the copy for as long as needed.
    pub fn snapshot(&self) -> Costmap {
        self.inner.read().snapshot()
    }

    /// Point query without a snapshot, for cheap safety checks.
    pub fn get_cost(&self, x: u32, y: u32) -> u8 {
        self.inner.read().get_cost(x, y)
    }

    pub fn is_blocked(&self, x: u32, y: u32) -> bool {
        self.inner.read().is_blocked(x, y)
    }
}
