//! The costmap proper: a static prior fused with a stream of
//! observations into one cost grid.
//!
//! Construction normalizes the raw static bytes and runs one inflation
//! pass; the result is captured as the immutable static baseline. Each
//! call to [`Costmap::update_dynamic_obstacles`] reverts to that
//! baseline, traces every accepted ray, then re-inflates around the
//! newly-marked lethal cells, so the grid state is always a pure
//! function of the baseline and the latest observation batch.

use glam::{DVec2, UVec2};
use tracing::debug;

use crate::grid::{CellGrid, ChangeTracker};
use crate::inflation::InflationEngine;
use crate::observations::Observation;
use crate::raytrace::GridLine;
use crate::types::{
    CostmapConfig, CostmapError, MapInfo, COST_FREE, COST_INSCRIBED, COST_LETHAL, COST_UNKNOWN,
};

/// Cell-index rectangle, `[min, max)` on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub min: UVec2,
    pub max: UVec2,
}

impl CellRect {
    pub fn new(min: UVec2, max: UVec2) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.min.x && x < self.max.x && y >= self.min.y && y < self.max.y
    }
}

/// 2-D cost grid fusing a static prior map with dynamic observations.
#[derive(Debug, Clone)]
pub struct Costmap {
    grid: CellGrid,
    /// Inflated static baseline captured at construction.
    static_cost: Vec<u8>,
    engine: InflationEngine,
    min_z: f64,
    max_z: f64,
}

impl Costmap {
    /// Fuse an initial static map into a costmap.
    ///
    /// The input bytes are normalized: values at or above
    /// `config.threshold` become [`COST_LETHAL`], [`COST_UNKNOWN`] is
    /// kept, everything else passes through verbatim. Lethal cells then
    /// seed one inflation pass and the result becomes both the live grid
    /// and the static baseline.
    ///
    /// Fails if `static_data` does not match the declared dimensions.
    pub fn new(
        info: MapInfo,
        static_data: Vec<u8>,
        config: &CostmapConfig,
    ) -> Result<Self, CostmapError> {
        let mut grid = CellGrid::new(info, static_data)?;
        let engine = InflationEngine::new(config, grid.info().resolution);

        let mut seeds = Vec::new();
        for idx in 0..grid.info().len() {
            let value = grid.data()[idx];
            if value == COST_UNKNOWN {
                continue;
            }
            if value >= config.threshold {
                grid.data_mut()[idx] = COST_LETHAL;
                let (x, y) = grid.unindex(idx);
                seeds.push(UVec2::new(x, y));
            }
        }

        let mut tracker = ChangeTracker::new();
        engine.inflate(&mut grid, &seeds, &mut tracker);
        let static_cost = grid.data().to_vec();

        debug!(
            width = grid.width(),
            height = grid.height(),
            static_obstacles = seeds.len(),
            "built static costmap baseline"
        );

        Ok(Self {
            grid,
            static_cost,
            engine,
            min_z: config.min_z,
            max_z: config.max_z,
        })
    }

    pub fn info(&self) -> &MapInfo {
        self.grid.info()
    }

    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    pub fn resolution(&self) -> f64 {
        self.grid.info().resolution
    }

    /// Row-major index of a cell; the key used in changed-cell reports.
    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        self.grid.index(x, y)
    }

    /// Inverse of [`index`](Self::index).
    #[inline]
    pub fn unindex(&self, index: usize) -> (u32, u32) {
        self.grid.unindex(index)
    }

    pub fn world_to_cell(&self, world: DVec2) -> Option<UVec2> {
        self.grid.world_to_cell(world)
    }

    /// World coordinate of a cell center.
    pub fn cell_to_world(&self, cell: UVec2) -> DVec2 {
        self.grid.cell_to_world(cell)
    }

    /// Cost at a cell; out-of-range reads return [`COST_UNKNOWN`].
    pub fn get_cost(&self, x: u32, y: u32) -> u8 {
        self.grid.cost(x, y)
    }

    /// Write a cell; out-of-range writes are no-ops.
    pub fn set_cost(&mut self, x: u32, y: u32, value: u8) {
        self.grid.set(x, y, value);
    }

    /// Whether a robot of the configured inscribed radius is guaranteed
    /// to collide at this cell. Out-of-range cells read as unknown and
    /// report blocked.
    pub fn is_blocked(&self, x: u32, y: u32) -> bool {
        self.get_cost(x, y) >= COST_INSCRIBED
    }

    /// Indices of static obstacle cells (lethal or unknown in the
    /// baseline). Inflation halos top out at [`COST_INSCRIBED`] and are
    /// excluded, so this is exactly the set of input cells at or above
    /// the configured threshold.
    pub fn occupied_cell_indices(&self) -> Vec<usize> {
        self.static_cost
            .iter()
            .enumerate()
            .filter(|&(_, &value)| value >= COST_LETHAL)
            .map(|(index, _)| index)
            .collect()
    }

    /// Decay value at exactly the circumscribed radius; cells at or above
    /// it may put the footprint in collision.
    pub fn circumscribed_cost_lower_bound(&self) -> u8 {
        self.engine.circumscribed_cost_lower_bound()
    }

    /// Live cost bytes, row-major.
    pub fn data(&self) -> &[u8] {
        self.grid.data()
    }

    /// Static baseline bytes, row-major.
    pub fn static_data(&self) -> &[u8] {
        &self.static_cost
    }

    /// Full copy for the copy-on-read discipline: take the snapshot
    /// under a short-held lock, release, then plan against the copy.
    pub fn snapshot(&self) -> Costmap {
        self.clone()
    }

    /// Apply one batch of observations and return the sorted indices of
    /// every cell whose cost actually changed.
    ///
    /// The cycle: revert to the static baseline, trace a clearing ray
    /// from each observation origin to each accepted point, mark the
    /// terminal cells lethal, then run one inflation pass seeded from
    /// those cells. Points outside the `[min_z, max_z]` acceptance
    /// window carry no evidence and are ignored; points off the map are
    /// dropped silently. A cell rewritten to its pre-call value is never
    /// reported.
    pub fn update_dynamic_obstacles(&mut self, observations: &[Observation]) -> Vec<usize> {
        let mut tracker = ChangeTracker::new();

        // Revert the dynamic layer so this update is a pure function of
        // the baseline and the batch.
        {
            let data = self.grid.data_mut();
            for (idx, &baseline) in self.static_cost.iter().enumerate() {
                if data[idx] != baseline {
                    tracker.note(idx, data[idx]);
                    data[idx] = baseline;
                }
            }
        }

        let mut seeds: Vec<UVec2> = Vec::new();
        let mut filtered = 0usize;
        let mut dropped = 0usize;

        for observation in observations {
            let origin_cell = self.grid.world_to_cell(observation.origin.truncate());
            for point in &observation.cloud {
                if point.z < self.min_z || point.z > self.max_z {
                    filtered += 1;
                    continue;
                }
                let Some(target) = self.grid.world_to_cell(point.truncate()) else {
                    dropped += 1;
                    continue;
                };

                if let Some(origin) = origin_cell {
                    self.clear_ray(origin, target, &mut tracker);
                }

                let idx = self.grid.index(target.x, target.y);
                let current = self.grid.data()[idx];
                if current != COST_LETHAL {
                    tracker.note(idx, current);
                    self.grid.data_mut()[idx] = COST_LETHAL;
                }
                seeds.push(target);
            }
        }

        self.engine.inflate(&mut self.grid, &seeds, &mut tracker);

        let changed = tracker.into_changed(self.grid.data());
        debug!(
            observations = observations.len(),
            marked = seeds.len(),
            filtered,
            dropped,
            changed = changed.len(),
            "applied dynamic obstacle update"
        );
        changed
    }

    /// Clear intermediate cells along one ray, terminal excluded.
    ///
    /// A cell is freed only when its current cost is below
    /// [`COST_INSCRIBED`]: lethal cells, inscribed safety margins of
    /// obstacles the ray merely passed near, and unknown cells all stay.
    fn clear_ray(&mut self, origin: UVec2, target: UVec2, tracker: &mut ChangeTracker) {
        for cell in GridLine::new(origin, target) {
            if cell == target {
                break;
            }
            let idx = self.grid.index(cell.x, cell.y);
            let current = self.grid.data()[idx];
            if current != COST_FREE && current < COST_INSCRIBED {
                tracker.note(idx, current);
                self.grid.data_mut()[idx] = COST_FREE;
            }
        }
    }

    /// Copy the static baseline back over the live grid, everywhere or
    /// everywhere **outside** `window`.
    ///
    /// Cells inside the window are untouched, so inflation there from
    /// obstacles still within propagation radius survives the revert and
    /// no false safe corridor opens around the robot between sensor
    /// cycles.
    pub fn revert_to_static(&mut self, window: Option<CellRect>) {
        match window {
            None => self.grid.data_mut().copy_from_slice(&self.static_cost),
            Some(rect) => {
                let width = self.grid.width();
                let height = self.grid.height();
                let data = self.grid.data_mut();
                for y in 0..height {
                    for x in 0..width {
                        if rect.contains(x, y) {
                            continue;
                        }
                        let idx = (y as usize) * (width as usize) + (x as usize);
                        data[idx] = self.static_cost[idx];
                    }
                }
            }
        }
    }
}
