//! Obstacle inflation: bounded wavefront propagation of decayed cost.
//!
//! Newly-marked lethal cells seed a min-distance priority queue; the
//! wavefront expands 4-connected neighbors out to the inflation radius,
//! writing the decay cost of the nearest seed into each cell. The queue
//! is an owned [`BinaryHeap`] of value types ordered by
//! `(distance, insertion_sequence)`, which keeps tie-breaking
//! deterministic without any pointer juggling.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use glam::UVec2;

use crate::grid::{CellGrid, ChangeTracker};
use crate::types::{CostmapConfig, COST_INSCRIBED};

/// Convert a radius in world units (meters) to a cell count.
///
/// Returns `ceil(radius / resolution)`; zero if either input is
/// non-positive.
#[inline]
pub fn radius_to_cells(radius_m: f64, resolution: f64) -> u32 {
    if resolution <= 0.0 || radius_m <= 0.0 {
        return 0;
    }
    (radius_m / resolution).ceil() as u32
}

/// One entry in the inflation wavefront queue.
///
/// Ephemeral: owned solely by the working heap for the duration of one
/// inflation pass. Ordered by ascending distance, ties broken by
/// insertion order.
#[derive(Debug, Clone, Copy)]
pub struct QueueElement {
    pub distance: f64,
    pub x: u32,
    pub y: u32,
    /// Seed cell this wavefront branch originated from.
    src: UVec2,
    seq: u64,
}

impl PartialEq for QueueElement {
    fn eq(&self, other: &Self) -> bool {
        self.distance == other.distance && self.seq == other.seq
    }
}

impl Eq for QueueElement {}

impl Ord for QueueElement {
    // Inverted: BinaryHeap is a max-heap, so pop() yields the nearest
    // element first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for QueueElement {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Precomputed distance/cost kernel over one quadrant of the inflation
/// disc, indexed by `(dx, dy)` offsets from the seed.
#[derive(Debug, Clone)]
struct CostKernel {
    side: u32,
    distances: Vec<f64>,
    costs: Vec<u8>,
}

impl CostKernel {
    fn build(radius_cells: u32, inscribed_cells: f64, weight: f64) -> Self {
        let side = radius_cells + 1;
        let mut distances = Vec::with_capacity((side as usize) * (side as usize));
        let mut costs = Vec::with_capacity(distances.capacity());
        for dy in 0..side {
            for dx in 0..side {
                let d = cell_distance(dx, dy);
                distances.push(d);
                costs.push(decay_cost(d, inscribed_cells, weight));
            }
        }
        Self {
            side,
            distances,
            costs,
        }
    }

    #[inline]
    fn distance(&self, dx: u32, dy: u32) -> f64 {
        self.distances[(dy * self.side + dx) as usize]
    }

    #[inline]
    fn cost(&self, dx: u32, dy: u32) -> u8 {
        self.costs[(dy * self.side + dx) as usize]
    }
}

/// Exact distance in cells between two cells offset by `(dx, dy)`.
///
/// The two grid axes use the exact integer cell count rather than the
/// float hypotenuse, keeping numeric parity with the historical
/// closed-form identity for axis cells.
#[inline]
fn cell_distance(dx: u32, dy: u32) -> f64 {
    if dx == 0 {
        dy as f64
    } else if dy == 0 {
        dx as f64
    } else {
        ((dx as f64) * (dx as f64) + (dy as f64) * (dy as f64)).sqrt()
    }
}

/// Inflation decay: `COST_INSCRIBED` within the inscribed radius, then
/// `round((COST_INSCRIBED - 1) * weight / (1 + (d - inscribed)^2))`.
#[inline]
fn decay_cost(distance_cells: f64, inscribed_cells: f64, weight: f64) -> u8 {
    if distance_cells <= inscribed_cells {
        return COST_INSCRIBED;
    }
    let delta = distance_cells - inscribed_cells;
    let value = ((COST_INSCRIBED - 1) as f64 * weight / (1.0 + delta * delta)).round();
    value.clamp(0.0, (COST_INSCRIBED - 1) as f64) as u8
}

/// Bounded wavefront cost propagation around lethal cells.
#[derive(Debug, Clone)]
pub struct InflationEngine {
    radius_cells: u32,
    inscribed_cells: f64,
    circumscribed_cells: f64,
    weight: f64,
    kernel: Option<CostKernel>,
}

impl InflationEngine {
    /// Build an engine for a grid of the given resolution.
    ///
    /// A zero inflation radius disables the engine entirely; this is a
    /// valid configuration, not an error. The kernel table is capped by
    /// the configured world-size bounds.
    pub fn new(config: &CostmapConfig, resolution: f64) -> Self {
        let world_cap = radius_to_cells(config.max_world_x_m.max(config.max_world_y_m), resolution);
        let radius_cells = radius_to_cells(config.inflation_radius_m, resolution).min(world_cap);
        let inscribed_cells = (config.inscribed_radius_m / resolution).max(0.0);
        let circumscribed_cells = (config.circumscribed_radius_m / resolution).max(0.0);
        let kernel = (radius_cells > 0).then(|| {
            CostKernel::build(radius_cells, inscribed_cells, config.weight)
        });
        Self {
            radius_cells,
            inscribed_cells,
            circumscribed_cells,
            weight: config.weight,
            kernel,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.kernel.is_some()
    }

    pub fn radius_cells(&self) -> u32 {
        self.radius_cells
    }

    /// Decay cost for a distance in cells.
    pub fn compute_cost(&self, distance_cells: f64) -> u8 {
        decay_cost(distance_cells, self.inscribed_cells, self.weight)
    }

    /// Decay value at exactly the circumscribed radius.
    ///
    /// Any cell at or above this cost may put the robot footprint in
    /// collision, so planners can use it as a cheap pre-filter before a
    /// full footprint check.
    pub fn circumscribed_cost_lower_bound(&self) -> u8 {
        self.compute_cost(self.circumscribed_cells)
    }

    /// Propagate cost outward from `seeds` (newly-marked lethal cells).
    ///
    /// A cell's cost is raised only when the candidate is strictly
    /// greater than its current value: a cell influenced by two
    /// obstacles keeps the larger, nearer-obstacle cost, and unknown
    /// cells are never overwritten. Cells are closed at their first
    /// (shortest-distance) expansion and never revisited.
    pub(crate) fn inflate(
        &self,
        grid: &mut CellGrid,
        seeds: &[UVec2],
        tracker: &mut ChangeTracker,
    ) {
        let Some(kernel) = &self.kernel else {
            return;
        };

        let width = grid.width();
        let height = grid.height();
        let mut closed = vec![false; grid.info().len()];
        let mut heap: BinaryHeap<QueueElement> = BinaryHeap::with_capacity(seeds.len() * 4);
        let mut seq: u64 = 0;

        for &seed in seeds {
            if seed.x >= width || seed.y >= height {
                continue;
            }
            heap.push(QueueElement {
                distance: 0.0,
                x: seed.x,
                y: seed.y,
                src: seed,
                seq,
            });
            seq += 1;
        }

        while let Some(element) = heap.pop() {
            let idx = grid.index(element.x, element.y);
            if closed[idx] {
                continue;
            }
            closed[idx] = true;

            for (nx, ny) in neighbors4(element.x, element.y, width, height) {
                let dx = nx.abs_diff(element.src.x);
                let dy = ny.abs_diff(element.src.y);
                if dx > self.radius_cells || dy > self.radius_cells {
                    continue;
                }
                let distance = kernel.distance(dx, dy);
                if distance > self.radius_cells as f64 {
                    continue;
                }

                let nidx = grid.index(nx, ny);
                if closed[nidx] {
                    continue;
                }
                let candidate = kernel.cost(dx, dy);
                let current = grid.data()[nidx];
                if candidate > current {
                    tracker.note(nidx, current);
                    grid.data_mut()[nidx] = candidate;
                    heap.push(QueueElement {
                        distance,
                        x: nx,
                        y: ny,
                        src: element.src,
                        seq,
                    });
                    seq += 1;
                }
            }
        }
    }
}

#[inline]
fn neighbors4(x: u32, y: u32, width: u32, height: u32) -> impl Iterator<Item = (u32, u32)> {
    let mut out = [(0u32, 0u32); 4];
    let mut n = 0;
    if x > 0 {
        out[n] = (x - 1, y);
        n += 1;
    }
    if x + 1 < width {
        out[n] = (x + 1, y);
        n += 1;
    }
    if y > 0 {
        out[n] = (x, y - 1);
        n += 1;
    }
    if y + 1 < height {
        out[n] = (x, y + 1);
        n += 1;
    }
    out.into_iter().take(n)
}
