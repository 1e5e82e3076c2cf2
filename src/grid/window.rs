//! Bounded local-window accessor.
//!
//! A read-only, coordinate-remapping view over a sub-rectangle of the
//! full grid, recentered as the robot moves. Never owns cells; local
//! `(0, 0)` always maps to the window's current lower-left corner.

use glam::{DVec2, UVec2};

use crate::grid::Costmap;
use crate::inflation::radius_to_cells;
use crate::types::{COST_INSCRIBED, COST_UNKNOWN};

#[derive(Debug)]
pub struct WindowView<'a> {
    map: &'a Costmap,
    /// Lower-left cell of the window in full-grid coordinates.
    min: UVec2,
    size: UVec2,
}

impl<'a> WindowView<'a> {
    /// A window of `radius_m` around the grid center, clipped to the
    /// grid's bounds. Recenter with
    /// [`update_for_robot_position`](Self::update_for_robot_position).
    pub fn new(map: &'a Costmap, radius_m: f64) -> Self {
        let radius_cells = radius_to_cells(radius_m, map.resolution());
        let size = UVec2::new(
            (2 * radius_cells + 1).min(map.width()),
            (2 * radius_cells + 1).min(map.height()),
        );
        let center = UVec2::new(map.width() / 2, map.height() / 2);
        let min = clamp_min(center, size, map.width(), map.height());
        Self { map, min, size }
    }

    pub fn width(&self) -> u32 {
        self.size.x
    }

    pub fn height(&self) -> u32 {
        self.size.y
    }

    /// Lower-left **corner** of the window in world coordinates.
    pub fn origin(&self) -> DVec2 {
        let info = self.map.info();
        info.origin
            + DVec2::new(
                self.min.x as f64 * info.resolution,
                self.min.y as f64 * info.resolution,
            )
    }

    /// Recenter the window on the robot.
    ///
    /// The window is clamped so it never extends past the full grid's
    /// bounds. A position outside the grid is ignored: the previous
    /// valid center is kept and the window never shifts off-map.
    pub fn update_for_robot_position(&mut self, wx: f64, wy: f64) {
        let Some(center) = self.map.world_to_cell(DVec2::new(wx, wy)) else {
            return;
        };
        self.min = clamp_min(center, self.size, self.map.width(), self.map.height());
    }

    /// Cost at window-local coordinates; reads outside the window return
    /// [`COST_UNKNOWN`].
    pub fn get_cost(&self, x: u32, y: u32) -> u8 {
        if x >= self.size.x || y >= self.size.y {
            return COST_UNKNOWN;
        }
        self.map.get_cost(self.min.x + x, self.min.y + y)
    }

    pub fn is_blocked(&self, x: u32, y: u32) -> bool {
        self.get_cost(x, y) >= COST_INSCRIBED
    }

    /// World coordinate of the center of a window-local cell.
    pub fn cell_to_world(&self, cell: UVec2) -> DVec2 {
        self.map.cell_to_world(self.min + cell)
    }

    /// Window-local cell containing a world coordinate, `None` outside
    /// the window.
    pub fn world_to_cell(&self, world: DVec2) -> Option<UVec2> {
        let cell = self.map.world_to_cell(world)?;
        if cell.x < self.min.x
            || cell.y < self.min.y
            || cell.x >= self.min.x + self.size.x
            || cell.y >= self.min.y + self.size.y
        {
            return None;
        }
        Some(cell - self.min)
    }
}

/// Clamp the window's lower-left cell so `[min, min + size)` stays inside
/// the grid.
fn clamp_min(center: UVec2, size: UVec2, width: u32, height: u32) -> UVec2 {
    let half = size / 2;
    UVec2::new(
        center.x.saturating_sub(half.x).min(width - size.x),
        center.y.saturating_sub(half.y).min(height - size.y),
    )
}
