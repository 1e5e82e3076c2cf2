//! Bounds-checked flat storage for cost bytes.
//!
//! Every call site gets panic-free, checked indexing; out-of-range reads
//! and writes degrade to sentinels and no-ops so noisy sensor data near
//! the map edge cannot crash the control loop.

use glam::{DVec2, UVec2};

use crate::types::{CostmapError, MapInfo, COST_UNKNOWN};

/// Row-major grid of cost bytes with world/cell coordinate conversion.
#[derive(Debug, Clone)]
pub struct CellGrid {
    info: MapInfo,
    data: Vec<u8>,
}

impl CellGrid {
    /// Build from existing data. Fails if the data length does not match
    /// the declared dimensions; a mismatched static map is never truncated.
    pub fn new(info: MapInfo, data: Vec<u8>) -> Result<Self, CostmapError> {
        if data.len() != info.len() {
            return Err(CostmapError::InvalidMapData(format!(
                "data length {} does not match map size {}x{} = {}",
                data.len(),
                info.width,
                info.height,
                info.len()
            )));
        }
        Ok(Self { info, data })
    }

    /// Build a grid with every cell set to `value`.
    pub fn filled(info: MapInfo, value: u8) -> Self {
        let data = vec![value; info.len()];
        Self { info, data }
    }

    pub fn info(&self) -> &MapInfo {
        &self.info
    }

    pub fn width(&self) -> u32 {
        self.info.width
    }

    pub fn height(&self) -> u32 {
        self.info.height
    }

    /// Row-major index of a cell. Bijective with [`unindex`](Self::unindex)
    /// over the valid range; used as the key for changed-cell reporting.
    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.info.width as usize) + (x as usize)
    }

    /// Inverse of [`index`](Self::index).
    #[inline]
    pub fn unindex(&self, index: usize) -> (u32, u32) {
        let width = self.info.width as usize;
        ((index % width) as u32, (index / width) as u32)
    }

    #[inline]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.info.width && y < self.info.height
    }

    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if !self.contains(x, y) {
            return None;
        }
        Some(self.data[self.index(x, y)])
    }

    /// Cost at a cell; out-of-range reads return [`COST_UNKNOWN`] since
    /// planners routinely probe near map edges.
    #[inline]
    pub fn cost(&self, x: u32, y: u32) -> u8 {
        self.get(x, y).unwrap_or(COST_UNKNOWN)
    }

    /// Write a cell. Returns whether the write landed; out-of-range
    /// writes are no-ops.
    pub fn set(&mut self, x: u32, y: u32, value: u8) -> bool {
        if !self.contains(x, y) {
            return false;
        }
        let idx = self.index(x, y);
        self.data[idx] = value;
        true
    }

    /// Convert a world coordinate to the containing cell.
    ///
    /// Integer floor division by the resolution; returns `None` for
    /// coordinates outside the grid instead of wrapping.
    pub fn world_to_cell(&self, world: DVec2) -> Option<UVec2> {
        let local = (world - self.info.origin) / self.info.resolution;
        if local.x < 0.0
            || local.y < 0.0
            || local.x >= self.info.width as f64
            || local.y >= self.info.height as f64
        {
            return None;
        }
        Some(UVec2::new(local.x as u32, local.y as u32))
    }

    /// World coordinate of the **center** of a cell, not its corner.
    /// Downstream planners assume center semantics.
    pub fn cell_to_world(&self, cell: UVec2) -> DVec2 {
        self.info.origin
            + DVec2::new(
                (cell.x as f64 + 0.5) * self.info.resolution,
                (cell.y as f64 + 0.5) * self.info.resolution,
            )
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}
