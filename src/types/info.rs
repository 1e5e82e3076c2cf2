//! Map metadata.

use glam::DVec2;

#[derive(Debug, Clone, PartialEq)]
pub struct MapInfo {
    pub width: u32,
    pub height: u32,
    /// Cell size in meters.
    pub resolution: f64,
    /// World coordinate of the lower-left corner of cell (0, 0) in meters.
    pub origin: DVec2,
}

impl Default for MapInfo {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            resolution: 0.05,
            origin: DVec2::ZERO,
        }
    }
}

impl MapInfo {
    pub fn square(width: u32, resolution: f64) -> Self {
        Self {
            width,
            height: width,
            resolution,
            ..Default::default()
        }
    }

    /// Number of cells in the map.
    #[inline]
    pub fn len(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Width of the map in world units (meters).
    #[inline]
    pub fn world_width(&self) -> f64 {
        self.width as f64 * self.resolution
    }

    /// Height of the map in world units (meters).
    #[inline]
    pub fn world_height(&self) -> f64 {
        self.height as f64 * self.resolution
    }

    /// Center of the map in world coordinates.
    #[inline]
    pub fn world_center(&self) -> DVec2 {
        self.origin + DVec2::new(0.5 * self.world_width(), 0.5 * self.world_height())
    }
}
