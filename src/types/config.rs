//! Costmap configuration.

use serde::{Deserialize, Serialize};

/// Construction parameters for a [`Costmap`](crate::Costmap).
///
/// Grid geometry (size, resolution, origin) travels separately via
/// [`MapInfo`](crate::MapInfo); this struct holds everything else.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CostmapConfig {
    /// Static cells at or above this value are treated as obstacles.
    ///
    /// Applied once at construction when normalizing the input map.
    pub threshold: u8,

    /// Lower bound of the sensor acceptance window in meters.
    ///
    /// Points below this height carry no evidence at this 2-D layer.
    pub min_z: f64,

    /// Upper bound of the sensor acceptance window in meters.
    ///
    /// Doubles as the maximum obstacle height: points above it are ignored.
    pub max_z: f64,

    /// Obstacle inflation radius in meters. Zero disables inflation.
    pub inflation_radius_m: f64,

    /// Radius of the smallest circle fully containing the robot footprint.
    pub circumscribed_radius_m: f64,

    /// Radius of the largest circle fully contained in the robot footprint.
    ///
    /// Cells within this distance of an obstacle get [`COST_INSCRIBED`](crate::COST_INSCRIBED).
    pub inscribed_radius_m: f64,

    /// Weighting applied to the inflation decay curve. Typical: 1.0.
    pub weight: f64,

    /// World-size bound along x in meters, used to cap the decay lookup tables.
    pub max_world_x_m: f64,

    /// World-size bound along y in meters, used to cap the decay lookup tables.
    pub max_world_y_m: f64,
}

impl Default for CostmapConfig {
    fn default() -> Self {
        Self {
            threshold: 100,
            min_z: 0.0,
            max_z: 2.0,
            inflation_radius_m: 0.55,
            circumscribed_radius_m: 0.46,
            inscribed_radius_m: 0.325,
            weight: 1.0,
            max_world_x_m: 50.0,
            max_world_y_m: 50.0,
        }
    }
}
