pub mod grid;
pub mod inflation;
pub mod io;
pub mod loaders;
pub mod observations;
pub mod raytrace;
pub mod shared;
pub mod types;

pub use grid::{CellRect, Costmap, WindowView};
pub use io::SaveFormat;
pub use loaders::load_static_map;
pub use observations::{compute_refresh_interval, Observation, ObservationBuffer};
pub use shared::SharedCostmap;
pub use types::{
    CostmapConfig, CostmapError, MapInfo, COST_FREE, COST_INSCRIBED, COST_LETHAL, COST_UNKNOWN,
};
