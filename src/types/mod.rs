pub mod config;
pub mod constants;
pub mod error;
pub mod info;

pub use config::CostmapConfig;
pub use constants::*;
pub use error::CostmapError;
pub use info::MapInfo;
