pub mod costmap;
pub mod store;
pub mod window;

mod changes;

pub use costmap::{CellRect, Costmap};
pub use store::CellGrid;
pub use window::WindowView;

pub(crate) use changes::ChangeTracker;
