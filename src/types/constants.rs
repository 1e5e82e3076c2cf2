//! Cost sentinels over the byte domain.
//!
//! The cost scale is ordered: `COST_FREE < 1..=252 (inflation decay)
//! < COST_INSCRIBED < COST_LETHAL`. `COST_UNKNOWN` sits above everything
//! in comparisons but is never produced by inflation.

/// Known free space.
pub const COST_FREE: u8 = 0;

/// At or above this cost a robot footprint of the configured inscribed
/// radius is guaranteed to collide.
pub const COST_INSCRIBED: u8 = 253;

/// A directly sensed or statically known obstacle.
pub const COST_LETHAL: u8 = 254;

/// No information. Treated as high-cost for planning, distinct from lethal.
pub const COST_UNKNOWN: u8 = 255;
