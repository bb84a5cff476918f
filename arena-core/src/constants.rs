//! Default tuning values for the navigation stack.
//!
//! Arena and grid defaults match the reference arena (1600x1080 pixels,
//! 20-pixel cells). All of them can be overridden through
//! [`crate::config::NavConfig`].

/// Arena width in pixels.
pub const DEFAULT_ARENA_WIDTH: f64 = 1600.0;
/// Arena height in pixels.
pub const DEFAULT_ARENA_HEIGHT: f64 = 1080.0;
/// Side of one occupancy cell in pixels. 40 is the coarsest usable value,
/// 10 works but drags the scan; values in between are untested.
pub const DEFAULT_GRID_SIZE: f64 = 20.0;

/// Ticks between path recomputations.
pub const DEFAULT_PATH_UPDATE_INTERVAL: u64 = 10;
/// Maximum number of A* expansions before the search gives up.
pub const DEFAULT_ITERATION_CAP: u32 = 1000;
/// Edge-cost scale applied to edges entering an obstructed cell. A power of
/// ten so the nominal costs recover bitwise on unobstruction.
pub const OBSTRUCTION_MULTIPLIER: f64 = 1.0e6;

/// Initial pursuit look-ahead radius as a multiple of the cell side.
pub const DEFAULT_LOOKAHEAD_FACTOR: f64 = 2.0;
/// Look-ahead radius growth per retry when no intersection is found.
pub const DEFAULT_LOOKAHEAD_GROWTH: f64 = 1.25;
/// Retry budget for look-ahead expansion before steering goes idle.
pub const DEFAULT_LOOKAHEAD_RETRIES: u32 = 20;

/// Below this energy a craft should be routed to an energy source.
pub const LOW_ENERGY_THRESHOLD: f64 = 2000.0;
/// A chase target closer than this many craft radii triggers braking.
pub const BRAKE_RADIUS_FACTOR: f64 = 3.0;
/// How far ahead (in ticks) a drifting goal is led when aiming.
pub const AIM_AHEAD_TICKS: f64 = 1.0;
