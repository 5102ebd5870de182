//! Dungeon generation constants.

/// Default dungeon width
pub const DUNGEON_DEFAULT_WIDTH: usize = 60;
/// Default dungeon height
pub const DUNGEON_DEFAULT_HEIGHT: usize = 40;
/// Fraction of the map the random walk carves into floor
pub const DUNGEON_FLOOR_COVERAGE: f64 = 0.4;
/// Solid rock kept around the map edge
pub const DUNGEON_BORDER: usize = 1;

/// Random probes before falling back to a full scan for a floor cell
pub const FLOOR_SAMPLE_ATTEMPTS: usize = 10_000;
