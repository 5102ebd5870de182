//! Monster scaling and spawning constants.

/// Most monsters alive on a floor at once
pub const MAX_MONSTERS: usize = 10;
/// Random placement probes per spawn attempt
pub const SPAWN_ATTEMPTS: usize = 10;

/// Every Nth floor hosts a boss
pub const BOSS_FLOOR_INTERVAL: u32 = 5;
/// Boss level above the floor's base difficulty
pub const BOSS_LEVEL_BONUS: u32 = 5;
/// Boss base health
pub const BOSS_BASE_HEALTH: i32 = 200;
/// Boss health per level
pub const BOSS_HEALTH_PER_LEVEL: i32 = 30;
/// Boss display name
pub const BOSS_NAME: &str = "Dragon King";

/// Regular monsters roll `0..=MONSTER_LEVEL_VARIANCE` levels above base difficulty
pub const MONSTER_LEVEL_VARIANCE: u32 = 2;
/// Regular monster base health
pub const MONSTER_BASE_HEALTH: i32 = 20;
/// Regular monster health per level
pub const MONSTER_HEALTH_PER_LEVEL: i32 = 10;

/// Default monster speed (monsters carry no speed stat of their own)
pub const MONSTER_SPEED: i32 = 10;

/// Manhattan radius inside which a monster chases the player
pub const AGGRO_RADIUS: i32 = 6;
/// Chance an idle monster wanders on a tick
pub const IDLE_WANDER_CHANCE: f64 = 0.6;
