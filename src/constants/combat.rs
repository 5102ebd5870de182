//! Combat system constants.

/// Flat damage every monster swing starts from
pub const MONSTER_BASE_DAMAGE: f64 = 4.0;
/// Extra monster damage per monster level
pub const MONSTER_DAMAGE_PER_LEVEL: f64 = 2.0;
/// Boss damage multiplier applied on top of the monster formula
pub const BOSS_DAMAGE_MULTIPLIER: f64 = 1.5;

/// Dodge chance gained per point of speed advantage (0.0 - 1.0)
pub const DODGE_CHANCE_PER_SPEED: f64 = 0.03;
/// Dodge chance never exceeds this
pub const DODGE_CHANCE_CAP: f64 = 0.40;

/// Every landed swing deals at least this much
pub const MIN_SWING_DAMAGE: f64 = 1.0;

/// Chance to deal a critical hit (0.0 - 1.0), player-like attackers only
pub const COMBAT_CRIT_CHANCE: f64 = 0.1;
/// Critical hit damage multiplier
pub const COMBAT_CRIT_MULTIPLIER: f64 = 1.5;
