//! Core gameplay constants (player stats, XP, rewards).

/// Player's starting level
pub const PLAYER_STARTING_LEVEL: u32 = 1;
/// Player's starting health
pub const PLAYER_STARTING_HEALTH: i32 = 100;
/// Player's starting attack
pub const PLAYER_STARTING_ATTACK: i32 = 8;
/// Player's starting defense
pub const PLAYER_STARTING_DEFENSE: i32 = 0;
/// Speed assumed for any combatant that doesn't carry one
pub const DEFAULT_SPEED: i32 = 10;

/// XP needed for the first level-up, and the fallback for a corrupt threshold
pub const XP_FIRST_LEVEL: u32 = 100;
/// Next threshold = current threshold * this
pub const XP_CURVE: f64 = 1.4;

/// Max HP gained per level
pub const LEVEL_UP_MAX_HP: i32 = 15;
/// Attack gained per level
pub const LEVEL_UP_ATTACK: i32 = 2;
/// Defense gained per level (accumulated, floored after all level-ups)
pub const LEVEL_UP_DEFENSE: f64 = 0.5;
/// Speed gained per level (accumulated, floored after all level-ups)
pub const LEVEL_UP_SPEED: f64 = 0.5;

/// Base XP per monster level
pub const XP_PER_MONSTER_LEVEL: u32 = 10;
/// XP variance as a fraction of the base reward (+/-)
pub const XP_VARIANCE: f64 = 0.1;
/// Flat multiplier on boss XP
pub const BOSS_XP_MULTIPLIER: f64 = 10.0;

/// Fraction of max HP restored by the heal skill
pub const HEAL_SKILL_FRACTION: f64 = 0.3;
/// Heal skill cooldown in milliseconds
pub const HEAL_SKILL_COOLDOWN_MS: u64 = 10_000;
