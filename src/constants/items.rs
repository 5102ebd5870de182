//! Loot and item constants.

/// Chance a regular monster drops an item (bosses always drop)
pub const LOOT_DROP_CHANCE: f64 = 0.3;
/// Chance a drop is a potion instead of equipment
pub const LOOT_POTION_CHANCE: f64 = 0.25;

/// Health potion base heal
pub const POTION_BASE_HEAL: i32 = 25;
/// Health potion heal per monster level
pub const POTION_HEAL_PER_LEVEL: i32 = 5;
/// Health potion name (potions stack by name)
pub const POTION_NAME: &str = "Health Potion";

/// Level past which rarity weights stop shifting
pub const RARITY_LEVEL_CAP: u32 = 50;
/// Weight removed from sub-standard tiers per level
pub const RARITY_JUNK_FALLOFF: f64 = 2.0;
/// Weight added to high tiers per level
pub const RARITY_HIGH_TIER_GAIN: f64 = 0.5;

/// Equipment bonus rolls within [min, max) of the nominal value
pub const ITEM_VARIANCE_MIN: f64 = 0.9;
/// See [`ITEM_VARIANCE_MIN`]
pub const ITEM_VARIANCE_MAX: f64 = 1.1;
