//! Game systems organized by domain.
//!
//! This module contains the rules that act on stat blocks, split into focused submodules:
//! - `ai`: Monster chase and wander steps
//! - `combat`: Single-swing resolution (dodge, armor, crits)
//! - `encounter`: Player/monster exchanges and kill hand-off
//! - `experience`: XP rewards, leveling, and stat growth
//! - `items`: Inventory, equipment, potions and the heal skill
//! - `loot`: Drop rolls and item generation

pub mod ai;
pub mod combat;
pub mod encounter;
pub mod experience;
pub mod items;
pub mod loot;

// Re-export commonly used items
pub use ai::{monster_tick, MonsterIntent};
pub use combat::{resolve_swing, SwingResult};
pub use encounter::{resolve_encounter, EncounterContext, EncounterPhase, EncounterReport, EncounterResult};
pub use experience::{grant_experience, level_gap_multiplier, xp_progress, xp_reward, LevelUpResult};
pub use items::{
    add_to_inventory, consume_potion, equip_item, unequip_item, use_heal_skill, ItemUseResult,
};
pub use loot::{LootSource, NoLoot, RarityLoot};
