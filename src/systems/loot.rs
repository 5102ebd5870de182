//! Loot drops handed out when a monster dies.
//!
//! The encounter only needs "maybe an item" from a [`LootSource`]. The
//! default [`RarityLoot`] rolls potions and rarity-tiered equipment.

use rand::{Rng, RngCore};

use crate::components::{CombatStats, Item, ItemKind, Rarity};
use crate::config::LootRules;
use crate::constants::*;

/// Something that turns a kill into an optional item
pub trait LootSource {
    fn roll_loot(&self, monster: &CombatStats, rng: &mut dyn RngCore) -> Option<Item>;
}

/// Never drops anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLoot;

impl LootSource for NoLoot {
    fn roll_loot(&self, _monster: &CombatStats, _rng: &mut dyn RngCore) -> Option<Item> {
        None
    }
}

struct BaseItem {
    name: &'static str,
    power: i32,
}

const WEAPONS: [BaseItem; 4] = [
    BaseItem { name: "Dagger", power: 3 },
    BaseItem { name: "Sword", power: 5 },
    BaseItem { name: "Axe", power: 7 },
    BaseItem { name: "Mace", power: 6 },
];

const ARMOR: [BaseItem; 4] = [
    BaseItem { name: "Rags", power: 1 },
    BaseItem { name: "Leather Vest", power: 3 },
    BaseItem { name: "Chainmail", power: 6 },
    BaseItem { name: "Plate Armor", power: 10 },
];

/// Weighted rarity tables scaled by monster level
#[derive(Debug, Clone, Default)]
pub struct RarityLoot {
    pub rules: LootRules,
}

impl RarityLoot {
    pub fn new(rules: LootRules) -> Self {
        Self { rules }
    }

    /// Generate an item for `level` unconditionally (no drop roll)
    pub fn generate(&self, level: u32, rng: &mut dyn RngCore) -> Item {
        let uid = rng.next_u64();
        if rng.gen_bool(self.rules.potion_chance) {
            return Item::potion(uid, potion_heal(level));
        }

        let rarity = pick_rarity(level, rng);
        let (kind, table) = if rng.gen_bool(0.5) {
            (ItemKind::Weapon, &WEAPONS)
        } else {
            (ItemKind::Armor, &ARMOR)
        };
        let base = &table[rng.gen_range(0..table.len())];
        let variance = rng.gen_range(ITEM_VARIANCE_MIN..ITEM_VARIANCE_MAX);

        Item {
            uid,
            name: format!("{} {}", rarity.name(), base.name),
            kind,
            bonus: item_bonus(base.power, level, rarity, variance),
            rarity,
            quantity: 1,
        }
    }
}

impl LootSource for RarityLoot {
    fn roll_loot(&self, monster: &CombatStats, rng: &mut dyn RngCore) -> Option<Item> {
        if !monster.is_boss && !rng.gen_bool(self.rules.drop_chance) {
            return None;
        }
        Some(self.generate(monster.level, rng))
    }
}

pub fn potion_heal(level: u32) -> i32 {
    POTION_BASE_HEAL + level as i32 * POTION_HEAL_PER_LEVEL
}

/// `(base + level) * rarity * variance`, never below 1
pub fn item_bonus(base_power: i32, level: u32, rarity: Rarity, variance: f64) -> i32 {
    let power = (base_power + level as i32) as f64;
    ((power * rarity.multiplier() * variance).floor() as i32).max(1)
}

/// Rarity weights after level adjustment: junk fades, top tiers grow
pub fn rarity_weights(level: u32) -> [(Rarity, f64); 7] {
    let factor = level.min(RARITY_LEVEL_CAP) as f64;
    Rarity::ALL.map(|rarity| {
        let mut weight = rarity.weight();
        if rarity.multiplier() < 1.0 {
            weight = (weight - factor * RARITY_JUNK_FALLOFF).max(0.0);
        }
        if rarity.multiplier() > 1.5 {
            weight += factor * RARITY_HIGH_TIER_GAIN;
        }
        (rarity, weight)
    })
}

fn pick_rarity(level: u32, rng: &mut dyn RngCore) -> Rarity {
    let weights = rarity_weights(level);
    let total: f64 = weights.iter().map(|(_, w)| w).sum();
    let mut roll = rng.gen::<f64>() * total;
    for (rarity, weight) in weights {
        if roll < weight {
            return rarity;
        }
        roll -= weight;
    }
    weights[0].0
}
