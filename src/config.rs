//! Tunable balance rules.
//!
//! Defaults come from [`crate::constants`]. A JSON rules file may override
//! any subset; omitted keys keep their default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DungeonRules {
    pub width: usize,
    pub height: usize,
    /// Fraction of cells the walk carves, in (0, 1)
    pub floor_coverage: f64,
}

impl Default for DungeonRules {
    fn default() -> Self {
        Self {
            width: DUNGEON_DEFAULT_WIDTH,
            height: DUNGEON_DEFAULT_HEIGHT,
            floor_coverage: DUNGEON_FLOOR_COVERAGE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionRules {
    pub max_hp_per_level: i32,
    pub attack_per_level: i32,
    pub defense_per_level: f64,
    pub speed_per_level: f64,
    /// Threshold growth per level; must exceed 1.0
    pub xp_curve: f64,
}

impl Default for ProgressionRules {
    fn default() -> Self {
        Self {
            max_hp_per_level: LEVEL_UP_MAX_HP,
            attack_per_level: LEVEL_UP_ATTACK,
            defense_per_level: LEVEL_UP_DEFENSE,
            speed_per_level: LEVEL_UP_SPEED,
            xp_curve: XP_CURVE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardRules {
    pub xp_per_monster_level: u32,
    pub xp_variance: f64,
    pub boss_xp_multiplier: f64,
}

impl Default for RewardRules {
    fn default() -> Self {
        Self {
            xp_per_monster_level: XP_PER_MONSTER_LEVEL,
            xp_variance: XP_VARIANCE,
            boss_xp_multiplier: BOSS_XP_MULTIPLIER,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LootRules {
    pub drop_chance: f64,
    pub potion_chance: f64,
}

impl Default for LootRules {
    fn default() -> Self {
        Self {
            drop_chance: LOOT_DROP_CHANCE,
            potion_chance: LOOT_POTION_CHANCE,
        }
    }
}

/// Full rule set handed to the engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub dungeon: DungeonRules,
    pub progression: ProgressionRules,
    pub rewards: RewardRules,
    pub loot: LootRules,
}

impl Rules {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let rules: Rules = serde_json::from_str(json)?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Reject values that would stall progression or the generator
    pub fn validate(&self) -> Result<(), ConfigError> {
        let coverage = self.dungeon.floor_coverage;
        if !(coverage > 0.0 && coverage < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "dungeon.floor_coverage must be in (0, 1), got {coverage}"
            )));
        }
        if !(self.progression.xp_curve > 1.0) {
            return Err(ConfigError::Invalid(format!(
                "progression.xp_curve must exceed 1.0, got {}",
                self.progression.xp_curve
            )));
        }
        for (name, chance) in [
            ("loot.drop_chance", self.loot.drop_chance),
            ("loot.potion_chance", self.loot.potion_chance),
        ] {
            if !(0.0..=1.0).contains(&chance) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be in [0, 1], got {chance}"
                )));
            }
        }
        Ok(())
    }
}
