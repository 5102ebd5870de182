//! Single-swing combat resolution.
//!
//! `resolve_swing` decides one attack between two stat blocks and reports
//! the outcome. It never touches either combatant; the caller subtracts the
//! damage and decides what a kill means.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::components::CombatStats;
use crate::constants::*;

/// Outcome of one attack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwingResult {
    pub damage: i32,
    pub is_crit: bool,
    pub is_miss: bool,
}

impl SwingResult {
    pub fn miss() -> Self {
        Self {
            damage: 0,
            is_crit: false,
            is_miss: true,
        }
    }
}

/// Damage before the defender's armor.
///
/// Monsters and bosses hit by level; everyone else hits with their attack stat.
pub fn raw_damage(attacker: &CombatStats) -> f64 {
    if attacker.uses_monster_damage() {
        let base = MONSTER_BASE_DAMAGE + attacker.level as f64 * MONSTER_DAMAGE_PER_LEVEL;
        if attacker.is_boss {
            base * BOSS_DAMAGE_MULTIPLIER
        } else {
            base
        }
    } else {
        attacker.attack as f64
    }
}

/// Chance the defender sidesteps, from its speed advantage. Zero unless the
/// defender is strictly faster.
pub fn dodge_chance(attacker: &CombatStats, defender: &CombatStats) -> f64 {
    if defender.speed <= attacker.speed {
        return 0.0;
    }
    let advantage = defender.speed.saturating_sub(attacker.speed) as f64;
    (advantage * DODGE_CHANCE_PER_SPEED).min(DODGE_CHANCE_CAP)
}

/// Resolve one swing from `attacker` at `defender`.
///
/// A dodge ends resolution immediately, so a miss is never also a crit. A
/// landed swing always deals at least 1.
pub fn resolve_swing(
    attacker: &CombatStats,
    defender: &CombatStats,
    rng: &mut (impl Rng + ?Sized),
) -> SwingResult {
    let raw = raw_damage(attacker);

    let dodge = dodge_chance(attacker, defender);
    if dodge > 0.0 && rng.gen::<f64>() < dodge {
        return SwingResult::miss();
    }

    let mut damage = (raw - defender.defense as f64).max(MIN_SWING_DAMAGE);

    let mut is_crit = false;
    if !attacker.uses_monster_damage() && rng.gen::<f64>() < COMBAT_CRIT_CHANCE {
        damage = (damage * COMBAT_CRIT_MULTIPLIER).floor();
        is_crit = true;
    }

    SwingResult {
        damage: sanitize_damage(damage),
        is_crit,
        is_miss: false,
    }
}

/// Whole, non-negative damage; anything non-finite becomes 0
fn sanitize_damage(damage: f64) -> i32 {
    if !damage.is_finite() {
        return 0;
    }
    damage.floor().clamp(0.0, i32::MAX as f64) as i32
}
