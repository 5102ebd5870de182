//! Experience and leveling system.

use rand::Rng;

use crate::components::{CombatStats, PlayerStats};
use crate::config::{ProgressionRules, RewardRules};
use crate::constants::*;

/// Outcome of an XP grant
#[derive(Debug, Clone, PartialEq)]
pub struct LevelUpResult {
    pub updated_stats: PlayerStats,
    pub leveled_up: bool,
    pub final_level: u32,
    pub levels_gained: u32,
}

/// Calculate XP progress toward next level (0.0 to 1.0)
pub fn xp_progress(stats: &PlayerStats) -> f32 {
    let needed = effective_threshold(stats.next_level_xp);
    (stats.xp as f32 / needed as f32).clamp(0.0, 1.0)
}

/// A zero threshold would level forever, so it reads as the first-level value
fn effective_threshold(next_level_xp: u32) -> u32 {
    if next_level_xp == 0 {
        XP_FIRST_LEVEL
    } else {
        next_level_xp
    }
}

/// Add XP, applying every level-up it pays for.
///
/// Each level grants max HP, attack, defense and speed and fully heals.
/// Defense and speed grow in half points that only become whole points
/// once all levels from this grant are applied. Surplus XP carries over.
/// Everything on `stats` not named here is returned untouched.
pub fn grant_experience(stats: &PlayerStats, amount: u32, rules: &ProgressionRules) -> LevelUpResult {
    let mut updated = stats.clone();
    updated.next_level_xp = effective_threshold(updated.next_level_xp);
    updated.xp = updated.xp.saturating_add(amount);

    let mut defense = updated.combat.defense as f64;
    let mut speed = updated.combat.speed as f64;
    let mut levels_gained = 0;

    while updated.xp >= updated.next_level_xp {
        let combat = &mut updated.combat;
        combat.level = combat.level.saturating_add(1);
        combat.max_hp = combat.max_hp.saturating_add(rules.max_hp_per_level);
        combat.attack = combat.attack.saturating_add(rules.attack_per_level);
        defense += rules.defense_per_level;
        speed += rules.speed_per_level;
        combat.hp = combat.max_hp;

        updated.xp -= updated.next_level_xp;
        // The threshold must grow, or a tiny one pays a level per point
        let next = (updated.next_level_xp as f64 * rules.xp_curve).floor() as u32;
        updated.next_level_xp = next.max(updated.next_level_xp.saturating_add(1));
        levels_gained += 1;
    }

    if levels_gained > 0 {
        updated.combat.defense = defense.floor() as i32;
        updated.combat.speed = speed.floor() as i32;
    }

    LevelUpResult {
        final_level: updated.combat.level,
        updated_stats: updated,
        leveled_up: levels_gained > 0,
        levels_gained,
    }
}

/// XP multiplier from `player_level - monster_level`.
///
/// Outclassed monsters pay less; tougher ones pay a little more, until the
/// gap is so wide that the fight is an exploit rather than a challenge.
pub fn level_gap_multiplier(gap: i64) -> f64 {
    match gap {
        g if g > 4 => 0.1,
        3..=4 => 0.5,
        0..=2 => 1.0,
        -2..=-1 => 1.1,
        -5..=-3 => 1.2,
        _ => 0.5,
    }
}

/// XP paid out for killing `monster`
pub fn xp_reward(
    player_level: u32,
    monster: &CombatStats,
    rules: &RewardRules,
    rng: &mut (impl Rng + ?Sized),
) -> u32 {
    let base = monster.level as f64 * rules.xp_per_monster_level as f64;
    let variance = if rules.xp_variance > 0.0 {
        rng.gen_range(-rules.xp_variance..=rules.xp_variance) * base
    } else {
        0.0
    };

    let gap = player_level as i64 - monster.level as i64;
    let mut xp = (base + variance) * level_gap_multiplier(gap);
    if monster.is_boss {
        xp *= rules.boss_xp_multiplier;
    }

    if xp.is_finite() {
        (xp.floor() as u32).max(1)
    } else {
        1
    }
}
