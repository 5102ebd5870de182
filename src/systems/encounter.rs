//! Encounter orchestration: one player/monster exchange per call.
//!
//! The player swings first. A kill pays out XP and loot and runs the
//! progression engine; otherwise the monster swings back. Neither input is
//! mutated. The report carries the new hp values and the caller applies them.

use rand::RngCore;
use tracing::debug;

use crate::components::{CombatStats, Item, PlayerStats};
use crate::config::Rules;
use crate::events::{Combatant, EventQueue, GameEvent};
use crate::systems::combat::{resolve_swing, SwingResult};
use crate::systems::experience::{grant_experience, xp_reward, LevelUpResult};
use crate::systems::loot::LootSource;

/// Where an exchange stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncounterPhase {
    #[default]
    Idle,
    PlayerSwing,
    MonsterSwing,
    MonsterDead,
    PlayerDead,
}

impl EncounterPhase {
    /// Follow the state machine. `defender_died` is whether the swing just
    /// resolved in this phase killed its target; it is ignored by `Idle`.
    /// Terminal phases have no successor.
    pub fn next(self, defender_died: bool) -> Option<Self> {
        match self {
            Self::Idle => Some(Self::PlayerSwing),
            Self::PlayerSwing if defender_died => Some(Self::MonsterDead),
            Self::PlayerSwing => Some(Self::MonsterSwing),
            Self::MonsterSwing if defender_died => Some(Self::PlayerDead),
            Self::MonsterSwing => Some(Self::Idle),
            Self::MonsterDead | Self::PlayerDead => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::MonsterDead | Self::PlayerDead)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EncounterResult {
    /// Both sides survived; the encounter stays open
    ContinuedCombat { monster_hp: i32, player_hp: i32 },
    MonsterDefeated {
        xp_awarded: u32,
        loot: Option<Item>,
        progression: LevelUpResult,
    },
    PlayerDefeated { damage_taken: i32 },
}

/// Full account of one exchange
#[derive(Debug, Clone, PartialEq)]
pub struct EncounterReport {
    pub player_swing: SwingResult,
    /// `None` when the player's swing ended the fight
    pub monster_swing: Option<SwingResult>,
    pub result: EncounterResult,
    /// Phase the exchange stopped in: `Idle`, `MonsterDead` or `PlayerDead`
    pub phase: EncounterPhase,
}

/// Collaborators an exchange draws on
pub struct EncounterContext<'a, L: LootSource + ?Sized> {
    pub rules: &'a Rules,
    pub loot: &'a L,
    pub rng: &'a mut dyn RngCore,
    pub events: &'a mut EventQueue,
}

/// Resolve one exchange between `player` and `monster`.
pub fn resolve_encounter<L: LootSource + ?Sized>(
    player: &PlayerStats,
    monster: &CombatStats,
    ctx: &mut EncounterContext<'_, L>,
) -> EncounterReport {
    let mut phase = EncounterPhase::Idle;
    phase = advance(phase, false);

    let player_swing = resolve_swing(&player.combat, monster, &mut *ctx.rng);
    let monster_hp = monster.hp.saturating_sub(player_swing.damage);
    debug!(
        damage = player_swing.damage,
        crit = player_swing.is_crit,
        miss = player_swing.is_miss,
        monster_hp,
        "player swing"
    );
    ctx.events.push(GameEvent::SwingResolved {
        attacker: Combatant::Player,
        swing: player_swing,
        defender_hp: monster_hp.max(0),
    });

    phase = advance(phase, monster_hp <= 0);
    if phase == EncounterPhase::MonsterDead {
        let result = monster_defeated(player, monster, ctx);
        return EncounterReport {
            player_swing,
            monster_swing: None,
            result,
            phase,
        };
    }

    let monster_swing = resolve_swing(monster, &player.combat, &mut *ctx.rng);
    let player_hp = player.combat.hp.saturating_sub(monster_swing.damage);
    debug!(
        damage = monster_swing.damage,
        miss = monster_swing.is_miss,
        player_hp,
        "monster swing"
    );
    ctx.events.push(GameEvent::SwingResolved {
        attacker: Combatant::Monster,
        swing: monster_swing,
        defender_hp: player_hp.max(0),
    });

    phase = advance(phase, player_hp <= 0);
    let result = if phase == EncounterPhase::PlayerDead {
        let damage_taken = monster_swing.damage;
        debug!(damage_taken, "player defeated");
        ctx.events.push(GameEvent::PlayerDefeated { damage_taken });
        EncounterResult::PlayerDefeated { damage_taken }
    } else {
        EncounterResult::ContinuedCombat {
            monster_hp,
            player_hp,
        }
    };

    EncounterReport {
        player_swing,
        monster_swing: Some(monster_swing),
        result,
        phase,
    }
}

fn advance(phase: EncounterPhase, defender_died: bool) -> EncounterPhase {
    // Only non-terminal phases are ever advanced here
    phase.next(defender_died).unwrap_or(phase)
}

fn monster_defeated<L: LootSource + ?Sized>(
    player: &PlayerStats,
    monster: &CombatStats,
    ctx: &mut EncounterContext<'_, L>,
) -> EncounterResult {
    let xp_awarded = xp_reward(player.level(), monster, &ctx.rules.rewards, &mut *ctx.rng);
    let loot = ctx.loot.roll_loot(monster, &mut *ctx.rng);
    let progression = grant_experience(player, xp_awarded, &ctx.rules.progression);

    debug!(
        level = monster.level,
        boss = monster.is_boss,
        xp_awarded,
        loot = loot.as_ref().map(|item| item.name.as_str()),
        "monster defeated"
    );
    ctx.events.push(GameEvent::MonsterDefeated {
        level: monster.level,
        is_boss: monster.is_boss,
        xp_awarded,
    });
    if let Some(item) = &loot {
        ctx.events.push(GameEvent::LootDropped { item: item.clone() });
    }
    if progression.leveled_up {
        ctx.events.push(GameEvent::LevelUp {
            new_level: progression.final_level,
            levels_gained: progression.levels_gained,
        });
    }

    EncounterResult::MonsterDefeated {
        xp_awarded,
        loot,
        progression,
    }
}
