//! Headless auto-play driver.
//!
//! Plays a seeded run with a simple policy: fight whatever is close, drink
//! or heal when low, wear the best gear found, and take the stairs otherwise.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crawl_core::components::ItemKind;
use crawl_core::events::{Combatant, GameEvent};
use crawl_core::pathfinding;
use crawl_core::systems::items::{consume_potion, equip_item, use_heal_skill};
use crawl_core::{GameRng, GameState, Rules, StepOutcome};

/// Simulated time between player turns
const TURN_MS: u64 = 1_000;
/// Monsters farther than this (path cost) are left alone
const HUNT_RANGE: f64 = 8.0;
/// Drink or heal below this fraction of max hp
const LOW_HP_FRACTION: f64 = 0.4;

/// Headless dungeon crawl simulation
#[derive(Parser, Debug)]
#[command(name = "crawl-sim")]
#[command(author, version, about = "Auto-play a seeded dungeon run", long_about = None)]
struct Args {
    /// RNG seed (random when omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Map width
    #[arg(long)]
    width: Option<usize>,

    /// Map height
    #[arg(long)]
    height: Option<usize>,

    /// Stop after reaching this floor
    #[arg(short, long, default_value_t = 5)]
    floors: u32,

    /// Stop after this many player turns
    #[arg(long, default_value_t = 5_000)]
    max_turns: u64,

    /// JSON rules file overriding the built-in balance
    #[arg(short, long)]
    rules: Option<PathBuf>,

    /// Write the final state here as JSON
    #[arg(long)]
    save: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let mut rules = match &args.rules {
        Some(path) => Rules::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => Rules::default(),
    };
    if let Some(width) = args.width {
        rules.dungeon.width = width;
    }
    if let Some(height) = args.height {
        rules.dungeon.height = height;
    }

    let rng = match args.seed {
        Some(seed) => GameRng::new(seed),
        None => GameRng::from_entropy(),
    };
    let seed = rng.seed();

    let mut game = GameState::new(rules, rng).context("generating the first floor")?;
    let mut turn = 0;
    while turn < args.max_turns && !game.is_dead() && game.floor() < args.floors {
        turn += 1;
        take_turn(&mut game, turn * TURN_MS)?;
        game.monster_turn();
        log_events(&mut game);
    }

    let player = &game.player;
    info!(
        seed,
        turns = turn,
        floor = player.floor,
        level = player.level(),
        xp = player.xp,
        hp = player.combat.hp,
        dead = game.is_dead(),
        "run finished"
    );

    if let Some(path) = &args.save {
        let json = serde_json::to_string_pretty(&game.save())?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(())
}

fn take_turn(game: &mut GameState, now_ms: u64) -> Result<()> {
    upgrade_gear(game);

    let combat = &game.player.combat;
    if (combat.hp as f64) < combat.max_hp as f64 * LOW_HP_FRACTION && try_heal(game, now_ms) {
        return Ok(());
    }

    if game.on_stairs() && nearby_monster(game).is_none() {
        let floor = game.descend()?;
        info!(floor, "took the stairs");
        return Ok(());
    }

    let target = match nearby_monster(game).or_else(|| game.grid.descent_point()) {
        Some(target) => target,
        None => return Ok(()),
    };
    if game.step_toward(target) == StepOutcome::Blocked {
        warn!(x = target.x, y = target.y, "no route");
    }
    Ok(())
}

fn nearby_monster(game: &GameState) -> Option<crawl_core::Position> {
    let target = game.nearest_monster()?;
    let path = pathfinding::find_path(&game.grid, game.position, target);
    (pathfinding::path_cost(game.position, &path) <= HUNT_RANGE).then_some(target)
}

/// Potion first, heal skill as a fallback
fn try_heal(game: &mut GameState, now_ms: u64) -> bool {
    let potion = game
        .player
        .inventory
        .iter()
        .find(|item| item.kind == ItemKind::Potion)
        .map(|item| item.uid);
    if let Some(uid) = potion {
        if consume_potion(&mut game.player, uid).is_ok() {
            return true;
        }
    }
    use_heal_skill(&mut game.player, now_ms).is_ok()
}

/// Equip anything in the bag that beats the current slot
fn upgrade_gear(game: &mut GameState) {
    let player = &game.player;
    let upgrades: Vec<u64> = player
        .inventory
        .iter()
        .filter(|item| item.is_equippable())
        .filter(|item| {
            let current = player.equipment.slot(item.kind).map_or(0, |worn| worn.bonus);
            item.bonus > current
        })
        .map(|item| item.uid)
        .collect();

    for uid in upgrades {
        // An earlier upgrade may already have filled the slot with something better
        let Some(item) = game.player.inventory.iter().find(|i| i.uid == uid) else {
            continue;
        };
        let current = game.player.equipment.slot(item.kind).map_or(0, |worn| worn.bonus);
        if item.bonus > current {
            if let Err(err) = equip_item(&mut game.player, uid) {
                warn!(uid, %err, "could not equip");
            }
        }
    }
}

fn log_events(game: &mut GameState) {
    for event in game.drain_events() {
        match event {
            GameEvent::SwingResolved {
                attacker,
                swing,
                defender_hp,
            } => {
                let who = match attacker {
                    Combatant::Player => "hero",
                    Combatant::Monster => "monster",
                };
                tracing::debug!(who, damage = swing.damage, crit = swing.is_crit, miss = swing.is_miss, defender_hp, "swing");
            }
            GameEvent::MonsterDefeated {
                level,
                is_boss,
                xp_awarded,
            } => info!(level, is_boss, xp_awarded, "monster defeated"),
            GameEvent::LootDropped { item } => info!(name = %item.name, bonus = item.bonus, "loot"),
            GameEvent::LevelUp {
                new_level,
                levels_gained,
            } => info!(new_level, levels_gained, "level up"),
            GameEvent::PlayerDefeated { damage_taken } => warn!(damage_taken, "hero defeated"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crawl_core::{Item, Rarity};

    fn weapon(uid: u64, bonus: i32) -> Item {
        Item {
            uid,
            name: format!("Sword {uid}"),
            kind: ItemKind::Weapon,
            bonus,
            rarity: Rarity::Common,
            quantity: 1,
        }
    }

    #[test]
    fn test_upgrade_gear_wears_the_best_weapon() {
        let mut game = GameState::new(Rules::default(), GameRng::new(11)).unwrap();
        let attack = game.player.combat.attack;
        game.player.inventory.push(weapon(1, 3));
        game.player.inventory.push(weapon(2, 7));
        game.player.inventory.push(Item::potion(3, 20));

        upgrade_gear(&mut game);
        let worn = game.player.equipment.weapon.as_ref().unwrap();
        assert_eq!(worn.uid, 2);
        assert_eq!(game.player.combat.attack, attack + 7);
        assert!(game.player.inventory.iter().any(|i| i.uid == 1));
        assert!(game.player.inventory.iter().any(|i| i.uid == 3));
    }
}
