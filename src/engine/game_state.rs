//! Core game state - owns the simulation data.

use hecs::{Entity, World};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::components::{CombatStats, Item, Monster, PlayerStats, Position};
use crate::config::Rules;
use crate::dungeon_gen::{find_random_floor_cell, DungeonGenerator};
use crate::error::{DungeonError, TransitionError};
use crate::events::{EventQueue, GameEvent};
use crate::grid::Grid;
use crate::pathfinding;
use crate::rng::GameRng;
use crate::spawning::{self, MonsterSpawner};
use crate::systems::ai;
use crate::systems::encounter::{resolve_encounter, EncounterContext, EncounterReport, EncounterResult};
use crate::systems::items::add_to_inventory;
use crate::systems::loot::RarityLoot;

use super::floor_transition;

/// Whether the run is still going
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunStatus {
    #[default]
    Exploring,
    Dead,
}

/// What one player step did
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    Moved(Position),
    Fought(EncounterReport),
    /// Already standing on the target
    Arrived,
    /// No walkable route to the target
    Blocked,
}

/// Plain-data snapshot of a run, for persistence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSave {
    pub player: PlayerStats,
    pub position: Position,
    pub map: Grid,
    #[serde(default)]
    pub monsters: Vec<Monster>,
    #[serde(default)]
    pub status: RunStatus,
}

/// Core game state - owns all simulation data.
pub struct GameState {
    /// Monsters on the current floor
    pub world: World,
    /// Current floor grid
    pub grid: Grid,
    pub player: PlayerStats,
    pub position: Position,
    pub status: RunStatus,
    pub rules: Rules,
    pub events: EventQueue,
    spawner: MonsterSpawner,
    loot: RarityLoot,
    rng: GameRng,
}

impl GameState {
    /// Start a fresh run on floor 1.
    pub fn new(rules: Rules, rng: GameRng) -> Result<Self, DungeonError> {
        let mut rng = rng;
        let grid = DungeonGenerator::generate_floor(&rules.dungeon, &mut rng)?;
        let position = find_random_floor_cell(&grid, &mut rng).ok_or(DungeonError::NoFloor)?;
        info!(seed = rng.seed(), x = position.x, y = position.y, "new run");

        Ok(Self {
            world: World::new(),
            grid,
            player: PlayerStats::new(),
            position,
            status: RunStatus::Exploring,
            loot: RarityLoot::new(rules.loot.clone()),
            rules,
            events: EventQueue::new(),
            spawner: MonsterSpawner::new(),
            rng,
        })
    }

    /// Rebuild a run from a save.
    pub fn from_save(save: GameSave, rules: Rules, rng: GameRng) -> Self {
        let mut world = World::new();
        let mut spawner = MonsterSpawner::new();
        spawner.restore(&mut world, &save.monsters);
        Self {
            world,
            grid: save.map,
            player: save.player,
            position: save.position,
            status: save.status,
            loot: RarityLoot::new(rules.loot.clone()),
            rules,
            events: EventQueue::new(),
            spawner,
            rng,
        }
    }

    pub fn save(&self) -> GameSave {
        GameSave {
            player: self.player.clone(),
            position: self.position,
            map: self.grid.clone(),
            monsters: spawning::snapshot(&self.world),
            status: self.status,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.status == RunStatus::Dead
    }

    pub fn floor(&self) -> u32 {
        self.player.floor
    }

    pub fn on_stairs(&self) -> bool {
        floor_transition::can_descend(&self.grid, self.position)
    }

    /// Closest monster by path cost, ignoring unreachable ones
    pub fn nearest_monster(&self) -> Option<Position> {
        spawning::snapshot(&self.world)
            .into_iter()
            .filter_map(|m| {
                let path = pathfinding::find_path(&self.grid, self.position, m.position);
                (!path.is_empty()).then(|| (pathfinding::path_cost(self.position, &path), m.position))
            })
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, pos)| pos)
    }

    /// Take one step toward `target`, fighting whatever stands in the way.
    pub fn step_toward(&mut self, target: Position) -> StepOutcome {
        if target == self.position {
            return StepOutcome::Arrived;
        }
        let Some(next) = pathfinding::next_step_toward(&self.grid, self.position, target) else {
            return StepOutcome::Blocked;
        };

        match spawning::monster_at(&self.world, next) {
            Some(entity) => match self.fight(entity) {
                Some(report) => StepOutcome::Fought(report),
                None => StepOutcome::Blocked,
            },
            None => {
                self.position = next;
                StepOutcome::Moved(next)
            }
        }
    }

    /// Let the floor act: maybe spawn, move monsters, resolve their attacks.
    pub fn monster_turn(&mut self) -> Vec<EncounterReport> {
        self.spawner.try_spawn(
            &mut self.world,
            &self.grid,
            self.position,
            self.player.level(),
            self.player.floor,
            &mut self.rng,
        );

        let attackers = ai::monster_tick(&mut self.world, &self.grid, self.position, &mut self.rng);
        let mut reports = Vec::new();
        for entity in attackers {
            if self.is_dead() {
                break;
            }
            if let Some(report) = self.fight(entity) {
                reports.push(report);
            }
        }
        reports
    }

    /// One exchange with `entity`; applies the outcome to the world and player.
    pub fn fight(&mut self, entity: Entity) -> Option<EncounterReport> {
        let monster = self
            .world
            .get::<&CombatStats>(entity)
            .ok()
            .map(|stats| (*stats).clone())?;

        let mut ctx = EncounterContext {
            rules: &self.rules,
            loot: &self.loot,
            rng: &mut self.rng,
            events: &mut self.events,
        };
        let report = resolve_encounter(&self.player, &monster, &mut ctx);

        match &report.result {
            EncounterResult::ContinuedCombat {
                monster_hp,
                player_hp,
            } => {
                if let Ok(mut stats) = self.world.get::<&mut CombatStats>(entity) {
                    stats.hp = (*monster_hp).max(0);
                }
                self.player.combat.hp = *player_hp;
            }
            EncounterResult::MonsterDefeated {
                loot, progression, ..
            } => {
                if let Ok(mut stats) = self.world.get::<&mut CombatStats>(entity) {
                    stats.hp = 0;
                }
                spawning::remove_dead(&mut self.world);
                self.player = progression.updated_stats.clone();
                if let Some(item) = loot {
                    self.pick_up(item.clone());
                }
            }
            EncounterResult::PlayerDefeated { .. } => {
                self.player.combat.hp = 0;
                self.status = RunStatus::Dead;
                info!(floor = self.player.floor, level = self.player.level(), "player died");
            }
        }
        Some(report)
    }

    fn pick_up(&mut self, item: Item) {
        debug!(name = %item.name, bonus = item.bonus, "picked up");
        add_to_inventory(&mut self.player, item);
    }

    /// Take the stairs under the player. Clears the floor's monsters.
    pub fn descend(&mut self) -> Result<u32, TransitionError> {
        let next = floor_transition::descend(
            &self.player,
            self.position,
            &self.grid,
            &self.rules.dungeon,
            &mut self.rng,
        )?;
        self.world.clear();
        self.grid = next.grid;
        self.position = next.spawn;
        self.player = next.player;
        Ok(self.player.floor)
    }

    /// Hand over everything emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain().collect()
    }
}
