//! Monster scaling and placement.
//!
//! Monsters live in a `hecs::World` as `(MonsterId, Position, CombatStats, Name)`.
//! Difficulty follows the player's level and how deep the floor is; every
//! fifth floor also hosts a boss.

use hecs::{Entity, World};
use rand::Rng;

use crate::components::{CombatStats, Monster, MonsterId, Name, Position};
use crate::constants::*;
use crate::grid::Grid;

/// Level every monster on this floor starts from
pub fn base_difficulty(player_level: u32, floor: u32) -> u32 {
    (player_level + floor.saturating_sub(1) / 2).max(1)
}

pub fn is_boss_floor(floor: u32) -> bool {
    floor > 0 && floor % BOSS_FLOOR_INTERVAL == 0
}

/// Stats and name for a freshly rolled monster
#[derive(Debug, Clone, PartialEq)]
pub struct MonsterTemplate {
    pub name: String,
    pub stats: CombatStats,
}

impl MonsterTemplate {
    pub fn regular(player_level: u32, floor: u32, rng: &mut impl Rng) -> Self {
        let level = base_difficulty(player_level, floor) + rng.gen_range(0..=MONSTER_LEVEL_VARIANCE);
        let max_hp = MONSTER_BASE_HEALTH + level as i32 * MONSTER_HEALTH_PER_LEVEL;
        Self {
            name: format!("Lvl {level} Monster"),
            stats: CombatStats::monster(level, max_hp, false),
        }
    }

    pub fn boss(player_level: u32, floor: u32) -> Self {
        let level = base_difficulty(player_level, floor) + BOSS_LEVEL_BONUS;
        let max_hp = BOSS_BASE_HEALTH + level as i32 * BOSS_HEALTH_PER_LEVEL;
        Self {
            name: BOSS_NAME.to_string(),
            stats: CombatStats::monster(level, max_hp, true),
        }
    }
}

/// Hands out monster ids and places new monsters
#[derive(Debug, Default)]
pub struct MonsterSpawner {
    next_id: u64,
}

impl MonsterSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make one spawn attempt for this tick.
    ///
    /// Does nothing once the floor is full, unless it's a boss floor with
    /// no boss yet. Probes up to [`SPAWN_ATTEMPTS`] random cells and gives up
    /// quietly if none is a free floor cell.
    pub fn try_spawn(
        &mut self,
        world: &mut World,
        grid: &Grid,
        player_pos: Position,
        player_level: u32,
        floor: u32,
        rng: &mut impl Rng,
    ) -> Option<Entity> {
        let needs_boss = is_boss_floor(floor) && !boss_present(world);
        if !needs_boss && monster_count(world) >= MAX_MONSTERS {
            return None;
        }

        for _ in 0..SPAWN_ATTEMPTS {
            let x = rng.gen_range(0..grid.width) as i32;
            let y = rng.gen_range(0..grid.height) as i32;
            let pos = Position::new(x, y);

            let is_floor = grid.tile_at(pos).is_some_and(|t| t.is_floor());
            if !is_floor || pos == player_pos || is_occupied(world, pos) {
                continue;
            }

            let template = if needs_boss {
                MonsterTemplate::boss(player_level, floor)
            } else {
                MonsterTemplate::regular(player_level, floor, rng)
            };
            return Some(self.spawn(world, pos, template));
        }

        None
    }

    pub fn spawn(&mut self, world: &mut World, pos: Position, template: MonsterTemplate) -> Entity {
        let id = MonsterId(self.next_id);
        self.next_id += 1;
        tracing::debug!(
            id = id.0,
            x = pos.x,
            y = pos.y,
            level = template.stats.level,
            boss = template.stats.is_boss,
            "monster spawned"
        );
        world.spawn((id, pos, template.stats, Name(template.name)))
    }

    /// Put saved monsters back into an empty world
    pub fn restore(&mut self, world: &mut World, monsters: &[Monster]) {
        for monster in monsters {
            self.next_id = self.next_id.max(monster.id.0 + 1);
            world.spawn((
                monster.id,
                monster.position,
                monster.stats.clone(),
                Name(monster.name.clone()),
            ));
        }
    }
}

pub fn monster_count(world: &World) -> usize {
    world.query::<&MonsterId>().iter().count()
}

pub fn boss_present(world: &World) -> bool {
    world
        .query::<&CombatStats>()
        .with::<&MonsterId>()
        .iter()
        .any(|(_, stats)| stats.is_boss)
}

pub fn is_occupied(world: &World, pos: Position) -> bool {
    monster_at(world, pos).is_some()
}

pub fn monster_at(world: &World, pos: Position) -> Option<Entity> {
    world
        .query::<&Position>()
        .with::<&MonsterId>()
        .iter()
        .find(|(_, p)| **p == pos)
        .map(|(entity, _)| entity)
}

/// Plain copies of every monster, ordered by id, for saving
pub fn snapshot(world: &World) -> Vec<Monster> {
    let mut monsters: Vec<Monster> = world
        .query::<(&MonsterId, &Position, &CombatStats, &Name)>()
        .iter()
        .map(|(_, (id, pos, stats, name))| Monster {
            id: *id,
            position: *pos,
            stats: stats.clone(),
            name: name.0.clone(),
        })
        .collect();
    monsters.sort_by_key(|m| m.id);
    monsters
}

/// Drop every entity whose hp reached zero. Returns how many were removed.
pub fn remove_dead(world: &mut World) -> usize {
    let dead: Vec<Entity> = world
        .query::<&CombatStats>()
        .with::<&MonsterId>()
        .iter()
        .filter(|(_, stats)| stats.is_dead())
        .map(|(entity, _)| entity)
        .collect();
    for &entity in &dead {
        let _ = world.despawn(entity);
    }
    dead.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon_gen::DungeonGenerator;
    use crate::rng::GameRng;

    fn open_grid() -> Grid {
        Grid::from_codes(&vec![vec![0; 8]; 8]).unwrap()
    }

    #[test]
    fn test_base_difficulty() {
        assert_eq!(base_difficulty(1, 1), 1);
        assert_eq!(base_difficulty(1, 3), 2);
        assert_eq!(base_difficulty(4, 6), 6);
        assert_eq!(base_difficulty(0, 1), 1);
    }

    #[test]
    fn test_boss_floors() {
        assert!(!is_boss_floor(1));
        assert!(!is_boss_floor(4));
        assert!(is_boss_floor(5));
        assert!(is_boss_floor(10));
        assert!(!is_boss_floor(0));
    }

    #[test]
    fn test_regular_template_scaling() {
        let mut rng = GameRng::new(3);
        for _ in 0..200 {
            let m = MonsterTemplate::regular(2, 5, &mut rng);
            // base 4, plus 0..=2
            assert!((4..=6).contains(&m.stats.level));
            assert_eq!(m.stats.max_hp, 20 + m.stats.level as i32 * 10);
            assert_eq!(m.stats.hp, m.stats.max_hp);
            assert!(m.stats.is_monster);
            assert!(!m.stats.is_boss);
        }
    }

    #[test]
    fn test_boss_template() {
        let boss = MonsterTemplate::boss(3, 5);
        // base 3 + 2, plus 5
        assert_eq!(boss.stats.level, 10);
        assert_eq!(boss.stats.max_hp, 500);
        assert!(boss.stats.is_boss);
        assert_eq!(boss.name, BOSS_NAME);
    }

    #[test]
    fn test_spawn_caps_at_max() {
        let mut rng = GameRng::new(5);
        let mut world = World::new();
        let mut spawner = MonsterSpawner::new();
        let grid = open_grid();
        for _ in 0..200 {
            spawner.try_spawn(&mut world, &grid, Position::new(0, 0), 1, 1, &mut rng);
        }
        assert_eq!(monster_count(&world), MAX_MONSTERS);
        assert!(!boss_present(&world));
    }

    #[test]
    fn test_boss_floor_spawns_boss_first() {
        let mut rng = GameRng::new(6);
        let mut world = World::new();
        let mut spawner = MonsterSpawner::new();
        let grid = open_grid();
        let first = spawner
            .try_spawn(&mut world, &grid, Position::new(0, 0), 1, 5, &mut rng)
            .unwrap();
        assert!(world.get::<&CombatStats>(first).unwrap().is_boss);
        assert_eq!(world.get::<&Name>(first).unwrap().0, BOSS_NAME);
    }

    #[test]
    fn test_boss_spawns_even_when_full() {
        let mut rng = GameRng::new(7);
        let mut world = World::new();
        let mut spawner = MonsterSpawner::new();
        let grid = open_grid();
        for i in 0..MAX_MONSTERS as i32 {
            let template = MonsterTemplate::regular(1, 1, &mut rng);
            spawner.spawn(&mut world, Position::new(i % 8, 7 - i / 8), template);
        }
        let mut spawned = None;
        for _ in 0..50 {
            spawned = spawner.try_spawn(&mut world, &grid, Position::new(0, 0), 1, 10, &mut rng);
            if spawned.is_some() {
                break;
            }
        }
        assert!(spawned.is_some());
        assert!(boss_present(&world));
        assert_eq!(monster_count(&world), MAX_MONSTERS + 1);
    }

    #[test]
    fn test_spawns_avoid_walls_player_and_each_other() {
        let mut rng = GameRng::new(8);
        let grid = DungeonGenerator::generate(30, 20, &mut rng).unwrap();
        let player = grid.descent_point().unwrap();
        let mut world = World::new();
        let mut spawner = MonsterSpawner::new();
        for _ in 0..500 {
            spawner.try_spawn(&mut world, &grid, player, 1, 1, &mut rng);
        }

        let monsters = snapshot(&world);
        assert_eq!(monsters.len(), MAX_MONSTERS);
        for (i, m) in monsters.iter().enumerate() {
            assert!(grid.tile_at(m.position).is_some_and(|t| t.is_floor()));
            assert_ne!(m.position, player);
            assert!(monsters[i + 1..].iter().all(|o| o.position != m.position));
        }
    }

    #[test]
    fn test_no_floor_means_no_spawn() {
        let mut rng = GameRng::new(9);
        let grid = Grid::from_codes(&vec![vec![1; 5]; 5]).unwrap();
        let mut world = World::new();
        let spawned =
            MonsterSpawner::new().try_spawn(&mut world, &grid, Position::new(0, 0), 1, 1, &mut rng);
        assert!(spawned.is_none());
    }

    #[test]
    fn test_snapshot_restore_and_remove_dead() {
        let mut rng = GameRng::new(10);
        let mut world = World::new();
        let mut spawner = MonsterSpawner::new();
        spawner.spawn(&mut world, Position::new(1, 1), MonsterTemplate::regular(1, 1, &mut rng));
        let doomed = spawner.spawn(&mut world, Position::new(2, 2), MonsterTemplate::boss(1, 5));

        let saved = snapshot(&world);
        let mut restored = World::new();
        let mut fresh = MonsterSpawner::new();
        fresh.restore(&mut restored, &saved);
        assert_eq!(snapshot(&restored), saved);
        let next = fresh.spawn(&mut restored, Position::new(3, 3), MonsterTemplate::boss(1, 5));
        assert_eq!(*restored.get::<&MonsterId>(next).unwrap(), MonsterId(2));

        world.get::<&mut CombatStats>(doomed).unwrap().hp = 0;
        assert_eq!(remove_dead(&mut world), 1);
        assert_eq!(monster_count(&world), 1);
        assert_eq!(monster_at(&world, Position::new(2, 2)), None);
    }
}
