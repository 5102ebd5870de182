//! Drunkard's-walk floor generation.
//!
//! A single cursor wanders the interior carving rock into floor until the
//! coverage target is met. Because everything carved lies on one continuous
//! walk, every floor cell is reachable from every other by cardinal moves.

use rand::Rng;
use tracing::debug;

use crate::components::Position;
use crate::config::DungeonRules;
use crate::constants::*;
use crate::error::DungeonError;
use crate::grid::Grid;
use crate::tile::TileType;

const CARDINALS: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

pub struct DungeonGenerator {
    width: usize,
    height: usize,
    grid: Grid,
}

impl DungeonGenerator {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            grid: Grid::filled(width, height, TileType::Wall),
        }
    }

    /// Generate a floor at the default 40% coverage.
    pub fn generate(width: usize, height: usize, rng: &mut impl Rng) -> Result<Grid, DungeonError> {
        Self::generate_with_coverage(width, height, DUNGEON_FLOOR_COVERAGE, rng)
    }

    /// Generate a floor sized and tuned by the rule set.
    pub fn generate_floor(rules: &DungeonRules, rng: &mut impl Rng) -> Result<Grid, DungeonError> {
        Self::generate_with_coverage(rules.width, rules.height, rules.floor_coverage, rng)
    }

    pub fn generate_with_coverage(
        width: usize,
        height: usize,
        coverage: f64,
        rng: &mut impl Rng,
    ) -> Result<Grid, DungeonError> {
        let target = floor_target(width, height, coverage);
        let interior = width.saturating_sub(2 * DUNGEON_BORDER) * height.saturating_sub(2 * DUNGEON_BORDER);
        if width < 3 || height < 3 || target == 0 || interior < target {
            return Err(DungeonError::TooSmall {
                width,
                height,
                interior,
                target,
            });
        }

        let mut gen = Self::new(width, height);
        let steps = gen.carve(target, rng);
        gen.place_descent(rng)?;

        debug!(width, height, target, steps, "carved dungeon floor");
        Ok(gen.grid)
    }

    /// Walk until `target` cells are floor. Returns the number of steps taken.
    fn carve(&mut self, target: usize, rng: &mut impl Rng) -> usize {
        let min = DUNGEON_BORDER as i32;
        let max_x = (self.width - 1 - DUNGEON_BORDER) as i32;
        let max_y = (self.height - 1 - DUNGEON_BORDER) as i32;

        let mut x = (self.width / 2) as i32;
        let mut y = (self.height / 2) as i32;
        let mut carved = 0;
        let mut steps = 0;

        while carved < target {
            if let Some(tile) = self.grid.get_mut(x, y) {
                if *tile == TileType::Wall {
                    *tile = TileType::Floor;
                    carved += 1;
                }
            }

            // Clamped steps just stay put for this iteration
            let (dx, dy) = CARDINALS[rng.gen_range(0..CARDINALS.len())];
            x = (x + dx).clamp(min, max_x);
            y = (y + dy).clamp(min, max_y);
            steps += 1;
        }

        steps
    }

    fn place_descent(&mut self, rng: &mut impl Rng) -> Result<Position, DungeonError> {
        let pos = find_random_floor_cell(&self.grid, rng).ok_or(DungeonError::NoFloor)?;
        if let Some(tile) = self.grid.get_mut(pos.x, pos.y) {
            *tile = TileType::Descent;
        }
        Ok(pos)
    }
}

/// Number of floor cells a `width x height` map is carved to
pub fn floor_target(width: usize, height: usize, coverage: f64) -> usize {
    ((width * height) as f64 * coverage).floor() as usize
}

/// Pick a uniformly random plain-floor cell.
///
/// Rejection-samples up to [`FLOOR_SAMPLE_ATTEMPTS`] times, then falls back
/// to the first floor cell in row-major order. `None` only when the grid has
/// no floor at all.
pub fn find_random_floor_cell(grid: &Grid, rng: &mut impl Rng) -> Option<Position> {
    for _ in 0..FLOOR_SAMPLE_ATTEMPTS {
        let x = rng.gen_range(0..grid.width) as i32;
        let y = rng.gen_range(0..grid.height) as i32;
        if grid.get(x, y).is_some_and(|t| t.is_floor()) {
            return Some(Position::new(x, y));
        }
    }

    grid.positions()
        .find(|(_, tile)| tile.is_floor())
        .map(|(pos, _)| pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::GameRng;
    use proptest::prelude::*;
    use std::collections::{HashSet, VecDeque};

    /// Flood fill over cardinal moves from one walkable cell
    fn reachable_from(grid: &Grid, start: Position) -> HashSet<Position> {
        let mut seen = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);
        while let Some(pos) = queue.pop_front() {
            for (dx, dy) in CARDINALS {
                let next = pos.offset(dx, dy);
                if grid.is_walkable(next) && seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        seen
    }

    #[test]
    fn test_coverage_hits_target_exactly() {
        let mut rng = GameRng::new(7);
        let grid = DungeonGenerator::generate(60, 40, &mut rng).unwrap();
        assert_eq!(grid.walkable_count(), floor_target(60, 40, 0.4));
        assert_eq!(grid.walkable_count(), 960);
    }

    #[test]
    fn test_border_stays_solid() {
        let mut rng = GameRng::new(11);
        let grid = DungeonGenerator::generate(30, 20, &mut rng).unwrap();
        for x in 0..30 {
            assert_eq!(grid.get(x, 0), Some(TileType::Wall));
            assert_eq!(grid.get(x, 19), Some(TileType::Wall));
        }
        for y in 0..20 {
            assert_eq!(grid.get(0, y), Some(TileType::Wall));
            assert_eq!(grid.get(29, y), Some(TileType::Wall));
        }
    }

    #[test]
    fn test_single_descent_point() {
        let mut rng = GameRng::new(3);
        let grid = DungeonGenerator::generate(60, 40, &mut rng).unwrap();
        let descents = grid.tiles.iter().filter(|t| **t == TileType::Descent).count();
        assert_eq!(descents, 1);
        let pos = grid.descent_point().unwrap();
        // Overlays carved floor: it's inside the border and reachable
        assert!(pos.x >= 1 && pos.y >= 1 && pos.x <= 58 && pos.y <= 38);
    }

    #[test]
    fn test_same_seed_same_floor() {
        let a = DungeonGenerator::generate(40, 30, &mut GameRng::new(99)).unwrap();
        let b = DungeonGenerator::generate(40, 30, &mut GameRng::new(99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_too_small_fails_fast() {
        let mut rng = GameRng::new(1);
        assert!(matches!(
            DungeonGenerator::generate(2, 2, &mut rng),
            Err(DungeonError::TooSmall { .. })
        ));
        // 5x5: target 10 cells, interior only 9
        assert_eq!(
            DungeonGenerator::generate(5, 5, &mut rng),
            Err(DungeonError::TooSmall {
                width: 5,
                height: 5,
                interior: 9,
                target: 10
            })
        );
        assert!(DungeonGenerator::generate(10, 10, &mut rng).is_ok());
    }

    #[test]
    fn test_generate_floor_uses_rules() {
        let rules = DungeonRules {
            width: 20,
            height: 12,
            floor_coverage: 0.25,
        };
        let grid = DungeonGenerator::generate_floor(&rules, &mut GameRng::new(5)).unwrap();
        assert_eq!((grid.width, grid.height), (20, 12));
        assert_eq!(grid.walkable_count(), 60);
    }

    #[test]
    fn test_random_floor_cell_is_floor() {
        let mut rng = GameRng::new(21);
        let grid = DungeonGenerator::generate(60, 40, &mut rng).unwrap();
        for _ in 0..200 {
            let pos = find_random_floor_cell(&grid, &mut rng).unwrap();
            assert!(grid.tile_at(pos).unwrap().is_floor());
        }
    }

    #[test]
    fn test_random_floor_cell_falls_back_to_scan() {
        let mut grid = Grid::filled(50, 50, TileType::Wall);
        *grid.get_mut(49, 49).unwrap() = TileType::Start;
        let pos = find_random_floor_cell(&grid, &mut GameRng::new(0)).unwrap();
        assert_eq!(pos, Position::new(49, 49));
    }

    #[test]
    fn test_random_floor_cell_on_solid_rock() {
        let grid = Grid::filled(8, 8, TileType::Wall);
        assert_eq!(find_random_floor_cell(&grid, &mut GameRng::new(0)), None);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn generated_floors_are_connected(seed in any::<u64>(), width in 10_usize..=60, height in 10_usize..=40) {
            let grid = DungeonGenerator::generate(width, height, &mut GameRng::new(seed)).unwrap();
            let start = grid.descent_point().unwrap();
            let reached = reachable_from(&grid, start);
            prop_assert_eq!(reached.len(), grid.walkable_count(), "seed={} {}x{}", seed, width, height);
        }
    }
}
