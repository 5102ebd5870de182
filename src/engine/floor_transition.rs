//! Descending to the next floor.

use rand::Rng;
use tracing::info;

use crate::components::{PlayerStats, Position};
use crate::config::DungeonRules;
use crate::dungeon_gen::{find_random_floor_cell, DungeonGenerator};
use crate::error::{DungeonError, TransitionError};
use crate::grid::Grid;
use crate::tile::TileType;

/// Result of a floor transition.
#[derive(Debug, Clone, PartialEq)]
pub struct FloorTransition {
    pub grid: Grid,
    /// Where the player lands on the new floor
    pub spawn: Position,
    /// The player with `floor` advanced; nothing else changes
    pub player: PlayerStats,
}

impl FloorTransition {
    pub fn floor(&self) -> u32 {
        self.player.floor
    }
}

/// Check whether the player is standing on the stairs.
pub fn can_descend(grid: &Grid, position: Position) -> bool {
    grid.tile_at(position) == Some(TileType::Descent)
}

/// Take the stairs at `position` down to a freshly generated floor.
///
/// Monsters are not carried over; the caller clears its world.
pub fn descend(
    player: &PlayerStats,
    position: Position,
    grid: &Grid,
    rules: &DungeonRules,
    rng: &mut impl Rng,
) -> Result<FloorTransition, TransitionError> {
    if !can_descend(grid, position) {
        return Err(TransitionError::NoDescentHere {
            x: position.x,
            y: position.y,
        });
    }

    let new_grid = DungeonGenerator::generate_floor(rules, rng)?;
    let spawn = find_random_floor_cell(&new_grid, rng).ok_or(DungeonError::NoFloor)?;

    let mut player = player.clone();
    player.floor = player.floor.max(1) + 1;
    info!(floor = player.floor, x = spawn.x, y = spawn.y, "descended");

    Ok(FloorTransition {
        grid: new_grid,
        spawn,
        player,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::GameRng;

    fn small_rules() -> DungeonRules {
        DungeonRules {
            width: 30,
            height: 20,
            ..Default::default()
        }
    }

    #[test]
    fn test_descend_from_stairs() {
        let mut rng = GameRng::new(11);
        let grid = DungeonGenerator::generate_floor(&small_rules(), &mut rng).unwrap();
        let stairs = grid.descent_point().unwrap();
        let mut player = PlayerStats::new();
        player.xp = 42;

        let next = descend(&player, stairs, &grid, &small_rules(), &mut rng).unwrap();
        assert_eq!(next.floor(), 2);
        assert_eq!(next.player.xp, 42);
        assert_eq!((next.grid.width, next.grid.height), (30, 20));
        assert!(next.grid.tile_at(next.spawn).is_some_and(|t| t.is_floor()));
    }

    #[test]
    fn test_descend_off_stairs_fails() {
        let mut rng = GameRng::new(12);
        let grid = DungeonGenerator::generate_floor(&small_rules(), &mut rng).unwrap();
        let elsewhere = grid.floor_cells()[0];
        let result = descend(&PlayerStats::new(), elsewhere, &grid, &small_rules(), &mut rng);
        assert_eq!(
            result,
            Err(TransitionError::NoDescentHere {
                x: elsewhere.x,
                y: elsewhere.y
            })
        );
    }

    #[test]
    fn test_descend_reports_bad_dimensions() {
        let mut rng = GameRng::new(13);
        let grid = Grid::from_codes(&[vec![3]]).unwrap();
        let rules = DungeonRules {
            width: 2,
            height: 2,
            ..Default::default()
        };
        let result = descend(&PlayerStats::new(), Position::new(0, 0), &grid, &rules, &mut rng);
        assert!(matches!(
            result,
            Err(TransitionError::Dungeon(DungeonError::TooSmall { .. }))
        ));
    }

    #[test]
    fn test_zero_floor_counts_as_first() {
        let mut rng = GameRng::new(14);
        let grid = Grid::from_codes(&[vec![3, 0]]).unwrap();
        let mut player = PlayerStats::new();
        player.floor = 0;
        let next = descend(&player, Position::new(0, 0), &grid, &small_rules(), &mut rng).unwrap();
        assert_eq!(next.floor(), 2);
    }
}
