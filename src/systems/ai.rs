//! Monster movement between player actions.
//!
//! Monsters within [`AGGRO_RADIUS`] (Manhattan) step toward the player along
//! the longer axis; the rest wander. A step onto the player is an attack,
//! which the caller resolves as an encounter.

use hecs::{Entity, World};
use rand::Rng;

use crate::components::{MonsterId, Position};
use crate::constants::*;
use crate::grid::Grid;

const CARDINALS: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// What a monster decided this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonsterIntent {
    Wait,
    Move(Position),
    Attack,
}

/// Single chase step: close the larger of the two gaps
fn chase_step(from: Position, target: Position) -> (i32, i32) {
    let dx = (target.x - from.x).signum();
    let dy = (target.y - from.y).signum();
    if (target.x - from.x).abs() > (target.y - from.y).abs() {
        (dx, 0)
    } else {
        (0, dy)
    }
}

/// Decide one monster's move. `occupied` reports cells held by other monsters.
pub fn decide_intent(
    pos: Position,
    player: Position,
    grid: &Grid,
    occupied: impl Fn(Position) -> bool,
    rng: &mut impl Rng,
) -> MonsterIntent {
    let (dx, dy) = if pos.manhattan(player) <= AGGRO_RADIUS {
        chase_step(pos, player)
    } else {
        if !rng.gen_bool(IDLE_WANDER_CHANCE) {
            return MonsterIntent::Wait;
        }
        CARDINALS[rng.gen_range(0..CARDINALS.len())]
    };

    let next = pos.offset(dx, dy);
    if next == pos || !grid.is_walkable(next) {
        return MonsterIntent::Wait;
    }
    if next == player {
        return MonsterIntent::Attack;
    }
    if occupied(next) {
        return MonsterIntent::Wait;
    }
    MonsterIntent::Move(next)
}

/// Move every monster once. Returns the monsters that bumped into the player,
/// in id order.
pub fn monster_tick(world: &mut World, grid: &Grid, player: Position, rng: &mut impl Rng) -> Vec<Entity> {
    let mut order: Vec<(MonsterId, Entity)> = world
        .query::<&MonsterId>()
        .iter()
        .map(|(entity, id)| (*id, entity))
        .collect();
    order.sort_by_key(|(id, _)| *id);

    let mut attackers = Vec::new();
    for (_, entity) in order {
        let Ok(pos) = world.get::<&Position>(entity).map(|p| *p) else {
            continue;
        };

        let intent = {
            let occupied = |cell: Position| {
                world
                    .query::<&Position>()
                    .with::<&MonsterId>()
                    .iter()
                    .any(|(other, p)| other != entity && *p == cell)
            };
            decide_intent(pos, player, grid, occupied, rng)
        };

        match intent {
            MonsterIntent::Wait => {}
            MonsterIntent::Attack => attackers.push(entity),
            MonsterIntent::Move(next) => {
                if let Ok(mut p) = world.get::<&mut Position>(entity) {
                    *p = next;
                }
            }
        }
    }
    attackers
}
