//! Turn-based dungeon crawl engine.
//!
//! Floors are carved with a drunkard's walk, routes are found with A*, and
//! fights are settled one swing at a time. Everything random draws from an
//! injected `rand::Rng`, so a seed reproduces a run exactly.

pub mod components;
pub mod config;
pub mod constants;
pub mod dungeon_gen;
pub mod engine;
pub mod error;
pub mod events;
pub mod grid;
pub mod pathfinding;
pub mod rng;
pub mod spawning;
pub mod systems;
pub mod tile;

pub use components::{CombatStats, Item, ItemKind, Monster, MonsterId, PlayerStats, Position, Rarity};
pub use config::Rules;
pub use dungeon_gen::{find_random_floor_cell, DungeonGenerator};
pub use engine::{GameSave, GameState, RunStatus, StepOutcome};
pub use error::{ConfigError, DungeonError, GridError, ItemError, TransitionError};
pub use grid::Grid;
pub use pathfinding::find_path;
pub use rng::GameRng;
pub use systems::{grant_experience, resolve_encounter, resolve_swing};
pub use tile::TileType;
