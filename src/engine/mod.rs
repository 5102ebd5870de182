//! Game engine - owns all run state and provides a clean API to the application shell.
//!
//! The engine handles:
//! - Game state (monster world, grid, player, rng)
//! - Player steps and the fights they start
//! - Monster turns and floor transitions
//!
//! The application shell (main.rs) only decides what the player does next
//! and reports what happened.

pub mod floor_transition;
mod game_state;

pub use floor_transition::{can_descend, descend, FloorTransition};
pub use game_state::{GameSave, GameState, RunStatus, StepOutcome};
