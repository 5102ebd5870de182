//! Error types for the fallible edges of the engine.
//!
//! Gameplay outcomes (a missed swing, an unreachable tile) are ordinary
//! values, not errors. Only malformed input and invalid requests land here.

use std::path::PathBuf;

use thiserror::Error;

/// A grid that can't be represented as a rectangular floor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid has no cells")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown tile code {0}")]
    UnknownCode(u8),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DungeonError {
    /// The walk can't reach its floor target inside the 1-cell border
    #[error(
        "{width}x{height} dungeon is too small: interior holds {interior} cells, {target} floor cells required"
    )]
    TooSmall {
        width: usize,
        height: usize,
        interior: usize,
        target: usize,
    },

    #[error("generated floor has no walkable cell to spawn on")]
    NoFloor,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read rules file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid rules: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid rules: {0}")]
    Invalid(String),
}

/// Rejected inventory or skill use. Nothing is changed when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemError {
    #[error("item {0} is not in the inventory")]
    NotInInventory(u64),

    #[error("{0} can't be equipped")]
    NotEquippable(String),

    #[error("{0} can't be consumed")]
    NotConsumable(String),

    #[error("nothing equipped in that slot")]
    SlotEmpty,

    #[error("health is already full")]
    FullHealth,

    #[error("heal skill ready in {remaining_ms}ms")]
    OnCooldown { remaining_ms: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("no stairs at ({x}, {y})")]
    NoDescentHere { x: i32, y: i32 },

    #[error(transparent)]
    Dungeon(#[from] DungeonError),
}
