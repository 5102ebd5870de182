use serde::{Deserialize, Serialize};

use crate::error::GridError;

/// Cell kinds on a dungeon floor.
///
/// The numeric codes are the persisted representation, so they never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum TileType {
    Floor,
    Wall,
    /// Legacy player-start marker; behaves exactly like floor
    Start,
    /// Stairs down to the next floor
    Descent,
}

impl TileType {
    pub const fn code(self) -> u8 {
        match self {
            TileType::Floor => 0,
            TileType::Wall => 1,
            TileType::Start => 2,
            TileType::Descent => 3,
        }
    }

    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(TileType::Floor),
            1 => Some(TileType::Wall),
            2 => Some(TileType::Start),
            3 => Some(TileType::Descent),
            _ => None,
        }
    }

    /// Anything but rock can be stood on
    pub fn is_walkable(&self) -> bool {
        !matches!(self, TileType::Wall)
    }

    /// Plain floor, the only cells spawns land on
    pub fn is_floor(&self) -> bool {
        matches!(self, TileType::Floor | TileType::Start)
    }
}

impl From<TileType> for u8 {
    fn from(tile: TileType) -> u8 {
        tile.code()
    }
}

impl TryFrom<u8> for TileType {
    type Error = GridError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        TileType::from_code(code).ok_or(GridError::UnknownCode(code))
    }
}
