use serde::{Deserialize, Serialize};

use crate::components::Position;
use crate::error::GridError;
use crate::tile::TileType;

/// One dungeon floor, stored row-major.
///
/// Persists as a 2D array of tile codes, the same shape the save files use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<TileType>>", into = "Vec<Vec<TileType>>")]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    pub tiles: Vec<TileType>,
}

impl Grid {
    /// Solid rock
    pub fn filled(width: usize, height: usize, tile: TileType) -> Self {
        Self {
            width,
            height,
            tiles: vec![tile; width * height],
        }
    }

    pub fn from_rows(rows: Vec<Vec<TileType>>) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(GridError::Empty);
        }

        let mut tiles = Vec::with_capacity(width * height);
        for (row, cells) in rows.into_iter().enumerate() {
            if cells.len() != width {
                return Err(GridError::Ragged {
                    row,
                    expected: width,
                    found: cells.len(),
                });
            }
            tiles.extend(cells);
        }

        Ok(Self {
            width,
            height,
            tiles,
        })
    }

    /// Parse raw save-file codes
    pub fn from_codes(rows: &[Vec<u8>]) -> Result<Self, GridError> {
        let rows = rows
            .iter()
            .map(|row| row.iter().map(|&c| TileType::try_from(c)).collect())
            .collect::<Result<Vec<Vec<TileType>>, _>>()?;
        Self::from_rows(rows)
    }

    pub fn rows(&self) -> Vec<Vec<TileType>> {
        self.tiles.chunks(self.width).map(<[TileType]>::to_vec).collect()
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    pub fn get(&self, x: i32, y: i32) -> Option<TileType> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(self.tiles[y as usize * self.width + x as usize])
    }

    pub fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut TileType> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(&mut self.tiles[y as usize * self.width + x as usize])
    }

    pub fn tile_at(&self, pos: Position) -> Option<TileType> {
        self.get(pos.x, pos.y)
    }

    /// Out-of-bounds counts as not walkable
    pub fn is_walkable(&self, pos: Position) -> bool {
        self.tile_at(pos).is_some_and(|t| t.is_walkable())
    }

    /// Only in-bounds rock counts as a wall
    pub fn is_wall(&self, pos: Position) -> bool {
        self.tile_at(pos) == Some(TileType::Wall)
    }

    pub fn positions(&self) -> impl Iterator<Item = (Position, TileType)> + '_ {
        self.tiles.iter().enumerate().map(move |(i, &tile)| {
            let pos = Position::new((i % self.width) as i32, (i / self.width) as i32);
            (pos, tile)
        })
    }

    /// Plain floor cells, excluding the descent point
    pub fn floor_cells(&self) -> Vec<Position> {
        self.positions()
            .filter(|(_, tile)| tile.is_floor())
            .map(|(pos, _)| pos)
            .collect()
    }

    pub fn walkable_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_walkable()).count()
    }

    pub fn descent_point(&self) -> Option<Position> {
        self.positions()
            .find(|(_, tile)| *tile == TileType::Descent)
            .map(|(pos, _)| pos)
    }
}

impl TryFrom<Vec<Vec<TileType>>> for Grid {
    type Error = GridError;

    fn try_from(rows: Vec<Vec<TileType>>) -> Result<Self, Self::Error> {
        Grid::from_rows(rows)
    }
}

impl From<Grid> for Vec<Vec<TileType>> {
    fn from(grid: Grid) -> Self {
        grid.rows()
    }
}
