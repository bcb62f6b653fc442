//! Grid, tile and position values handed over by the game controller.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Zero-based board coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// A numbered piece occupying one cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tile {
    pub value: u32,
    pub x: usize,
    pub y: usize,
    /// Where the tile was before the last move, if it slid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_position: Option<Position>,
    /// The two tiles consumed to produce this one, in merge order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merged_from: Option<Box<[Tile; 2]>>,
}

impl Tile {
    pub fn new(value: u32, x: usize, y: usize) -> Self {
        Self {
            value,
            x,
            y,
            previous_position: None,
            merged_from: None,
        }
    }

    /// Mark the tile as having slid from `(x, y)`.
    pub fn slid_from(mut self, x: usize, y: usize) -> Self {
        self.previous_position = Some(Position::new(x, y));
        self
    }

    /// Attach the two source tiles of a merge.
    pub fn merged_from(mut self, first: Tile, second: Tile) -> Self {
        self.merged_from = Some(Box::new([first, second]));
        self
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    /// Number of wrapper elements this tile renders as, merge sources included.
    pub fn rendered_count(&self) -> usize {
        if self.previous_position.is_some() {
            return 1;
        }
        match &self.merged_from {
            Some(sources) => 1 + sources.iter().map(Tile::rendered_count).sum::<usize>(),
            None => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid size must be at least 1")]
    Empty,
    #[error("grid of size {size} has {columns} columns")]
    ColumnCount { size: usize, columns: usize },
    #[error("column {column} has {len} cells, expected {size}")]
    ColumnLength {
        column: usize,
        len: usize,
        size: usize,
    },
    #[error("tile at cell ({x}, {y}) claims position ({tile_x}, {tile_y})")]
    MisplacedTile {
        x: usize,
        y: usize,
        tile_x: usize,
        tile_y: usize,
    },
    #[error("position ({x}, {y}) is outside a grid of size {size}")]
    OutOfBounds { x: usize, y: usize, size: usize },
}

/// Square board of optional tiles, stored column-major (`cells[x][y]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    size: usize,
    cells: Vec<Vec<Option<Tile>>>,
}

#[derive(Deserialize)]
struct RawGrid {
    size: usize,
    cells: Vec<Vec<Option<Tile>>>,
}

impl TryFrom<RawGrid> for Grid {
    type Error = GridError;

    fn try_from(raw: RawGrid) -> Result<Self, Self::Error> {
        Grid::from_cells(raw.size, raw.cells)
    }
}

impl Grid {
    /// Create an empty grid.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![vec![None; size]; size],
        }
    }

    /// Build a grid from column-major cells, checking shape and tile positions.
    pub fn from_cells(size: usize, cells: Vec<Vec<Option<Tile>>>) -> Result<Self, GridError> {
        if size == 0 {
            return Err(GridError::Empty);
        }
        if cells.len() != size {
            return Err(GridError::ColumnCount {
                size,
                columns: cells.len(),
            });
        }
        for (x, column) in cells.iter().enumerate() {
            if column.len() != size {
                return Err(GridError::ColumnLength {
                    column: x,
                    len: column.len(),
                    size,
                });
            }
            for (y, cell) in column.iter().enumerate() {
                if let Some(tile) = cell {
                    if tile.x != x || tile.y != y {
                        return Err(GridError::MisplacedTile {
                            x,
                            y,
                            tile_x: tile.x,
                            tile_y: tile.y,
                        });
                    }
                }
            }
        }
        Ok(Self { size, cells })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cells(&self) -> &[Vec<Option<Tile>>] {
        &self.cells
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x < self.size && pos.y < self.size
    }

    pub fn cell(&self, pos: Position) -> Option<&Tile> {
        self.cells.get(pos.x)?.get(pos.y)?.as_ref()
    }

    /// Place a tile at its own position, replacing whatever was there.
    pub fn insert_tile(&mut self, tile: Tile) -> Result<(), GridError> {
        let pos = tile.position();
        if !self.in_bounds(pos) {
            return Err(GridError::OutOfBounds {
                x: pos.x,
                y: pos.y,
                size: self.size,
            });
        }
        self.cells[pos.x][pos.y] = Some(tile);
        Ok(())
    }

    pub fn remove_tile(&mut self, pos: Position) -> Option<Tile> {
        self.cells.get_mut(pos.x)?.get_mut(pos.y)?.take()
    }

    /// Occupied cells in storage order (x outer, y inner).
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.cells.iter().flat_map(|column| column.iter().flatten())
    }

    pub fn tile_count(&self) -> usize {
        self.tiles().count()
    }
}
