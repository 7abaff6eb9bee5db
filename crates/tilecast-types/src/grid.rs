//! Board grid: a fixed-size square of tiles.
//!
//! The grid is a plain value. Cloning produces a fully independent copy, so
//! a grid handed out by reconstruction can be edited freely by the caller.
//! Coordinates are `(x, y)` with `x` the column and `y` the row.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::EnumString;
use thiserror::Error;

/// Default board edge length.
pub const DEFAULT_BOARD_SIZE: usize = 15;

/// Largest board edge a game may declare.
pub const MAX_BOARD_SIZE: usize = 64;

/// Errors from grid access and effect application.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Coordinate outside the board.
    #[error("square ({x}, {y}) is outside a {size}x{size} board")]
    OutOfBounds { x: usize, y: usize, size: usize },

    /// Two grids of different sizes were compared.
    #[error("grid size mismatch: expected {expected}, got {got}")]
    SizeMismatch { expected: usize, got: usize },

    /// Deserialized rows do not form a square.
    #[error("row {row} has {len} tiles on a board of size {size}")]
    Ragged { row: usize, len: usize, size: usize },
}

/// Visibility/commit state of a single tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum TileState {
    /// Editable, not yet committed by a play.
    #[default]
    Unlocked,
    /// Committed by a play.
    Locked,
    /// Highlighted in the current frame.
    Current,
}

impl TileState {
    /// Parse from string (case-insensitive).
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        <Self as FromStr>::from_str(s).ok()
    }

    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            TileState::Unlocked => "unlocked",
            TileState::Locked => "locked",
            TileState::Current => "current",
        }
    }
}

impl fmt::Display for TileState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One square of the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub letter: Option<char>,
    pub state: TileState,
}

impl Tile {
    fn glyph(&self) -> char {
        match (self.letter, self.state) {
            (None, TileState::Current) => '*',
            (None, _) => '.',
            (Some(c), TileState::Unlocked) => c.to_ascii_lowercase(),
            (Some(c), _) => c.to_ascii_uppercase(),
        }
    }
}

/// A letter change between two grids, carrying the newer grid's letter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellDiff {
    pub x: usize,
    pub y: usize,
    pub letter: Option<char>,
}

/// Square board of tiles, stored row-major (`rows[y][x]`).
///
/// The edge length is fixed at construction; there is no resize.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Tile>>", into = "Vec<Vec<Tile>>")]
pub struct Grid {
    rows: Vec<Vec<Tile>>,
}

impl TryFrom<Vec<Vec<Tile>>> for Grid {
    type Error = GridError;

    fn try_from(rows: Vec<Vec<Tile>>) -> Result<Self, Self::Error> {
        let size = rows.len();
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != size) {
            return Err(GridError::Ragged { row, len: r.len(), size });
        }
        Ok(Self { rows })
    }
}

impl From<Grid> for Vec<Vec<Tile>> {
    fn from(grid: Grid) -> Self {
        grid.rows
    }
}

impl Grid {
    /// A board with every tile empty and unlocked.
    pub fn empty(size: usize) -> Self {
        Self {
            rows: vec![vec![Tile::default(); size]; size],
        }
    }

    /// Edge length.
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.size() && y < self.size()
    }

    fn check(&self, x: usize, y: usize) -> Result<(), GridError> {
        if self.in_bounds(x, y) {
            Ok(())
        } else {
            Err(GridError::OutOfBounds {
                x,
                y,
                size: self.size(),
            })
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Result<&Tile, GridError> {
        self.check(x, y)?;
        Ok(&self.rows[y][x])
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> Result<&mut Tile, GridError> {
        self.check(x, y)?;
        Ok(&mut self.rows[y][x])
    }

    /// Letter at `(x, y)`, `None` for an empty or out-of-range square.
    pub fn letter_at(&self, x: usize, y: usize) -> Option<char> {
        self.get(x, y).ok().and_then(|t| t.letter)
    }

    /// Iterate `(x, y, tile)` in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = (usize, usize, &Tile)> {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(y, row)| row.iter().enumerate().map(move |(x, t)| (x, y, t)))
    }

    /// Number of squares holding a letter.
    pub fn letter_count(&self) -> usize {
        self.tiles().filter(|(_, _, t)| t.letter.is_some()).count()
    }

    /// Every square whose letter differs between `self` and `newer`.
    ///
    /// Editors use this to detect letters the user typed onto a board.
    pub fn diff(&self, newer: &Grid) -> Result<Vec<CellDiff>, GridError> {
        if self.size() != newer.size() {
            return Err(GridError::SizeMismatch {
                expected: self.size(),
                got: newer.size(),
            });
        }
        Ok(self
            .tiles()
            .zip(newer.tiles())
            .filter(|((_, _, old), (_, _, new))| old.letter != new.letter)
            .map(|((x, y, _), (_, _, new))| CellDiff {
                x,
                y,
                letter: new.letter,
            })
            .collect())
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            let line: Vec<String> = row.iter().map(|t| t.glyph().to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_grid() {
        let grid = Grid::empty(DEFAULT_BOARD_SIZE);
        assert_eq!(grid.size(), 15);
        assert_eq!(grid.tiles().count(), 225);
        assert!(grid.tiles().all(|(_, _, t)| *t == Tile::default()));
        assert_eq!(grid.letter_count(), 0);
    }

    #[test]
    fn test_clone_is_independent() {
        let original = Grid::empty(3);
        let mut copy = original.clone();
        copy.get_mut(1, 2).unwrap().letter = Some('Q');
        assert_eq!(original.letter_at(1, 2), None);
        assert_eq!(copy.letter_at(1, 2), Some('Q'));
    }

    #[test]
    fn test_get_out_of_bounds() {
        let grid = Grid::empty(3);
        assert_eq!(
            grid.get(3, 0),
            Err(GridError::OutOfBounds { x: 3, y: 0, size: 3 })
        );
        assert!(!grid.in_bounds(0, 3));
        assert_eq!(grid.letter_at(7, 7), None);
    }

    #[test]
    fn test_diff_reports_letter_changes_only() {
        let old = Grid::empty(4);
        let mut new = old.clone();
        new.get_mut(2, 1).unwrap().letter = Some('A');
        new.get_mut(0, 3).unwrap().state = TileState::Current;

        let diffs = old.diff(&new).unwrap();
        assert_eq!(diffs, vec![CellDiff { x: 2, y: 1, letter: Some('A') }]);

        let back = new.diff(&old).unwrap();
        assert_eq!(back, vec![CellDiff { x: 2, y: 1, letter: None }]);
    }

    #[test]
    fn test_diff_is_row_major() {
        let old = Grid::empty(3);
        let mut new = old.clone();
        new.get_mut(0, 2).unwrap().letter = Some('Z');
        new.get_mut(2, 0).unwrap().letter = Some('A');
        let coords: Vec<_> = old.diff(&new).unwrap().iter().map(|d| (d.x, d.y)).collect();
        assert_eq!(coords, vec![(2, 0), (0, 2)]);
    }

    #[test]
    fn test_diff_size_mismatch() {
        let result = Grid::empty(3).diff(&Grid::empty(4));
        assert_eq!(result, Err(GridError::SizeMismatch { expected: 3, got: 4 }));
    }

    #[test]
    fn test_display_glyphs() {
        let mut grid = Grid::empty(2);
        *grid.get_mut(0, 0).unwrap() = Tile { letter: Some('a'), state: TileState::Locked };
        *grid.get_mut(1, 0).unwrap() = Tile { letter: Some('B'), state: TileState::Unlocked };
        grid.get_mut(0, 1).unwrap().state = TileState::Current;
        assert_eq!(grid.to_string(), "A b\n* .\n");
    }

    #[test]
    fn test_tile_state_parse() {
        assert_eq!(TileState::from_str("LOCKED"), Some(TileState::Locked));
        assert_eq!(TileState::from_str("current"), Some(TileState::Current));
        assert_eq!(TileState::from_str("hidden"), None);
        assert_eq!(TileState::Unlocked.to_string(), "unlocked");
    }

    #[test]
    fn test_grid_serde_roundtrip() {
        let mut grid = Grid::empty(2);
        grid.get_mut(1, 1).unwrap().letter = Some('X');
        let json = serde_json::to_string(&grid).unwrap();
        let parsed: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(grid, parsed);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let rows = vec![vec![Tile::default(); 2], vec![Tile::default(); 1]];
        assert_eq!(
            Grid::try_from(rows).unwrap_err(),
            GridError::Ragged { row: 1, len: 1, size: 2 }
        );
        assert!(serde_json::from_str::<Grid>("[[],[]]").is_err());
    }
}
