//! Board and game-state engine for a grid-based mine-sweeping puzzle.
//!
//! A [`Board`] owns its tile grid and drives one round at a time through the
//! [`Phase`] state machine: mines are placed on the first reveal (never under
//! it), zero-adjacency regions chain-uncover, and the round ends in [`Phase::Win`]
//! once only mines remain covered or in [`Phase::Lose`] when a mine is revealed.
//! The [`geom`] module carries the vector math a presentation layer needs to
//! map pointer positions onto cells; rendering and event handling themselves
//! stay outside this crate.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use board::{Board, MarkOutcome, Phase, RevealOutcome};
pub use error::{GameError, Result};
pub use generator::{MinefieldGenerator, RandomMinefield};
pub use geom::{GridMetrics, Rect, Vec2};
pub use tile::Tile;
pub use types::{Axis, CellCount, CellIndex, GridPos, cell_area, cell_index, cell_pos, neighbors};

pub mod geom;

mod board;
mod error;
mod generator;
mod tile;
mod types;

use types::nd;

/// Difficulty presets, expressed as the fraction of cells that hold mines.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

impl Difficulty {
    pub const fn mine_density(self) -> f64 {
        match self {
            Self::Easy => 0.08,
            Self::Normal => 0.15,
            Self::Hard => 0.20,
        }
    }
}

/// Grid dimensions and mine count for one round.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub size: GridPos,
    pub mines: CellCount,
}

impl BoardConfig {
    /// Builds a config, clamping degenerate sizes and impossible mine
    /// counts instead of failing.
    pub fn new(size: GridPos, mines: CellCount) -> Self {
        let size = (size.0.max(1), size.1.max(1));
        let mines = mines.min(cell_area(size));
        Self { size, mines }
    }

    /// Strict variant of [`BoardConfig::new`].
    pub fn try_new(size: GridPos, mines: CellCount) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidCoords);
        }
        if mines > cell_area(size) {
            return Err(GameError::TooManyMines);
        }
        Ok(Self { size, mines })
    }

    /// Mine count from a density fraction, rounded up.
    pub fn from_density(size: GridPos, density: f64) -> Self {
        let size = (size.0.max(1), size.1.max(1));
        let cells = f64::from(cell_area(size));
        let mines = (cells * density.clamp(0.0, 1.0)).ceil() as CellCount;
        Self::new(size, mines)
    }

    pub fn from_difficulty(size: GridPos, difficulty: Difficulty) -> Self {
        Self::from_density(size, difficulty.mine_density())
    }

    pub const fn total_cells(&self) -> CellCount {
        cell_area(self.size)
    }
}

/// Mine mask produced by a [`MinefieldGenerator`]; the raw layout a round is
/// built from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Minefield {
    mask: Array2<bool>,
    mines: CellCount,
}

impl Minefield {
    pub(crate) fn from_mask(mask: Array2<bool>) -> Self {
        let mines = mask.iter().filter(|&&mine| mine).count() as CellCount;
        Self { mask, mines }
    }

    /// Hand-placed layout, for tests and scripted replays.
    pub fn from_mine_coords(size: GridPos, mines: &[GridPos]) -> Result<Self> {
        let mut mask = Array2::from_elem(nd(size), false);
        for &pos in mines {
            if pos.0 >= size.0 || pos.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            mask[nd(pos)] = true;
        }
        Ok(Self::from_mask(mask))
    }

    pub fn size(&self) -> GridPos {
        let (w, h) = self.mask.dim();
        (w as Axis, h as Axis)
    }

    pub const fn mine_count(&self) -> CellCount {
        self.mines
    }

    pub fn total_cells(&self) -> CellCount {
        self.mask.len() as CellCount
    }

    pub fn contains_mine(&self, pos: GridPos) -> bool {
        self.mask[nd(pos)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn density_presets_round_up() {
        assert_eq!(BoardConfig::from_difficulty((10, 10), Difficulty::Easy).mines, 8);
        assert_eq!(BoardConfig::from_difficulty((10, 10), Difficulty::Normal).mines, 15);
        assert_eq!(BoardConfig::from_difficulty((10, 10), Difficulty::Hard).mines, 20);
        // 9 cells * 0.08 = 0.72, rounded up
        assert_eq!(BoardConfig::from_difficulty((3, 3), Difficulty::Easy).mines, 1);
    }

    #[test]
    fn config_clamps_instead_of_failing() {
        let config = BoardConfig::new((0, 5), 999);
        assert_eq!(config.size, (1, 5));
        assert_eq!(config.mines, 5);
        assert_eq!(BoardConfig::from_density((4, 4), 2.0).mines, 16);
    }

    #[test]
    fn strict_config_rejects_impossible_requests() {
        assert_eq!(BoardConfig::try_new((3, 3), 10), Err(GameError::TooManyMines));
        assert_eq!(BoardConfig::try_new((0, 3), 1), Err(GameError::InvalidCoords));
        assert!(BoardConfig::try_new((3, 3), 9).is_ok());
    }

    #[test]
    fn minefield_from_coords_counts_and_bounds() {
        let field = Minefield::from_mine_coords((3, 3), &[(0, 0), (2, 2)]).unwrap();
        assert_eq!(field.mine_count(), 2);
        assert_eq!(field.size(), (3, 3));
        assert!(field.contains_mine((0, 0)));
        assert!(!field.contains_mine((1, 1)));
        assert_eq!(
            Minefield::from_mine_coords((3, 3), &[(3, 0)]),
            Err(GameError::InvalidCoords)
        );
    }

    #[test]
    fn duplicate_mine_coords_collapse() {
        let field = Minefield::from_mine_coords((2, 2), &[(1, 1), (1, 1)]).unwrap();
        assert_eq!(field.mine_count(), 1);
    }
}
