use serde::{Deserialize, Serialize};

use crate::types::GridPos;

/// State of a single grid cell for one round. Tiles are created covered and
/// only the engine mutates them; everything else reads through the getters.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    position: GridPos,
    pub(crate) covered: bool,
    pub(crate) flagged: bool,
    pub(crate) crossed: bool,
    pub(crate) mine: bool,
    pub(crate) near_mines: u8,
}

impl Tile {
    pub(crate) const fn new(position: GridPos) -> Self {
        Self {
            position,
            covered: true,
            flagged: false,
            crossed: false,
            mine: false,
            near_mines: 0,
        }
    }

    pub const fn position(&self) -> GridPos {
        self.position
    }

    pub const fn is_covered(&self) -> bool {
        self.covered
    }

    pub const fn is_flagged(&self) -> bool {
        self.flagged
    }

    /// Marked as an incorrect flag by the loss sweep.
    pub const fn is_crossed(&self) -> bool {
        self.crossed
    }

    pub const fn is_mine(&self) -> bool {
        self.mine
    }

    /// Mines among the up-to-8 neighbors; meaningless for mine tiles.
    pub const fn near_mines(&self) -> u8 {
        self.near_mines
    }

    /// Whether a flag command may touch this tile.
    pub const fn accepts_flag(&self) -> bool {
        self.covered
    }

    /// Whether a direct reveal may touch this tile. Flags protect a tile
    /// from direct reveals only; chain reveals do not consult this.
    pub const fn accepts_reveal(&self) -> bool {
        self.covered && !self.flagged
    }
}
