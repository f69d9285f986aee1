use std::collections::{HashSet, VecDeque};

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::generator::{MinefieldGenerator, RandomMinefield};
use crate::tile::Tile;
use crate::types::{Axis, CellCount, CellIndex, GridPos, cell_index, cell_pos, nd, neighbors};
use crate::{BoardConfig, Minefield};

/// Phases of one round.
///
/// Transitions are one-directional, `Initial -> Playing -> {Win | Lose}`;
/// only [`Board::reset`] re-enters `Initial`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Initial,
    Playing,
    Win,
    Lose,
}

impl Phase {
    pub const fn is_initial(self) -> bool {
        matches!(self, Self::Initial)
    }

    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    /// Whether the round has ended either way.
    pub const fn is_over(self) -> bool {
        matches!(self, Self::Win | Self::Lose)
    }
}

/// Outcome of a flag command.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Changed)
    }
}

/// Outcome of a reveal command.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// The game engine: owns the tile grid exclusively and drives it through a
/// round. Commands degrade to no-ops in an invalid phase or for an
/// out-of-range index; queries are always available.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    config: BoardConfig,
    tiles: Array2<Tile>,
    covered: CellCount,
    phase: Phase,
    failed: Option<CellIndex>,
}

impl Board {
    pub fn new(config: BoardConfig) -> Self {
        let config = BoardConfig::new(config.size, config.mines);
        let tiles =
            Array2::from_shape_fn(nd(config.size), |(x, y)| Tile::new((x as Axis, y as Axis)));
        Self {
            config,
            tiles,
            covered: config.total_cells(),
            phase: Phase::Initial,
            failed: None,
        }
    }

    /// Discards the current round and rebuilds a fresh covered grid.
    pub fn reset(&mut self, config: BoardConfig) {
        *self = Board::new(config);
    }

    pub const fn phase(&self) -> Phase {
        self.phase
    }

    pub const fn config(&self) -> BoardConfig {
        self.config
    }

    pub const fn size(&self) -> GridPos {
        self.config.size
    }

    pub const fn width(&self) -> Axis {
        self.config.size.0
    }

    pub const fn height(&self) -> Axis {
        self.config.size.1
    }

    /// Mines actually placed for this round (the requested count until the
    /// generator caps it).
    pub const fn mine_count(&self) -> CellCount {
        self.config.mines
    }

    pub const fn covered_tiles(&self) -> CellCount {
        self.covered
    }

    /// The mine whose reveal ended the round, when in [`Phase::Lose`].
    pub fn failed_tile(&self) -> Option<&Tile> {
        self.failed.and_then(|index| self.tile(index))
    }

    pub fn tile(&self, index: CellIndex) -> Option<&Tile> {
        (index < self.tiles.len()).then(|| &self.tiles[nd(cell_pos(index, self.width()))])
    }

    pub fn tile_at(&self, pos: GridPos) -> Option<&Tile> {
        (pos.0 < self.width() && pos.1 < self.height()).then(|| &self.tiles[nd(pos)])
    }

    /// Row-major iteration, matching the linear index order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        let (w, h) = self.size();
        (0..h).flat_map(move |y| (0..w).map(move |x| &self.tiles[nd((x, y))]))
    }

    /// Mines among the up-to-8 neighbors of `pos`.
    pub fn count_near_mines(&self, pos: GridPos) -> u8 {
        neighbors(pos, self.size()).filter(|&n| self.tiles[nd(n)].mine).count() as u8
    }

    /// Places the mines and starts the round, guaranteeing the tile at
    /// `first` is not one of them. Callable only in `Initial`.
    pub fn begin_round(&mut self, first: CellIndex) -> bool {
        if first >= self.tiles.len() {
            return false;
        }
        let seed = rand::random();
        self.begin_round_with(RandomMinefield::new(seed).exclude(first))
    }

    /// Variant of [`Board::begin_round`] with a caller-supplied generator,
    /// for seeded or scripted layouts. The caller keeps the safe-first-tile
    /// guarantee by excluding the tile it is about to reveal.
    pub fn begin_round_with(&mut self, generator: impl MinefieldGenerator) -> bool {
        if !self.phase.is_initial() {
            return false;
        }
        let field = generator.generate(&self.config);
        if field.size() != self.config.size {
            log::warn!(
                "generated {:?} layout for a {:?} board, ignoring",
                field.size(),
                self.config.size
            );
            return false;
        }
        self.apply_minefield(&field);
        self.phase = Phase::Playing;
        log::debug!(
            "round started: {}x{} with {} mines",
            self.width(),
            self.height(),
            self.config.mines
        );
        true
    }

    fn apply_minefield(&mut self, field: &Minefield) {
        self.config.mines = field.mine_count();
        let (w, h) = self.size();
        for y in 0..h {
            for x in 0..w {
                self.tiles[nd((x, y))].mine = field.contains_mine((x, y));
            }
        }
        for y in 0..h {
            for x in 0..w {
                if self.tiles[nd((x, y))].mine {
                    continue;
                }
                let count = self.count_near_mines((x, y));
                self.tiles[nd((x, y))].near_mines = count;
            }
        }
    }

    /// Uncovers the tile at `index`. Flagged tiles are protected from
    /// direct reveals; a zero-adjacency tile chain-uncovers its whole
    /// region; a mine ends the round.
    pub fn reveal(&mut self, index: CellIndex) -> RevealOutcome {
        if !self.phase.is_playing() {
            return RevealOutcome::NoChange;
        }
        let Some(tile) = self.tile(index) else {
            return RevealOutcome::NoChange;
        };
        if !tile.accepts_reveal() {
            return RevealOutcome::NoChange;
        }

        if tile.is_mine() {
            self.fail_round(index);
            return RevealOutcome::HitMine;
        }

        self.uncover(index);

        if self.covered <= self.config.mines {
            self.phase = Phase::Win;
            log::debug!("round won, {} tiles left covered", self.covered);
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    /// Flips the flag on a covered tile. Uncovered tiles, finished rounds,
    /// and unstarted rounds are left untouched.
    pub fn toggle_flag(&mut self, index: CellIndex) -> MarkOutcome {
        if !self.phase.is_playing() {
            return MarkOutcome::NoChange;
        }
        let Some(tile) = self.tile_mut(index) else {
            return MarkOutcome::NoChange;
        };
        if !tile.accepts_flag() {
            return MarkOutcome::NoChange;
        }
        tile.flagged = !tile.flagged;
        MarkOutcome::Changed
    }

    /// Iterative flood fill. The frontier only ever holds covered non-mine
    /// cells and the visited set keeps every cell from being enqueued
    /// twice, so the walk is bounded by the total cell count. Chain reveals
    /// do not consult flags; only direct clicks are flag-protected.
    fn uncover(&mut self, start: CellIndex) {
        let width = self.width();
        let size = self.size();
        let mut visited = HashSet::from([start]);
        let mut frontier = VecDeque::from([start]);

        while let Some(index) = frontier.pop_front() {
            let pos = cell_pos(index, width);
            let tile = &mut self.tiles[nd(pos)];
            if !tile.covered {
                continue;
            }
            tile.covered = false;
            let near_mines = tile.near_mines;
            self.covered -= 1;
            log::trace!("uncovered {pos:?}, near mines {near_mines}");

            if near_mines == 0 {
                for npos in neighbors(pos, size) {
                    let neighbor = &self.tiles[nd(npos)];
                    if neighbor.covered && !neighbor.mine {
                        let nindex = cell_index(npos, width);
                        if visited.insert(nindex) {
                            frontier.push_back(nindex);
                        }
                    }
                }
            }
        }
    }

    /// Loss sweep: record the failed tile, uncover every unflagged mine,
    /// leave flagged mines as they are, and cross out wrong flags.
    fn fail_round(&mut self, at: CellIndex) {
        self.phase = Phase::Lose;
        self.failed = Some(at);
        log::debug!("mine hit at {:?}", cell_pos(at, self.width()));

        for tile in self.tiles.iter_mut() {
            if tile.mine && !tile.flagged && tile.covered {
                tile.covered = false;
                self.covered -= 1;
            } else if !tile.mine && tile.flagged {
                tile.flagged = false;
                tile.crossed = true;
            }
        }
    }

    fn tile_mut(&mut self, index: CellIndex) -> Option<&mut Tile> {
        let width = self.width();
        (index < self.tiles.len()).then(move || &mut self.tiles[nd(cell_pos(index, width))])
    }
}
