use ndarray::Array2;
use rand::prelude::*;
use smallvec::SmallVec;

use super::MinefieldGenerator;
use crate::types::{CellIndex, cell_pos, nd};
use crate::{BoardConfig, Minefield};

/// Uniformly random layout with support for excluded cells, so the tile the
/// player reveals first is never a mine. Deterministic for a given seed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RandomMinefield {
    seed: u64,
    exclude: SmallVec<[CellIndex; 4]>,
}

impl RandomMinefield {
    pub fn new(seed: u64) -> Self {
        Self { seed, exclude: SmallVec::new() }
    }

    /// Marks a cell as never receiving a mine.
    #[must_use]
    pub fn exclude(mut self, index: CellIndex) -> Self {
        if !self.exclude.contains(&index) {
            self.exclude.push(index);
        }
        self
    }
}

impl MinefieldGenerator for RandomMinefield {
    fn generate(self, config: &BoardConfig) -> Minefield {
        let total = config.total_cells() as usize;
        let candidates: Vec<CellIndex> =
            (0..total).filter(|index| !self.exclude.contains(index)).collect();

        let mut count = config.mines as usize;
        if count > candidates.len() {
            log::warn!(
                "requested {} mines but only {} cells are available, capping",
                count,
                candidates.len()
            );
            count = candidates.len();
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mask = Array2::from_elem(nd(config.size), false);
        for &index in candidates.choose_multiple(&mut rng, count) {
            mask[nd(cell_pos(index, config.size.0))] = true;
        }

        Minefield::from_mask(mask)
    }
}
