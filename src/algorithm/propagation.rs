use crate::{
    algorithm::bitset::TileBitset,
    io::error::{AlgorithmError, Result},
    spatial::{TileConstraintTable, WaveGrid},
};

/// Which adjacency rules propagation enforces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PropagationMode {
    /// Apply only the committed tile's own permitted-neighbor rule
    #[default]
    Directional,
    /// Also drop neighbor tiles whose own rule rejects the committed tile
    Symmetric,
}

/// Counters describing one propagation drain
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PropagationStats {
    /// Decided cells whose rule was applied to their neighbors
    pub cells_processed: usize,
    /// Tiles removed from neighbor domains
    pub tiles_removed: usize,
    /// Neighbors narrowed to a single tile and queued in turn
    pub cascaded_collapses: usize,
}

/// Worklist of decided cells whose consequences still need applying
///
/// Used as a stack so the most recently decided cell is processed first.
/// The worklist is empty before and after every successful drain.
#[derive(Debug, Default)]
pub struct Propagator {
    worklist: Vec<[usize; 2]>,
    mode: PropagationMode,
}

impl Propagator {
    /// Create an empty propagator
    pub const fn new(mode: PropagationMode) -> Self {
        Self {
            worklist: Vec::new(),
            mode,
        }
    }

    /// Rule set this propagator enforces
    pub const fn mode(&self) -> PropagationMode {
        self.mode
    }

    /// Queue a decided cell
    pub fn push(&mut self, row: usize, col: usize) {
        self.worklist.push([row, col]);
    }

    /// Number of queued cells
    pub fn len(&self) -> usize {
        self.worklist.len()
    }

    /// Check if nothing is queued
    pub fn is_empty(&self) -> bool {
        self.worklist.is_empty()
    }

    /// Drain the worklist, removing tiles that queued cells rule out
    ///
    /// A queued cell that is no longer decided is skipped. A neighbor narrowed
    /// to exactly one tile by this drain is queued so its own rule spreads.
    ///
    /// # Errors
    ///
    /// Returns [`AlgorithmError::Contradiction`] when a neighbor's domain
    /// becomes empty. The worklist is cleared before returning so the attempt
    /// can be discarded cleanly.
    pub fn propagate(
        &mut self,
        wave: &mut WaveGrid,
        table: &TileConstraintTable,
    ) -> Result<PropagationStats> {
        let mut stats = PropagationStats::default();

        while let Some([row, col]) = self.worklist.pop() {
            let Some(tile) = wave.collapsed_tile(row, col) else {
                continue;
            };
            stats.cells_processed += 1;

            let excluded = self.excluded_tiles(table, tile)?;
            let neighbors: Vec<[usize; 2]> = wave.neighbors(row, col).collect();

            for [n_row, n_col] in neighbors {
                let before = wave.cardinality(n_row, n_col);
                let mut removed = 0;
                for candidate in excluded.iter_ones() {
                    if wave.remove(n_row, n_col, candidate) {
                        removed += 1;
                    }
                }
                if removed == 0 {
                    continue;
                }
                stats.tiles_removed += removed;

                match wave.cardinality(n_row, n_col) {
                    0 => {
                        self.worklist.clear();
                        return Err(AlgorithmError::Contradiction {
                            position: [n_row, n_col],
                        });
                    }
                    1 if before > 1 => {
                        self.worklist.push([n_row, n_col]);
                        stats.cascaded_collapses += 1;
                    }
                    _ => {}
                }
            }
        }

        Ok(stats)
    }

    /// Tiles a neighbor of `tile` may no longer hold under this mode
    fn excluded_tiles(
        &self,
        table: &TileConstraintTable,
        tile: usize,
    ) -> Result<TileBitset> {
        let invalid_tile = || AlgorithmError::InvalidTileIndex {
            index: tile,
            max_tiles: table.len(),
        };

        let mut excluded = table.forbidden(tile).ok_or_else(invalid_tile)?.clone();
        if self.mode == PropagationMode::Symmetric {
            excluded.union_with(table.rejecting(tile).ok_or_else(invalid_tile)?);
        }
        Ok(excluded)
    }
}
