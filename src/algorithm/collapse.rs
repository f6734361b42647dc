use crate::{
    algorithm::{
        executor::RandomSelector,
        propagation::{PropagationStats, Propagator},
    },
    io::error::{AlgorithmError, Result},
    spatial::{TileConstraintTable, WaveGrid},
};
use rand::Rng;

/// Outcome of committing one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollapseOutcome {
    /// Tile the cell was committed to
    pub tile: usize,
    /// What the follow-up propagation did
    pub propagation: PropagationStats,
}

/// Commit a cell to one of its remaining tiles and propagate the consequences
///
/// The tile is drawn uniformly from the cell's domain. The cell is queued on the
/// propagator, which is drained before this returns.
///
/// # Errors
///
/// Returns an error if:
/// - The position is outside the grid
/// - The cell has no tile left (reported as a contradiction)
/// - Propagation empties a neighbor's domain
pub fn collapse_cell<R: Rng>(
    wave: &mut WaveGrid,
    propagator: &mut Propagator,
    table: &TileConstraintTable,
    random: &mut RandomSelector<R>,
    position: [usize; 2],
) -> Result<CollapseOutcome> {
    let [row, col] = position;
    let domain = wave.domain(row, col).ok_or(AlgorithmError::OutOfBounds {
        position,
        dimensions: wave.dimensions(),
    })?;

    let tile = random
        .choose_tile(domain)
        .ok_or(AlgorithmError::Contradiction { position })?;

    wave.force(row, col, tile)?;
    propagator.push(row, col);
    let propagation = propagator.propagate(wave, table)?;

    Ok(CollapseOutcome { tile, propagation })
}
