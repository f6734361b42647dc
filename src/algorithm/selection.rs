//! Minimum entropy cell selection
//!
//! Entropy here is simply the number of tiles still possible at a cell.
//! Only undecided cells (two or more tiles left) are candidates.

use crate::{
    algorithm::executor::RandomSelector,
    io::error::{AlgorithmError, Result},
    spatial::WaveGrid,
};
use rand::Rng;

/// Collect every undecided cell sharing the lowest domain cardinality
///
/// Cells are returned in row-major order.
///
/// # Errors
///
/// Returns [`AlgorithmError::Contradiction`] if a cell with an empty domain is
/// found during the scan
pub fn minimum_entropy_candidates(wave: &WaveGrid) -> Result<Vec<[usize; 2]>> {
    let mut min_entropy = usize::MAX;
    let mut candidates = Vec::new();

    for (position, domain) in wave.cells() {
        match domain.count() {
            0 => return Err(AlgorithmError::Contradiction { position }),
            1 => {}
            entropy if entropy < min_entropy => {
                min_entropy = entropy;
                candidates.clear();
                candidates.push(position);
            }
            entropy if entropy == min_entropy => candidates.push(position),
            _ => {}
        }
    }

    Ok(candidates)
}

/// Pick the next cell to collapse
///
/// Ties between equally constrained cells are broken uniformly at random.
/// Returns `None` once every cell is decided.
///
/// # Errors
///
/// Returns [`AlgorithmError::Contradiction`] if a cell with an empty domain is
/// found during the scan
pub fn select_cell<R: Rng>(
    wave: &WaveGrid,
    random: &mut RandomSelector<R>,
) -> Result<Option<[usize; 2]>> {
    let candidates = minimum_entropy_candidates(wave)?;
    Ok(random.choose(&candidates).copied())
}
