//! One-sweep removal of isolated tiles after the wave is fully collapsed
//!
//! A cell whose decided neighbors all agree on one other tile is switched to
//! that tile. Propagation is not re-run afterwards, so in relaxed mode the
//! sweep may leave pairs the constraint table does not allow.

use crate::spatial::{TileConstraintTable, WaveGrid};

/// How the smoothing pass treats the constraint table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SmoothingMode {
    /// Skip smoothing entirely
    Off,
    /// Replace every isolated tile, even where the result breaks adjacency rules
    #[default]
    Relaxed,
    /// Replace an isolated tile only when the replacement permits itself
    Consistent,
}

/// Sweep the wave once, reassigning isolated cells to their neighbors' tile
///
/// Cells are visited row-major and updated in place, so later cells see
/// earlier reassignments. Undecided cells and cells without decided
/// neighbors are left alone.
///
/// Returns the number of cells that were reassigned.
pub fn smooth(wave: &mut WaveGrid, table: &TileConstraintTable, mode: SmoothingMode) -> usize {
    if mode == SmoothingMode::Off {
        return 0;
    }

    let (rows, cols) = wave.dimensions();
    let mut reassigned = 0;

    for row in 0..rows {
        for col in 0..cols {
            let Some(current) = wave.collapsed_tile(row, col) else {
                continue;
            };
            let Some(replacement) = agreed_neighbor_tile(wave, row, col) else {
                continue;
            };
            if replacement == current {
                continue;
            }
            if mode == SmoothingMode::Consistent && !table.permits(replacement, replacement) {
                continue;
            }
            if wave.force(row, col, replacement).is_ok() {
                reassigned += 1;
            }
        }
    }

    reassigned
}

/// Tile shared by every decided neighbor, if they all agree
fn agreed_neighbor_tile(wave: &WaveGrid, row: usize, col: usize) -> Option<usize> {
    let mut agreed = None;
    for [n_row, n_col] in wave.neighbors(row, col) {
        let Some(tile) = wave.collapsed_tile(n_row, n_col) else {
            continue;
        };
        match agreed {
            None => agreed = Some(tile),
            Some(existing) if existing != tile => return None,
            Some(_) => {}
        }
    }
    agreed
}
