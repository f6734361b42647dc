//! Wave state over a fixed grid and the finished map extracted from it
//!
//! The wave keeps one domain bitset per cell, row-major with rows outer and
//! columns inner. That iteration order is also the tie-break order used by
//! entropy selection, so nothing here may reorder cells.

use ndarray::Array2;
use std::fmt;

use crate::algorithm::bitset::TileBitset;
use crate::io::error::{AlgorithmError, Result};
use crate::spatial::tiles::TileConstraintTable;

/// Cardinal direction between neighboring cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards row 0
    Up,
    /// Towards the last row
    Down,
    /// Towards column 0
    Left,
    /// Towards the last column
    Right,
}

impl Direction {
    /// All directions in propagation order
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Row and column step for this direction
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }
}

/// Per-cell tile domains for one solve attempt
///
/// Every domain starts full. Domains only shrink through [`WaveGrid::remove`] or
/// get pinned through [`WaveGrid::force`]; the grid never grows a domain back.
#[derive(Debug, Clone)]
pub struct WaveGrid {
    domains: Array2<TileBitset>,
    tile_count: usize,
    decided: usize,
}

impl WaveGrid {
    /// Create a wave where every tile is possible in every cell
    pub fn new(rows: usize, cols: usize, tile_count: usize) -> Self {
        let decided = if tile_count == 1 { rows * cols } else { 0 };
        Self {
            domains: Array2::from_elem((rows, cols), TileBitset::all(tile_count)),
            tile_count,
            decided,
        }
    }

    /// Create a fully decided wave from tile indices
    ///
    /// # Errors
    ///
    /// Returns an error if any index is not below `tile_count`
    pub fn from_assignments(assignments: &Array2<usize>, tile_count: usize) -> Result<Self> {
        if let Some(&index) = assignments.iter().find(|&&index| index >= tile_count) {
            return Err(AlgorithmError::InvalidTileIndex {
                index,
                max_tiles: tile_count,
            });
        }

        Ok(Self {
            domains: assignments.map(|&tile| TileBitset::single(tile_count, tile)),
            tile_count,
            decided: assignments.len(),
        })
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.domains.nrows()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.domains.ncols()
    }

    /// Grid dimensions (rows, cols)
    pub fn dimensions(&self) -> (usize, usize) {
        self.domains.dim()
    }

    /// Number of cells
    pub fn cell_count(&self) -> usize {
        self.domains.len()
    }

    /// Number of tiles each domain ranges over
    pub const fn tile_count(&self) -> usize {
        self.tile_count
    }

    /// Number of cells whose domain holds exactly one tile
    pub const fn decided_cells(&self) -> usize {
        self.decided
    }

    /// Domain of a cell
    pub fn domain(&self, row: usize, col: usize) -> Option<&TileBitset> {
        self.domains.get([row, col])
    }

    /// Count of possible tiles at a cell, zero when out of bounds
    pub fn cardinality(&self, row: usize, col: usize) -> usize {
        self.domain(row, col).map_or(0, TileBitset::count)
    }

    /// The single tile of a decided cell
    pub fn collapsed_tile(&self, row: usize, col: usize) -> Option<usize> {
        self.domain(row, col)
            .filter(|domain| domain.count() == 1)
            .and_then(TileBitset::first)
    }

    /// Remove one tile from a cell's domain
    ///
    /// Returns whether the tile was possible before the call. Removing a tile
    /// that is already gone leaves the wave untouched.
    pub fn remove(&mut self, row: usize, col: usize, tile: usize) -> bool {
        let Some(domain) = self.domains.get_mut([row, col]) else {
            return false;
        };

        let before = domain.count();
        if !domain.remove(tile) {
            return false;
        }

        match before {
            2 => self.decided += 1,
            1 => self.decided = self.decided.saturating_sub(1),
            _ => {}
        }
        true
    }

    /// Pin a cell's domain to exactly one tile
    ///
    /// # Errors
    ///
    /// Returns an error if the cell is outside the grid or the tile index is
    /// not below the tile count
    pub fn force(&mut self, row: usize, col: usize, tile: usize) -> Result<()> {
        if tile >= self.tile_count {
            return Err(AlgorithmError::InvalidTileIndex {
                index: tile,
                max_tiles: self.tile_count,
            });
        }

        let dimensions = self.dimensions();
        let domain =
            self.domains
                .get_mut([row, col])
                .ok_or(AlgorithmError::OutOfBounds {
                    position: [row, col],
                    dimensions,
                })?;

        if domain.count() != 1 {
            self.decided += 1;
        }
        domain.set_single(tile);
        Ok(())
    }

    /// In-bounds neighbor of a cell in the given direction
    pub fn neighbor(&self, row: usize, col: usize, direction: Direction) -> Option<[usize; 2]> {
        let (d_row, d_col) = direction.offset();
        let n_row = row.checked_add_signed(d_row)?;
        let n_col = col.checked_add_signed(d_col)?;
        (n_row < self.rows() && n_col < self.cols()).then_some([n_row, n_col])
    }

    /// All in-bounds neighbors of a cell in propagation order
    pub fn neighbors(&self, row: usize, col: usize) -> impl Iterator<Item = [usize; 2]> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |direction| self.neighbor(row, col, direction))
    }

    /// Iterate cells row-major with their domains
    pub fn cells(&self) -> impl Iterator<Item = ([usize; 2], &TileBitset)> + '_ {
        self.domains
            .indexed_iter()
            .map(|((row, col), domain)| ([row, col], domain))
    }

    /// Extract the finished map
    ///
    /// # Errors
    ///
    /// Returns [`AlgorithmError::IncompleteGrid`] for the first cell, row-major,
    /// whose domain does not hold exactly one tile
    pub fn to_result(&self, table: &TileConstraintTable) -> Result<ResultGrid> {
        if let Some((position, domain)) = self.cells().find(|(_, domain)| domain.count() != 1) {
            return Err(AlgorithmError::IncompleteGrid {
                position,
                cardinality: domain.count(),
            });
        }

        let tiles = self.domains.map(|domain| domain.first().unwrap_or(0));
        Ok(ResultGrid {
            tiles,
            names: table.names().to_vec(),
        })
    }
}

/// Finished tile map handed to consumers
///
/// Every cell holds one valid tile index; names resolve through the tileset
/// the map was generated with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultGrid {
    tiles: Array2<usize>,
    names: Vec<String>,
}

impl ResultGrid {
    /// Number of rows
    pub fn rows(&self) -> usize {
        self.tiles.nrows()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.tiles.ncols()
    }

    /// Tile index at a cell
    pub fn tile_index(&self, row: usize, col: usize) -> Option<usize> {
        self.tiles.get([row, col]).copied()
    }

    /// Tile name at a cell
    pub fn tile_name(&self, row: usize, col: usize) -> Option<&str> {
        self.tile_index(row, col)
            .and_then(|index| self.names.get(index))
            .map(String::as_str)
    }

    /// Tile indices for the whole map
    pub const fn indices(&self) -> &Array2<usize> {
        &self.tiles
    }

    /// Map as rows of tile names
    pub fn to_name_rows(&self) -> Vec<Vec<String>> {
        self.tiles
            .rows()
            .into_iter()
            .map(|row| {
                row.iter()
                    .map(|&index| self.names.get(index).cloned().unwrap_or_default())
                    .collect()
            })
            .collect()
    }

    /// Adjacent cell pairs where either tile's rule rejects the other
    ///
    /// Each unordered pair is reported once, as (upper or left cell, other cell).
    pub fn adjacency_violations(&self, table: &TileConstraintTable) -> Vec<([usize; 2], [usize; 2])> {
        let mut violations = Vec::new();
        for ((row, col), &tile) in self.tiles.indexed_iter() {
            for [n_row, n_col] in [[row + 1, col], [row, col + 1]] {
                let Some(neighbor) = self.tile_index(n_row, n_col) else {
                    continue;
                };
                if !table.permits(tile, neighbor) || !table.permits(neighbor, tile) {
                    violations.push(([row, col], [n_row, n_col]));
                }
            }
        }
        violations
    }
}

impl fmt::Display for ResultGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.to_name_rows() {
            writeln!(f, "{}", row.join(" "))?;
        }
        Ok(())
    }
}
