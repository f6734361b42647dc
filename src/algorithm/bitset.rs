use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset holding the tiles still possible for one cell
///
/// Tile indices are 0-based and match declaration order in the constraint table.
/// Provides O(1) membership testing and whole-set operations for propagation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileBitset {
    bits: BitVec,
    max_tiles: usize,
}

impl TileBitset {
    /// Create a bitset with no tiles present
    pub fn new(max_tiles: usize) -> Self {
        Self {
            bits: bitvec![0; max_tiles],
            max_tiles,
        }
    }

    /// Create a bitset containing all possible tiles
    pub fn all(max_tiles: usize) -> Self {
        Self {
            bits: bitvec![1; max_tiles],
            max_tiles,
        }
    }

    /// Create a bitset containing exactly one tile
    pub fn single(max_tiles: usize, tile: usize) -> Self {
        let mut bitset = Self::new(max_tiles);
        bitset.insert(tile);
        bitset
    }

    /// Number of tiles this bitset can describe
    pub const fn capacity(&self) -> usize {
        self.max_tiles
    }

    /// Insert a tile index, ignoring indices past capacity
    pub fn insert(&mut self, tile: usize) {
        if tile < self.max_tiles {
            self.bits.set(tile, true);
        }
    }

    /// Remove a tile index
    ///
    /// Returns whether the tile was present. Removing an absent tile is a no-op.
    pub fn remove(&mut self, tile: usize) -> bool {
        if tile < self.max_tiles {
            self.bits.replace(tile, false)
        } else {
            false
        }
    }

    /// Reduce the set to exactly one tile
    pub fn set_single(&mut self, tile: usize) {
        self.bits.fill(false);
        self.insert(tile);
    }

    /// Test tile membership
    pub fn contains(&self, tile: usize) -> bool {
        self.bits.get(tile).as_deref() == Some(&true)
    }

    /// Intersect this bitset with another in-place
    pub fn intersect_with(&mut self, other: &Self) {
        self.bits &= &other.bits;
    }

    /// Create a new bitset containing the intersection
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.intersect_with(other);
        result
    }

    /// Add every tile of another bitset in-place
    pub fn union_with(&mut self, other: &Self) {
        self.bits |= &other.bits;
    }

    /// Create the set of tiles not present in this one
    #[must_use]
    pub fn complement(&self) -> Self {
        Self {
            bits: !self.bits.clone(),
            max_tiles: self.max_tiles,
        }
    }

    /// Test if no tiles are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count tiles in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Lowest tile index present
    pub fn first(&self) -> Option<usize> {
        self.bits.first_one()
    }

    /// Iterate present tile indices in ascending order
    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Extract all tile indices as a vector
    pub fn to_vec(&self) -> Vec<usize> {
        self.bits.iter_ones().collect()
    }

    /// Build a bitset from a list of tile indices
    pub fn from_indices(indices: &[usize], max_tiles: usize) -> Self {
        let mut bitset = Self::new(max_tiles);
        for &tile in indices {
            bitset.insert(tile);
        }
        bitset
    }
}

impl fmt::Display for TileBitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TileBitset({} tiles: {:?})", self.count(), self.to_vec())
    }
}
