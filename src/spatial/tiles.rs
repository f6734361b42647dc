//! Tile identities and the adjacency rules between them

use crate::algorithm::bitset::TileBitset;
use crate::io::error::{AlgorithmError, Result};
use std::collections::HashMap;

/// Immutable adjacency table for a tileset
///
/// Tiles are indexed 0..N-1 in declaration order. Each tile stores the set of
/// tiles allowed immediately next to it in any cardinal direction. The table is
/// directional as stored and is not required to be symmetric.
#[derive(Debug, Clone)]
pub struct TileConstraintTable {
    names: Vec<String>,
    indices: HashMap<String, usize>,
    permitted: Vec<TileBitset>,
    forbidden: Vec<TileBitset>,
    rejecting: Vec<TileBitset>,
}

impl TileConstraintTable {
    /// Build a table from tile names and their permitted neighbor names
    ///
    /// Entries are taken in order; the position of an entry is its tile index.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No tiles are declared
    /// - A tile name is declared twice
    /// - A neighbor list references a name that is not declared
    pub fn new<I, S, N>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<N>)>,
        S: Into<String>,
        N: AsRef<str>,
    {
        let entries: Vec<(String, Vec<N>)> = entries
            .into_iter()
            .map(|(name, neighbors)| (name.into(), neighbors))
            .collect();

        if entries.is_empty() {
            return Err(AlgorithmError::EmptyTileset);
        }

        let mut indices = HashMap::with_capacity(entries.len());
        for (index, (name, _)) in entries.iter().enumerate() {
            if indices.insert(name.clone(), index).is_some() {
                return Err(AlgorithmError::DuplicateTile { name: name.clone() });
            }
        }

        let tile_count = entries.len();
        let mut names = Vec::with_capacity(tile_count);
        let mut permitted = Vec::with_capacity(tile_count);

        for (name, neighbors) in entries {
            let mut allowed = TileBitset::new(tile_count);
            for neighbor in &neighbors {
                let neighbor = neighbor.as_ref();
                let &neighbor_index =
                    indices
                        .get(neighbor)
                        .ok_or_else(|| AlgorithmError::UnknownNeighbor {
                            tile: name.clone(),
                            neighbor: neighbor.to_string(),
                        })?;
                allowed.insert(neighbor_index);
            }
            names.push(name);
            permitted.push(allowed);
        }

        let forbidden = permitted.iter().map(TileBitset::complement).collect();

        // rejecting[c] holds every tile whose own rule excludes c
        let mut rejecting = vec![TileBitset::new(tile_count); tile_count];
        for (tile, allowed) in permitted.iter().enumerate() {
            for (committed, rejected) in rejecting.iter_mut().enumerate() {
                if !allowed.contains(committed) {
                    rejected.insert(tile);
                }
            }
        }

        Ok(Self {
            names,
            indices,
            permitted,
            forbidden,
            rejecting,
        })
    }

    /// Build a table where every tile permits every tile
    ///
    /// # Errors
    ///
    /// Returns an error if no names are given or a name repeats
    pub fn uniform<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        let all: Vec<String> = names.iter().map(|name| name.as_ref().to_string()).collect();
        Self::new(all.iter().map(|name| (name.clone(), all.clone())))
    }

    /// Number of tiles
    pub const fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the table holds no tiles (never true for a constructed table)
    pub const fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Tile index for a name
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.indices.get(name).copied()
    }

    /// Tile name for an index
    pub fn name_of(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// All tile names in index order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Tiles allowed next to the given tile
    pub fn permitted(&self, tile: usize) -> Option<&TileBitset> {
        self.permitted.get(tile)
    }

    /// Tiles not allowed next to the given tile
    pub fn forbidden(&self, tile: usize) -> Option<&TileBitset> {
        self.forbidden.get(tile)
    }

    /// Tiles whose own rule does not allow the given tile next to them
    pub fn rejecting(&self, tile: usize) -> Option<&TileBitset> {
        self.rejecting.get(tile)
    }

    /// Whether `neighbor` may sit next to `tile` according to `tile`'s rule
    pub fn permits(&self, tile: usize, neighbor: usize) -> bool {
        self.permitted
            .get(tile)
            .is_some_and(|allowed| allowed.contains(neighbor))
    }

    /// Whether every permitted pair is also permitted in reverse
    pub fn is_symmetric(&self) -> bool {
        (0..self.len()).all(|tile| {
            (0..self.len()).all(|other| self.permits(tile, other) == self.permits(other, tile))
        })
    }
}
