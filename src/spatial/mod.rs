//! Spatial data structures for constraint solving
//!
//! This module contains spatial-related functionality including:
//! - Per-cell tile domains over a fixed grid
//! - The finished map handed to consumers
//! - Tile identities and adjacency rules

/// Wave state and finished map grids
pub mod grid;
/// Tile identities and adjacency constraint tables
pub mod tiles;

pub use grid::{Direction, ResultGrid, WaveGrid};
pub use tiles::TileConstraintTable;
