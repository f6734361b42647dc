//! Wave function collapse tile map generation from adjacency constraints
//!
//! Every cell of a fixed grid starts with all tiles possible. The solver
//! repeatedly collapses the most constrained cell to one tile, propagates the
//! consequences to its neighbors and restarts from scratch when a cell runs
//! out of options. The finished map is a grid of tile identifiers.

#![forbid(unsafe_code)]

/// Core algorithm implementation including selection, collapse, propagation and retries
pub mod algorithm;
/// Input/output operations and error handling
pub mod io;
/// Wave grid, finished maps and tile constraint tables
pub mod spatial;

pub use algorithm::executor::{Solver, SolverConfig};
pub use io::error::{AlgorithmError, Result};
pub use spatial::{ResultGrid, TileConstraintTable};
