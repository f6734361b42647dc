/// Fixed-size bitset for per-cell tile domains
pub mod bitset;
/// Committing a cell to a single tile
pub mod collapse;
/// Solve attempts, retries and the seeded random source
pub mod executor;
/// Worklist-driven constraint propagation
pub mod propagation;
/// Minimum entropy cell selection
pub mod selection;
/// Post-process removal of isolated tiles
pub mod smoothing;
