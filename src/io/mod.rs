//! Input/output surfaces around the solver
//!
//! Everything here is glue for the host program: error types, defaults,
//! tileset files, PNG export, progress display and the command line.

/// Command-line interface for map generation
pub mod cli;
/// Runtime configuration defaults and limits
pub mod configuration;
/// Error types and result alias
pub mod error;
/// PNG export of generated maps
pub mod image;
/// Terminal progress reporting across solve attempts
pub mod progress;
/// Tileset loading from JSON documents
pub mod tileset;
