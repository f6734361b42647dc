//! Error types for constraint solving, tileset loading and map export

use std::fmt;
use std::path::PathBuf;

/// Main error type for all algorithm operations
#[derive(Debug)]
pub enum AlgorithmError {
    /// A cell was left with no possible tile during one solve attempt
    ///
    /// Recoverable by discarding the attempt and starting over with fresh draws.
    Contradiction {
        /// Grid position (row, col) whose domain became empty
        position: [usize; 2],
    },

    /// Every attempt up to the configured maximum ended in a contradiction
    ExhaustedRetries {
        /// Number of attempts that were made
        attempts: usize,
        /// Position of the contradiction that ended the final attempt
        last_contradiction: Option<[usize; 2]>,
    },

    /// Result extraction found a cell that is not decided to exactly one tile
    ///
    /// Indicates the selection loop exited early; never retried.
    IncompleteGrid {
        /// Grid position (row, col) of the first undecided cell
        position: [usize; 2],
        /// Number of tiles still possible at that cell
        cardinality: usize,
    },

    /// A tile lists a neighbor that is not declared in the tileset
    UnknownNeighbor {
        /// Tile whose neighbor list holds the reference
        tile: String,
        /// The undeclared neighbor name
        neighbor: String,
    },

    /// The same tile name is declared more than once
    DuplicateTile {
        /// Repeated tile name
        name: String,
    },

    /// The tileset declares no tiles at all
    EmptyTileset,

    /// Algorithm parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Tile index exceeds available tile set
    InvalidTileIndex {
        /// The invalid tile index
        index: usize,
        /// Number of tiles available
        max_tiles: usize,
    },

    /// Grid position lies outside the grid
    OutOfBounds {
        /// Requested position (row, col)
        position: [usize; 2],
        /// Grid dimensions (rows, cols)
        dimensions: (usize, usize),
    },

    /// Tileset document could not be parsed
    TilesetParse {
        /// Path to the tileset file
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// Failed to save generated image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl AlgorithmError {
    /// Whether the error describes invalid input rather than a failed solve
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::UnknownNeighbor { .. }
                | Self::DuplicateTile { .. }
                | Self::EmptyTileset
                | Self::InvalidParameter { .. }
                | Self::TilesetParse { .. }
        )
    }

    /// Whether a fresh solve attempt may succeed after this error
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Contradiction { .. })
    }
}

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Contradiction { position } => {
                write!(
                    f,
                    "Contradiction at cell ({}, {}): no tile remains possible",
                    position[0], position[1]
                )
            }
            Self::ExhaustedRetries {
                attempts,
                last_contradiction,
            } => {
                write!(f, "Generation failed after {attempts} attempt(s)")?;
                if let Some(position) = last_contradiction {
                    write!(
                        f,
                        " (last contradiction at cell ({}, {}))",
                        position[0], position[1]
                    )?;
                }
                Ok(())
            }
            Self::IncompleteGrid {
                position,
                cardinality,
            } => {
                write!(
                    f,
                    "Grid not fully collapsed: cell ({}, {}) has {cardinality} possible tiles",
                    position[0], position[1]
                )
            }
            Self::UnknownNeighbor { tile, neighbor } => {
                write!(f, "Tile '{tile}' references undeclared neighbor '{neighbor}'")
            }
            Self::DuplicateTile { name } => {
                write!(f, "Tile '{name}' is declared more than once")
            }
            Self::EmptyTileset => write!(f, "Tileset declares no tiles"),
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidTileIndex { index, max_tiles } => {
                write!(f, "Tile index {index} is out of bounds (tiles: {max_tiles})")
            }
            Self::OutOfBounds {
                position,
                dimensions,
            } => {
                write!(
                    f,
                    "Cell ({}, {}) is outside the {}x{} grid",
                    position[0], position[1], dimensions.0, dimensions.1
                )
            }
            Self::TilesetParse { path, source } => {
                write!(f, "Failed to parse tileset '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for AlgorithmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TilesetParse { source, .. } => Some(source),
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for algorithm results
pub type Result<T> = std::result::Result<T, AlgorithmError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AlgorithmError {
    AlgorithmError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
