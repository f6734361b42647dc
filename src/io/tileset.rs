//! Tileset documents: tile names, permitted neighbors and display colors
//!
//! A tileset file is JSON of the form
//! `{"tiles": [{"name": "water", "neighbors": ["water", "sand"], "color": [0, 0, 255]}]}`.
//! Declaration order defines tile indices.

use crate::io::error::{AlgorithmError, Result};
use crate::spatial::TileConstraintTable;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One tile entry as written in a tileset document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileDefinition {
    /// Tile name
    pub name: String,
    /// Names of tiles allowed next to this one
    #[serde(default)]
    pub neighbors: Vec<String>,
    /// Display color as RGB
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<[u8; 3]>,
}

/// Raw tileset document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TilesetDefinition {
    /// Tiles in index order
    pub tiles: Vec<TileDefinition>,
}

/// Validated constraint table plus the color of every tile
#[derive(Debug, Clone)]
pub struct Tileset {
    table: TileConstraintTable,
    palette: Vec<[u8; 4]>,
}

impl Tileset {
    /// Validate a parsed document
    ///
    /// Tiles without a color get evenly spaced shades of gray.
    ///
    /// # Errors
    ///
    /// Returns an error if the document declares no tiles, repeats a name or
    /// references an undeclared neighbor
    pub fn from_definition(definition: TilesetDefinition) -> Result<Self> {
        let tile_count = definition.tiles.len();
        let palette = definition
            .tiles
            .iter()
            .enumerate()
            .map(|(index, tile)| match tile.color {
                Some([r, g, b]) => [r, g, b, 255],
                None => fallback_color(index, tile_count),
            })
            .collect();

        let table = TileConstraintTable::new(
            definition
                .tiles
                .into_iter()
                .map(|tile| (tile.name, tile.neighbors)),
        )?;

        Ok(Self { table, palette })
    }

    /// Parse a tileset from JSON text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid tileset document or fails
    /// validation
    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::parse(json, Path::new("<inline>"))
    }

    /// Load a tileset from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not a valid tileset
    /// document or fails validation
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| AlgorithmError::FileSystem {
            path: path.to_path_buf(),
            operation: "read tileset",
            source: e,
        })?;
        Self::parse(&json, path)
    }

    /// Parse and validate JSON text, naming `path` in parse errors
    fn parse(json: &str, path: &Path) -> Result<Self> {
        let definition: TilesetDefinition =
            serde_json::from_str(json).map_err(|e| AlgorithmError::TilesetParse {
                path: path.to_path_buf(),
                source: e,
            })?;
        Self::from_definition(definition)
    }

    /// Built-in coastal landscape: water, sand, rock, grass and trees
    ///
    /// # Errors
    ///
    /// Returns an error only if the built-in document fails validation
    pub fn landscape() -> Result<Self> {
        Self::from_definition(landscape_definition())
    }

    /// Adjacency rules
    pub const fn table(&self) -> &TileConstraintTable {
        &self.table
    }

    /// RGBA color per tile index
    pub fn palette(&self) -> &[[u8; 4]] {
        &self.palette
    }

    /// Split into the constraint table and palette
    pub fn into_parts(self) -> (TileConstraintTable, Vec<[u8; 4]>) {
        (self.table, self.palette)
    }
}

/// Document form of the built-in landscape tileset
pub fn landscape_definition() -> TilesetDefinition {
    fn tile(name: &str, neighbors: &[&str], color: [u8; 3]) -> TileDefinition {
        TileDefinition {
            name: name.to_string(),
            neighbors: neighbors.iter().map(ToString::to_string).collect(),
            color: Some(color),
        }
    }

    TilesetDefinition {
        tiles: vec![
            tile("water", &["water", "sand"], [0, 0, 255]),
            tile("sand", &["water", "rock"], [243, 196, 89]),
            tile("rock", &["sand", "grass"], [139, 137, 137]),
            tile("grass", &["rock", "tree"], [34, 139, 34]),
            tile("tree", &["grass"], [34, 102, 34]),
        ],
    }
}

/// Gray ramp from dark to light across the tileset
fn fallback_color(index: usize, tile_count: usize) -> [u8; 4] {
    let shade = if tile_count <= 1 {
        128
    } else {
        (32 + index * 192 / (tile_count - 1)) as u8
    };
    [shade, shade, shade, 255]
}
