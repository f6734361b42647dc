//! Runtime configuration defaults and limits

/// Default grid width in cells
pub const DEFAULT_GRID_WIDTH: usize = 10;

/// Default grid height in cells
pub const DEFAULT_GRID_HEIGHT: usize = 10;

/// Default number of solve attempts before generation is abandoned
pub const DEFAULT_MAX_ATTEMPTS: usize = 5;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 10_000;

/// Default edge length of one rendered tile in pixels
pub const DEFAULT_TILE_PIXELS: u32 = 80;

/// Largest accepted edge length of one rendered tile in pixels
pub const MAX_TILE_PIXELS: u32 = 512;

/// Default path of the exported map image
pub const DEFAULT_OUTPUT_PATH: &str = "tilemap.png";

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
