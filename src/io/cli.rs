//! Command-line interface for generating a tile map image

use crate::algorithm::executor::{Solver, SolverConfig};
use crate::algorithm::propagation::PropagationMode;
use crate::algorithm::smoothing::SmoothingMode;
use crate::io::configuration::{
    DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, DEFAULT_MAX_ATTEMPTS, DEFAULT_OUTPUT_PATH,
    DEFAULT_TILE_PIXELS, MAX_TILE_PIXELS,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::export_grid_as_png;
use crate::io::progress::ProgressManager;
use crate::io::tileset::Tileset;
use crate::spatial::ResultGrid;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Smoothing pass selection on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SmoothingArg {
    /// Keep the collapsed map as is
    Off,
    /// Replace isolated tiles even if that breaks adjacency rules
    Relaxed,
    /// Replace isolated tiles only with tiles that permit themselves
    Consistent,
}

impl From<SmoothingArg> for SmoothingMode {
    fn from(arg: SmoothingArg) -> Self {
        match arg {
            SmoothingArg::Off => Self::Off,
            SmoothingArg::Relaxed => Self::Relaxed,
            SmoothingArg::Consistent => Self::Consistent,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "tilecollapse")]
#[command(
    author,
    version,
    about = "Generate tile maps with wave function collapse"
)]
/// Command-line arguments for map generation
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Tileset JSON file (uses the built-in landscape when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub tileset: Option<PathBuf>,

    /// Grid width in cells
    #[arg(short = 'w', long, default_value_t = DEFAULT_GRID_WIDTH)]
    pub width: usize,

    /// Grid height in cells
    #[arg(short = 'H', long, default_value_t = DEFAULT_GRID_HEIGHT)]
    pub height: usize,

    /// Random seed for reproducible generation (random when omitted)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Attempts before giving up on contradictions
    #[arg(short, long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub attempts: usize,

    /// Output PNG path
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// Edge length of one tile in the output image
    #[arg(short = 'p', long, default_value_t = DEFAULT_TILE_PIXELS)]
    pub tile_pixels: u32,

    /// Post-process that removes isolated tiles
    #[arg(long, value_enum, default_value_t = SmoothingArg::Relaxed)]
    pub smoothing: SmoothingArg,

    /// Also enforce each neighbor's own rule during propagation
    #[arg(long)]
    pub symmetric: bool,

    /// Print the map as rows of tile names
    #[arg(long)]
    pub print: bool,

    /// Suppress progress and status output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Propagation mode selected by the flags
    pub const fn propagation_mode(&self) -> PropagationMode {
        if self.symmetric {
            PropagationMode::Symmetric
        } else {
            PropagationMode::Directional
        }
    }
}

/// Runs one generation from parsed arguments
pub struct MapGenerator {
    cli: Cli,
}

impl MapGenerator {
    /// Create a generator for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Load the tileset, solve, export the image and optionally print the map
    ///
    /// # Errors
    ///
    /// Returns an error if the tileset or parameters are invalid, every
    /// attempt ends in a contradiction, or the image cannot be written
    pub fn run(&self) -> Result<ResultGrid> {
        if self.cli.tile_pixels == 0 || self.cli.tile_pixels > MAX_TILE_PIXELS {
            return Err(invalid_parameter(
                "tile_pixels",
                &self.cli.tile_pixels,
                &format!("must be between 1 and {MAX_TILE_PIXELS}"),
            ));
        }

        let tileset = match &self.cli.tileset {
            Some(path) => Tileset::load(path)?,
            None => Tileset::landscape()?,
        };
        let (table, palette) = tileset.into_parts();

        if !table.is_symmetric() {
            self.status("Warning: tileset adjacency rules are not symmetric");
        }

        let seed = self.cli.seed.unwrap_or_else(rand::random);
        let config = SolverConfig::new(self.cli.width, self.cli.height)
            .with_seed(seed)
            .with_max_attempts(self.cli.attempts)
            .with_propagation(self.cli.propagation_mode())
            .with_smoothing(self.cli.smoothing.into());
        let solver = Solver::new(table, config)?;

        let mut progress = if self.cli.should_show_progress() {
            ProgressManager::new()
        } else {
            ProgressManager::hidden()
        };
        let grid = solver.solve_observed(&mut progress)?;

        export_grid_as_png(&grid, &palette, self.cli.tile_pixels, &self.cli.output)?;

        let violations = grid.adjacency_violations(solver.table());
        self.status(&format!(
            "Generated {}x{} map with seed {seed} after {} failed attempt(s): {}",
            grid.cols(),
            grid.rows(),
            progress.attempts_failed(),
            self.cli.output.display()
        ));
        if !violations.is_empty() {
            self.status(&format!(
                "{} adjacent pair(s) break the tileset rules after smoothing",
                violations.len()
            ));
        }

        // Allow print for the map itself when requested
        #[allow(clippy::print_stdout)]
        if self.cli.print {
            print!("{grid}");
        }

        Ok(grid)
    }

    // Allow print for user feedback on status lines
    #[allow(clippy::print_stderr)]
    fn status(&self, message: &str) {
        if !self.cli.quiet {
            eprintln!("{message}");
        }
    }
}
