//! CLI entry point for wave function collapse tile map generation

use clap::Parser;
use tilecollapse::io::cli::{Cli, MapGenerator};

fn main() -> tilecollapse::Result<()> {
    let cli = Cli::parse();
    let generator = MapGenerator::new(cli);
    generator.run()?;
    Ok(())
}
