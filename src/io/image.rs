//! PNG export of finished maps, one colored square per cell

use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::spatial::ResultGrid;
use image::{ImageBuffer, Rgba, RgbaImage};
use std::path::Path;

/// Paint a map as an image, each cell a `tile_pixels` square in its palette color
///
/// # Errors
///
/// Returns an error if:
/// - `tile_pixels` is zero or the image would overflow `u32` dimensions
/// - A tile index has no palette entry
pub fn render_grid(grid: &ResultGrid, palette: &[[u8; 4]], tile_pixels: u32) -> Result<RgbaImage> {
    if tile_pixels == 0 {
        return Err(invalid_parameter(
            "tile_pixels",
            &tile_pixels,
            &"must be positive",
        ));
    }

    let dimension = |cells: usize, parameter: &'static str| {
        u32::try_from(cells)
            .ok()
            .and_then(|count| count.checked_mul(tile_pixels))
            .ok_or_else(|| {
                invalid_parameter(parameter, &cells, &"rendered image too large")
            })
    };
    let width = dimension(grid.cols(), "width")?;
    let height = dimension(grid.rows(), "height")?;

    let mut colors = Vec::with_capacity(grid.rows() * grid.cols());
    for &tile in grid.indices() {
        let rgba = palette
            .get(tile)
            .copied()
            .ok_or(AlgorithmError::InvalidTileIndex {
                index: tile,
                max_tiles: palette.len(),
            })?;
        colors.push(rgba);
    }

    let cols = grid.cols();
    let img = ImageBuffer::from_fn(width, height, |x, y| {
        let row = (y / tile_pixels) as usize;
        let col = (x / tile_pixels) as usize;
        let rgba = colors.get(row * cols + col).copied().unwrap_or([0, 0, 0, 0]);
        Rgba(rgba)
    });

    Ok(img)
}

/// Render a map and save it as a PNG image
///
/// # Errors
///
/// Returns an error if:
/// - Rendering fails (see [`render_grid`])
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_grid_as_png(
    grid: &ResultGrid,
    palette: &[[u8; 4]],
    tile_pixels: u32,
    output_path: &Path,
) -> Result<()> {
    let img = render_grid(grid, palette, tile_pixels)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }
    }

    img.save(output_path)
        .map_err(|e| AlgorithmError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
