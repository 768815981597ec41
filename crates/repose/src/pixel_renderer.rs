//! CPU-based pixel buffer renderer for PNG export
//!
//! Renders the grid to an RGBA buffer, one `scale x scale` block per cell.

use std::path::Path;

use anyhow::{Context, Result};
use image::{ImageBuffer, Rgba};
use repose_core::{Cell, SimRng, Simulation};

/// CPU-based renderer that outputs to a pixel buffer
pub struct PixelRenderer {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// Pixels per cell along each axis
    pub scale: usize,
    /// RGBA pixel buffer (4 bytes per pixel)
    pub buffer: Vec<u8>,
}

impl PixelRenderer {
    /// Create a renderer sized for a `grid_width x grid_height` grid
    pub fn new(grid_width: usize, grid_height: usize, scale: usize) -> Self {
        let scale = scale.max(1);
        let width = grid_width * scale;
        let height = grid_height * scale;
        Self {
            width,
            height,
            scale,
            buffer: vec![0u8; width * height * 4],
        }
    }

    /// Render row-major `cells` (`grid_width` per row) into the buffer
    pub fn render(&mut self, cells: &[Cell], grid_width: usize) {
        debug_assert_eq!(grid_width * self.scale, self.width);

        for py in 0..self.height {
            let row = py / self.scale;
            for px in 0..self.width {
                let cell = cells
                    .get(row * grid_width + px / self.scale)
                    .copied()
                    .unwrap_or_default();
                let offset = (py * self.width + px) * 4;
                self.buffer[offset..offset + 4].copy_from_slice(&cell.color());
            }
        }
    }

    /// Render the current state of a simulation
    pub fn render_simulation<R: SimRng>(&mut self, sim: &Simulation<R>) {
        self.render(sim.cells(), sim.width());
    }

    /// RGBA value of one output pixel
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let offset = (y * self.width + x) * 4;
        let mut rgba = [0u8; 4];
        rgba.copy_from_slice(&self.buffer[offset..offset + 4]);
        rgba
    }

    /// Save the buffer as PNG
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let img: ImageBuffer<Rgba<u8>, _> =
            ImageBuffer::from_raw(self.width as u32, self.height as u32, self.buffer.clone())
                .ok_or_else(|| anyhow::anyhow!("Failed to create image buffer"))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        img.save(path)
            .with_context(|| format!("Failed to write PNG: {}", path.display()))?;

        log::info!("Saved {}x{} frame to {}", self.width, self.height, path.display());
        Ok(())
    }
}
