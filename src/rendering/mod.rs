//! Rasterization of a planned [`Layout`] into an RGB bitmap

pub mod noise;
pub mod shapes;

use crate::error::{Error, Result};
use crate::layout::{Layout, SHAPE_HALF_FRACTION};

/// Shared shape palette. Targets and decoys draw from the same set so color
/// alone never identifies the answer.
pub const PALETTE: [[u8; 3]; 6] = [
    [200, 40, 40],   // red
    [40, 90, 200],   // blue
    [30, 150, 60],   // green
    [230, 140, 20],  // orange
    [140, 60, 180],  // purple
    [20, 150, 150],  // teal
];

const BACKGROUND: [u8; 3] = [255, 255, 255];
const GRID_LINE: [u8; 3] = [200, 200, 200];

/// An owned RGB8 bitmap, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    /// `width * height * 3` bytes
    pub pixels: Vec<u8>,
}

impl RasterImage {
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for _ in 0..width * height {
            pixels.extend_from_slice(&rgb);
        }
        Self { width, height, pixels }
    }

    /// Write one pixel; coordinates outside the canvas are ignored
    pub fn put_pixel(&mut self, x: i32, y: i32, rgb: [u8; 3]) {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return;
        }
        let idx = ((y as u32 * self.width + x as u32) * 3) as usize;
        self.pixels[idx..idx + 3].copy_from_slice(&rgb);
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let idx = ((y * self.width + x) * 3) as usize;
        [self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]]
    }
}

/// Render a layout into a bitmap.
///
/// Deterministic for a given layout: all per-cell jitter was sampled at plan
/// time and the background overlay is seeded from the layout itself.
pub fn render(layout: &Layout) -> Result<RasterImage> {
    let dimension = layout.spec.dimension;
    let cell = layout.spec.cell_px;
    let side = dimension * cell;
    if side == 0 {
        return Err(Error::RenderError(format!(
            "degenerate canvas for dimension {dimension}"
        )));
    }

    let mut img = RasterImage::filled(side, side, BACKGROUND);
    draw_grid_lines(&mut img, dimension, cell);

    for c in &layout.cells {
        let Some(category) = c.occupant else { continue };
        let j = c.jitter;
        let cx = (c.col * cell + cell / 2) as f32 + j.dx;
        let cy = (c.row * cell + cell / 2) as f32 + j.dy;
        let half = SHAPE_HALF_FRACTION * cell as f32 * j.scale;
        let color = shifted(PALETTE[c.color_index], j.color_shift);
        shapes::draw(&mut img, category, cx, cy, half, j.rotation, color);
    }

    noise::apply_overlay(&mut img, layout);
    Ok(img)
}

fn draw_grid_lines(img: &mut RasterImage, dimension: u32, cell: u32) {
    let side = dimension * cell;
    for k in 0..=dimension {
        let at = (k * cell).min(side - 1) as i32;
        for i in 0..side as i32 {
            img.put_pixel(at, i, GRID_LINE);
            img.put_pixel(i, at, GRID_LINE);
        }
    }
}

fn shifted(base: [u8; 3], shift: [i16; 3]) -> [u8; 3] {
    let mut out = [0u8; 3];
    for i in 0..3 {
        out[i] = (base[i] as i16 + shift[i]).clamp(0, 255) as u8;
    }
    out
}
