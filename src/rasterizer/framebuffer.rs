//! Dual-depth framebuffer
//!
//! Each terminal cell holds two vertically stacked sub-pixels. A half-block
//! glyph colors its foreground (top half) and background (bottom half)
//! independently, so both halves carry their own color and depth.

use thiserror::Error;
use super::types::Color;
use super::{MAX_HEIGHT, MAX_WIDTH};

/// Depth of a slot nothing was drawn into this frame
pub const EMPTY_DEPTH: f64 = -1e10;
/// Slots with a depth above this hold a drawn color
const SET_THRESHOLD: f64 = -1e9;
/// Bottom slots accept fragments this far behind the stored depth
pub const BOTTOM_BIAS: f64 = 0.01;

#[derive(Debug, Error)]
pub enum FramebufferError {
    #[error("framebuffer dimensions must be positive (got {width}x{height})")]
    ZeroSize { width: usize, height: usize },
    #[error("failed to allocate {cells} framebuffer cells")]
    Alloc { cells: usize },
}

/// One cell as seen by the compositor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellView {
    pub top: Option<Color>,
    pub bottom: Option<Color>,
}

/// Framebuffer for half-block rendering
pub struct Framebuffer {
    top_color: Vec<Color>,
    bottom_color: Vec<Color>,
    top_depth: Vec<f64>,
    bottom_depth: Vec<f64>,
    width: usize,
    height: usize,
}

fn alloc<T: Clone>(len: usize, fill: T) -> Result<Vec<T>, FramebufferError> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)
        .map_err(|_| FramebufferError::Alloc { cells: len })?;
    v.resize(len, fill);
    Ok(v)
}

impl Framebuffer {
    /// Allocate a framebuffer of `width` x `height` cells, clamped to the maxima
    pub fn new(width: usize, height: usize) -> Result<Self, FramebufferError> {
        if width == 0 || height == 0 {
            return Err(FramebufferError::ZeroSize { width, height });
        }
        let width = width.min(MAX_WIDTH);
        let height = height.min(MAX_HEIGHT);
        let cells = width * height;

        Ok(Self {
            top_color: alloc(cells, Color::BLACK)?,
            bottom_color: alloc(cells, Color::BLACK)?,
            top_depth: alloc(cells, EMPTY_DEPTH)?,
            bottom_depth: alloc(cells, EMPTY_DEPTH)?,
            width,
            height,
        })
    }

    /// Width in cells
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in cells
    pub fn height(&self) -> usize {
        self.height
    }

    /// Height in sub-pixels (two per cell)
    pub fn subpixel_height(&self) -> usize {
        self.height * 2
    }

    pub fn clear(&mut self) {
        self.top_color.fill(Color::BLACK);
        self.bottom_color.fill(Color::BLACK);
        self.top_depth.fill(EMPTY_DEPTH);
        self.bottom_depth.fill(EMPTY_DEPTH);
    }

    /// Depth-tested write to sub-pixel row `y` (two rows per cell).
    /// Off-screen coordinates are dropped.
    pub fn put(&mut self, x: i32, y: i32, color: Color, depth: f64) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        let cell_y = y / 2;
        if x >= self.width || cell_y >= self.height {
            return;
        }
        let idx = cell_y * self.width + x;

        if y % 2 == 0 {
            if depth > self.top_depth[idx] {
                self.top_color[idx] = color;
                self.top_depth[idx] = depth;
            }
        } else if depth > self.bottom_depth[idx] - BOTTOM_BIAS {
            // The bias lets the lower half win close ties so adjoining
            // triangles do not flicker along the seam between rows.
            self.bottom_color[idx] = color;
            self.bottom_depth[idx] = depth;
        }
    }

    /// Read a cell; `None` halves were not drawn this frame
    pub fn cell(&self, x: usize, y: usize) -> CellView {
        let idx = y * self.width + x;
        CellView {
            top: (self.top_depth[idx] > SET_THRESHOLD).then_some(self.top_color[idx]),
            bottom: (self.bottom_depth[idx] > SET_THRESHOLD).then_some(self.bottom_color[idx]),
        }
    }

    /// Stored depths (top, bottom) of a cell
    pub fn depths(&self, x: usize, y: usize) -> (f64, f64) {
        let idx = y * self.width + x;
        (self.top_depth[idx], self.bottom_depth[idx])
    }
}
