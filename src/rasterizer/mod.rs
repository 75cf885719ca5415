//! Half-block software rasterizer
//!
//! Features:
//! - Two independently depth-tested sub-pixels per terminal cell
//! - Pinhole projection with near/far rejection (no clipping)
//! - Flat shading from a key/fill/ambient/specular light rig
//! - Bresenham silhouette lines drawn slightly in front of faces

mod framebuffer;
mod lighting;
mod math;
mod types;
mod render;

pub use framebuffer::*;
pub use lighting::*;
pub use math::*;
pub use types::*;
pub use render::*;

/// Largest framebuffer the terminal driver will allocate (cells)
pub const MAX_WIDTH: usize = 400;
pub const MAX_HEIGHT: usize = 300;
