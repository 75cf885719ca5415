//! Scene module - one rotating solid in front of a fixed camera
//!
//! - Static solid tables (vertices, quads, edges)
//! - Explicit animation state value
//! - Per-frame transform, cull, light, sort and rasterize

mod pipeline;
mod solid;
mod state;

pub use pipeline::*;
pub use solid::*;
pub use state::*;
