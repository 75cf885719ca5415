//! Application state
//!
//! Owns the framebuffer and the animation state, and exposes the handful
//! of calls the viewer loop makes each frame. Nothing here reads a clock.

use std::io::{self, Write};

use crate::compositor::{self, Row};
use crate::config::Config;
use crate::rasterizer::{Color, Framebuffer, FramebufferError, Vec3};
use crate::scene::{render_solid, FrameStats, SceneState, Solid, CUBE};

/// Renderer for one solid on a fixed-size half-block screen
pub struct AppState {
    fb: Framebuffer,
    scene: SceneState,
    solid: &'static Solid,
    rotation_rates: Vec3,
    edge_color: Color,
}

impl AppState {
    /// Allocate the framebuffer (clamped to the maxima) and set up the cube
    pub fn new(width: usize, height: usize, config: &Config) -> Result<Self, FramebufferError> {
        let fb = Framebuffer::new(width, height)?;
        log::info!("Framebuffer {}x{} cells ({} sub-pixel rows)", fb.width(), fb.height(), fb.subpixel_height());
        Ok(Self {
            fb,
            scene: SceneState::new(config.animation.initial_rotation, config.animation.zoom),
            solid: &CUBE,
            rotation_rates: config.animation.rotation_rates,
            edge_color: config.display.edge_color,
        })
    }

    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    /// Clear the framebuffer for a new frame
    pub fn begin_frame(&mut self) {
        self.fb.clear();
    }

    /// Advance the animation by `elapsed` seconds and draw the solid
    pub fn advance_and_render(&mut self, elapsed: f64, rotation_scale: f64) -> FrameStats {
        self.scene = self.scene.advance(elapsed, rotation_scale, self.rotation_rates);
        render_solid(&mut self.fb, self.solid, &self.scene, self.edge_color)
    }

    /// Styled text rows for the current framebuffer
    pub fn composite(&self) -> Vec<Row> {
        compositor::compose(&self.fb)
    }

    /// Composite and write the current framebuffer; returns color instructions emitted
    pub fn write_frame<W: Write>(&self, out: &mut W) -> io::Result<usize> {
        compositor::write_frame(&self.composite(), out)
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.scene.set_zoom(zoom);
    }

    pub fn zoom_by(&mut self, factor: f64) {
        self.scene.zoom_by(factor);
        log::debug!("Zoom {:.3}", self.scene.zoom());
    }

    /// Release the framebuffer
    pub fn shutdown(self) {
        log::info!("Shutting down at t={:.2}s", self.scene.time);
    }
}
