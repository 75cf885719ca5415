//! Animation state
//!
//! A plain value: the per-frame update takes a state and returns the next one.

use crate::rasterizer::Vec3;

pub const ZOOM_MIN: f64 = 0.1;
pub const ZOOM_MAX: f64 = 5.0;

/// Rotation, zoom and clock driving one rendered solid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneState {
    /// Accumulated Euler angles in radians, applied X then Y then Z
    pub rotation: Vec3,
    /// Always within [ZOOM_MIN, ZOOM_MAX]
    zoom: f64,
    /// Seconds of animation time, drives the key light orbit
    pub time: f64,
}

impl SceneState {
    pub fn new(rotation: Vec3, zoom: f64) -> Self {
        Self {
            rotation,
            zoom: clamp_zoom(zoom),
            time: 0.0,
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = clamp_zoom(zoom);
    }

    /// Multiply the zoom by `factor`, staying within bounds
    pub fn zoom_by(&mut self, factor: f64) {
        self.set_zoom(self.zoom * factor);
    }

    /// Advance by `elapsed` seconds.
    ///
    /// Each axis turns at its own rate from `rates` (radians per second),
    /// scaled by `rotation_scale`; zero pauses the spin while the clock
    /// keeps running. Negative or non-finite elapsed time counts as zero.
    pub fn advance(self, elapsed: f64, rotation_scale: f64, rates: Vec3) -> Self {
        let dt = if elapsed.is_finite() { elapsed.max(0.0) } else { 0.0 };
        Self {
            rotation: self.rotation + rates.scale(dt * rotation_scale),
            zoom: self.zoom,
            time: self.time + dt,
        }
    }
}

fn clamp_zoom(zoom: f64) -> f64 {
    if zoom.is_nan() {
        return ZOOM_MIN;
    }
    zoom.clamp(ZOOM_MIN, ZOOM_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATES: Vec3 = Vec3::new(0.6, 0.8, 0.4);

    #[test]
    fn test_advance_accumulates_per_axis() {
        let s = SceneState::new(Vec3::new(0.7, 0.9, 0.3), 0.6);
        let s = s.advance(0.1, 1.0, RATES).advance(0.1, 1.0, RATES);
        assert!((s.rotation.x - (0.7 + 0.12)).abs() < 1e-12);
        assert!((s.rotation.y - (0.9 + 0.16)).abs() < 1e-12);
        assert!((s.rotation.z - (0.3 + 0.08)).abs() < 1e-12);
        assert!((s.time - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_advance_paused_keeps_clock() {
        let s = SceneState::new(Vec3::ZERO, 1.0).advance(0.5, 0.0, RATES);
        assert_eq!(s.rotation, Vec3::ZERO);
        assert_eq!(s.time, 0.5);
    }

    #[test]
    fn test_advance_ignores_bad_elapsed() {
        let s = SceneState::new(Vec3::ZERO, 1.0);
        assert_eq!(s.advance(-1.0, 1.0, RATES), s);
        assert_eq!(s.advance(f64::NAN, 1.0, RATES), s);
        assert_eq!(s.advance(f64::INFINITY, 1.0, RATES), s);
    }

    #[test]
    fn test_zoom_clamped() {
        let mut s = SceneState::new(Vec3::ZERO, 9.0);
        assert_eq!(s.zoom(), ZOOM_MAX);
        s.set_zoom(0.01);
        assert_eq!(s.zoom(), ZOOM_MIN);
        s.set_zoom(1.0);
        for _ in 0..100 {
            s.zoom_by(1.1);
        }
        assert_eq!(s.zoom(), ZOOM_MAX);
        for _ in 0..100 {
            s.zoom_by(1.0 / 1.1);
        }
        assert_eq!(s.zoom(), ZOOM_MIN);
    }
}
