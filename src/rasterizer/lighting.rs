//! Flat per-face lighting
//!
//! One orbiting key light with Blinn-Phong specular, one fixed fill light
//! and a constant ambient term.

use super::math::Vec3;

const AMBIENT: f64 = 0.15;
const KEY_DIFFUSE: f64 = 0.8;
const FILL_DIFFUSE: f64 = 0.15;
const SPECULAR: f64 = 0.55;
const SHININESS: f64 = 100.0;

/// Fixed view direction used for the specular halfway vector
const VIEW_DIR: Vec3 = Vec3::new(0.0, 0.0, -1.0);

/// Light directions for one instant; build once per frame
#[derive(Debug, Clone, Copy)]
pub struct Lighting {
    key: Vec3,
    fill: Vec3,
    halfway: Vec3,
}

impl Lighting {
    /// Light rig at `time` seconds; the key light drifts slowly on two axes
    pub fn at(time: f64) -> Self {
        let key = Vec3::new(
            (time * 0.7).sin() * 10.0,
            (time * 0.4).cos() * 8.0 + 10.0,
            -5.0,
        )
        .normalize();
        let fill = Vec3::new(-6.0, -4.0, -8.0).normalize();
        let halfway = (key + VIEW_DIR).normalize();
        Self { key, fill, halfway }
    }

    /// Brightness in [0, 1] for a unit surface normal
    pub fn brightness(&self, normal: Vec3) -> f64 {
        let key = normal.dot(self.key).max(0.0) * KEY_DIFFUSE;
        let fill = normal.dot(self.fill).max(0.0) * FILL_DIFFUSE;
        let spec = normal.dot(self.halfway).max(0.0).powf(SHININESS) * SPECULAR;
        (AMBIENT + key + fill + spec).min(1.0)
    }
}
