//! Vector math and camera projection
//!
//! Camera space is right-handed: the camera sits at the origin looking
//! down -Z, so a larger (less negative) z is nearer to the viewer.

use std::ops::{Add, Mul, Neg, Sub};
use serde::{Serialize, Deserialize};

/// Vectors shorter than this normalize to zero
const NORMALIZE_EPSILON: f64 = 1e-8;

/// Pinhole focal length
pub const FOCAL_LENGTH: f64 = 5.0;
/// Points at or in front of this z are too close (or behind the camera)
pub const NEAR_Z: f64 = -0.5;
/// Points at or beyond this z are too far
pub const FAR_Z: f64 = -100.0;
/// Fraction of the smaller screen dimension covered by one unit at the focal plane
const SCREEN_FILL: f64 = 0.38;

/// 3D Vector
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Vec3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn len(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction, or zero for (near) zero-length input
    pub fn normalize(self) -> Vec3 {
        let l = self.len();
        if l <= NORMALIZE_EPSILON {
            return Vec3::ZERO;
        }
        self.scale(1.0 / l)
    }

    pub fn scale(self, s: f64) -> Vec3 {
        Vec3 {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
        }
    }

    /// Rotate around the X axis by `angle` radians
    pub fn rotate_x(self, angle: f64) -> Vec3 {
        let (s, c) = angle.sin_cos();
        Vec3 {
            x: self.x,
            y: self.y * c - self.z * s,
            z: self.y * s + self.z * c,
        }
    }

    /// Rotate around the Y axis by `angle` radians
    pub fn rotate_y(self, angle: f64) -> Vec3 {
        let (s, c) = angle.sin_cos();
        Vec3 {
            x: self.x * c + self.z * s,
            y: self.y,
            z: -self.x * s + self.z * c,
        }
    }

    /// Rotate around the Z axis by `angle` radians
    pub fn rotate_z(self, angle: f64) -> Vec3 {
        let (s, c) = angle.sin_cos();
        Vec3 {
            x: self.x * c - self.y * s,
            y: self.x * s + self.y * c,
            z: self.z,
        }
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;
    fn mul(self, s: f64) -> Vec3 {
        self.scale(s)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;
    fn neg(self) -> Vec3 {
        self.scale(-1.0)
    }
}

/// A projected point: continuous column, continuous sub-pixel row, camera-space depth
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
    pub depth: f64,
}

/// Pinhole projection onto a half-block screen
///
/// `width` is in cells, `height` in cells; the vertical axis is addressed
/// in sub-pixels, two per cell.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    pub width: usize,
    pub height: usize,
    pub zoom: f64,
}

impl Projection {
    pub fn new(width: usize, height: usize, zoom: f64) -> Self {
        Self { width, height, zoom }
    }

    /// Project a camera-space point, or `None` outside the near/far window
    pub fn project(&self, p: Vec3) -> Option<ScreenPoint> {
        if p.z >= NEAR_Z || p.z <= FAR_Z {
            return None;
        }

        let factor = -FOCAL_LENGTH / p.z;
        let width = self.width as f64;
        let pixel_h = self.height as f64 * 2.0;
        let scale = width.min(pixel_h) * SCREEN_FILL * self.zoom;

        Some(ScreenPoint {
            x: p.x * factor * scale + width * 0.5,
            // Screen rows grow downward
            y: -p.y * factor * scale + pixel_h * 0.5,
            depth: p.z,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_vec3_dot() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert!((a.dot(b) - 32.0).abs() < 1e-12);
    }

    #[test]
    fn test_vec3_cross() {
        let a = Vec3::new(1.0, 0.0, 0.0);
        let b = Vec3::new(0.0, 1.0, 0.0);
        assert_eq!(a.cross(b), Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_normalize_zero_is_zero() {
        assert_eq!(Vec3::ZERO.normalize(), Vec3::ZERO);
        assert_eq!(Vec3::new(1e-9, 0.0, 0.0).normalize(), Vec3::ZERO);
        let n = Vec3::new(3.0, 0.0, 4.0).normalize();
        assert!((n.len() - 1.0).abs() < 1e-12);
        assert!((n.x - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_rotations_are_right_handed() {
        let quarter = std::f64::consts::FRAC_PI_2;
        let y = Vec3::new(0.0, 1.0, 0.0).rotate_x(quarter);
        assert!((y.z - 1.0).abs() < 1e-12);
        let z = Vec3::new(0.0, 0.0, 1.0).rotate_y(quarter);
        assert!((z.x - 1.0).abs() < 1e-12);
        let x = Vec3::new(1.0, 0.0, 0.0).rotate_z(quarter);
        assert!((x.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_project_rejects_near_and_far() {
        let proj = Projection::new(40, 20, 1.0);
        assert!(proj.project(Vec3::new(0.0, 0.0, 0.0)).is_none());
        assert!(proj.project(Vec3::new(0.0, 0.0, -0.5)).is_none());
        assert!(proj.project(Vec3::new(0.0, 0.0, 3.0)).is_none());
        assert!(proj.project(Vec3::new(0.0, 0.0, -100.0)).is_none());
        assert!(proj.project(Vec3::new(0.0, 0.0, -250.0)).is_none());
        assert!(proj.project(Vec3::new(0.0, 0.0, -0.5001)).is_some());
        assert!(proj.project(Vec3::new(0.0, 0.0, -99.999)).is_some());
    }

    #[test]
    fn test_project_center_and_axes() {
        let proj = Projection::new(40, 20, 1.0);
        let c = proj.project(Vec3::new(0.0, 0.0, -5.0)).unwrap();
        assert_eq!(c.x, 20.0);
        assert_eq!(c.y, 20.0);
        assert_eq!(c.depth, -5.0);

        // At z = -5 the factor is 1, so one unit maps to min(40, 40) * 0.38
        let right_up = proj.project(Vec3::new(1.0, 1.0, -5.0)).unwrap();
        assert!((right_up.x - (20.0 + 15.2)).abs() < 1e-9);
        assert!((right_up.y - (20.0 - 15.2)).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn prop_project_window_and_determinism(
            x in -50.0f64..50.0,
            y in -50.0f64..50.0,
            z in -200.0f64..10.0,
        ) {
            let proj = Projection::new(80, 24, 0.6);
            let p = Vec3::new(x, y, z);
            let a = proj.project(p);
            let expect_visible = z < NEAR_Z && z > FAR_Z;
            prop_assert_eq!(a.is_some(), expect_visible);
            prop_assert_eq!(a, proj.project(p));
            if let Some(sp) = a {
                prop_assert_eq!(sp.depth, z);
            }
        }
    }
}
