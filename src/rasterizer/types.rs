//! Core types for the rasterizer

use serde::{Serialize, Deserialize};

/// RGB color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Apply shading (multiply by brightness 0.0-1.0, truncating)
    pub fn shade(self, brightness: f64) -> Self {
        let i = brightness.clamp(0.0, 1.0);
        Self {
            r: (self.r as f64 * i) as u8,
            g: (self.g as f64 * i) as u8,
            b: (self.b as f64 * i) as u8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shade_truncates() {
        let c = Color::new(0, 128, 255).shade(0.15);
        assert_eq!(c, Color::new(0, 19, 38));
    }

    #[test]
    fn test_shade_clamps() {
        let c = Color::new(10, 20, 30);
        assert_eq!(c.shade(2.5), c);
        assert_eq!(c.shade(-1.0), Color::BLACK);
    }
}
