//! Core rendering functions
//! Depth-tested lines and flat-shaded triangles on the half-block framebuffer

use super::framebuffer::Framebuffer;
use super::math::{Projection, ScreenPoint, Vec3};
use super::types::Color;

/// Lines draw this much nearer than the faces they outline
pub const LINE_DEPTH_BIAS: f64 = 0.01;
/// Triangles with a smaller absolute signed area are skipped
const DEGENERATE_AREA: f64 = 1e-8;

/// Draw a depth-tested line between two camera-space points.
///
/// If either endpoint falls outside the projection window the whole line
/// is skipped; lines are not clipped.
pub fn draw_line(fb: &mut Framebuffer, proj: &Projection, p0: Vec3, p1: Vec3, color: Color) {
    let (Some(a), Some(b)) = (proj.project(p0), proj.project(p1)) else {
        return;
    };

    let (x0, y0) = (a.x as i32, a.y as i32);
    let (x1, y1) = (b.x as i32, b.y as i32);

    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx - dy;

    let steps = dx.max(dy);
    let dz = if steps > 0 { (b.depth - a.depth) / steps as f64 } else { 0.0 };

    let mut x = x0;
    let mut y = y0;
    let mut z = a.depth;

    loop {
        fb.put(x, y, color, z + LINE_DEPTH_BIAS);

        if x == x1 && y == y1 {
            break;
        }

        let e2 = err * 2;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
        z += dz;
    }
}

/// Project and fill a triangle with one flat shade.
///
/// Skipped entirely when any vertex falls outside the projection window.
pub fn fill_triangle(
    fb: &mut Framebuffer,
    proj: &Projection,
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
    color: Color,
    brightness: f64,
) {
    let (Some(p0), Some(p1), Some(p2)) = (proj.project(v0), proj.project(v1), proj.project(v2)) else {
        return;
    };
    rasterize_triangle(fb, [p0, p1, p2], color.shade(brightness));
}

/// Fill an already projected triangle, interpolating depth per sub-pixel.
///
/// Both windings are accepted: a sub-pixel is inside when all three edge
/// functions share the sign of the signed area.
pub fn rasterize_triangle(fb: &mut Framebuffer, tri: [ScreenPoint; 3], color: Color) {
    let [p0, p1, p2] = tri;

    let area = (p1.x - p0.x) * (p2.y - p0.y) - (p1.y - p0.y) * (p2.x - p0.x);
    if area.abs() < DEGENERATE_AREA {
        return;
    }

    // Bounding box
    let min_x = (p0.x.min(p1.x).min(p2.x).floor() as i32).max(0);
    let max_x = (p0.x.max(p1.x).max(p2.x).ceil() as i32).min(fb.width() as i32 - 1);
    let min_y = (p0.y.min(p1.y).min(p2.y).floor() as i32).max(0);
    let max_y = (p0.y.max(p1.y).max(p2.y).ceil() as i32).min(fb.subpixel_height() as i32 - 1);

    let inv_area = 1.0 / area;

    for y in min_y..=max_y {
        let py = y as f64 + 0.5;
        for x in min_x..=max_x {
            let px = x as f64 + 0.5;

            let w0 = (p2.x - p1.x) * (py - p1.y) - (p2.y - p1.y) * (px - p1.x);
            let w1 = (p0.x - p2.x) * (py - p2.y) - (p0.y - p2.y) * (px - p2.x);
            let w2 = (p1.x - p0.x) * (py - p0.y) - (p1.y - p0.y) * (px - p0.x);

            let inside = if area > 0.0 {
                w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0
            } else {
                w0 <= 0.0 && w1 <= 0.0 && w2 <= 0.0
            };
            if !inside {
                continue;
            }

            let z = (w0 * p0.depth + w1 * p1.depth + w2 * p2.depth) * inv_area;
            fb.put(x, y, color, z);
        }
    }
}
